//! Authentication and authorization module

pub mod gate;
pub mod identity;
pub mod token;

// Re-export main components
pub use gate::{authorized, AuthorizationGate, GateRejection, Verified};
pub use identity::{Identity, Profile};
pub use token::{extract_bearer_token, Claims, IssuedToken, TokenIssuer};
