//! Request handlers for the server endpoints

pub mod auth;
pub mod rejection;

pub use auth::{handle_login, handle_profile, handle_register, LoginRequest, LoginResponse, RegisterRequest};
pub use rejection::{error_response, handle_rejection, ErrorBody};
