// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// Token lifetime
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 72;
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 5;

// Request limits
pub const DEFAULT_MAX_BODY_BYTES: u64 = 16 * 1024;
pub const MAX_TOKEN_LENGTH: usize = 4096;

// Minimum time spent answering an authentication attempt
pub const DEFAULT_AUTH_MIN_MILLIS: u64 = 100;

// Route segments
pub const REGISTER_PATH: &str = "register";
pub const LOGIN_PATH: &str = "login";
pub const PROFILE_PATH: &str = "profile";
pub const HEALTH_PATH: &str = "health";
