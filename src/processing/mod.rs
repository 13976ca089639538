mod encoder;
mod targeter;
mod validation;

pub use targeter::{DEFAULT_MAX_ATTEMPTS, compress};
pub use validation::{validate_input_path, validate_request};
