pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::ROLE_CLAIM;
pub use errors::JwtError;
pub use handler::JwtHandler;
