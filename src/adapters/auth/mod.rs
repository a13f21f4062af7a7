//! Authentication adapters implementing `SessionValidator`.
//!
//! - `jwt` - HS256 tokens signed with the configured shared secret
//! - `mock` - fixed tokens for tests

mod jwt;
mod mock;

pub use jwt::JwtSessionValidator;
pub use mock::MockSessionValidator;
