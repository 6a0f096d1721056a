//! Authentication utilities

mod jwt;
mod password;
mod verification;

pub use jwt::{Claims, JwtService, TokenPair, TokenType};
pub use password::{hash_password, validate_password_strength, verify_password};
pub use verification::generate_verification_code;
