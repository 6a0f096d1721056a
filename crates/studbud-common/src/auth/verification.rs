//! Verification code generation

use rand::Rng;

/// Generate a numeric verification code of the given length
///
/// Codes are compared as strings, so leading zeros are preserved.
#[must_use]
pub fn generate_verification_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length).map(|_| rng.gen_range(0..10).to_string()).collect()
}
