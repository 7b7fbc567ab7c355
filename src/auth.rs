use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hex-encoded sha-256 digest, the format stored in the
/// `hashed_password` columns.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Constant-time comparison of two hex digests. Timing must not depend on
/// where the digests first differ.
pub fn digests_match(requested: &str, stored: &str) -> bool {
    requested.as_bytes().ct_eq(stored.as_bytes()).into()
}
