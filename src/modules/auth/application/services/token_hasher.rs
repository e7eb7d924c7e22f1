use sha2::{Digest, Sha256};

/// Hex SHA-256 of a token. Refresh and reset tokens are persisted only in this form.
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
