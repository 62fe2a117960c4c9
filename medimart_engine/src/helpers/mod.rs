//! Small support functions shared across the engine.

use blake2::{Blake2b512, Digest};
use rand::RngCore;

/// Hashes a plaintext password with a random salt. The result is stored as
/// `salt$digest`, both hex-encoded.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt = hex_encode(&salt);
    let digest = salted_digest(&salt, password);
    format!("{salt}${digest}")
}

/// Checks a plaintext password against a stored `salt$digest` hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    salted_digest(salt, password) == digest
}

fn salted_digest(salt: &str, password: &str) -> String {
    let mut hasher = Blake2b512::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex_encode(&hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
