//! Argon2id password digests.
//!
//! Digests are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so
//! verification reads the salt and cost back out of the stored value.

use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::AppError;

/// Memory cost in KiB.
pub const PASSWORD_MEMORY_KIB: u32 = 19 * 1024;
pub const PASSWORD_ITERATIONS: u32 = 2;
pub const PASSWORD_PARALLELISM: u32 = 1;

fn hasher() -> Result<Argon2<'static>, AppError> {
    let params = Params::new(
        PASSWORD_MEMORY_KIB,
        PASSWORD_ITERATIONS,
        PASSWORD_PARALLELISM,
        None,
    )
    .map_err(|e| AppError::internal(format!("invalid argon2 params: {e}")))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash `plaintext` with a fresh random salt.
///
/// CPU heavy: call through `web::block` from request handlers.
pub fn hash_password(plaintext: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

/// Constant-time check of `plaintext` against a stored digest.
///
/// A digest that cannot be parsed never matches.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

/// Digest checked when the account does not exist, so unknown emails cost
/// the same as wrong passwords.
pub fn dummy_digest() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();

    DUMMY
        .get_or_init(|| hash_password("devconnect-dummy-password").unwrap_or_default())
        .as_str()
}
