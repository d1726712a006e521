use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Argon2 PHC string for `plain`, salted from the OS RNG.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    match Argon2::default().hash_password(plain.as_bytes(), &salt) {
        Ok(phc) => Ok(phc.to_string()),
        Err(e) => {
            error!(error = %e, "password hashing failed");
            Err(anyhow::anyhow!("password hashing failed: {e}"))
        }
    }
}

/// `Ok(false)` on a wrong password, `Err` only when `stored` is not a PHC string.
/// Accounts that never set a password store an empty hash and always land in `Err`.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let phc = PasswordHash::new(stored)
        .map_err(|e| anyhow::anyhow!("stored password hash unreadable: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &phc)
        .is_ok())
}
