use crate::error::{AppError, Result};
use crate::models::admin::Admin;
use crate::repositories::admin as admin_repo;
use crate::state::AppState;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use rand::{rngs::OsRng, RngCore};
use deadpool_postgres::Pool;
use uuid::Uuid;
use zeroize::Zeroize;

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 3;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 6;

/// Hashes a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the hashed password.
fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; 16];
    OsRng.fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Internal(format!("Salt encoding error: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Internal(format!("Argon2 params: {}", e)))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Internal(format!("Argon2 hash error: {}", e)))?
        .to_string();

    password_bytes.zeroize();
    tracing::debug!("Password hashed successfully with Argon2");
    Ok(password_hash)
}

/// Verifies a password against a hash.
///
/// # Arguments
///
/// * `password` - The password to verify.
/// * `hash` - The hash to verify against.
///
/// # Returns
///
/// A `Result` containing `true` if the password is valid, `false` otherwise.
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Hash parse error: {}", e)))?;
    let argon2 = Argon2::default();
    let result = argon2
        .verify_password(&password_bytes, &parsed_hash)
        .is_ok();

    password_bytes.zeroize();
    tracing::debug!("Password verification completed");
    Ok(result)
}

/// Authenticates an admin by email and password.
///
/// Unknown email and wrong password fail with the same message, so the
/// response never reveals which accounts exist.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `email` - The admin's email address.
/// * `password` - The admin's password.
///
/// # Returns
///
/// A `Result` containing the authenticated `Admin`.
pub async fn authenticate_admin(db: &Pool, email: &str, password: &str) -> Result<Admin> {
    tracing::debug!("🔐 Authenticating admin: {}", email);

    let admin = admin_repo::find_by_email(db, email)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

    if !verify_password(password, &admin.password)? {
        return Err(AppError::Authentication(
            "Invalid email or password".to_string(),
        ));
    }

    tracing::info!("✅ Admin authenticated: {}", admin.id);
    Ok(admin)
}

/// Creates the bootstrap admin account if no admin exists yet.
///
/// Runs once per process start; a non-empty admins table makes this a
/// no-op, so the configured credentials never overwrite a live account.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// A `Result<()>`.
pub async fn ensure_bootstrap_admin(state: &AppState) -> Result<()> {
    let count = admin_repo::count_admins(&state.db).await?;
    if count > 0 {
        tracing::debug!("Admin account present ({} rows), skipping bootstrap", count);
        return Ok(());
    }

    let password_hash = hash_password(&state.config.admin_password)?;
    let admin = admin_repo::create_admin(
        &state.db,
        Uuid::new_v4(),
        &state.config.admin_email,
        &password_hash,
    )
    .await?;

    tracing::info!("✅ Bootstrap admin created: {}", admin.email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }
}
