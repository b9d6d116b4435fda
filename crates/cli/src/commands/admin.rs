//! Admin account management commands.

use secrecy::SecretString;

use greengrocer_admin::db::{AdminUserRepository, create_pool};
use greengrocer_admin::services::auth::hash_password;
use greengrocer_core::Email;

/// Create a new admin account.
///
/// # Errors
///
/// Returns an error if the environment is missing a database URL, the email
/// is invalid, or the insert fails (e.g. duplicate email).
pub async fn create_user(
    email: &str,
    name: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "ADMIN_DATABASE_URL is not set")?;

    let email = Email::parse(email)?;
    let password_hash = hash_password(password)?;

    let pool = create_pool(&database_url).await?;
    let admin = AdminUserRepository::new(&pool)
        .create(name, &email, &password_hash)
        .await?;

    tracing::info!(admin_id = %admin.id, email = %admin.email, "admin account created");
    Ok(())
}
