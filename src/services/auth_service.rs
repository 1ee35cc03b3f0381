use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::{
    config::AppConfig,
    dto::auth::{Claims, LoginRequest, LoginResponse},
    entity::admin_users::{self, ADMIN_ID, ActiveModel as AdminActive, Entity as AdminUsers},
    error::{AppError, AppResult},
    middleware::auth::ADMIN_ROLE,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(password_hash)
}

fn verify_password(password_hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(config: &AppConfig, admin_id: i32, username: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(config.jwt_expires_in)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: admin_id.to_string(),
        role: ADMIN_ROLE.to_string(),
        username: username.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(config: &AppConfig, token: &str) -> jsonwebtoken::errors::Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid username or password".into())
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    let username = payload
        .username
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
    let password = payload.password.filter(|p| !p.is_empty());
    let (username, password) = match (username, password) {
        (Some(u), Some(p)) => (u, p),
        _ => return Err(AppError::bad_request("username and password required")),
    };

    let admin = AdminUsers::find_by_id(ADMIN_ID)
        .filter(admin_users::Column::IsActive.eq(true))
        .one(&state.orm)
        .await?;
    let admin = match admin {
        Some(a) => a,
        None => {
            tracing::warn!("login attempt without an active admin");
            return Err(invalid_credentials());
        }
    };

    if admin.username != username {
        tracing::warn!(%username, "login with unknown username");
        return Err(invalid_credentials());
    }

    if !verify_password(&admin.password_hash, &password)? {
        tracing::warn!(%username, "login with wrong password");
        return Err(invalid_credentials());
    }

    let token = issue_token(&state.config, admin.id, &admin.username)?;
    tracing::info!(admin_id = admin.id, "admin logged in");

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse { token },
        Some(Meta::empty()),
    ))
}

/// Creates the singleton admin from configuration. Outside production the
/// stored credentials follow the environment on every boot.
pub async fn ensure_default_admin(orm: &DatabaseConnection, config: &AppConfig) -> AppResult<()> {
    let existing = AdminUsers::find_by_id(ADMIN_ID).one(orm).await?;
    match existing {
        None => {
            AdminActive {
                id: Set(ADMIN_ID),
                username: Set(config.admin_username.clone()),
                password_hash: Set(hash_password(&config.admin_password)?),
                is_active: Set(true),
                created_at: Set(Utc::now().into()),
            }
            .insert(orm)
            .await?;
            tracing::info!(username = %config.admin_username, "admin user created");
        }
        Some(admin) if !config.is_production() => {
            let mut active: AdminActive = admin.into();
            active.username = Set(config.admin_username.clone());
            active.password_hash = Set(hash_password(&config.admin_password)?);
            active.is_active = Set(true);
            active.update(orm).await?;
            tracing::debug!(username = %config.admin_username, "admin credentials synced");
        }
        Some(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::Duration;

    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: "test-secret".into(),
            jwt_expires_in: Duration::hours(1),
            admin_username: "admin".into(),
            admin_password: "admin123".into(),
            frontend_origins: vec![],
            uploads_dir: PathBuf::from("uploads"),
            images_dir: PathBuf::from("images"),
            app_env: "test".into(),
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let config = config();
        let token = issue_token(&config, ADMIN_ID, "admin").unwrap();
        let claims = decode_token(&config, &token).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.username, "admin");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let config = config();
        let token = issue_token(&config, ADMIN_ID, "admin").unwrap();
        let other = AppConfig {
            jwt_secret: "another".into(),
            ..config
        };
        assert!(decode_token(&other, &token).is_err());
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("s3cret").unwrap();
        assert!(verify_password(&hash, "s3cret").unwrap());
        assert!(!verify_password(&hash, "wrong").unwrap());
    }
}
