use rand::Rng;
use secrecy::ExposeSecret;
use serde::Serialize;
use sqlx::PgPool;
use time::{Duration, OffsetDateTime};
use tracing::{error, info};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::db::models::{LoginRequest, SignupRequest, UserRole};
use crate::db::repositories::{
    OtpRepository, OwnerRepository, PasswordResetRepository, TenantRepository, UserRepository,
};
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};
use crate::notify::{Mailer, OutboundEmail};

use super::password;
use super::token;

const OTP_TTL: Duration = Duration::minutes(10);
const RESET_TOKEN_TTL: Duration = Duration::minutes(30);

/// Issued session plus the principal facts the client displays.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
    pub role: UserRole,
    pub name: String,
}

/// Uniformly random 6-digit numeric code.
fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

/// Generate and store a signup verification code for the email, then
/// dispatch it. Reissue invalidates any previous code immediately.
pub async fn request_otp(pool: &PgPool, mailer: &dyn Mailer, email: &str) -> AppResult<()> {
    if UserRepository::exists_by_email(pool, email).await? {
        return Err(AppError::Conflict(
            "Email already registered. Please Login.".into(),
        ));
    }

    let otp = generate_otp();
    let expires_at = OffsetDateTime::now_utc() + OTP_TTL;
    OtpRepository::upsert(pool, email, &otp, expires_at).await?;

    let email_out = OutboundEmail::new(email, "PG-Manager Verification Code", "emails/otp")
        .with("otp", otp)
        .with("expires_minutes", "10");
    if !mailer.send(&email_out) {
        error!(to = email, "failed to send OTP email");
    }

    Ok(())
}

/// Verify the OTP and create the account. Owner signup creates the
/// user and owner profile atomically; tenant signup requires a prior
/// invitation and activates it.
pub async fn signup(
    pool: &PgPool,
    auth: &AuthConfig,
    req: &SignupRequest,
) -> AppResult<AuthResponse> {
    // 1. Verify OTP before touching anything else.
    let record = OtpRepository::find(pool, &req.email)
        .await?
        .ok_or_else(|| {
            AppError::Authentication("OTP not found. Please request a new one.".into())
        })?;

    if record.otp_code != req.otp {
        return Err(AppError::Authentication(
            "Invalid OTP. Please try again.".into(),
        ));
    }
    if OffsetDateTime::now_utc() > record.expires_at {
        return Err(AppError::ExpiredToken(
            "OTP has expired. Please request a new one.".into(),
        ));
    }

    if UserRepository::exists_by_email(pool, &req.email).await? {
        return Err(AppError::Conflict(
            "Email already registered. Please Login.".into(),
        ));
    }

    let password_hash = password::hash_password(req.password.expose_secret())?;

    match req.role {
        UserRole::Owner => {
            let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

            let user =
                UserRepository::create(&mut tx, &req.email, &password_hash, UserRole::Owner)
                    .await?;
            OwnerRepository::create(&mut tx, user.id, &req.name, req.phone_number.as_deref())
                .await?;
            OtpRepository::delete(&mut tx, &req.email).await?;

            tx.commit().await.map_err(DatabaseError::from)?;

            info!(user_id = %user.id, "owner account created");
            let token = token::issue_session_token(user.id, UserRole::Owner, &req.name, auth)?;
            Ok(AuthResponse {
                token,
                user_id: user.id,
                role: UserRole::Owner,
                name: req.name.clone(),
            })
        }
        UserRole::Tenant => {
            let invitation = TenantRepository::find_invitation_by_email(pool, &req.email)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(
                        "You are not associated with any PG. Please verify your email or \
                         contact your PG Owner."
                            .into(),
                    )
                })?;

            if invitation.onboarding_status == crate::db::models::OnboardingStatus::Draft {
                return Err(AppError::StateConflict(
                    "Your admission is still in Draft. Please ask your Owner to finalize it."
                        .into(),
                ));
            }

            let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

            let user =
                UserRepository::create(&mut tx, &req.email, &password_hash, UserRole::Tenant)
                    .await?;
            TenantRepository::link_user(&mut tx, invitation.id, user.id).await?;
            OtpRepository::delete(&mut tx, &req.email).await?;

            tx.commit().await.map_err(DatabaseError::from)?;

            info!(user_id = %user.id, tenant_id = %invitation.id, "tenant account linked");
            let name = invitation.full_name.clone();
            let token = token::issue_session_token(user.id, UserRole::Tenant, &name, auth)?;
            Ok(AuthResponse {
                token,
                user_id: user.id,
                role: UserRole::Tenant,
                name,
            })
        }
        UserRole::Admin => Err(AppError::Validation(
            "Admin accounts cannot be self-registered".into(),
        )),
    }
}

pub async fn login(pool: &PgPool, auth: &AuthConfig, req: &LoginRequest) -> AppResult<AuthResponse> {
    let user = UserRepository::find_by_email(pool, &req.email)
        .await?
        .ok_or_else(|| {
            AppError::Authentication("User does not exist. Please Sign Up first.".into())
        })?;

    if !password::verify_password(req.password.expose_secret(), &user.password_hash)? {
        return Err(AppError::Authentication(
            "Incorrect password. Please try again.".into(),
        ));
    }

    let name = match user.role {
        UserRole::Owner => OwnerRepository::find_by_user_id(pool, user.id)
            .await?
            .map(|o| o.full_name),
        UserRole::Tenant => TenantRepository::find_by_user_id(pool, user.id)
            .await?
            .map(|t| t.full_name),
        UserRole::Admin => None,
    }
    .unwrap_or_else(|| user.email.clone());

    let token = token::issue_session_token(user.id, user.role, &name, auth)?;
    Ok(AuthResponse {
        token,
        user_id: user.id,
        role: user.role,
        name,
    })
}

/// Always reports success so callers cannot probe which emails have
/// accounts; unknown emails are a silent no-op.
pub async fn request_password_reset(
    pool: &PgPool,
    mailer: &dyn Mailer,
    email: &str,
) -> AppResult<()> {
    if !UserRepository::exists_by_email(pool, email).await? {
        info!("password reset requested for unknown email");
        return Ok(());
    }

    let token = token::generate_reset_token();
    let expires_at = OffsetDateTime::now_utc() + RESET_TOKEN_TTL;
    PasswordResetRepository::upsert(pool, email, &token, expires_at).await?;

    let email_out = OutboundEmail::new(email, "Reset your PG-Manager password", "emails/reset")
        .with("token", token)
        .with("expires_minutes", "30");
    if !mailer.send(&email_out) {
        error!(to = email, "failed to send password reset email");
    }

    Ok(())
}

pub async fn reset_password(pool: &PgPool, token: &str, new_password: &str) -> AppResult<()> {
    let record = PasswordResetRepository::find_valid(pool, token)
        .await?
        .ok_or_else(|| AppError::ExpiredToken("Invalid or expired reset link".into()))?;

    let password_hash = password::hash_password(new_password)?;

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;
    let updated =
        UserRepository::update_password_by_email(&mut tx, &record.email, &password_hash).await?;
    if updated == 0 {
        return Err(AppError::NotFound("Account no longer exists".into()));
    }
    PasswordResetRepository::delete(&mut tx, &record.email).await?;
    tx.commit().await.map_err(DatabaseError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
            let n: u32 = otp.parse().unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn otp_ttl_is_ten_minutes() {
        assert_eq!(OTP_TTL, Duration::minutes(10));
    }

    #[test]
    fn reset_token_ttl_is_thirty_minutes() {
        assert_eq!(RESET_TOKEN_TTL, Duration::minutes(30));
    }
}
