use crate::domain::models::auth::{AdminProfile, Claims};
use crate::error::AppError;
use crate::config::Config;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use jsonwebtoken::{encode, EncodingKey, Header, Algorithm};
use uuid::Uuid;
use chrono::{Utc, Duration};
use rand::{distributions::Alphanumeric, Rng};
use tracing::error;

pub const ACCESS_COOKIE: &str = "access_token";
pub const ACCESS_TOKEN_AUDIENCE: &str = "events-admin-console";
pub const ACCESS_TOKEN_MINUTES: i64 = 60;
const CSRF_TOKEN_LEN: usize = 32;

/// Signed session handed to the browser: the JWT goes into the cookie, the
/// CSRF token into the response body.
pub struct IssuedSession {
    pub access_token: String,
    pub csrf_token: String,
}

pub struct AuthService {
    admin_email: String,
    admin_password_hash: String,
    issuer: String,
    encoding_key: EncodingKey,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        let encoding_key = EncodingKey::from_ed_pem(config.jwt_secret_key.as_bytes())
            .expect("Invalid JWT Private Key PEM");

        Self {
            admin_email: config.admin_email.trim().to_lowercase(),
            admin_password_hash: config.admin_password_hash.clone(),
            issuer: config.auth_issuer.clone(),
            encoding_key,
        }
    }

    /// Checks the single configured admin identity. Email is compared trimmed
    /// and case-insensitively.
    pub fn verify_credentials(&self, email: &str, password: &str) -> Result<AdminProfile, AppError> {
        if !email.trim().eq_ignore_ascii_case(&self.admin_email) {
            return Err(AppError::Unauthorized);
        }

        let parsed_hash = PasswordHash::new(&self.admin_password_hash)
            .map_err(|_| AppError::InternalWithMsg("ADMIN_PASSWORD_HASH is not a valid PHC string".into()))?;

        Argon2::default().verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::Unauthorized)?;

        Ok(AdminProfile { email: self.admin_email.clone() })
    }

    pub fn issue_session(&self, admin: &AdminProfile) -> Result<IssuedSession, AppError> {
        let csrf_token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(CSRF_TOKEN_LEN)
            .map(char::from)
            .collect();
        let now = Utc::now();

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: admin.email.clone(),
            aud: ACCESS_TOKEN_AUDIENCE.to_string(),
            exp: (now + Duration::minutes(ACCESS_TOKEN_MINUTES)).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            csrf_token: csrf_token.clone(),
        };

        let access_token = encode(&Header::new(Algorithm::EdDSA), &claims, &self.encoding_key)
            .map_err(|e| {
                error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        Ok(IssuedSession { access_token, csrf_token })
    }
}
