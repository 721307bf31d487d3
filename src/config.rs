use chrono_tz::Tz;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub events_collection: String,
    pub civil_timezone: Tz,
    pub sales_tax_rate: f64,
    pub admin_email: String,
    pub admin_password_hash: String, // Argon2 PHC string
    pub jwt_secret_key: String, // Private key (PEM)
    pub jwt_public_key: String, // Public key (PEM)
    pub auth_issuer: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            events_collection: env::var("EVENTS_COLLECTION").unwrap_or_else(|_| "Events".to_string()),
            civil_timezone: env::var("CIVIL_TIMEZONE")
                .unwrap_or_else(|_| "America/Los_Angeles".to_string())
                .parse()
                .expect("CIVIL_TIMEZONE must be an IANA timezone name"),
            sales_tax_rate: env::var("SALES_TAX_RATE")
                .unwrap_or_else(|_| "0.085".to_string())
                .parse()
                .expect("SALES_TAX_RATE must be a decimal fraction"),
            admin_email: env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set"),
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH").expect("ADMIN_PASSWORD_HASH must be set (Argon2 hash)"),
            jwt_secret_key: env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set (Ed25519 Private Key)"),
            jwt_public_key: env::var("JWT_PUBLIC_KEY").expect("JWT_PUBLIC_KEY must be set (Ed25519 Public Key)"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://events-admin.local".to_string()),
        }
    }
}
