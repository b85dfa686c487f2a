use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::{SessionClaims, SessionUser};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use rand::Rng;

use crate::shared::config::Config;

const SESSION_LIFETIME_HOURS: i64 = 24;

static SESSION_SECRET: OnceCell<String> = OnceCell::new();

/// Install the session signing secret: the configured one, or a fresh
/// random secret when the config leaves it unset. A generated secret
/// invalidates existing sessions on restart.
pub fn init_session_secret(config: &Config) -> Result<()> {
    let secret = match &config.session.secret {
        Some(secret) => secret.clone(),
        None => {
            tracing::warn!("No session secret configured, generating an ephemeral one");
            generate_session_secret()
        }
    };
    SESSION_SECRET
        .set(secret)
        .map_err(|_| anyhow::anyhow!("Session secret already initialized"))
}

fn get_session_secret() -> &'static str {
    SESSION_SECRET
        .get()
        .expect("Session secret has not been initialized")
}

/// Sign a session token for a logged-in user. The store-issued user token
/// rides inside the claims so later requests could act on the user's own
/// behalf.
pub fn issue_session_token(user: &SessionUser, store_token: &str) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::hours(SESSION_LIFETIME_HOURS)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = SessionClaims {
        sub: user.id.clone(),
        email: user.email.clone(),
        name: user.name.clone(),
        store_token: store_token.to_string(),
        exp,
        iat,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_session_secret().as_bytes()),
    )
    .context("Failed to encode session token")
}

/// Validate a session token and extract its claims.
pub fn validate_session_token(token: &str) -> Result<SessionClaims> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(get_session_secret().as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode session token")?;

    Ok(token_data.claims)
}

/// Generate a cryptographically secure signing secret (256 bits).
fn generate_session_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::Algorithm;

    fn sample_user() -> SessionUser {
        SessionUser {
            id: "u1".into(),
            email: "staff@example.com".into(),
            name: "Staff".into(),
        }
    }

    fn encode_with(secret: &str, claims: &SessionClaims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn decode_with(secret: &str, token: &str) -> Result<SessionClaims> {
        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }

    #[test]
    fn token_roundtrip_preserves_the_claims() {
        let user = sample_user();
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            store_token: "store-token".into(),
            exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode_with("secret-a", &claims);
        let decoded = decode_with("secret-a", &token).unwrap();
        assert_eq!(decoded.sub, "u1");
        assert_eq!(decoded.email, "staff@example.com");
        assert_eq!(decoded.store_token, "store-token");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let user = sample_user();
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id.clone(),
            email: user.email,
            name: user.name,
            store_token: String::new(),
            exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode_with("secret-a", &claims);
        assert!(decode_with("secret-b", &token).is_err());
    }

    #[test]
    fn generated_secrets_are_distinct() {
        assert_ne!(generate_session_secret(), generate_session_secret());
    }
}
