use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{Principal, PrincipalRegistry};
use crate::config::AuthConfig;
use crate::error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Expiry, seconds since the unix epoch (UTC).
    pub exp: i64,
}

/// Signs a token for `username` expiring `ttl` from now (configured TTL if `None`).
pub fn issue(
    username: &str,
    ttl: Option<Duration>,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    issue_at(username, ttl, Utc::now(), config)
}

pub fn issue_at(
    username: &str,
    ttl: Option<Duration>,
    now: DateTime<Utc>,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let expires_at = now + ttl.unwrap_or(config.token_ttl);
    let claims = Claims {
        sub: username.to_owned(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(&config.secret_key),
    )
    .map_err(|e| AuthError::SigningFailure(e.to_string()))
}

fn validation(config: &AuthConfig) -> Validation {
    let mut validation = Validation::new(config.algorithm);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

/// Decodes and checks signature and expiry, returning the raw claims.
pub fn decode_claims(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&config.secret_key),
        &validation(config),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let reason = match e.kind() {
            ErrorKind::ExpiredSignature => "expired",
            ErrorKind::InvalidSignature => "bad_signature",
            ErrorKind::InvalidAlgorithm => "wrong_algorithm",
            ErrorKind::MissingRequiredClaim(_) => "missing_claim",
            _ => "malformed",
        };
        tracing::debug!(reason, "rejected bearer token");
        AuthError::InvalidToken
    })?;

    // The library only rejects `exp < now`; a token expiring this second is already dead.
    if claims.exp <= Utc::now().timestamp() {
        tracing::debug!(reason = "expired", "rejected bearer token");
        return Err(AuthError::InvalidToken);
    }
    Ok(claims)
}

/// Full check: signature, expiry, and that the subject is a known principal.
pub fn verify(token: &str, config: &AuthConfig) -> Result<Principal, AuthError> {
    let claims = decode_claims(token, config)?;
    config.resolve(&claims.sub).ok_or_else(|| {
        tracing::debug!(reason = "unknown_subject", "rejected bearer token");
        AuthError::InvalidToken
    })
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Algorithm;

    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::new("testuser", "$2b$04$unused", b"test_secret_key".to_vec())
    }

    #[test]
    fn issue_then_verify_roundtrip() {
        let config = config();
        let token = issue("testuser", None, &config).unwrap();

        let principal = verify(&token, &config).unwrap();
        assert_eq!(principal.username, "testuser");
    }

    #[test]
    fn claims_carry_subject_and_expiry() {
        let config = config();
        let now = Utc::now();
        let token = issue_at("testuser", Some(Duration::minutes(7)), now, &config).unwrap();

        let mut no_exp = Validation::new(Algorithm::HS256);
        no_exp.validate_exp = false;
        let claims = decode::<Claims>(&token, &DecodingKey::from_secret(b"test_secret_key"), &no_exp)
            .unwrap()
            .claims;

        assert_eq!(claims.sub, "testuser");
        assert_eq!(claims.exp, (now + Duration::minutes(7)).timestamp());
    }

    #[test]
    fn default_ttl_comes_from_config() {
        let config = config().with_token_ttl(Duration::minutes(3));
        let now = Utc::now();
        let token = issue_at("testuser", None, now, &config).unwrap();

        let claims = decode_claims(&token, &config).unwrap();
        assert_eq!(claims.exp, (now + Duration::minutes(3)).timestamp());
    }

    #[test]
    fn tokens_differ_across_instants() {
        let config = config();
        let now = Utc::now();
        let a = issue_at("testuser", None, now, &config).unwrap();
        let b = issue_at("testuser", None, now + Duration::seconds(1), &config).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config();
        let token = issue_at(
            "testuser",
            Some(Duration::seconds(1)),
            Utc::now() - Duration::seconds(2),
            &config,
        )
        .unwrap();

        assert_eq!(verify(&token, &config), Err(AuthError::InvalidToken));
    }

    #[test]
    fn token_expiring_now_is_rejected() {
        let config = config();
        let token = issue_at("testuser", Some(Duration::zero()), Utc::now(), &config).unwrap();

        assert_eq!(verify(&token, &config), Err(AuthError::InvalidToken));
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let other = AuthConfig::new("testuser", "$2b$04$unused", b"another_secret".to_vec());
        let token = issue("testuser", None, &other).unwrap();

        assert_eq!(verify(&token, &config()), Err(AuthError::InvalidToken));
    }

    #[test]
    fn unknown_subject_is_rejected() {
        let config = config();
        let token = issue("mallory", None, &config).unwrap();

        assert!(decode_claims(&token, &config).is_ok());
        assert_eq!(verify(&token, &config), Err(AuthError::InvalidToken));
    }

    #[test]
    fn algorithm_mismatch_is_rejected() {
        let hs512 = config().with_algorithm(Algorithm::HS512);
        let token = issue("testuser", None, &hs512).unwrap();

        assert_eq!(verify(&token, &config()), Err(AuthError::InvalidToken));
    }

    #[test]
    fn missing_subject_is_rejected() {
        #[derive(Serialize)]
        struct ExpOnly {
            exp: i64,
        }
        let config = config();
        let token = encode(
            &Header::default(),
            &ExpOnly {
                exp: (Utc::now() + Duration::minutes(5)).timestamp(),
            },
            &EncodingKey::from_secret(&config.secret_key),
        )
        .unwrap();

        assert_eq!(verify(&token, &config), Err(AuthError::InvalidToken));
    }

    #[test]
    fn garbage_is_rejected() {
        let config = config();
        assert_eq!(verify("not.a.jwt", &config), Err(AuthError::InvalidToken));
        assert_eq!(verify("", &config), Err(AuthError::InvalidToken));
    }
}
