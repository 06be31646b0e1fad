//! Issuance and verification of the stateless access credential.
//!
//! A credential is an HS256 JWT carrying a fixed `app` claim and an `exp`
//! timestamp. It is valid iff the signature matches the configured secret and
//! `exp` has not passed. Nothing is stored server side.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use service_core::error::{AppError, AuthFailure};

/// Value of the `app` claim embedded in every credential.
pub const CREDENTIAL_AUDIENCE: &str = "tshawytscha-ai";

/// Credential lifetime.
pub const CREDENTIAL_TTL_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialClaims {
    /// Issuer-defined audience. Not checked on verification.
    pub app: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    secret: Secret<String>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: Secret<String>) -> Self {
        Self {
            secret,
            ttl: Duration::days(CREDENTIAL_TTL_DAYS),
        }
    }

    /// Whether a non-empty signing secret is configured.
    pub fn is_configured(&self) -> bool {
        !self.secret.expose_secret().is_empty()
    }

    /// Issue a credential expiring one TTL from now.
    pub fn issue(&self) -> Result<String, AppError> {
        self.issue_at(Utc::now())
    }

    /// Issue a credential as if the current time were `now`.
    pub fn issue_at(&self, now: DateTime<Utc>) -> Result<String, AppError> {
        if !self.is_configured() {
            return Err(AppError::SigningError(anyhow::anyhow!(
                "signing secret is empty"
            )));
        }

        let claims = CredentialClaims {
            app: CREDENTIAL_AUDIENCE.to_string(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| AppError::SigningError(anyhow::anyhow!("Failed to encode credential: {}", e)))
    }

    /// Check signature and expiry.
    pub fn verify(&self, token: &str) -> Result<CredentialClaims, AppError> {
        // An empty key would accept tokens signed with an empty key.
        if !self.is_configured() {
            return Err(AppError::Unauthorized(AuthFailure::Invalid));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<CredentialClaims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Credential rejected");
            AppError::Unauthorized(AuthFailure::Invalid)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(Secret::new(secret.to_string()))
    }

    #[test]
    fn issued_credential_verifies() {
        let tokens = service("test-secret");
        let token = tokens.issue().unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.app, CREDENTIAL_AUDIENCE);
    }

    #[test]
    fn expiry_is_thirty_days_out() {
        let tokens = service("test-secret");
        let now = Utc::now();
        let token = tokens.issue_at(now).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.exp, (now + Duration::days(30)).timestamp());
    }

    #[test]
    fn credential_from_other_secret_is_rejected() {
        let token = service("someone-else").issue().unwrap();

        let err = service("test-secret").verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(AuthFailure::Invalid)));
    }

    #[test]
    fn expired_credential_is_rejected() {
        let tokens = service("test-secret");
        let token = tokens
            .issue_at(Utc::now() - Duration::days(CREDENTIAL_TTL_DAYS + 1))
            .unwrap();

        let err = tokens.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(AuthFailure::Invalid)));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = service("test-secret").verify("not.a.jwt").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(AuthFailure::Invalid)));
    }

    #[test]
    fn empty_secret_cannot_sign() {
        let err = service("").issue().unwrap_err();
        assert!(matches!(err, AppError::SigningError(_)));
    }

    #[test]
    fn empty_secret_cannot_verify() {
        let forged = encode(
            &Header::new(Algorithm::HS256),
            &CredentialClaims {
                app: CREDENTIAL_AUDIENCE.to_string(),
                exp: (Utc::now() + Duration::days(1)).timestamp(),
            },
            &EncodingKey::from_secret(b""),
        )
        .unwrap();

        assert!(service("").verify(&forged).is_err());
    }

    #[test]
    fn audience_claim_is_not_checked() {
        let tokens = service("test-secret");
        let token = encode(
            &Header::new(Algorithm::HS256),
            &CredentialClaims {
                app: "some-other-app".to_string(),
                exp: (Utc::now() + Duration::hours(1)).timestamp(),
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(tokens.verify(&token).is_ok());
    }
}
