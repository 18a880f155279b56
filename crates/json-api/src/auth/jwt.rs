//! Bearer token verification.
//!
//! Tokens are issued by the external identity provider and signed with a
//! shared HS256 secret. The subject claim carries the actor uuid; tenant
//! membership is not in the token and is resolved against the directory.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use uuid::Uuid;

/// Claims carried by an identity provider token.
#[derive(Debug, Deserialize)]
pub(super) struct Claims {
    /// The authenticated actor's uuid.
    pub(super) sub: Uuid,

    /// Email as asserted by the identity provider.
    #[serde(default)]
    pub(super) email: Option<String>,
}

/// Verify signature and expiry, and extract the claims.
pub(super) fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode, errors::Error};
    use serde::Serialize;
    use testresult::TestResult;

    use super::*;

    const SECRET: &str = "test-secret";

    // 2100-01-01T00:00:00Z
    const FAR_FUTURE: i64 = 4_102_444_800;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    }

    fn sign(secret: &str, sub: &str, exp: i64, email: Option<&str>) -> Result<String, Error> {
        encode(
            &Header::new(Algorithm::HS256),
            &TestClaims {
                sub: sub.to_string(),
                exp,
                email: email.map(str::to_string),
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    #[test]
    fn verify_accepts_valid_token() -> TestResult {
        let actor = Uuid::now_v7();
        let token = sign(SECRET, &actor.to_string(), FAR_FUTURE, None)?;

        let claims = verify(&token, SECRET)?;

        assert_eq!(claims.sub, actor);
        assert_eq!(claims.email, None);

        Ok(())
    }

    #[test]
    fn verify_extracts_email_claim() -> TestResult {
        let actor = Uuid::now_v7();
        let token = sign(
            SECRET,
            &actor.to_string(),
            FAR_FUTURE,
            Some("owner@example.com"),
        )?;

        let claims = verify(&token, SECRET)?;

        assert_eq!(claims.email.as_deref(), Some("owner@example.com"));

        Ok(())
    }

    #[test]
    fn verify_rejects_wrong_secret() -> TestResult {
        let token = sign("other-secret", &Uuid::now_v7().to_string(), FAR_FUTURE, None)?;

        assert!(
            verify(&token, SECRET).is_err(),
            "token signed with another secret must fail"
        );

        Ok(())
    }

    #[test]
    fn verify_rejects_expired_token() -> TestResult {
        let token = sign(SECRET, &Uuid::now_v7().to_string(), 1, None)?;

        assert!(verify(&token, SECRET).is_err(), "expired token must fail");

        Ok(())
    }

    #[test]
    fn verify_rejects_non_uuid_subject() -> TestResult {
        let token = sign(SECRET, "not-a-uuid", FAR_FUTURE, None)?;

        assert!(
            verify(&token, SECRET).is_err(),
            "non-uuid subject must fail"
        );

        Ok(())
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(
            verify("definitely.not.a-jwt", SECRET).is_err(),
            "malformed token must fail"
        );
    }
}
