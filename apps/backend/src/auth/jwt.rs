use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

pub use crate::auth::claims::Claims;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Why a token was refused. Only ever logged; clients see one generic body.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not verify")]
    BadSignature,
    #[error("token has expired")]
    Expired,
}

impl TokenError {
    /// Stable value for the `reason` log field.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed_token",
            TokenError::BadSignature => "invalid_signature",
            TokenError::Expired => "token_expired",
        }
    }
}

/// Mint a token for `user_id` valid from `now` for `ttl`.
///
/// A zero or negative `ttl` is accepted and produces a token that is already
/// expired.
pub fn mint_token(
    user_id: &str,
    ttl: Duration,
    now: OffsetDateTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now.unix_timestamp();
    let exp = iat.saturating_add(ttl.whole_seconds());

    let claims = Claims {
        sub: user_id.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Mint a token with the configured lifetime, starting now.
pub fn mint_access_token(user_id: &str, security: &SecurityConfig) -> Result<String, AppError> {
    mint_token(
        user_id,
        security.token_ttl,
        OffsetDateTime::now_utc(),
        security,
    )
}

/// Verify `token` as of `now` and return its claims.
///
/// The algorithm is pinned to the configured one and expiry is checked here
/// without leeway: a token is expired once `now >= exp`.
pub fn verify_token(
    token: &str,
    now: OffsetDateTime,
    security: &SecurityConfig,
) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        _ if header_and_claims_decode(token) => TokenError::BadSignature,
        _ => TokenError::Malformed,
    })?;

    if now.unix_timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// Verify `token` against the current time.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    verify_token(token, OffsetDateTime::now_utc(), security)
}

// A token whose header and claims are well formed failed on its signature
// segment. Everything after the second dot is that segment, so stray dots
// or non-base64 bytes in it still count as a bad signature.
fn header_and_claims_decode(token: &str) -> bool {
    let mut parts = token.splitn(3, '.');
    let (Some(header), Some(payload), Some(_)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    segment_decodes::<Header>(header) && segment_decodes::<Claims>(payload)
}

fn segment_decodes<T: DeserializeOwned>(segment: &str) -> bool {
    URL_SAFE_NO_PAD
        .decode(segment)
        .ok()
        .and_then(|bytes| serde_json::from_slice::<T>(&bytes).ok())
        .is_some()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use time::{Duration, OffsetDateTime};

    use super::{mint_token, verify_access_token, verify_token, TokenError};
    use crate::state::security_config::SecurityConfig;

    fn security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    fn replace_char(token: &str, idx: usize) -> String {
        let mut chars: Vec<char> = token.chars().collect();
        chars[idx] = if chars[idx] == 'A' { 'B' } else { 'A' };
        chars.into_iter().collect()
    }

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = security();
        let now = OffsetDateTime::now_utc();

        let token = mint_token("user-roundtrip-123", Duration::hours(1), now, &security).unwrap();
        let claims = verify_token(&token, now, &security).unwrap();

        assert_eq!(claims.sub, "user-roundtrip-123");
        assert_eq!(claims.iat, now.unix_timestamp());
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_access_token_uses_configured_ttl() {
        let security = security().with_token_ttl(Duration::minutes(5));

        let token = super::mint_access_token("user-ttl", &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn test_zero_and_negative_ttl_are_expired() {
        let security = security();
        let now = OffsetDateTime::now_utc();

        for ttl in [Duration::ZERO, Duration::seconds(-1), Duration::hours(-2)] {
            let token = mint_token("user-expired", ttl, now, &security).unwrap();
            assert_eq!(verify_token(&token, now, &security), Err(TokenError::Expired));
        }
    }

    #[test]
    fn test_expiry_boundary_has_no_leeway() {
        let security = security();
        let now = OffsetDateTime::now_utc();
        let token = mint_token("user-boundary", Duration::seconds(10), now, &security).unwrap();

        assert!(verify_token(&token, now + Duration::seconds(9), &security).is_ok());
        assert_eq!(
            verify_token(&token, now + Duration::seconds(10), &security),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret_is_bad_signature() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());

        let token =
            mint_token("user-bad-sig", Duration::hours(1), OffsetDateTime::now_utc(), &security_a)
                .unwrap();

        assert_eq!(
            verify_access_token(&token, &security_b),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_signature_is_bad_signature() {
        let security = security();
        let token =
            mint_token("user-tamper", Duration::hours(1), OffsetDateTime::now_utc(), &security)
                .unwrap();
        let sig_start = token.rfind('.').unwrap() + 1;
        let sig_len = token.len() - sig_start;

        let middle = replace_char(&token, sig_start + sig_len / 2);
        assert_eq!(
            verify_access_token(&middle, &security),
            Err(TokenError::BadSignature)
        );

        let last = replace_char(&token, token.len() - 1);
        assert_eq!(
            verify_access_token(&last, &security),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_any_signature_byte_corruption_is_bad_signature() {
        let security = security();
        let token =
            mint_token("user-every-byte", Duration::hours(1), OffsetDateTime::now_utc(), &security)
                .unwrap();
        let sig_start = token.rfind('.').unwrap() + 1;

        for idx in sig_start..token.len() {
            for replacement in ['A', 'z', '0', '-', '_', '+', '/', '=', '!', ' ', '.'] {
                let mut chars: Vec<char> = token.chars().collect();
                if chars[idx] == replacement {
                    continue;
                }
                chars[idx] = replacement;
                let tampered: String = chars.into_iter().collect();

                assert_eq!(
                    verify_access_token(&tampered, &security),
                    Err(TokenError::BadSignature),
                    "position {idx} replaced with {replacement:?}"
                );
            }
        }

        for truncated in [&token[..sig_start], &token[..token.len() - 5]] {
            assert_eq!(
                verify_access_token(truncated, &security),
                Err(TokenError::BadSignature),
                "{truncated:?}"
            );
        }
    }

    #[test]
    fn test_garbage_is_malformed() {
        let security = security();

        for token in ["", "not-a-token", "a.b", "a.b.c", "a.b.c.d"] {
            assert_eq!(
                verify_access_token(token, &security),
                Err(TokenError::Malformed),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn test_tampered_claims_are_rejected() {
        let security = security();
        let token =
            mint_token("user-claims", Duration::hours(1), OffsetDateTime::now_utc(), &security)
                .unwrap();
        let first_dot = token.find('.').unwrap();

        let tampered = replace_char(&token, first_dot + 3);
        assert!(verify_access_token(&tampered, &security).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_roundtrip_returns_subject(user_id in "[a-zA-Z0-9]{1,32}", ttl in 1i64..86_400) {
            let security = security();
            let now = OffsetDateTime::now_utc();

            let token = mint_token(&user_id, Duration::seconds(ttl), now, &security).unwrap();
            let claims = verify_token(&token, now, &security).unwrap();

            prop_assert_eq!(claims.sub, user_id);
        }
    }
}
