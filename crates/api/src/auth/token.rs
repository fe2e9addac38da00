//! Signed, time-bounded access tokens.
//!
//! Tokens are HS256-signed JWTs in the standard compact form
//! (`header.payload.signature`, each segment base64url). The payload carries
//! the reserved `sub`, `iat` and `exp` claims plus any custom claims supplied at
//! issuance. Nothing is stored server-side: a token is valid exactly when its
//! signature verifies under the current [`SigningSecret`] and its `exp` lies
//! strictly after the current time. Rotating the secret invalidates every token
//! issued under the old one.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    crypto, decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use streamer_core::clock::{Clock, SystemClock};
use streamer_core::types::Timestamp;

use crate::config::ConfigError;

/// Minimum decoded secret length: 256 bits for HMAC-SHA256.
pub const MIN_SECRET_BYTES: usize = 32;

/// Default token lifetime in seconds (one hour).
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// Registered JWT claim names (RFC 7519 section 4.1). Custom claims may not
/// reuse them.
pub const RESERVED_CLAIMS: [&str; 7] = ["iss", "sub", "aud", "exp", "nbf", "iat", "jti"];

/// Caller-supplied claims carried alongside the reserved ones.
pub type CustomClaims = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Signing secret
// ---------------------------------------------------------------------------

/// Why a signing secret was rejected.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    #[error("signing secret is empty")]
    Empty,

    #[error("signing secret is not valid base64: {0}")]
    NotBase64(#[from] base64::DecodeError),

    #[error("signing secret is {bits} bits; at least {} bits are required", MIN_SECRET_BYTES * 8)]
    TooShort { bits: usize },
}

/// Symmetric HMAC key. Never printed.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Decode a standard-alphabet base64 secret and check its length.
    pub fn from_base64(encoded: &str) -> Result<Self, SecretError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(SecretError::Empty);
        }
        let bytes = STANDARD.decode(encoded)?;
        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SecretError::Empty);
        }
        if bytes.len() < MIN_SECRET_BYTES {
            return Err(SecretError::TooShort {
                bits: bytes.len() * 8,
            });
        }
        Ok(Self(bytes))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningSecret([REDACTED; {} bytes])", self.0.len())
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for token issuance and verification.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC-SHA256 key used to sign and verify tokens.
    pub secret: SigningSecret,
    /// Lifetime of tokens issued by the service.
    pub ttl: Duration,
}

impl TokenConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var        | Required | Default |
    /// |----------------|----------|---------|
    /// | `JWT_SECRET`   | **yes**  | --      |
    /// | `JWT_TTL_SECS` | no       | `3600`  |
    ///
    /// `JWT_SECRET` is base64 and must decode to at least 32 bytes.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TokenConfig::from_env`] but reading through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let encoded = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let secret = SigningSecret::from_base64(&encoded)?;

        let ttl_secs = match lookup("JWT_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    name: "JWT_TTL_SECS",
                    expected: "positive number of seconds",
                    value: raw,
                })?,
            None => DEFAULT_TTL_SECS,
        };

        Ok(Self {
            secret,
            ttl: Duration::seconds(ttl_secs),
        })
    }
}

// ---------------------------------------------------------------------------
// Claims and errors
// ---------------------------------------------------------------------------

/// The claim set carried by every token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject -- the username the token asserts.
    pub sub: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Everything else in the payload.
    #[serde(flatten)]
    pub custom: CustomClaims,
}

impl Claims {
    pub fn issued_at(&self) -> Option<Timestamp> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Token issuance and verification failures.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The signature does not match the header and payload under the current
    /// secret, or the token was signed with a different algorithm.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// The token is not a well-formed compact JWS or its payload is not a
    /// valid claim set.
    #[error("token is malformed: {0}")]
    MalformedToken(String),

    /// The token's `exp` is not strictly after the current time.
    #[error("token has expired")]
    TokenExpired,

    /// Issuance was asked for something it cannot produce.
    #[error("invalid token request: {0}")]
    InvalidInput(String),

    /// The signer failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl TokenError {
    /// True for the three ways a presented token can be rejected.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidSignature | TokenError::MalformedToken(_) | TokenError::TokenExpired
        )
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        _ => TokenError::MalformedToken(err.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Authority
// ---------------------------------------------------------------------------

/// Issues and verifies tokens under one signing secret.
///
/// Holds only immutable keys and a clock handle, so a single instance can be
/// shared across request handlers behind an `Arc`.
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenAuthority {
    /// Build an authority that reads wall-clock time.
    pub fn new(config: &TokenConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &TokenConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against `clock` below, strictly and with no leeway.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: config.ttl,
            clock,
        }
    }

    /// Configured lifetime for tokens issued by the service.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token asserting `subject`, carrying `custom_claims`, valid for `ttl`.
    pub fn issue(
        &self,
        subject: &str,
        custom_claims: CustomClaims,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::InvalidInput("subject must not be empty".into()));
        }
        if ttl.num_seconds() < 1 {
            return Err(TokenError::InvalidInput(
                "ttl must be at least one second".into(),
            ));
        }
        if let Some(name) = custom_claims
            .keys()
            .find(|name| RESERVED_CLAIMS.contains(&name.as_str()))
        {
            return Err(TokenError::InvalidInput(format!(
                "custom claim '{name}' collides with a registered claim"
            )));
        }

        let iat = self.clock.now().timestamp();
        let exp = iat
            .checked_add(ttl.num_seconds())
            .ok_or_else(|| TokenError::InvalidInput("ttl is out of range".into()))?;

        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp,
            custom: custom_claims,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        tracing::debug!(subject, exp, "Issued token");
        Ok(token)
    }

    /// Check signature, structure and freshness, returning the claim set.
    ///
    /// The signature is compared in constant time before the payload is
    /// decoded. A token whose `exp` equals the current second is expired.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.check_signature(token)?;

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?
            .claims;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }

    /// HMAC over `header.payload` compared against everything after the
    /// second dot, before any segment is decoded. Extra dots land in the
    /// signature part and simply fail the comparison.
    fn check_signature(&self, token: &str) -> Result<(), TokenError> {
        let mut segments = token.splitn(3, '.');
        let (Some(header), Some(payload), Some(signature)) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(TokenError::MalformedToken(
                "expected header.payload.signature".into(),
            ));
        };

        let message = &token[..header.len() + 1 + payload.len()];
        let valid = crypto::verify(
            signature,
            message.as_bytes(),
            &self.decoding_key,
            Algorithm::HS256,
        )
        .map_err(|e| TokenError::MalformedToken(e.to_string()))?;

        if valid {
            Ok(())
        } else {
            Err(TokenError::InvalidSignature)
        }
    }

    /// `true` only if `token` verifies and its subject equals `expected_subject`.
    ///
    /// Does not say why a token was rejected; call [`TokenAuthority::verify`]
    /// when the reason matters.
    pub fn validate_subject(&self, token: &str, expected_subject: &str) -> bool {
        match self.verify(token) {
            Ok(claims) => claims.sub == expected_subject,
            Err(err) => {
                tracing::debug!(error = %err, "Token failed subject validation");
                false
            }
        }
    }

    /// The verified subject of `token`.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        self.verify(token).map(|claims| claims.sub)
    }

    /// The verified expiration instant of `token`.
    pub fn extract_expiration(&self, token: &str) -> Result<Timestamp, TokenError> {
        let claims = self.verify(token)?;
        claims
            .expires_at()
            .ok_or_else(|| TokenError::MalformedToken("exp is out of range".into()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;
    use streamer_core::clock::ManualClock;

    use super::*;

    const BASE64URL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

    /// Helper to build a test config with a known 256-bit secret.
    fn test_config() -> TokenConfig {
        TokenConfig {
            secret: SigningSecret::from_bytes(*b"test-secret-that-is-long-enough!").unwrap(),
            ttl: Duration::hours(1),
        }
    }

    fn authority() -> (TokenAuthority, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::starting_now());
        let authority = TokenAuthority::with_clock(&test_config(), clock.clone());
        (authority, clock)
    }

    fn custom(value: serde_json::Value) -> CustomClaims {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected a JSON object, got {other}"),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let (authority, _clock) = authority();
        let claims = custom(json!({ "role": "admin", "tier": 3, "flags": ["a", "b"] }));

        let token = authority
            .issue("alice", claims.clone(), Duration::minutes(30))
            .expect("issuance should succeed");
        let verified = authority.verify(&token).expect("verification should succeed");

        assert_eq!(verified.sub, "alice");
        assert_eq!(verified.custom, claims);
        assert_eq!(verified.exp - verified.iat, 30 * 60);
    }

    #[test]
    fn test_round_trip_with_no_custom_claims() {
        let (authority, _clock) = authority();
        let token = authority
            .issue("bob", CustomClaims::new(), authority.ttl())
            .unwrap();

        let verified = authority.verify(&token).unwrap();
        assert_eq!(verified.sub, "bob");
        assert!(verified.custom.is_empty());
        assert_eq!(verified.exp - verified.iat, DEFAULT_TTL_SECS);
    }

    #[test]
    fn test_token_is_three_base64url_segments() {
        let (authority, _clock) = authority();
        let token = authority
            .issue("alice", CustomClaims::new(), Duration::hours(1))
            .unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        for segment in segments {
            assert!(!segment.is_empty());
            assert!(segment.bytes().all(|b| BASE64URL.contains(&b)));
        }
    }

    #[test]
    fn test_verify_is_idempotent() {
        let (authority, _clock) = authority();
        let token = authority
            .issue("alice", custom(json!({ "k": "v" })), Duration::hours(1))
            .unwrap();

        let first = authority.verify(&token).unwrap();
        let second = authority.verify(&token).unwrap();
        assert_eq!(first, second);

        let tampered = format!("{token}x");
        let first_err = authority.verify(&tampered).unwrap_err().to_string();
        let second_err = authority.verify(&tampered).unwrap_err().to_string();
        assert_eq!(first_err, second_err);
    }

    #[test]
    fn test_token_expires_at_exact_expiration_instant() {
        let (authority, clock) = authority();
        let token = authority
            .issue("alice", CustomClaims::new(), Duration::seconds(60))
            .unwrap();
        let exp = authority.verify(&token).unwrap().exp;

        clock.set(DateTime::from_timestamp(exp - 1, 0).unwrap());
        assert!(authority.verify(&token).is_ok(), "one second before exp is valid");

        clock.set(DateTime::from_timestamp(exp, 0).unwrap());
        assert_matches!(authority.verify(&token), Err(TokenError::TokenExpired));

        clock.set(DateTime::from_timestamp(exp + 1, 0).unwrap());
        assert_matches!(authority.verify(&token), Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_alice_token_expires_after_two_hours() {
        let (authority, clock) = authority();
        let token = authority
            .issue("alice", CustomClaims::new(), Duration::hours(1))
            .unwrap();

        let claims = authority.verify(&token).unwrap();
        assert_eq!(claims.sub, "alice");

        clock.advance(Duration::hours(2));
        assert_matches!(authority.verify(&token), Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_flipping_any_payload_or_signature_bit_fails_signature() {
        let (authority, _clock) = authority();
        let token = authority
            .issue("alice", custom(json!({ "role": "user" })), Duration::hours(1))
            .unwrap();

        let header_len = token.find('.').unwrap();
        let mut checked = 0;
        // Every byte after the header's dot, skipping the separator itself.
        // Flipping any of the low seven bits keeps the byte ASCII, including
        // flips that land outside base64url (`.`, `+`, `/`, control bytes).
        for index in header_len + 1..token.len() {
            let original = token.as_bytes()[index];
            if original == b'.' {
                continue;
            }
            for bit in 0..7 {
                let mut bytes = token.clone().into_bytes();
                bytes[index] = original ^ (1 << bit);
                let tampered = String::from_utf8(bytes).unwrap();

                assert_matches!(
                    authority.verify(&tampered),
                    Err(TokenError::InvalidSignature),
                    "flipping bit {bit} at byte {index} must invalidate the signature"
                );
                checked += 1;
            }
        }
        assert_eq!(checked, (token.len() - header_len - 2) * 7);
    }

    #[test]
    fn test_extra_dot_in_payload_or_signature_fails_signature() {
        let (authority, _clock) = authority();
        let token = authority
            .issue("alice", CustomClaims::new(), Duration::hours(1))
            .unwrap();
        let segments: Vec<&str> = token.split('.').collect();
        let (header, payload, signature) = (segments[0], segments[1], segments[2]);

        let split_payload = format!("{header}.{}.{}.{signature}", &payload[..4], &payload[4..]);
        let split_signature =
            format!("{header}.{payload}.{}.{}", &signature[..4], &signature[4..]);
        let trailing_dot = format!("{token}.");

        for tampered in [split_payload, split_signature, trailing_dot] {
            assert_matches!(
                authority.verify(&tampered),
                Err(TokenError::InvalidSignature),
                "{tampered}"
            );
        }
    }

    #[test]
    fn test_different_secret_fails_signature() {
        let (authority, _clock) = authority();
        let token = authority
            .issue("alice", CustomClaims::new(), Duration::hours(1))
            .unwrap();

        let rotated = TokenConfig {
            secret: SigningSecret::from_bytes(*b"a-completely-different-secret-!!").unwrap(),
            ttl: Duration::hours(1),
        };
        let other = TokenAuthority::new(&rotated);

        assert_matches!(other.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_other_algorithm_is_rejected_as_bad_signature() {
        let (authority, _clock) = authority();
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = json!({ "sub": "alice", "iat": now, "exp": now + 600 });

        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert_matches!(authority.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_fewer_than_three_segments_is_malformed() {
        let (authority, _clock) = authority();
        for garbage in ["", "abc", "a.b", "eyJhbGciOiJIUzI1NiJ9"] {
            assert_matches!(
                authority.verify(garbage),
                Err(TokenError::MalformedToken(_)),
                "input {garbage:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_unsigned_three_segment_garbage_fails_signature() {
        let (authority, _clock) = authority();
        for garbage in ["not.a.jwt", "....", "..", "a.b.c"] {
            assert_matches!(
                authority.verify(garbage),
                Err(TokenError::InvalidSignature),
                "input {garbage:?} should fail the signature check"
            );
        }
    }

    #[test]
    fn test_signed_payload_without_subject_is_malformed() {
        let (authority, _clock) = authority();
        let config = test_config();
        let now = chrono::Utc::now().timestamp();

        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({ "iat": now, "exp": now + 600 }),
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert_matches!(authority.verify(&token), Err(TokenError::MalformedToken(_)));
    }

    #[test]
    fn test_issue_rejects_bad_requests() {
        let (authority, _clock) = authority();

        assert_matches!(
            authority.issue("", CustomClaims::new(), Duration::hours(1)),
            Err(TokenError::InvalidInput(_))
        );
        assert_matches!(
            authority.issue("alice", CustomClaims::new(), Duration::zero()),
            Err(TokenError::InvalidInput(_))
        );
        assert_matches!(
            authority.issue("alice", CustomClaims::new(), Duration::milliseconds(500)),
            Err(TokenError::InvalidInput(_))
        );
        assert_matches!(
            authority.issue("alice", CustomClaims::new(), Duration::seconds(-5)),
            Err(TokenError::InvalidInput(_))
        );

        for reserved in RESERVED_CLAIMS {
            let mut claims = CustomClaims::new();
            claims.insert(reserved.to_string(), json!("mallory"));
            assert_matches!(
                authority.issue("alice", claims, Duration::hours(1)),
                Err(TokenError::InvalidInput(msg)) if msg.contains(reserved)
            );
        }
    }

    #[test]
    fn test_validate_subject() {
        let (authority, clock) = authority();
        let token = authority
            .issue("alice", CustomClaims::new(), Duration::hours(1))
            .unwrap();

        assert!(authority.validate_subject(&token, "alice"));
        assert!(!authority.validate_subject(&token, "Alice"));
        assert!(!authority.validate_subject(&token, "alice "));
        assert!(!authority.validate_subject("garbage", "alice"));

        clock.advance(Duration::hours(2));
        assert!(!authority.validate_subject(&token, "alice"));
    }

    #[test]
    fn test_extract_helpers_use_verification() {
        let (authority, clock) = authority();
        let token = authority
            .issue("alice", CustomClaims::new(), Duration::hours(1))
            .unwrap();
        let expected_exp = clock.now().timestamp() + 3600;

        assert_eq!(authority.extract_subject(&token).unwrap(), "alice");
        assert_eq!(
            authority.extract_expiration(&token).unwrap().timestamp(),
            expected_exp
        );

        clock.advance(Duration::hours(1));
        assert_matches!(authority.extract_subject(&token), Err(TokenError::TokenExpired));
        assert_matches!(authority.extract_expiration(&token), Err(TokenError::TokenExpired));
    }

    #[test]
    fn test_rejections_are_flagged() {
        assert!(TokenError::InvalidSignature.is_rejection());
        assert!(TokenError::TokenExpired.is_rejection());
        assert!(TokenError::MalformedToken("x".into()).is_rejection());
        assert!(!TokenError::InvalidInput("x".into()).is_rejection());
        assert!(!TokenError::Signing("x".into()).is_rejection());
    }

    // -- Signing secret ------------------------------------------------------

    #[test]
    fn test_secret_from_base64() {
        let encoded = STANDARD.encode([42u8; 32]);
        assert!(SigningSecret::from_base64(&encoded).is_ok());
        assert!(SigningSecret::from_base64(&format!("  {encoded}\n")).is_ok());
    }

    #[test]
    fn test_secret_rejections() {
        assert_matches!(SigningSecret::from_base64(""), Err(SecretError::Empty));
        assert_matches!(SigningSecret::from_base64("   "), Err(SecretError::Empty));
        assert_matches!(
            SigningSecret::from_base64("not base64 at all!"),
            Err(SecretError::NotBase64(_))
        );

        let short = STANDARD.encode([1u8; 31]);
        assert_matches!(
            SigningSecret::from_base64(&short),
            Err(SecretError::TooShort { bits: 248 })
        );
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = SigningSecret::from_bytes(*b"test-secret-that-is-long-enough!").unwrap();
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("test-secret"));
        assert!(rendered.contains("REDACTED"));
    }

    // -- Config --------------------------------------------------------------

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let owned: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| {
            owned
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_config_defaults_ttl() {
        let encoded = STANDARD.encode([9u8; 48]);
        let config = TokenConfig::from_lookup(lookup(&[("JWT_SECRET", &encoded)])).unwrap();
        assert_eq!(config.ttl, Duration::seconds(DEFAULT_TTL_SECS));
    }

    #[test]
    fn test_config_reads_ttl() {
        let encoded = STANDARD.encode([9u8; 32]);
        let config = TokenConfig::from_lookup(lookup(&[
            ("JWT_SECRET", &encoded),
            ("JWT_TTL_SECS", "900"),
        ]))
        .unwrap();
        assert_eq!(config.ttl, Duration::minutes(15));
    }

    #[test]
    fn test_config_fails_fast() {
        assert_matches!(
            TokenConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("JWT_SECRET"))
        );

        let short = STANDARD.encode([9u8; 16]);
        assert_matches!(
            TokenConfig::from_lookup(lookup(&[("JWT_SECRET", &short)])),
            Err(ConfigError::Secret(SecretError::TooShort { .. }))
        );

        let encoded = STANDARD.encode([9u8; 32]);
        for bad_ttl in ["0", "-10", "soon"] {
            assert_matches!(
                TokenConfig::from_lookup(lookup(&[
                    ("JWT_SECRET", &encoded),
                    ("JWT_TTL_SECS", bad_ttl),
                ])),
                Err(ConfigError::Invalid { name: "JWT_TTL_SECS", .. })
            );
        }
    }
}
