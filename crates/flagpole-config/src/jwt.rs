//! Token signing configuration.
//!
//! - `JWT_SECRET`: HMAC secret. An empty secret is a misconfiguration and makes
//!   signing and verification fail.
//! - `JWT_EXPIRES`: token lifetime, either plain seconds or a number suffixed with
//!   `s`, `m`, `h` or `d` (default `1d`).

use std::env;

const DEFAULT_EXPIRY_SECS: i64 = 24 * 60 * 60;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in_secs: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").unwrap_or_default(),
            expires_in_secs: env::var("JWT_EXPIRES")
                .ok()
                .and_then(|s| parse_expiry(&s))
                .unwrap_or(DEFAULT_EXPIRY_SECS),
        }
    }

    pub fn new(secret: impl Into<String>, expires_in_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            expires_in_secs,
        }
    }
}

/// Parses `3600`, `45s`, `30m`, `12h` or `90d` into seconds.
pub fn parse_expiry(value: &str) -> Option<i64> {
    let value = value.trim();
    let (digits, unit) = match value.char_indices().last()? {
        (idx, c) if c.is_ascii_alphabetic() => (&value[..idx], c.to_ascii_lowercase()),
        _ => (value, 's'),
    };

    let amount: i64 = digits.parse().ok()?;
    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return None,
    };

    amount.checked_mul(multiplier).filter(|secs| *secs > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_seconds() {
        assert_eq!(parse_expiry("3600"), Some(3600));
    }

    #[test]
    fn test_parse_suffixed_durations() {
        assert_eq!(parse_expiry("45s"), Some(45));
        assert_eq!(parse_expiry("30m"), Some(1800));
        assert_eq!(parse_expiry("12h"), Some(43_200));
        assert_eq!(parse_expiry("90d"), Some(7_776_000));
        assert_eq!(parse_expiry("1D"), Some(86_400));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_expiry(""), None);
        assert_eq!(parse_expiry("d"), None);
        assert_eq!(parse_expiry("10w"), None);
        assert_eq!(parse_expiry("-5m"), None);
        assert_eq!(parse_expiry("abc"), None);
    }

    #[test]
    fn test_new() {
        let config = JwtConfig::new("secret", 60);
        assert_eq!(config.secret, "secret");
        assert_eq!(config.expires_in_secs, 60);
    }
}
