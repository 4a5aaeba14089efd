use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

use flagpole_config::JwtConfig;
use flagpole_core::TokenError;

use crate::claims::Claims;

/// Signs a token for `sub` that expires after the configured lifetime.
///
/// # Errors
///
/// [`TokenError::MissingSecret`] when no secret is configured,
/// [`TokenError::Encoding`] if the expiry does not fit a timestamp or the encoder fails.
pub fn sign(
    sub: impl Into<String>,
    role: impl Into<String>,
    organization_id: Option<i64>,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = Utc::now().timestamp().max(0);
    let exp = now
        .checked_add(jwt_config.expires_in_secs.max(0))
        .and_then(|exp| usize::try_from(exp).ok())
        .ok_or_else(|| TokenError::Encoding("token expiry is out of range".to_string()))?;

    let claims = Claims {
        sub: sub.into(),
        role: role.into(),
        organization_id,
        iat: now as usize,
        exp,
    };

    sign_claims(&claims, &jwt_config.secret)
}

/// Signs an explicit claim set. Expiry is taken from the claims as given.
pub fn sign_claims(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Verifies a token and returns its claims.
///
/// # Errors
///
/// - [`TokenError::Expired`] when the signature is valid but `exp` has passed
/// - [`TokenError::Invalid`] for a bad signature, malformed token or payload
/// - [`TokenError::MissingSecret`] when no secret is configured
pub fn verify(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    if jwt_config.secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
    })
}
