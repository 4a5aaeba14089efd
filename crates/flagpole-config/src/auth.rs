use std::env;
use std::str::FromStr;

/// Where the credential token travels between client and server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTransport {
    /// `jwt` cookie, set on login and cleared on logout.
    #[default]
    Cookie,
    /// `Authorization: Bearer <token>` header.
    Bearer,
}

impl FromStr for AuthTransport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cookie" => Ok(Self::Cookie),
            "bearer" | "header" => Ok(Self::Bearer),
            other => Err(format!("unknown auth transport: {other}")),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
    pub transport: AuthTransport,
    pub super_admin_email: String,
    pub super_admin_password: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            transport: env::var("AUTH_TRANSPORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            super_admin_email: env::var("SUPER_ADMIN_EMAIL").unwrap_or_default(),
            super_admin_password: env::var("SUPER_ADMIN_PASSWORD").unwrap_or_default(),
        }
    }

    /// Super admin login is disabled unless both halves of the credential are set.
    pub fn super_admin_enabled(&self) -> bool {
        !self.super_admin_email.is_empty() && !self.super_admin_password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_parsing() {
        assert_eq!("cookie".parse::<AuthTransport>(), Ok(AuthTransport::Cookie));
        assert_eq!(" Bearer ".parse::<AuthTransport>(), Ok(AuthTransport::Bearer));
        assert_eq!("header".parse::<AuthTransport>(), Ok(AuthTransport::Bearer));
        assert!("session".parse::<AuthTransport>().is_err());
    }

    #[test]
    fn test_super_admin_requires_both_fields() {
        let mut config = AuthConfig::default();
        assert!(!config.super_admin_enabled());

        config.super_admin_email = "root@flagpole.test".into();
        assert!(!config.super_admin_enabled());

        config.super_admin_password = "Secret1!".into();
        assert!(config.super_admin_enabled());
    }
}
