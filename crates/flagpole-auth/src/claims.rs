use serde::{Deserialize, Serialize};

/// Subject used for the configured super admin, who has no stored record.
pub const SUPER_ADMIN_SUBJECT: &str = "superadmin";

/// Claims embedded in every token.
///
/// `role` holds the deployment's role string, not a resolved role, so tokens stay
/// meaningful to anything that shares the role configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, or [`SUPER_ADMIN_SUBJECT`]
    pub sub: String,
    pub role: String,
    /// Absent for the super admin
    pub organization_id: Option<i64>,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    pub fn is_super_admin_subject(&self) -> bool {
        self.sub == SUPER_ADMIN_SUBJECT
    }

    /// Parses the subject as a stored user id.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            role: "ORG_ADMIN".to_string(),
            organization_id: Some(3),
            iat: 0,
            exp: 60,
        }
    }

    #[test]
    fn test_user_id_parses_numeric_subject() {
        assert_eq!(claims("42").user_id(), Some(42));
        assert_eq!(claims(SUPER_ADMIN_SUBJECT).user_id(), None);
        assert!(claims(SUPER_ADMIN_SUBJECT).is_super_admin_subject());
    }

    #[test]
    fn test_serialized_shape() {
        let mut value = serde_json::to_value(claims("1")).unwrap();
        assert_eq!(value["organization_id"], 3);

        value["organization_id"] = serde_json::Value::Null;
        let parsed: Claims = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.organization_id, None);
    }
}
