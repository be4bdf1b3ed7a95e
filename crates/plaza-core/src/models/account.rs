//! Account models.
//!
//! The platform distinguishes plain users, clients, and providers. The
//! variants share a common profile and are persisted as a tagged union: the
//! `role` discriminant is stored alongside the payload and deserialization
//! dispatches on it, so the right shape is always recovered after reload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields common to every account kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A client account: books services, accrues completed bookings that feed
/// loyalty code issuance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub completed_bookings: u32,
}

/// A provider account: offers services listed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub service_ids: Vec<String>,
}

/// One of several related account shapes, discriminated by the persisted
/// `role` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Account {
    User(UserProfile),
    Client(ClientProfile),
    Provider(ProviderProfile),
}

impl Account {
    pub fn profile(&self) -> &UserProfile {
        match self {
            Account::User(p) => p,
            Account::Client(c) => &c.profile,
            Account::Provider(p) => &p.profile,
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Account::User(_) => "user",
            Account::Client(_) => "client",
            Account::Provider(_) => "provider",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile(id: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            display_name: id.to_string(),
            photo_url: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_tagged_round_trip_recovers_variant() {
        let account = Account::Client(ClientProfile {
            profile: profile("alice"),
            completed_bookings: 7,
        });

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["role"], "client");
        assert_eq!(json["completed_bookings"], 7);

        let restored: Account = serde_json::from_value(json).unwrap();
        assert_eq!(restored, account);
        assert_eq!(restored.role(), "client");
    }

    #[test]
    fn test_provider_round_trip() {
        let account = Account::Provider(ProviderProfile {
            profile: profile("bob"),
            service_ids: vec!["svc-1".to_string(), "svc-2".to_string()],
        });

        let json = serde_json::to_string(&account).unwrap();
        let restored: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, account);
        assert_eq!(restored.profile().id, "bob");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let json = r#"{"role":"admin","id":"x","email":"x@example.com","display_name":"x","photo_url":null,"created_at":"2025-03-10T12:00:00Z"}"#;
        assert!(serde_json::from_str::<Account>(json).is_err());
    }
}
