use serde::{Deserialize, Serialize};

use super::base::{Cuid, Timestamp};
use super::validate::{ensure_not_after, Validate};
use crate::error::SchemaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    User,
    MarketAmm,
    MarketClearing,
    House,
}

/// Public user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Cuid,
    pub role: UserRole,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub twitter_handle: Option<String>,
    pub discord_handle: Option<String>,
    pub website: Option<String>,
    pub bio: Option<String>,
    pub timezone: String,
    pub primary_account_id: Cuid,
    pub referral_code: Option<String>,
    pub referred_by: Option<Cuid>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Validate for User {
    fn validate(&self) -> Result<(), SchemaError> {
        if let Some(updated_at) = &self.updated_at {
            ensure_not_after("createdAt", &self.created_at, "updatedAt", updated_at)?;
        }
        Ok(())
    }
}

/// Ledger account. Users, market AMMs, market clearing houses and the house
/// each own one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Cuid,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub internal_type: Option<String>,
    pub user_id: Option<Cuid>,
    pub market_id: Option<Cuid>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Validate for Account {
    fn validate(&self) -> Result<(), SchemaError> {
        if let Some(updated_at) = &self.updated_at {
            ensure_not_after("createdAt", &self.created_at, "updatedAt", updated_at)?;
        }

        match self.account_type {
            AccountType::User if self.user_id.is_none() => Err(SchemaError::Missing {
                field: "userId",
                reason: "USER accounts belong to a user",
            }),
            AccountType::MarketAmm | AccountType::MarketClearing if self.market_id.is_none() => {
                Err(SchemaError::Missing {
                    field: "marketId",
                    reason: "market AMM and clearing accounts belong to a market",
                })
            }
            _ => Ok(()),
        }
    }
}

/// Result of `users/check-username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameCheck {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Validate for UsernameCheck {
    fn validate(&self) -> Result<(), SchemaError> {
        Ok(())
    }
}

/// Profile fields the authenticated user may change. Unset fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_json() -> serde_json::Value {
        json!({
            "id": "clzrooq660000a2uznm33y25b",
            "role": "USER",
            "username": "jgyou",
            "displayName": "jgyou",
            "avatarUrl": null,
            "twitterHandle": null,
            "discordHandle": null,
            "website": null,
            "bio": "https://manifold.markets/jgyou",
            "timezone": "America/New_York",
            "primaryAccountId": "c66cc328ef6c13d1767417889",
            "referralCode": "J2P2",
            "referredBy": null,
            "createdAt": "2024-08-13T00:27:58.974Z",
            "updatedAt": "2024-10-01T05:40:44.407Z"
        })
    }

    #[test]
    fn test_user_maps_camel_case_fields() {
        let user: User = serde_json::from_value(user_json()).unwrap();
        assert_eq!(user.display_name, "jgyou");
        assert_eq!(user.primary_account_id, "c66cc328ef6c13d1767417889");
        assert_eq!(user.role, UserRole::User);
        assert!(user.avatar_url.is_none());
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_user_update_before_creation_fails() {
        let mut value = user_json();
        value["updatedAt"] = json!("2024-01-01T00:00:00Z");
        let user: User = serde_json::from_value(value).unwrap();
        assert!(matches!(user.validate(), Err(SchemaError::DateOrder { .. })));
    }

    #[test]
    fn test_user_rejects_unknown_role() {
        let mut value = user_json();
        value["role"] = json!("MODERATOR");
        assert!(serde_json::from_value::<User>(value).is_err());
    }

    #[test]
    fn test_amm_account_requires_market() {
        let account: Account = serde_json::from_value(json!({
            "id": "cm5ifmwfo001j24d2s5b1c7t3",
            "type": "MARKET_AMM",
            "internalType": null,
            "userId": null,
            "marketId": null,
            "createdAt": "2025-01-04T17:02:55.669Z",
            "updatedAt": null
        }))
        .unwrap();
        assert!(matches!(
            account.validate(),
            Err(SchemaError::Missing { field: "marketId", .. })
        ));
    }

    #[test]
    fn test_user_account_requires_user_id() {
        let account: Account = serde_json::from_value(json!({
            "id": "c66cc328ef6c13d1767417889",
            "type": "USER",
            "internalType": null,
            "userId": null,
            "marketId": null,
            "createdAt": "2024-08-13T00:27:58.974Z",
            "updatedAt": null
        }))
        .unwrap();
        assert!(matches!(
            account.validate(),
            Err(SchemaError::Missing { field: "userId", .. })
        ));
    }

    #[test]
    fn test_update_user_skips_unset_fields() {
        let body = UpdateUser {
            display_name: Some("JG".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "displayName": "JG" }));
    }
}
