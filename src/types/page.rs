//! Cursor pagination envelope and the query parameters of list endpoints.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::base::Cuid;
use super::finance::TransactionType;
use super::validate::Validate;
use crate::error::SchemaError;

/// Cursor state returned next to every page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
    pub total: u64,
}

impl PageInfo {
    /// Cursor to request the following page with, if there is one.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }
}

impl Validate for PageInfo {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.has_next_page && self.end_cursor.as_deref().map_or(true, str::is_empty) {
            return Err(SchemaError::Missing {
                field: "endCursor",
                reason: "hasNextPage is true",
            });
        }
        Ok(())
    }
}

/// One page of a list endpoint: `{"data": [...], "pageInfo": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page_info.next_cursor().is_some()
    }
}

impl<T: Validate> Validate for Page<T> {
    fn validate(&self) -> Result<(), SchemaError> {
        self.page_info.validate()?;
        self.data.validate()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Asc,
    #[serde(rename = "desc")]
    #[default]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Market lifecycle filter for `markets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    Active,
    Closed,
    Resolved,
    Canceled,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    Active,
    Closed,
    All,
}

/// Multi-valued filters are sent as one comma-separated parameter.
#[allow(clippy::ptr_arg)]
fn serialize_csv<S, T>(values: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: fmt::Display,
{
    let joined = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&joined)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MarketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Cuid>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_csv")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Cuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PositionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_id: Option<Cuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Cuid>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "serialize_csv")]
    pub transaction_type: Vec<TransactionTypeParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// [`TransactionType`] rendered as its wire name inside a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionTypeParam(pub TransactionType);

impl fmt::Display for TransactionTypeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<TransactionType> for TransactionTypeParam {
    fn from(value: TransactionType) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Cuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_info_defaults() {
        let info: PageInfo = serde_json::from_value(json!({ "total": 0 })).unwrap();
        assert!(!info.has_next_page);
        assert!(info.end_cursor.is_none());
        assert!(info.validate().is_ok());
    }

    #[test]
    fn test_page_info_omitted_cursor_is_not_written_back() {
        let raw = json!({ "hasNextPage": false, "total": 2 });
        let info: PageInfo = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&info).unwrap(), raw);
    }

    #[test]
    fn test_page_info_next_page_needs_cursor() {
        let info: PageInfo =
            serde_json::from_value(json!({ "hasNextPage": true, "endCursor": null, "total": 10 }))
                .unwrap();
        assert!(matches!(
            info.validate(),
            Err(SchemaError::Missing { field: "endCursor", .. })
        ));
    }

    #[test]
    fn test_next_cursor_only_when_more_pages() {
        let info = PageInfo {
            has_next_page: false,
            end_cursor: Some("cursor-1".to_string()),
            total: 3,
        };
        assert_eq!(info.next_cursor(), None);

        let info = PageInfo {
            has_next_page: true,
            ..info
        };
        assert_eq!(info.next_cursor(), Some("cursor-1"));
    }

    #[test]
    fn test_negative_total_rejected() {
        assert!(serde_json::from_value::<PageInfo>(json!({ "total": -1 })).is_err());
    }

    #[test]
    fn test_market_query_serialization() {
        let query = MarketQuery {
            status: Some(MarketStatus::Active),
            tags: vec!["python".to_string(), "api".to_string()],
            sort_direction: Some(SortDirection::Asc),
            limit: Some(25),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "status": "active", "tags": "python,api", "sortDirection": "asc", "limit": 25 })
        );
    }

    #[test]
    fn test_transaction_query_joins_types() {
        let query = TransactionQuery {
            transaction_type: vec![
                TransactionType::TradeBuy.into(),
                TransactionType::TradeSell.into(),
            ],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "transactionType": "TRADE_BUY,TRADE_SELL" })
        );
    }
}
