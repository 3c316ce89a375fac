//! Scalar types shared by every resource: ids, colors, asset ids.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::PRIMARY_ASSET_ID;
use crate::error::SchemaError;

/// Every timestamp the API returns is an ISO-8601 string, normalized to UTC.
pub type Timestamp = DateTime<Utc>;

static CUID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^c[^\s-]{8,}$").expect("valid CUID regex"));

static HEX_COLOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"));

/// Collision-resistant id used for every entity in the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cuid(String);

impl Cuid {
    pub fn new(value: impl Into<String>) -> Result<Self, SchemaError> {
        let value = value.into();
        if CUID_PATTERN.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(SchemaError::InvalidCuid(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Cuid {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cuid> for String {
    fn from(value: Cuid) -> Self {
        value.0
    }
}

impl FromStr for Cuid {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Cuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Cuid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Cuid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Option color, `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn new(value: impl Into<String>) -> Result<Self, SchemaError> {
        let value = value.into();
        if HEX_COLOR_PATTERN.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(SchemaError::InvalidColor(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HexColor {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a ledger entry or balance is denominated in: the house currency
/// (`"PRIMARY"`) or shares of a market option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AssetId {
    Primary,
    Option(Cuid),
}

impl AssetId {
    #[must_use]
    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Primary)
    }
}

impl TryFrom<String> for AssetId {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == PRIMARY_ASSET_ID {
            Ok(Self::Primary)
        } else {
            Cuid::new(value).map(Self::Option)
        }
    }
}

impl From<AssetId> for String {
    fn from(value: AssetId) -> Self {
        match value {
            AssetId::Primary => PRIMARY_ASSET_ID.to_string(),
            AssetId::Option(id) => id.into(),
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str(PRIMARY_ASSET_ID),
            Self::Option(id) => write!(f, "{id}"),
        }
    }
}

/// Emoji codes are stored as `:name:`.
pub(crate) fn check_emoji(value: &str) -> Result<(), SchemaError> {
    if value.len() > 2 && value.starts_with(':') && value.ends_with(':') {
        Ok(())
    } else {
        Err(SchemaError::InvalidEmoji(value.to_string()))
    }
}
