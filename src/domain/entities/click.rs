//! Click event entity representing a single redirect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse device class derived from the User-Agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            "desktop" => Ok(Self::Desktop),
            other => Err(format!("unknown device class '{other}'")),
        }
    }
}

/// A recorded redirect. Append-only: never updated once written.
///
/// Geo fields stay `None` unless an enrichment step outside this service
/// fills them in.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub id: i64,
    pub link_id: i64,
    pub ip: String,
    pub device: DeviceClass,
    pub os: String,
    pub browser: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub continent: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

/// Input data for recording a click. The timestamp is set by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClickEvent {
    pub link_id: i64,
    pub ip: String,
    pub device: DeviceClass,
    pub os: String,
    pub browser: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

/// Clicks grouped by device class, computed on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceCount {
    pub device: DeviceClass,
    pub clicks: i64,
}
