//! User-Agent classification using woothee.

use crate::domain::entities::DeviceClass;
use crate::utils::UNKNOWN;
use woothee::parser::Parser;

/// woothee's marker for a field it could not determine.
const WOOTHEE_UNKNOWN: &str = "UNKNOWN";

/// Device, OS and browser extracted from a User-Agent string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUserAgent {
    pub device: DeviceClass,
    pub os: String,
    pub browser: String,
}

impl ParsedUserAgent {
    fn unknown() -> Self {
        Self {
            device: DeviceClass::Desktop,
            os: UNKNOWN.to_string(),
            browser: UNKNOWN.to_string(),
        }
    }
}

/// Classifies a User-Agent.
///
/// woothee's `smartphone` and `mobilephone` categories become
/// [`DeviceClass::Mobile`]. Tablets are detected on top of that (iPad, Android
/// without the `Mobile` token, or an explicit `Tablet` token) because woothee
/// files them under smartphones. Everything else, including crawlers and
/// unparseable input, is [`DeviceClass::Desktop`].
pub fn parse_user_agent(user_agent: Option<&str>) -> ParsedUserAgent {
    let Some(ua) = user_agent.map(str::trim).filter(|ua| !ua.is_empty()) else {
        return ParsedUserAgent::unknown();
    };

    let Some(result) = Parser::new().parse(ua) else {
        return ParsedUserAgent::unknown();
    };

    let known = |value: &str| {
        if value.is_empty() || value == WOOTHEE_UNKNOWN {
            UNKNOWN.to_string()
        } else {
            value.to_string()
        }
    };

    let device = if is_tablet(ua, result.os) {
        DeviceClass::Tablet
    } else {
        match result.category {
            "smartphone" | "mobilephone" => DeviceClass::Mobile,
            _ => DeviceClass::Desktop,
        }
    };

    ParsedUserAgent {
        device,
        os: known(result.os),
        browser: known(result.name),
    }
}

fn is_tablet(ua: &str, os: &str) -> bool {
    if os == "iPad" || ua.contains("iPad") {
        return true;
    }
    if ua.to_ascii_lowercase().contains("tablet") {
        return true;
    }
    os == "Android" && !ua.contains("Mobile")
}
