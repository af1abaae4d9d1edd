//! Operational state records parsed from device responses.

use std::fmt::{self, Display, Formatter};

use panos_xml::Element;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::PrimitiveDateTime;
use tracing::warn;

/// Timestamp format used by the device's log database.
const TIME_GENERATED_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]/[month]/[day] [hour]:[minute]:[second]");

/// Hit count data for one rule.
///
/// Every field besides the name is optional: a field the device did not
/// report stays unset, which is not the same as a count of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitCount {
    /// Rule name the data belongs to.
    pub name: String,
    /// Whether the rule is part of the latest committed configuration.
    pub latest: Option<String>,
    pub hit_count: Option<u64>,
    /// Epoch seconds of the most recent hit.
    pub last_hit_timestamp: Option<i64>,
    /// Epoch seconds of the most recent counter reset.
    pub last_reset_timestamp: Option<i64>,
    /// Epoch seconds of the first recorded hit.
    pub first_hit_timestamp: Option<i64>,
    pub rule_creation_timestamp: Option<i64>,
    pub rule_modification_timestamp: Option<i64>,
}

impl HitCount {
    /// A record with no data yet.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latest: None,
            hit_count: None,
            last_hit_timestamp: None,
            last_reset_timestamp: None,
            first_hit_timestamp: None,
            rule_creation_timestamp: None,
            rule_modification_timestamp: None,
        }
    }

    /// Build a record from one `<entry>` of a rule-hit-count response.
    pub fn from_entry(name: impl Into<String>, elm: &Element) -> Self {
        let mut out = Self::empty(name);
        out.refresh_from(elm);
        out
    }

    /// Replace every field from the response entry. Fields absent from the
    /// entry become unset.
    pub fn refresh_from(&mut self, elm: &Element) {
        self.latest = child_text(elm, "latest");
        self.hit_count = child_parsed(elm, "hit-count");
        self.last_hit_timestamp = child_parsed(elm, "last-hit-timestamp");
        self.last_reset_timestamp = child_parsed(elm, "last-reset-timestamp");
        self.first_hit_timestamp = child_parsed(elm, "first-hit-timestamp");
        self.rule_creation_timestamp = child_parsed(elm, "rule-creation-timestamp");
        self.rule_modification_timestamp = child_parsed(elm, "rule-modification-timestamp");
    }
}

/// Operational state attached to one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleOpState {
    pub hit_count: HitCount,
}

impl RuleOpState {
    pub fn new(rule_name: impl Into<String>) -> Self {
        Self {
            hit_count: HitCount::empty(rule_name),
        }
    }
}

/// Ordering of entries returned by a log query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogDirection {
    /// Oldest entries first.
    Forward,
    /// Newest entries first.
    #[default]
    Backward,
}

impl LogDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            LogDirection::Forward => "forward",
            LogDirection::Backward => "backward",
        }
    }
}

/// Timestamp of one log entry, kept raw when the device's text does not
/// match the documented format.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogTimestamp {
    At(PrimitiveDateTime),
    Raw(String),
}

impl Display for LogTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogTimestamp::At(at) => write!(f, "{at}"),
            LogTimestamp::Raw(raw) => write!(f, "{raw}"),
        }
    }
}

/// One audit comment entry from the configuration log.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuditCommentLog {
    /// Administrator who committed the change.
    pub admin: Option<String>,
    pub comment: Option<String>,
    /// Configuration version of the commit.
    pub config_version: Option<i64>,
    pub time: Option<LogTimestamp>,
}

impl AuditCommentLog {
    /// Build a record from one `<entry>` of a config log response.
    pub fn from_entry(elm: &Element) -> Self {
        Self {
            admin: child_text(elm, "admin"),
            comment: child_text(elm, "comment"),
            config_version: child_parsed(elm, "config_ver"),
            time: child_text(elm, "time_generated").map(|raw| parse_log_time(&raw)),
        }
    }
}

fn parse_log_time(raw: &str) -> LogTimestamp {
    match PrimitiveDateTime::parse(raw, TIME_GENERATED_FORMAT) {
        Ok(at) => LogTimestamp::At(at),
        Err(_) => {
            warn!(text = %raw, "unparseable log timestamp, keeping raw text");
            LogTimestamp::Raw(raw.to_string())
        }
    }
}

pub(crate) fn child_text(elm: &Element, field: &str) -> Option<String> {
    elm.find_text(field).map(str::to_string)
}

/// Text of a child element parsed as a number; malformed text is dropped
/// with a warning instead of aborting the read.
pub(crate) fn child_parsed<T: std::str::FromStr>(elm: &Element, field: &str) -> Option<T> {
    let text = elm.find_text(field)?;
    match text.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(field = %field, text = %text, "unparseable numeric field, leaving unset");
            None
        }
    }
}
