use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Error raised when a version string cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid PAN-OS version: {0}")]
pub struct VersionParseError(pub String);

/// A PAN-OS software version such as `10.1.3`.
///
/// Ordering is lexicographic over (major, minor, patch), which is how the
/// platform itself compares versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PanOsVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PanOsVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Display for PanOsVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for PanOsVersion {
    type Err = VersionParseError;

    /// Parse `10.1.3`, `8.1` (patch defaults to 0), or a hotfix form such
    /// as `9.1.3-h1` (the hotfix suffix is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let base = trimmed.split_once('-').map_or(trimmed, |(base, _)| base);
        let mut parts = base.split('.');

        let major = parse_part(parts.next(), s)?;
        let minor = parse_part(parts.next(), s)?;
        let patch = match parts.next() {
            Some(part) => parse_part(Some(part), s)?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(VersionParseError(s.to_string()));
        }
        Ok(PanOsVersion::new(major, minor, patch))
    }
}

fn parse_part(part: Option<&str>, full: &str) -> Result<u32, VersionParseError> {
    part.and_then(|p| p.parse().ok())
        .ok_or_else(|| VersionParseError(full.to_string()))
}
