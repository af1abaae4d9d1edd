use crate::path::PathTemplate;
use crate::value::{Value, ValueKind};
use crate::version::PanOsVersion;

/// One version-gated rendering of a parameter.
#[derive(Debug, Clone)]
pub struct VersionProfile {
    /// Lowest device version this profile applies to.
    pub min_version: PanOsVersion,
    /// Where the value lives relative to the object's `<entry>` element.
    pub path: PathTemplate,
    pub kind: ValueKind,
    /// Optional closed set of allowed scalar tokens.
    pub values: Option<Vec<String>>,
    /// Gating rules in the form `(parameter, allowed values)`; all must
    /// hold for the parameter to materialize.
    pub condition: Vec<(String, Vec<String>)>,
}

impl VersionProfile {
    fn new(min_version: PanOsVersion, kind: ValueKind, path: &str) -> Self {
        Self {
            min_version,
            path: PathTemplate::parse(path),
            kind,
            values: None,
            condition: Vec::new(),
        }
    }
}

/// Declaration of one caller-facing parameter: its default and every
/// version-specific rendering, ordered by ascending minimum version.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    /// Value assumed when the caller never set the parameter.
    pub default: Option<Value>,
    pub profiles: Vec<VersionProfile>,
}

impl ParamSpec {
    /// Declare a parameter available on every device version.
    pub fn new(name: &str, kind: ValueKind, path: &str) -> Self {
        Self {
            name: name.to_string(),
            default: None,
            profiles: vec![VersionProfile::new(PanOsVersion::new(0, 0, 0), kind, path)],
        }
    }

    /// Declare a parameter with no base rendering; it only exists from the
    /// first [`ParamSpec::since`] version onward.
    pub fn excluded(name: &str) -> Self {
        Self {
            name: name.to_string(),
            default: None,
            profiles: Vec::new(),
        }
    }

    /// Add a rendering that takes over from `version` onward.
    pub fn since(mut self, version: PanOsVersion, kind: ValueKind, path: &str) -> Self {
        self.profiles.push(VersionProfile::new(version, kind, path));
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Restrict the most recent profile to a closed token set.
    pub fn values(mut self, allowed: &[&str]) -> Self {
        if let Some(profile) = self.profiles.last_mut() {
            profile.values = Some(allowed.iter().map(|s| s.to_string()).collect());
        }
        self
    }

    /// Gate the most recent profile on another parameter's value.
    pub fn when(mut self, param: &str, allowed: &[&str]) -> Self {
        if let Some(profile) = self.profiles.last_mut() {
            profile.condition.push((
                param.to_string(),
                allowed.iter().map(|s| s.to_string()).collect(),
            ));
        }
        self
    }

    /// The profile in force at `version`: the greatest declared minimum
    /// version not exceeding it. `None` means the parameter does not exist
    /// on such devices.
    pub fn resolve(&self, version: PanOsVersion) -> Option<&VersionProfile> {
        self.profiles
            .iter()
            .rev()
            .find(|profile| profile.min_version <= version)
    }
}
