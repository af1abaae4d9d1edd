use std::collections::BTreeMap;

use panos_schema::{PanOsVersion, Schema, SchemaError, Value};
use panos_xml::Element;

use crate::opstate::RuleOpState;
use crate::{nat, pbf, security};

/// The kinds of policy rule this crate models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleKind {
    Security,
    Nat,
    Pbf,
}

impl RuleKind {
    /// Parameter table for this rule kind.
    pub fn schema(self) -> &'static Schema {
        match self {
            RuleKind::Security => security::schema(),
            RuleKind::Nat => nat::schema(),
            RuleKind::Pbf => pbf::schema(),
        }
    }

    /// Style token used by the rule-hit-count command.
    pub fn hit_count_style(self) -> &'static str {
        match self {
            RuleKind::Security => "security",
            RuleKind::Nat => "nat",
            RuleKind::Pbf => "pbf",
        }
    }

    /// Configuration path below the rulebase element.
    pub fn xpath_suffix(self) -> &'static str {
        match self {
            RuleKind::Security => "security/rules",
            RuleKind::Nat => "nat/rules",
            RuleKind::Pbf => "pbf/rules",
        }
    }

    /// First segment of [`RuleKind::xpath_suffix`]; the token audit log
    /// paths are matched against.
    pub(crate) fn config_segment(self) -> &'static str {
        match self.xpath_suffix().split_once('/') {
            Some((head, _)) => head,
            None => self.xpath_suffix(),
        }
    }
}

/// One policy rule: a name and a parameter value map, plus cached
/// operational state.
///
/// A fresh rule starts with its schema defaults. Setting a parameter
/// validates the name; value shapes are checked when the rule is rendered
/// or parsed.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    name: String,
    values: BTreeMap<String, Value>,
    pub opstate: RuleOpState,
}

impl Rule {
    pub fn new(kind: RuleKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            values: kind.schema().defaults(),
            opstate: RuleOpState::new(name.clone()),
            name,
        }
    }

    pub fn security(name: impl Into<String>) -> Self {
        Self::new(RuleKind::Security, name)
    }

    pub fn nat(name: impl Into<String>) -> Self {
        Self::new(RuleKind::Nat, name)
    }

    pub fn pbf(name: impl Into<String>) -> Self {
        Self::new(RuleKind::Pbf, name)
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a parameter. The name must be declared by this rule kind's
    /// schema; the value's shape is validated later, at render time.
    pub fn set(&mut self, param: &str, value: impl Into<Value>) -> Result<(), SchemaError> {
        if !self.kind.schema().has_param(param) {
            return Err(SchemaError::UnknownParam(param.to_string()));
        }
        self.values.insert(param.to_string(), value.into());
        Ok(())
    }

    /// Current value of a parameter, set or defaulted.
    pub fn get(&self, param: &str) -> Option<&Value> {
        self.values.get(param)
    }

    /// Remove a parameter from the value map, leaving it unset (not
    /// defaulted).
    pub fn unset(&mut self, param: &str) -> Result<(), SchemaError> {
        if !self.kind.schema().has_param(param) {
            return Err(SchemaError::UnknownParam(param.to_string()));
        }
        self.values.remove(param);
        Ok(())
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Render this rule as the `<entry>` element a device running
    /// `version` expects.
    pub fn element(&self, version: PanOsVersion) -> Result<Element, SchemaError> {
        self.kind.schema().build(&self.name, &self.values, version)
    }

    /// Replace this rule's values from a device-provided `<entry>`
    /// element, adopting the entry's name when present.
    pub fn update_from(&mut self, entry: &Element, version: PanOsVersion) -> Result<(), SchemaError> {
        let values = self.kind.schema().parse(entry, version)?;
        if let Some(name) = entry.attr("name") {
            self.name = name.to_string();
        }
        self.values = values;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use panos_schema::{PanOsVersion, SchemaError, Value};

    use super::{Rule, RuleKind};

    const V10: PanOsVersion = PanOsVersion::new(10, 0, 0);

    #[test]
    fn new_rule_carries_schema_defaults() {
        let rule = Rule::security("r1");
        assert_eq!(rule.get("fromzone"), Some(&Value::from(["any"])));
        assert_eq!(rule.get("type"), Some(&Value::from("universal")));
        assert_eq!(rule.get("action"), None);
    }

    #[test]
    fn set_rejects_undeclared_parameter() {
        let mut rule = Rule::security("r1");
        let err = rule.set("activate_lasers", true).expect_err("unknown");
        assert!(matches!(err, SchemaError::UnknownParam(_)));
    }

    #[test]
    fn unset_removes_a_default() {
        let mut rule = Rule::nat("n1");
        assert!(rule.get("service").is_some());
        rule.unset("service").expect("unset");
        assert_eq!(rule.get("service"), None);

        let entry = rule.element(V10).expect("element");
        assert!(entry.child("service").is_none());
    }

    #[test]
    fn update_from_adopts_entry_name() {
        let mut rule = Rule::security("old-name");
        let entry = panos_xml::parse(
            "<entry name=\"new-name\"><action>deny</action></entry>",
        )
        .expect("xml");

        rule.update_from(&entry, V10).expect("update");
        assert_eq!(rule.name(), "new-name");
        assert_eq!(rule.get("action"), Some(&Value::from("deny")));
    }

    #[test]
    fn defaults_survive_build_parse_round_trip() {
        for kind in [RuleKind::Security, RuleKind::Nat, RuleKind::Pbf] {
            let schema = kind.schema();
            let defaults = schema.defaults();
            let entry = schema.build("r1", &defaults, V10).expect("build");
            let parsed = schema.parse(&entry, V10).expect("parse");
            for (name, value) in &defaults {
                assert_eq!(
                    parsed.get(name),
                    Some(value),
                    "{name} default must come back unchanged"
                );
            }
        }
    }

    #[test]
    fn kind_tokens_match_platform_names() {
        assert_eq!(RuleKind::Security.hit_count_style(), "security");
        assert_eq!(RuleKind::Pbf.xpath_suffix(), "pbf/rules");
        assert_eq!(RuleKind::Nat.config_segment(), "nat");
    }
}
