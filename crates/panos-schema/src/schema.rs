use std::collections::{BTreeMap, HashSet};

use panos_xml::Element;
use thiserror::Error;
use tracing::debug;

use crate::param::{ParamSpec, VersionProfile};
use crate::path::PathSegment;
use crate::value::{Value, ValueKind};
use crate::version::PanOsVersion;

/// Error type produced by schema validation, build, and parse.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The named parameter is not declared by this schema.
    #[error("unknown parameter: {0}")]
    UnknownParam(String),
    /// Two declarations share one parameter name.
    #[error("duplicate parameter: {0}")]
    DuplicateParam(String),
    /// A path template references a parameter the schema does not declare.
    #[error("parameter {param} references undeclared parameter {placeholder}")]
    UnknownPlaceholder { param: String, placeholder: String },
    /// A parameter names itself before the final segment of its own path.
    #[error("parameter {0} may reference itself only in its final path segment")]
    SelfReference(String),
    /// A parameter declares no version profiles at all.
    #[error("parameter {0} declares no version profiles")]
    NoProfiles(String),
    /// Version profiles are not in ascending minimum-version order.
    #[error("parameter {0} declares version profiles out of order")]
    ProfileOrder(String),
    /// The value is outside the parameter's closed token set.
    #[error("value '{value}' not allowed for parameter {param}")]
    Disallowed { param: String, value: String },
    /// The value's shape does not fit the parameter's kind.
    #[error("wrong value type for parameter {param}: expected {expected}")]
    WrongKind { param: String, expected: &'static str },
    /// Text could not be read as a decimal integer.
    #[error("invalid integer '{text}' for parameter {param}")]
    BadInt { param: String, text: String },
    /// Text was not one of the tokens the kind accepts.
    #[error("invalid token '{text}' for parameter {param}")]
    BadToken { param: String, text: String },
}

/// An ordered parameter table for one kind of configuration object,
/// with the generic engine that renders and reads `<entry>` elements.
#[derive(Debug, Clone)]
pub struct Schema {
    entity: String,
    params: Vec<ParamSpec>,
}

impl Schema {
    /// Assemble and validate a schema. Parameter names must be unique,
    /// placeholders must reference declared parameters, and profiles must
    /// be declared in ascending version order.
    pub fn new(entity: &str, params: Vec<ParamSpec>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for spec in &params {
            if !seen.insert(spec.name.as_str()) {
                return Err(SchemaError::DuplicateParam(spec.name.clone()));
            }
            if spec.profiles.is_empty() {
                return Err(SchemaError::NoProfiles(spec.name.clone()));
            }
            for pair in spec.profiles.windows(2) {
                if pair[0].min_version >= pair[1].min_version {
                    return Err(SchemaError::ProfileOrder(spec.name.clone()));
                }
            }
        }
        for spec in &params {
            for profile in &spec.profiles {
                for placeholder in profile.path.refs() {
                    if !seen.contains(placeholder) {
                        return Err(SchemaError::UnknownPlaceholder {
                            param: spec.name.clone(),
                            placeholder: placeholder.to_string(),
                        });
                    }
                }
                if profile.path.refs_before_last(&spec.name) {
                    return Err(SchemaError::SelfReference(spec.name.clone()));
                }
            }
        }
        Ok(Self {
            entity: entity.to_string(),
            params,
        })
    }

    /// Label identifying the object kind in logs and errors.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.param(name).is_some()
    }

    /// Starting value map holding every declared default.
    pub fn defaults(&self) -> BTreeMap<String, Value> {
        self.params
            .iter()
            .filter_map(|spec| {
                spec.default
                    .clone()
                    .map(|default| (spec.name.clone(), default))
            })
            .collect()
    }

    /// Render a value map as the object's `<entry name="...">` element for
    /// a device running `version`.
    ///
    /// Parameters walk in declaration order. A parameter is skipped when it
    /// has no profile at this version, no value in the map, a failed
    /// condition, or an unresolvable placeholder; everything else renders
    /// per its kind, sharing intermediate elements along common prefixes.
    pub fn build(
        &self,
        name: &str,
        values: &BTreeMap<String, Value>,
        version: PanOsVersion,
    ) -> Result<Element, SchemaError> {
        for key in values.keys() {
            if !self.has_param(key) {
                return Err(SchemaError::UnknownParam(key.clone()));
            }
        }

        let mut entry = Element::new("entry");
        entry.set_attr("name", name);
        let mut emitted = 0usize;
        for spec in &self.params {
            let Some(profile) = spec.resolve(version) else {
                continue;
            };
            let Some(value) = values.get(&spec.name) else {
                continue;
            };
            if !condition_met(&profile.condition, values) {
                continue;
            }
            if apply_param(&mut entry, spec, profile, value, values)? {
                emitted += 1;
            }
        }
        debug!(
            entity = %self.entity,
            name = %name,
            version = %version,
            params = emitted,
            "built entry element"
        );
        Ok(entry)
    }

    /// Read an object's `<entry>` element back into a fresh value map for a
    /// device running `version`.
    ///
    /// Parameters walk in declaration order so conditions and placeholders
    /// see earlier results. A parameter whose path is absent, whose
    /// condition fails, or whose placeholder cannot resolve falls back to
    /// its default; malformed content is an error naming the parameter.
    pub fn parse(
        &self,
        entry: &Element,
        version: PanOsVersion,
    ) -> Result<BTreeMap<String, Value>, SchemaError> {
        let mut out = BTreeMap::new();
        for spec in &self.params {
            let Some(profile) = spec.resolve(version) else {
                continue;
            };
            if !condition_met(&profile.condition, &out) {
                insert_default(&mut out, spec);
                continue;
            }
            match read_param(entry, spec, profile, &out)? {
                Some(value) => {
                    out.insert(spec.name.clone(), value);
                }
                None => insert_default(&mut out, spec),
            }
        }
        debug!(
            entity = %self.entity,
            version = %version,
            params = out.len(),
            "parsed entry element"
        );
        Ok(out)
    }
}

fn insert_default(out: &mut BTreeMap<String, Value>, spec: &ParamSpec) {
    if let Some(default) = &spec.default {
        out.insert(spec.name.clone(), default.clone());
    }
}

fn condition_met(condition: &[(String, Vec<String>)], values: &BTreeMap<String, Value>) -> bool {
    condition.iter().all(|(param, allowed)| {
        values
            .get(param)
            .and_then(Value::to_path_text)
            .map(|current| allowed.iter().any(|token| token == &current))
            .unwrap_or(false)
    })
}

/// Render one parameter into the entry tree. Returns whether anything was
/// written.
fn apply_param(
    entry: &mut Element,
    spec: &ParamSpec,
    profile: &VersionProfile,
    value: &Value,
    values: &BTreeMap<String, Value>,
) -> Result<bool, SchemaError> {
    if profile.kind == ValueKind::Attrib {
        let Some(PathSegment::Literal(attr_name)) = profile.path.segments().last() else {
            return Ok(false);
        };
        let text = scalar_text(spec, profile, value)?;
        entry.set_attr(attr_name.clone(), text);
        return Ok(true);
    }

    let mut resolved: Vec<String> = Vec::with_capacity(profile.path.segments().len());
    let mut consumed_self = false;
    for segment in profile.path.segments() {
        match segment {
            PathSegment::Literal(name) => resolved.push(name.clone()),
            PathSegment::Ref(target) if target == &spec.name => {
                resolved.push(scalar_text(spec, profile, value)?);
                consumed_self = true;
            }
            PathSegment::Ref(target) => {
                match values.get(target).and_then(Value::to_path_text) {
                    Some(text) => resolved.push(text),
                    None => return Ok(false),
                }
            }
        }
    }
    if resolved.is_empty() {
        return Ok(false);
    }

    let leaf = materialize(entry, &resolved);
    if consumed_self {
        // The value became the final element name; nothing left to write.
        return Ok(true);
    }
    match profile.kind {
        ValueKind::Scalar => {
            let text = scalar_text(spec, profile, value)?;
            leaf.set_text(text);
        }
        ValueKind::YesNo => {
            leaf.set_text(yesno_text(spec, value)?);
        }
        ValueKind::Int => {
            leaf.set_text(int_text(spec, value)?);
        }
        ValueKind::Member => {
            for item in list_items(spec, profile, value)? {
                leaf.push_child(Element::new("member").with_text(item));
            }
        }
        ValueKind::Entry => {
            for item in list_items(spec, profile, value)? {
                leaf.push_child(Element::new("entry").with_attr("name", item));
            }
        }
        ValueKind::Attrib => {}
    }
    Ok(true)
}

/// Read one parameter from the entry tree, resolving placeholders against
/// values parsed so far. `None` means absent.
fn read_param(
    entry: &Element,
    spec: &ParamSpec,
    profile: &VersionProfile,
    sofar: &BTreeMap<String, Value>,
) -> Result<Option<Value>, SchemaError> {
    if profile.kind == ValueKind::Attrib {
        let Some(PathSegment::Literal(attr_name)) = profile.path.segments().last() else {
            return Ok(None);
        };
        return match entry.attr(attr_name) {
            Some(raw) => {
                check_allowed(spec, profile, raw)?;
                Ok(Some(Value::Str(raw.to_string())))
            }
            None => Ok(None),
        };
    }

    let mut resolved: Vec<String> = Vec::with_capacity(profile.path.segments().len());
    for segment in profile.path.segments() {
        match segment {
            PathSegment::Literal(name) => resolved.push(name.clone()),
            PathSegment::Ref(target) if target == &spec.name => {
                // The element name is the value itself; probe the declared
                // tokens in order and take the first present.
                let Some(allowed) = &profile.values else {
                    return Ok(None);
                };
                let Some(parent) = find_path(entry, &resolved) else {
                    return Ok(None);
                };
                for candidate in allowed {
                    if parent.child(candidate).is_some() {
                        return Ok(Some(Value::Str(candidate.clone())));
                    }
                }
                return Ok(None);
            }
            PathSegment::Ref(target) => match sofar.get(target).and_then(Value::to_path_text) {
                Some(text) => resolved.push(text),
                None => return Ok(None),
            },
        }
    }
    let Some(leaf) = find_path(entry, &resolved) else {
        return Ok(None);
    };

    match profile.kind {
        ValueKind::Scalar => match leaf.text() {
            Some(text) => {
                check_allowed(spec, profile, text)?;
                Ok(Some(Value::Str(text.to_string())))
            }
            None => Ok(None),
        },
        ValueKind::YesNo => match leaf.text() {
            Some("yes") => Ok(Some(Value::Bool(true))),
            Some("no") => Ok(Some(Value::Bool(false))),
            Some(other) => Err(SchemaError::BadToken {
                param: spec.name.clone(),
                text: other.to_string(),
            }),
            None => Ok(None),
        },
        ValueKind::Int => match leaf.text() {
            Some(text) => text
                .trim()
                .parse::<i64>()
                .map(|value| Some(Value::Int(value)))
                .map_err(|_| SchemaError::BadInt {
                    param: spec.name.clone(),
                    text: text.to_string(),
                }),
            None => Ok(None),
        },
        ValueKind::Member => {
            let items = leaf
                .children
                .iter()
                .filter(|child| child.tag == "member")
                .filter_map(|child| child.text().map(str::to_string))
                .collect();
            Ok(Some(Value::List(items)))
        }
        ValueKind::Entry => {
            let items = leaf
                .children
                .iter()
                .filter(|child| child.tag == "entry")
                .filter_map(|child| child.attr("name").map(str::to_string))
                .collect();
            Ok(Some(Value::List(items)))
        }
        ValueKind::Attrib => Ok(None),
    }
}

fn materialize<'a>(entry: &'a mut Element, path: &[String]) -> &'a mut Element {
    let mut current = entry;
    for segment in path {
        current = current.ensure_child(segment);
    }
    current
}

fn find_path<'a>(entry: &'a Element, path: &[String]) -> Option<&'a Element> {
    let mut current = entry;
    for segment in path {
        current = current.child(segment)?;
    }
    Some(current)
}

fn scalar_text(
    spec: &ParamSpec,
    profile: &VersionProfile,
    value: &Value,
) -> Result<String, SchemaError> {
    let text = value.to_path_text().ok_or_else(|| SchemaError::WrongKind {
        param: spec.name.clone(),
        expected: "string",
    })?;
    check_allowed(spec, profile, &text)?;
    Ok(text)
}

fn yesno_text(spec: &ParamSpec, value: &Value) -> Result<&'static str, SchemaError> {
    match value {
        Value::Bool(true) => Ok("yes"),
        Value::Bool(false) => Ok("no"),
        Value::Str(s) if s == "yes" => Ok("yes"),
        Value::Str(s) if s == "no" => Ok("no"),
        Value::Str(s) => Err(SchemaError::BadToken {
            param: spec.name.clone(),
            text: s.clone(),
        }),
        _ => Err(SchemaError::WrongKind {
            param: spec.name.clone(),
            expected: "yes/no",
        }),
    }
}

fn int_text(spec: &ParamSpec, value: &Value) -> Result<String, SchemaError> {
    match value {
        Value::Int(i) => Ok(i.to_string()),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(|i| i.to_string())
            .map_err(|_| SchemaError::BadInt {
                param: spec.name.clone(),
                text: s.clone(),
            }),
        _ => Err(SchemaError::WrongKind {
            param: spec.name.clone(),
            expected: "integer",
        }),
    }
}

fn list_items<'v>(
    spec: &ParamSpec,
    profile: &VersionProfile,
    value: &'v Value,
) -> Result<Vec<&'v str>, SchemaError> {
    let items = value.items().ok_or_else(|| SchemaError::WrongKind {
        param: spec.name.clone(),
        expected: profile.kind.label(),
    })?;
    for item in &items {
        check_allowed(spec, profile, item)?;
    }
    Ok(items)
}

fn check_allowed(spec: &ParamSpec, profile: &VersionProfile, text: &str) -> Result<(), SchemaError> {
    if let Some(allowed) = &profile.values {
        if !allowed.iter().any(|token| token == text) {
            return Err(SchemaError::Disallowed {
                param: spec.name.clone(),
                value: text.to_string(),
            });
        }
    }
    Ok(())
}
