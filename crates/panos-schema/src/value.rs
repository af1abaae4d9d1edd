/// How a parameter value is stored in the configuration tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    /// Text content of the leaf element.
    Scalar,
    /// Boolean rendered as the text tokens `yes` / `no`.
    YesNo,
    /// Integer rendered as decimal text.
    Int,
    /// One `<member>` child per list item.
    Member,
    /// One `<entry name="..."/>` child per list item.
    Entry,
    /// Attribute on the object's own `<entry>` element.
    Attrib,
}

impl ValueKind {
    /// Human-readable label used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            ValueKind::Scalar => "string",
            ValueKind::YesNo => "yes/no",
            ValueKind::Int => "integer",
            ValueKind::Member => "member list",
            ValueKind::Entry => "entry list",
            ValueKind::Attrib => "attribute",
        }
    }
}

/// A parameter value supplied by the caller or read back from the device.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
    List(Vec<String>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Text usable as an XML element name or condition token.
    ///
    /// Only strings and integers qualify; booleans and lists never name
    /// path segments.
    pub fn to_path_text(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Bool(_) | Value::List(_) => None,
        }
    }

    /// View the value as list items. A plain string counts as a one-item
    /// list, matching how the platform accepts single values for
    /// member/entry fields.
    pub fn items(&self) -> Option<Vec<&str>> {
        match self {
            Value::List(items) => Some(items.iter().map(String::as_str).collect()),
            Value::Str(s) => Some(vec![s.as_str()]),
            Value::Bool(_) | Value::Int(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(items: [&str; N]) -> Self {
        Value::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.iter().map(|s| s.to_string()).collect())
    }
}
