use std::fmt::{self, Display, Formatter};

/// One segment of a configuration path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Fixed element name.
    Literal(String),
    /// Segment whose element name is the current value of the named
    /// parameter.
    Ref(String),
}

/// A slash-separated XML path with optional `{placeholder}` segments, for
/// example `source-translation/{source_translation_type}/bi-directional`.
///
/// Placeholders occupy whole segments. A template that ends with a
/// placeholder naming its own parameter makes the parameter's value the
/// final element name instead of element content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<PathSegment>,
}

impl PathTemplate {
    /// Split a raw template into segments. Braces only count when they
    /// wrap a whole segment; everything else stays literal.
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|segment| {
                match segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                {
                    Some(name) if !name.is_empty() => PathSegment::Ref(name.to_string()),
                    _ => PathSegment::Literal(segment.to_string()),
                }
            })
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Names of all placeholder segments.
    pub fn refs(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            PathSegment::Ref(name) => Some(name.as_str()),
            PathSegment::Literal(_) => None,
        })
    }

    /// Whether the final segment is a placeholder for `name`.
    pub fn ends_with_ref(&self, name: &str) -> bool {
        matches!(self.segments.last(), Some(PathSegment::Ref(r)) if r == name)
    }

    /// Whether `name` appears as a placeholder anywhere but the final
    /// segment.
    pub fn refs_before_last(&self, name: &str) -> bool {
        let len = self.segments.len();
        self.segments
            .iter()
            .take(len.saturating_sub(1))
            .any(|segment| matches!(segment, PathSegment::Ref(r) if r == name))
    }
}

impl Display for PathTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            match segment {
                PathSegment::Literal(name) => write!(f, "{name}")?,
                PathSegment::Ref(name) => write!(f, "{{{name}}}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PathSegment, PathTemplate};

    #[test]
    fn splits_literals_and_refs() {
        let tpl = PathTemplate::parse("source-translation/{source_translation_type}/interface");
        assert_eq!(
            tpl.segments(),
            [
                PathSegment::Literal("source-translation".to_string()),
                PathSegment::Ref("source_translation_type".to_string()),
                PathSegment::Literal("interface".to_string()),
            ]
        );
        assert_eq!(tpl.refs().collect::<Vec<_>>(), ["source_translation_type"]);
    }

    #[test]
    fn terminal_self_reference_is_detected() {
        let tpl = PathTemplate::parse("action/{action}");
        assert!(tpl.ends_with_ref("action"));
        assert!(!tpl.refs_before_last("action"));

        let nested = PathTemplate::parse("action/{action}/forward-to-vsys");
        assert!(!nested.ends_with_ref("action"));
        assert!(nested.refs_before_last("action"));
    }

    #[test]
    fn malformed_braces_stay_literal() {
        let tpl = PathTemplate::parse("a{b}/{}/c");
        assert_eq!(
            tpl.segments(),
            [
                PathSegment::Literal("a{b}".to_string()),
                PathSegment::Literal("{}".to_string()),
                PathSegment::Literal("c".to_string()),
            ]
        );
    }

    #[test]
    fn renders_back_to_source_form() {
        let raw = "fallback/{fallback_type}";
        assert_eq!(PathTemplate::parse(raw).to_string(), raw);
    }
}
