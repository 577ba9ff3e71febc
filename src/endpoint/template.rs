//! URL templates built from literal and parameter segments

use crate::TemplateError;
use std::collections::HashMap;
use std::fmt;

/// One piece of a URL template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Text copied verbatim into the rendered URL
    Literal(String),
    /// Placeholder replaced by a bound parameter value
    Parameter(String),
}

impl Segment {
    /// Parses a raw segment
    ///
    /// A segment is a parameter iff its first character is `{` and its last is
    /// `}`. Anything else, partial braces included, is a literal. There is no
    /// escaping.
    pub fn parse(raw: &str) -> Self {
        if raw.len() >= 2 && raw.starts_with('{') && raw.ends_with('}') {
            Segment::Parameter(raw[1..raw.len() - 1].to_string())
        } else {
            Segment::Literal(raw.to_string())
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Parameter(name) => write!(f, "{{{}}}", name),
        }
    }
}

/// A parsed endpoint pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlTemplate {
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Creates a template from already parsed segments
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Parses raw segments behind a literal `base` prefix
    ///
    /// The base is always literal, even if it happens to look like `{name}`.
    pub fn parse<'a>(base: &str, parts: impl IntoIterator<Item = &'a str>) -> Self {
        let segments = std::iter::once(Segment::Literal(base.to_string()))
            .chain(parts.into_iter().map(Segment::parse))
            .collect();
        Self { segments }
    }

    /// Parameter names referenced by the template, in segment order
    ///
    /// A parameter used twice appears twice.
    pub fn dependencies(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Parameter(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Renders the template, looking each parameter up by name
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::MissingBinding` if a referenced parameter has
    /// no entry in `bindings`.
    pub fn render(&self, bindings: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Parameter(name) => {
                    let value = bindings.get(name).ok_or_else(|| self.missing(name))?;
                    rendered.push_str(value);
                }
            }
        }
        Ok(rendered)
    }

    /// Renders the template positionally
    ///
    /// The i-th parameter segment takes `values[i]`, so a parameter referenced
    /// twice may take a different value at each position. `values` lines up
    /// with [`UrlTemplate::dependencies`].
    pub fn render_values(&self, values: &[String]) -> Result<String, TemplateError> {
        let mut values = values.iter();
        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Parameter(name) => {
                    let value = values.next().ok_or_else(|| self.missing(name))?;
                    rendered.push_str(value);
                }
            }
        }
        Ok(rendered)
    }

    fn missing(&self, name: &str) -> TemplateError {
        TemplateError::MissingBinding {
            name: name.to_string(),
            template: self.to_string(),
        }
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_segment_parse() {
        assert_eq!(Segment::parse("{app-id}"), Segment::Parameter("app-id".into()));
        assert_eq!(Segment::parse("{}"), Segment::Parameter(String::new()));
        assert_eq!(Segment::parse("jobs"), Segment::Literal("jobs".into()));
        assert_eq!(Segment::parse("{"), Segment::Literal("{".into()));
        assert_eq!(Segment::parse("{open"), Segment::Literal("{open".into()));
        assert_eq!(Segment::parse("close}"), Segment::Literal("close}".into()));
        assert_eq!(Segment::parse("a{b}"), Segment::Literal("a{b}".into()));
        assert_eq!(Segment::parse(""), Segment::Literal(String::new()));
    }

    #[test]
    fn test_dependencies_in_order_with_duplicates() {
        let template = UrlTemplate::parse("", ["{a}", "/", "{b}", "/", "{a}"]);
        assert_eq!(template.dependencies(), vec!["a", "b", "a"]);

        let literal = UrlTemplate::parse("http://x/", ["applications"]);
        assert!(literal.dependencies().is_empty());
    }

    #[test]
    fn test_base_is_always_literal() {
        let template = UrlTemplate::parse("{base}", ["x"]);
        assert!(template.dependencies().is_empty());
        assert_eq!(template.render(&HashMap::new()).unwrap(), "{base}x");
    }

    #[test]
    fn test_render() {
        let template = UrlTemplate::parse("http://h/api/", ["applications/", "{app-id}", "/jobs"]);
        let url = template.render(&bindings(&[("app-id", "app1")])).unwrap();
        assert_eq!(url, "http://h/api/applications/app1/jobs");
    }

    #[test]
    fn test_render_ignores_unused_bindings() {
        let template = UrlTemplate::parse("", ["stages"]);
        let url = template.render(&bindings(&[("unused", "x")])).unwrap();
        assert_eq!(url, "stages");
    }

    #[test]
    fn test_render_missing_binding() {
        let template = UrlTemplate::parse("", ["items/", "{missing}"]);
        let err = template.render(&bindings(&[("other", "1")])).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingBinding {
                name: "missing".into(),
                template: "items/{missing}".into(),
            }
        );
    }

    #[test]
    fn test_render_values_is_positional() {
        let template = UrlTemplate::parse("", ["{a}", "-", "{a}"]);
        let url = template
            .render_values(&["1".to_string(), "2".to_string()])
            .unwrap();
        assert_eq!(url, "1-2");
    }

    #[test]
    fn test_render_values_too_few() {
        let template = UrlTemplate::parse("", ["{a}", "{b}"]);
        let err = template.render_values(&["1".to_string()]).unwrap_err();
        assert!(matches!(err, TemplateError::MissingBinding { name, .. } if name == "b"));
    }

    #[test]
    fn test_display_round_trips_placeholders() {
        let template = UrlTemplate::parse("base/", ["applications/", "{app-id}", "/jobs"]);
        assert_eq!(template.to_string(), "base/applications/{app-id}/jobs");
    }
}
