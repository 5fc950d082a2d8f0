//! Path templates with `{name}` placeholders.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{Params, ParamsError};

/// Characters escaped in a substituted path segment (everything but the
/// RFC 3986 unreserved set).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// What to do with a placeholder that has no matching parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathMode {
    /// Substitute an empty string.
    #[default]
    Lenient,
    /// Fail with a request-data error.
    Strict,
}

/// An endpoint path before parameter substitution, e.g. `/users/{id}`.
///
/// The template is also stored in request extensions, so middleware can
/// report the route rather than the resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    /// Create a new path template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// Get the template string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Placeholder names, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        Segments::new(self.0).filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder from `params`.
    ///
    /// Values are percent-encoded as path segments. A missing parameter
    /// becomes an empty string in [`PathMode::Lenient`] and an error in
    /// [`PathMode::Strict`].
    pub fn render(&self, params: &Params, mode: PathMode) -> Result<String, ParamsError> {
        let mut path = String::with_capacity(self.0.len());
        for segment in Segments::new(self.0) {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Placeholder(name) => match params.path_value(name) {
                    Some(value) => path.extend(utf8_percent_encode(&value, PATH_SEGMENT)),
                    None if mode == PathMode::Strict => {
                        return Err(ParamsError::field(
                            name,
                            format!("missing value for path placeholder `{{{name}}}`"),
                        ));
                    }
                    None => {}
                },
            }
        }
        Ok(path)
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PathTemplate {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Placeholder(&'static str),
}

/// Splits a template into literals and placeholders. An unclosed `{` is
/// kept as literal text.
struct Segments {
    rest: &'static str,
}

impl Segments {
    const fn new(template: &'static str) -> Self {
        Self { rest: template }
    }
}

impl Iterator for Segments {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.rest.is_empty() {
            return None;
        }

        if let Some(after_open) = self.rest.strip_prefix('{')
            && let Some(close) = after_open.find('}')
        {
            let (name, tail) = after_open.split_at(close);
            self.rest = tail.get(1..).unwrap_or_default();
            return Some(Segment::Placeholder(name));
        }

        // Literal up to the next `{` that is not at the start
        let end = self
            .rest
            .get(1..)
            .and_then(|tail| tail.find('{'))
            .map_or(self.rest.len(), |index| index + 1);
        let (literal, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(Segment::Literal(literal))
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn path_template_as_str() {
        let template = PathTemplate::new("/users/{id}/posts/{post_id}");
        check!(template.as_str() == "/users/{id}/posts/{post_id}");
        check!(template.to_string() == "/users/{id}/posts/{post_id}");
    }

    #[test]
    fn placeholders_in_order() {
        let template = PathTemplate::new("/users/{id}/posts/{post_id}");
        let names: Vec<_> = template.placeholders().collect();
        check!(names == ["id", "post_id"]);
    }

    #[test]
    fn render_substitutes_value() {
        let template = PathTemplate::new("/users/{userId}");
        let params = Params::new().with("userId", "123");
        let path = template.render(&params, PathMode::Lenient).expect("render");
        check!(path == "/users/123");
    }

    #[test]
    fn render_missing_is_empty_when_lenient() {
        let template = PathTemplate::new("/users/{userId}");
        let path = template
            .render(&Params::new(), PathMode::Lenient)
            .expect("render");
        check!(path == "/users/");
    }

    #[test]
    fn render_missing_fails_when_strict() {
        let template = PathTemplate::new("/users/{userId}");
        let_assert!(Err(err) = template.render(&Params::new(), PathMode::Strict));
        check!(err.field_name() == Some("userId"));
        check!(err.to_string() == "missing value for path placeholder `{userId}`");
    }

    #[test]
    fn render_encodes_segment() {
        let template = PathTemplate::new("/files/{name}");
        let params = Params::new().with("name", "a b/c");
        let path = template.render(&params, PathMode::Lenient).expect("render");
        check!(path == "/files/a%20b%2Fc");
    }

    #[test]
    fn render_numbers_and_adjacent_placeholders() {
        let template = PathTemplate::new("/v{version}/{a}{b}");
        let params = Params::new()
            .with("version", 2_u64)
            .with("a", "x")
            .with("b", "y");
        let path = template.render(&params, PathMode::Strict).expect("render");
        check!(path == "/v2/xy");
    }

    #[test]
    fn unclosed_brace_is_literal() {
        let template = PathTemplate::new("/odd/{name");
        check!(template.placeholders().count() == 0);
        let path = template
            .render(&Params::new(), PathMode::Strict)
            .expect("render");
        check!(path == "/odd/{name");
    }
}
