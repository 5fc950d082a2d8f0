//! Runtime validation of decoded response bodies.
//!
//! A [`Schema`] turns a raw JSON value into a typed value or a list of
//! [`Issues`]. The invoker only depends on this trait:
//!
//! - [`Shape`] validates through `serde` (the common case),
//! - [`Ignored`] accepts anything (the default base schema),
//! - [`from_fn`] wraps a closure for hand-written checks.
//!
//! Response bodies are validated against the endpoint schema *and* the base
//! schema of the client; both halves end up in a [`Merged`] value.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Capability to validate a decoded JSON value.
pub trait Schema {
    /// The typed value produced on success.
    type Output;

    /// Validate `raw`, returning the typed value or the validation issues.
    fn validate(&self, raw: &Value) -> Result<Self::Output, Issues>;
}

// ============================================================================
// Issues
// ============================================================================

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Dotted path to the offending value, empty for the root.
    pub path: String,
    /// What went wrong.
    pub message: String,
}

impl Issue {
    /// Create an issue at `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an issue about the root value.
    #[must_use]
    pub fn root(message: impl Into<String>) -> Self {
        Self::new("", message)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() || self.path == "." {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// List of validation issues.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Issues(Vec<Issue>);

impl Issues {
    /// Wrap a single issue.
    #[must_use]
    pub fn single(issue: Issue) -> Self {
        Self(vec![issue])
    }

    /// Append all issues of `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Iterate over the issues.
    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.0.iter()
    }

    /// Number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there is no issue.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Issue> for Issues {
    fn from(issue: Issue) -> Self {
        Self::single(issue)
    }
}

impl FromIterator<Issue> for Issues {
    fn from_iter<I: IntoIterator<Item = Issue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, issue) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Stock schemas
// ============================================================================

/// Schema validating through `serde` deserialization.
///
/// Errors carry the path of the failing field thanks to
/// `serde_path_to_error`.
///
/// ```
/// use serde::Deserialize;
/// use vetted_core::{Schema, Shape};
///
/// #[derive(Debug, Deserialize)]
/// struct Project { id: u64 }
///
/// let schema = Shape::<Project>::new();
/// let project = schema.validate(&serde_json::json!({"id": 7})).expect("valid");
/// assert_eq!(project.id, 7);
///
/// let issues = schema.validate(&serde_json::json!({})).expect_err("invalid");
/// assert!(issues.to_string().contains("missing field `id`"));
/// ```
pub struct Shape<T>(PhantomData<fn() -> T>);

impl<T> Shape<T> {
    /// Create the schema.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Shape<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Shape<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Shape<T> {}

impl<T> fmt::Debug for Shape<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> Schema for Shape<T> {
    type Output = T;

    fn validate(&self, raw: &Value) -> Result<T, Issues> {
        serde_path_to_error::deserialize(raw).map_err(|err| {
            Issues::single(Issue::new(err.path().to_string(), err.inner().to_string()))
        })
    }
}

/// Schema accepting any value, producing `()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignored;

impl Schema for Ignored {
    type Output = ();

    fn validate(&self, _raw: &Value) -> Result<(), Issues> {
        Ok(())
    }
}

/// Schema backed by a closure, see [`from_fn`].
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

/// Build a schema from a validation closure.
///
/// ```
/// use serde_json::Value;
/// use vetted_core::{Issue, Issues, Schema, schema};
///
/// let status_ok = schema::from_fn(|raw: &Value| match raw.get("status") {
///     Some(Value::String(status)) if status == "ok" => Ok(()),
///     _ => Err(Issues::single(Issue::new("status", "expected \"ok\""))),
/// });
/// assert!(status_ok.validate(&serde_json::json!({"status": "ok"})).is_ok());
/// assert!(status_ok.validate(&serde_json::json!({"status": "ko"})).is_err());
/// ```
pub const fn from_fn<F, T>(f: F) -> FromFn<F>
where
    F: Fn(&Value) -> Result<T, Issues>,
{
    FromFn(f)
}

impl<F, T> Schema for FromFn<F>
where
    F: Fn(&Value) -> Result<T, Issues>,
{
    type Output = T;

    fn validate(&self, raw: &Value) -> Result<T, Issues> {
        (self.0)(raw)
    }
}

// ============================================================================
// Intersection with the base schema
// ============================================================================

/// A body validated against both the endpoint schema and the base schema.
///
/// Derefs to the endpoint part; the envelope fields are in [`Merged::base`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged<B, T> {
    base: B,
    data: T,
}

impl<B, T> Merged<B, T> {
    /// Assemble a merged value.
    #[must_use]
    pub const fn new(base: B, data: T) -> Self {
        Self { base, data }
    }

    /// The part validated by the base schema.
    #[must_use]
    pub const fn base(&self) -> &B {
        &self.base
    }

    /// The part validated by the endpoint schema.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Consume into the endpoint part.
    #[must_use]
    pub fn into_data(self) -> T {
        self.data
    }

    /// Consume into (base, data).
    #[must_use]
    pub fn into_parts(self) -> (B, T) {
        (self.base, self.data)
    }
}

impl<B, T> Deref for Merged<B, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

/// Validate `raw` against `schema` and `base`, reporting the issues of both.
pub fn validate_merged<S, B>(
    schema: &S,
    base: &B,
    raw: &Value,
) -> Result<Merged<B::Output, S::Output>, Issues>
where
    S: Schema + ?Sized,
    B: Schema + ?Sized,
{
    match (schema.validate(raw), base.validate(raw)) {
        (Ok(data), Ok(base)) => Ok(Merged::new(base, data)),
        (Err(issues), Ok(_)) | (Ok(_), Err(issues)) => Err(issues),
        (Err(mut issues), Err(base_issues)) => {
            issues.extend(base_issues);
            Err(issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Envelope {
        status: String,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Project {
        id: u64,
        name: String,
    }

    #[test]
    fn shape_accepts_matching_value() {
        let project = Shape::<Project>::new()
            .validate(&json!({"id": 1, "name": "alpha", "extra": true}))
            .expect("valid");
        assert_eq!(
            project,
            Project {
                id: 1,
                name: "alpha".to_string()
            }
        );
    }

    #[test]
    fn shape_reports_nested_path() {
        #[derive(Debug, Deserialize)]
        struct Page {
            #[allow(dead_code)]
            items: Vec<Project>,
        }

        let issues = Shape::<Page>::new()
            .validate(&json!({"items": [{"id": 1, "name": "a"}, {"id": "two", "name": "b"}]}))
            .expect_err("invalid");

        assert_eq!(issues.len(), 1);
        let issue = issues.iter().next().expect("one issue");
        assert_eq!(issue.path, "items[1].id");
    }

    #[test]
    fn ignored_accepts_anything() {
        assert!(Ignored.validate(&json!(null)).is_ok());
        assert!(Ignored.validate(&json!([1, 2, 3])).is_ok());
    }

    #[test]
    fn merged_keeps_both_halves() {
        let raw = json!({"status": "ok", "id": 3, "name": "gamma"});
        let merged = validate_merged(&Shape::<Project>::new(), &Shape::<Envelope>::new(), &raw)
            .expect("valid");

        assert_eq!(merged.base().status, "ok");
        assert_eq!(merged.id, 3);
        assert_eq!(merged.data().name, "gamma");
    }

    #[test]
    fn merged_collects_issues_from_both_sides() {
        let raw = json!({"id": 3});
        let issues = validate_merged(&Shape::<Project>::new(), &Shape::<Envelope>::new(), &raw)
            .expect_err("invalid");

        assert_eq!(issues.len(), 2);
        let text = issues.to_string();
        assert!(text.contains("name"), "{text}");
        assert!(text.contains("status"), "{text}");
    }

    #[test]
    fn merged_fails_on_base_only() {
        let raw = json!({"id": 3, "name": "gamma"});
        let issues = validate_merged(&Shape::<Project>::new(), &Shape::<Envelope>::new(), &raw)
            .expect_err("invalid");
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn issues_display() {
        let issues: Issues = [
            Issue::root("expected an object"),
            Issue::new("name", "missing field"),
        ]
        .into_iter()
        .collect();
        insta::assert_snapshot!(issues, @"expected an object; name: missing field");
    }
}
