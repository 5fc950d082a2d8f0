//! Call parameters.
//!
//! [`Params`] is the merged parameter object of a call: it feeds the path
//! placeholders and the request body. Any `Serialize` type converts into it
//! through [`IntoParams`]; binary fields are added with [`Params::blob`].

use bytes::Bytes;
use derive_more::Display;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// A caller-side problem with the call parameters.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{message}")]
pub struct ParamsError {
    field: Option<String>,
    message: String,
}

impl std::error::Error for ParamsError {}

impl ParamsError {
    /// Error about the parameters as a whole.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Error about one named field.
    #[must_use]
    pub fn field(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(name.into()),
            message: message.into(),
        }
    }

    /// The offending field, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Consume into (field, message).
    #[must_use]
    pub fn into_parts(self) -> (Option<String>, String) {
        (self.field, self.message)
    }
}

// ============================================================================
// Blob
// ============================================================================

/// Binary parameter, sent as a file part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    data: Bytes,
    filename: Option<String>,
    content_type: Option<String>,
}

impl Blob {
    /// Create a blob from raw bytes.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            filename: None,
            content_type: None,
        }
    }

    /// Set the file name reported in the multipart body.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the content type of the part.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// The bytes.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// The file name, if set.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// The content type, if set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

// ============================================================================
// Params
// ============================================================================

/// One parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Any JSON value.
    Json(Value),
    /// Binary data.
    Blob(Blob),
}

impl ParamValue {
    /// JSON type name, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Json(Value::Null) => "null",
            Self::Json(Value::Bool(_)) => "boolean",
            Self::Json(Value::Number(_)) => "number",
            Self::Json(Value::String(_)) => "string",
            Self::Json(Value::Array(_)) => "array",
            Self::Json(Value::Object(_)) => "object",
            Self::Blob(_) => "blob",
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Blob> for ParamValue {
    fn from(blob: Blob) -> Self {
        Self::Blob(blob)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Json(Value::String(value))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Json(Value::String(value.to_string()))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Json(Value::Bool(value))
    }
}

/// Ordered parameter object of a call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Params {
    values: IndexMap<String, ParamValue>,
}

impl Params {
    /// Empty parameter object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a serializable value.
    ///
    /// The value must serialize to a JSON object; `null` and `()` give an
    /// empty parameter object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, ParamsError> {
        let value = serde_json::to_value(value)
            .map_err(|err| ParamsError::new(format!("cannot serialize parameters: {err}")))?;
        match value {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ParamsError::new(format!(
                "parameters must serialize to an object, got {}",
                ParamValue::Json(other).kind()
            ))),
        }
    }

    /// Merge path parameters and request parameters; request values win.
    pub fn merge(path: impl IntoParams, request: impl IntoParams) -> Result<Self, ParamsError> {
        let mut params = path.into_params()?;
        params.values.extend(request.into_params()?.values);
        Ok(params)
    }

    /// Set a parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a binary parameter.
    #[must_use]
    pub fn blob(self, name: impl Into<String>, blob: Blob) -> Self {
        self.with(name, blob)
    }

    /// Set a parameter in place, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Get a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ParamValue> {
        self.values.iter()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there is no parameter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String form of a parameter used for path substitution.
    ///
    /// Strings are used verbatim, other JSON values through their JSON text.
    /// Blobs have no string form.
    #[must_use]
    pub fn path_value(&self, name: &str) -> Option<String> {
        match self.values.get(name)? {
            ParamValue::Json(Value::String(value)) => Some(value.clone()),
            ParamValue::Json(other) => Some(other.to_string()),
            ParamValue::Blob(_) => None,
        }
    }

    /// The whole object as JSON. Blobs cannot be part of a JSON body.
    pub fn to_json(&self) -> Result<Value, ParamsError> {
        let mut map = Map::with_capacity(self.values.len());
        for (name, value) in &self.values {
            match value {
                ParamValue::Json(json) => {
                    map.insert(name.clone(), json.clone());
                }
                ParamValue::Blob(_) => {
                    return Err(ParamsError::field(
                        name.clone(),
                        format!("field `{name}` is a blob and cannot be sent as JSON"),
                    ));
                }
            }
        }
        Ok(Value::Object(map))
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name, ParamValue::Json(value)))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = indexmap::map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Conversion into the parameter object of a call.
///
/// Implemented for every `Serialize` type and for [`Params`] itself.
pub trait IntoParams {
    /// Convert.
    fn into_params(self) -> Result<Params, ParamsError>;
}

impl<T: Serialize> IntoParams for T {
    fn into_params(self) -> Result<Params, ParamsError> {
        Params::from_serialize(&self)
    }
}

impl IntoParams for Params {
    fn into_params(self) -> Result<Params, ParamsError> {
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct ProjectPath {
        project_id: u64,
    }

    #[derive(Serialize)]
    struct Rename {
        name: String,
    }

    #[test]
    fn from_struct_keeps_field_order() {
        let params = Rename {
            name: "alpha".to_string(),
        }
        .into_params()
        .expect("params");

        check!(params.len() == 1);
        check!(params.get("name") == Some(&ParamValue::Json(json!("alpha"))));
    }

    #[test]
    fn unit_gives_empty_params() {
        let params = ().into_params().expect("params");
        check!(params.is_empty());
    }

    #[test]
    fn scalar_is_rejected() {
        let_assert!(Err(err) = 42_u32.into_params());
        check!(err.field_name() == None);
        check!(err.to_string() == "parameters must serialize to an object, got number");
    }

    #[test]
    fn merge_request_wins() {
        let params = Params::merge(
            ProjectPath { project_id: 7 },
            Params::new().with("project_id", 8_u64).with("name", "beta"),
        )
        .expect("merge");

        check!(params.path_value("project_id").as_deref() == Some("8"));
        check!(params.path_value("name").as_deref() == Some("beta"));
    }

    #[test]
    fn path_value_forms() {
        let params = Params::new()
            .with("text", "a b")
            .with("flag", true)
            .with("nothing", Value::Null)
            .blob("file", Blob::new(vec![1, 2]));

        check!(params.path_value("text").as_deref() == Some("a b"));
        check!(params.path_value("flag").as_deref() == Some("true"));
        check!(params.path_value("nothing").as_deref() == Some("null"));
        check!(params.path_value("file") == None);
        check!(params.path_value("missing") == None);
    }

    #[test]
    fn to_json_rejects_blobs() {
        let params = Params::new()
            .with("name", "avatar")
            .blob("file", Blob::new(vec![0xFF]).with_filename("a.png"));

        let_assert!(Err(err) = params.to_json());
        check!(err.field_name() == Some("file"));
    }

    #[test]
    fn to_json_roundtrips_object() {
        let params = Params::new().with("name", "alpha").with("count", 3_i64);
        check!(params.to_json().expect("json") == json!({"name": "alpha", "count": 3}));
    }

    #[test]
    fn param_kinds() {
        check!(ParamValue::from("x").kind() == "string");
        check!(ParamValue::from(1_i64).kind() == "number");
        check!(ParamValue::from(json!([1])).kind() == "array");
        check!(ParamValue::from(Blob::new(Vec::<u8>::new())).kind() == "blob");
    }
}
