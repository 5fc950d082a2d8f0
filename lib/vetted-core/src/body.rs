//! Request body encoding.

use std::str::FromStr;

use bytes::Bytes;

use crate::{Form, ParamValue, Params, ParamsError, Part};

const JSON_CONTENT_TYPE: &str = "application/json";

/// How the parameter object of a call becomes the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BodyEncoding {
    /// The whole parameter object as a JSON document.
    #[default]
    Json,
    /// One `multipart/form-data` part per parameter; values must be strings
    /// or blobs.
    Multipart,
}

/// An encoded request body with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    /// Value of the `Content-Type` header.
    pub content_type: String,
    /// Body bytes.
    pub bytes: Bytes,
}

impl BodyEncoding {
    /// Name used in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Multipart => "multipart",
        }
    }

    /// Encode `params` as a request body.
    ///
    /// # Errors
    ///
    /// Fails before any I/O when a value cannot be represented in this
    /// encoding.
    pub fn encode(&self, params: &Params) -> Result<EncodedBody, ParamsError> {
        match self {
            Self::Json => {
                let json = params.to_json()?;
                let bytes = serde_json::to_vec(&json)
                    .map_err(|err| ParamsError::new(format!("cannot encode JSON body: {err}")))?;
                Ok(EncodedBody {
                    content_type: JSON_CONTENT_TYPE.to_string(),
                    bytes: Bytes::from(bytes),
                })
            }
            Self::Multipart => {
                let mut form = Form::new();
                for (name, value) in params {
                    form = match value {
                        ParamValue::Json(serde_json::Value::String(text)) => {
                            form.part(Part::text(name.clone(), text.clone()))
                        }
                        ParamValue::Blob(blob) => form.part(Part::blob(name.clone(), blob)),
                        ParamValue::Json(_) => {
                            return Err(ParamsError::field(
                                name.clone(),
                                format!(
                                    "multipart field `{name}` must be a string or a blob, got {}",
                                    value.kind()
                                ),
                            ));
                        }
                    };
                }
                let (content_type, bytes) = form.into_body();
                Ok(EncodedBody {
                    content_type,
                    bytes,
                })
            }
        }
    }
}

impl std::fmt::Display for BodyEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyEncoding {
    type Err = ParamsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "json" => Ok(Self::Json),
            "multipart" => Ok(Self::Multipart),
            other => Err(ParamsError::new(format!(
                "unsupported body encoding `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;
    use crate::Blob;

    #[test]
    fn json_encodes_whole_object() {
        let params = Params::new().with("name", "alpha").with("id", 3_u64);
        let body = BodyEncoding::Json.encode(&params).expect("encode");

        check!(body.content_type == "application/json");
        let decoded: serde_json::Value = serde_json::from_slice(&body.bytes).expect("json");
        check!(decoded == json!({"name": "alpha", "id": 3}));
    }

    #[test]
    fn multipart_encodes_strings_and_blobs() {
        let params = Params::new().with("title", "avatar").blob(
            "file",
            Blob::new(b"PNG".to_vec()).with_filename("avatar.png"),
        );
        let body = BodyEncoding::Multipart.encode(&params).expect("encode");

        check!(body.content_type.starts_with("multipart/form-data; boundary="));
        let text = String::from_utf8_lossy(&body.bytes);
        check!(text.contains("Content-Disposition: form-data; name=\"title\"\r\n"));
        check!(text.contains("name=\"file\"; filename=\"avatar.png\""));
        check!(text.contains("Content-Type: image/png\r\n"));
    }

    #[test]
    fn multipart_rejects_numbers_with_field_name() {
        let params = Params::new().with("title", "x").with("size", 12_u64);
        let_assert!(Err(err) = BodyEncoding::Multipart.encode(&params));
        check!(err.field_name() == Some("size"));
        check!(err.to_string() == "multipart field `size` must be a string or a blob, got number");
    }

    #[test]
    fn encoding_from_str() {
        check!("json".parse::<BodyEncoding>() == Ok(BodyEncoding::Json));
        check!("multipart".parse::<BodyEncoding>() == Ok(BodyEncoding::Multipart));

        let_assert!(Err(err) = "form".parse::<BodyEncoding>());
        check!(err.to_string() == "unsupported body encoding `form`");
        check!(BodyEncoding::default() == BodyEncoding::Json);
    }
}
