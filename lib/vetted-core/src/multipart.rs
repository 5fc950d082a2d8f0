//! `multipart/form-data` encoding.
//!
//! Used by [`crate::BodyEncoding::Multipart`]: text parameters become text
//! parts, [`crate::Blob`] parameters become file parts.

use bytes::{BufMut, Bytes, BytesMut};

use crate::Blob;

/// A single part in a multipart form.
#[derive(Debug, Clone)]
pub struct Part {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

impl Part {
    /// Create a text part.
    ///
    /// No content type is written, so receivers treat it as a plain field.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: None,
            data: Bytes::from(value.into()),
        }
    }

    /// Create a binary part from a blob.
    ///
    /// Without an explicit content type, one is guessed from the file name,
    /// falling back to `application/octet-stream`. A blob without a file
    /// name is sent as `blob`, like browsers do.
    #[must_use]
    pub fn blob(name: impl Into<String>, blob: &Blob) -> Self {
        let filename = blob.filename().unwrap_or("blob").to_string();
        let content_type = blob
            .content_type()
            .map_or_else(|| guess_content_type(&filename), str::to_string);
        Self {
            name: name.into(),
            filename: Some(filename),
            content_type: Some(content_type),
            data: blob.data().clone(),
        }
    }

    /// Get the part name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the filename, if set.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Get the content type, if set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Get the part data.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

fn guess_content_type(filename: &str) -> String {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "md" => "text/markdown",
        "json" => "application/json",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// A multipart form containing multiple parts.
#[derive(Debug, Clone)]
pub struct Form {
    parts: Vec<Part>,
    boundary: String,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// Create a new empty form with a generated boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_boundary(generate_boundary())
    }

    /// Create a new form with a custom boundary.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            parts: Vec::new(),
            boundary: boundary.into(),
        }
    }

    /// Add a part to the form.
    #[must_use]
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Get the boundary string.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Get the parts in this form.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// `multipart/form-data; boundary=<boundary>`.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Convert the form into (content-type header value, body bytes).
    #[must_use]
    pub fn into_body(self) -> (String, Bytes) {
        let content_type = self.content_type();
        let body = self.encode();
        (content_type, body)
    }

    fn encode(&self) -> Bytes {
        let mut buf = BytesMut::new();

        for part in &self.parts {
            buf.put_slice(b"--");
            buf.put_slice(self.boundary.as_bytes());
            buf.put_slice(b"\r\n");

            buf.put_slice(b"Content-Disposition: form-data; name=\"");
            buf.put_slice(part.name.as_bytes());
            buf.put_slice(b"\"");
            if let Some(filename) = &part.filename {
                buf.put_slice(b"; filename=\"");
                buf.put_slice(filename.as_bytes());
                buf.put_slice(b"\"");
            }
            buf.put_slice(b"\r\n");

            if let Some(content_type) = &part.content_type {
                buf.put_slice(b"Content-Type: ");
                buf.put_slice(content_type.as_bytes());
                buf.put_slice(b"\r\n");
            }

            buf.put_slice(b"\r\n");
            buf.put_slice(&part.data);
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"--\r\n");

        buf.freeze()
    }
}

fn generate_boundary() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    format!("----VettedBoundary{timestamp:x}")
}
