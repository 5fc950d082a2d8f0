//! # Chapter 1: Parameters & Bodies
//!
//! How the parameter object of a call reaches the server.
//!
//! ## One Parameter Object
//!
//! An endpoint takes a single parameter object. Anything implementing
//! `Serialize` into a JSON object works, as does [`Params`][crate::Params]:
//!
//! ```ignore
//! #[derive(Serialize)]
//! struct Rename {
//!     id: u64,
//!     name: String,
//! }
//!
//! const RENAME: Endpoint<Rename, Shape<Project>, Ignored> =
//!     Endpoint::patch("/projects/{id}", Shape::new(), Ignored);
//! ```
//!
//! ## Path Placeholders
//!
//! Every `{name}` in the path is replaced by the parameter of the same name.
//! Strings are used verbatim, other values as their JSON text, and the
//! result is percent-encoded as one path segment:
//!
//! ```text
//! "/projects/{id}"  + { "id": 7 }       →  /projects/7
//! "/files/{name}"   + { "name": "a b" } →  /files/a%20b
//! "/projects/{id}"  + { }               →  /projects/
//! ```
//!
//! A missing parameter renders as an empty segment. Opt into failing instead
//! with [`Endpoint::strict_path`][crate::Endpoint::strict_path]: the call then
//! returns [`ApiError::RequestData`][crate::ApiError::RequestData] before any
//! network I/O.
//!
//! ## Request Bodies
//!
//! `GET` requests carry no body. Other methods send the whole parameter
//! object, path parameters included.
//!
//! ### JSON (default)
//!
//! The object is serialized as JSON and `Content-Type: application/json` is
//! set, replacing any content type from the request context.
//!
//! ### Multipart
//!
//! ```ignore
//! const UPLOAD_LOGO: Endpoint<Params, Shape<Project>, Ignored> =
//!     Endpoint::post("/projects/{id}/logo", Shape::new(), Ignored).multipart();
//!
//! let params = Params::new()
//!     .with("id", "7")
//!     .blob("logo", Blob::new(bytes).with_filename("logo.png"));
//! ```
//!
//! Every value must be a string or a [`Blob`][crate::Blob]. Anything else
//! fails with a request-data error naming the field.
//!
//! ## Split Path and Request Parameters
//!
//! When path and body parameters come from different places, merge them:
//!
//! ```ignore
//! let params = Params::merge(PathParams { id: 7 }, Rename { name: "new".into() })?;
//! ```
//!
//! ## Headers
//!
//! Headers come from the shared [`RequestContext`][crate::RequestContext].
//! Each call takes a snapshot when it is dispatched:
//!
//! ```ignore
//! let context = RequestContext::new();
//! let client = ApiClient::builder(url).context(context.clone()).build()?;
//!
//! context.add_header("Authorization", format!("Bearer {token}"));
//! // ...
//! context.remove_header("Authorization");
//! ```
//!
//! ## Next Steps
//!
//! - [Chapter 2: Results & Errors][super::chapter_2] - Schemas and error variants
