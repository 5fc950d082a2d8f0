//! Declarative endpoint configuration.

use std::fmt;
use std::marker::PhantomData;

use crate::{BodyEncoding, Method, PathMode, PathTemplate};

/// One endpoint of an API: method, path template, schemas and body encoding.
///
/// `P` is the parameter object accepted by the endpoint, `S` validates
/// success bodies and `E` validates error bodies. Declarations are
/// `const`-constructible so an API can be described as a set of constants.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use vetted::{Endpoint, Shape};
///
/// #[derive(Serialize)]
/// struct ProjectId {
///     id: u64,
/// }
///
/// #[derive(Deserialize)]
/// struct Project {
///     id: u64,
///     name: String,
/// }
///
/// #[derive(Deserialize)]
/// struct Problem {
///     error: String,
/// }
///
/// const GET_PROJECT: Endpoint<ProjectId, Shape<Project>, Shape<Problem>> =
///     Endpoint::get("/projects/{id}", Shape::new(), Shape::new());
///
/// assert_eq!(GET_PROJECT.path().as_str(), "/projects/{id}");
/// ```
pub struct Endpoint<P, S, E> {
    method: Method,
    path: PathTemplate,
    success: S,
    error: E,
    encoding: BodyEncoding,
    path_mode: PathMode,
    params: PhantomData<fn(P)>,
}

impl<P, S, E> Endpoint<P, S, E> {
    /// Declare an endpoint with the JSON body encoding and lenient paths.
    #[must_use]
    pub const fn new(method: Method, path: &'static str, success: S, error: E) -> Self {
        Self {
            method,
            path: PathTemplate::new(path),
            success,
            error,
            encoding: BodyEncoding::Json,
            path_mode: PathMode::Lenient,
            params: PhantomData,
        }
    }

    /// `GET` endpoint. Parameters only fill the path.
    #[must_use]
    pub const fn get(path: &'static str, success: S, error: E) -> Self {
        Self::new(Method::Get, path, success, error)
    }

    /// `POST` endpoint.
    #[must_use]
    pub const fn post(path: &'static str, success: S, error: E) -> Self {
        Self::new(Method::Post, path, success, error)
    }

    /// `PUT` endpoint.
    #[must_use]
    pub const fn put(path: &'static str, success: S, error: E) -> Self {
        Self::new(Method::Put, path, success, error)
    }

    /// `PATCH` endpoint.
    #[must_use]
    pub const fn patch(path: &'static str, success: S, error: E) -> Self {
        Self::new(Method::Patch, path, success, error)
    }

    /// `DELETE` endpoint.
    #[must_use]
    pub const fn delete(path: &'static str, success: S, error: E) -> Self {
        Self::new(Method::Delete, path, success, error)
    }

    /// Send parameters as `multipart/form-data`.
    #[must_use]
    pub const fn multipart(self) -> Self {
        self.encoding(BodyEncoding::Multipart)
    }

    /// Set the body encoding.
    #[must_use]
    pub const fn encoding(mut self, encoding: BodyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Fail calls whose parameters miss a path placeholder.
    #[must_use]
    pub const fn strict_path(mut self) -> Self {
        self.path_mode = PathMode::Strict;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Path template.
    #[must_use]
    pub const fn path(&self) -> PathTemplate {
        self.path
    }

    /// Body encoding.
    #[must_use]
    pub const fn body_encoding(&self) -> BodyEncoding {
        self.encoding
    }

    /// Path rendering mode.
    #[must_use]
    pub const fn path_mode(&self) -> PathMode {
        self.path_mode
    }

    /// Schema of success bodies.
    #[must_use]
    pub const fn success_schema(&self) -> &S {
        &self.success
    }

    /// Schema of error bodies.
    #[must_use]
    pub const fn error_schema(&self) -> &E {
        &self.error
    }
}

impl<P, S: Clone, E: Clone> Clone for Endpoint<P, S, E> {
    fn clone(&self) -> Self {
        Self {
            method: self.method,
            path: self.path,
            success: self.success.clone(),
            error: self.error.clone(),
            encoding: self.encoding,
            path_mode: self.path_mode,
            params: PhantomData,
        }
    }
}

impl<P, S: Copy, E: Copy> Copy for Endpoint<P, S, E> {}

impl<P, S, E> fmt::Debug for Endpoint<P, S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("encoding", &self.encoding)
            .field("path_mode", &self.path_mode)
            .finish_non_exhaustive()
    }
}
