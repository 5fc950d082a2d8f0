//! HTTP methods an endpoint can be declared with.

use derive_more::Display;

/// HTTP method of an endpoint.
///
/// Only the five methods a JSON API is declared with are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// Read. Never carries a body; every parameter goes to the path.
    #[display("GET")]
    Get,
    /// Create.
    #[display("POST")]
    Post,
    /// Replace.
    #[display("PUT")]
    Put,
    /// Partial update.
    #[display("PATCH")]
    Patch,
    /// Remove.
    #[display("DELETE")]
    Delete,
}

impl Method {
    /// Requests with this method carry the encoded parameters as body.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    const ALL: [(Method, http::Method); 5] = [
        (Method::Get, http::Method::GET),
        (Method::Post, http::Method::POST),
        (Method::Put, http::Method::PUT),
        (Method::Patch, http::Method::PATCH),
        (Method::Delete, http::Method::DELETE),
    ];

    #[test]
    fn display_matches_wire_name() {
        for (method, wire) in ALL {
            check!(method.to_string() == wire.as_str());
            check!(http::Method::from(method) == wire);
        }
    }

    #[test]
    fn only_get_is_bodiless() {
        let bodiless: Vec<_> = ALL
            .iter()
            .map(|(method, _)| *method)
            .filter(|method| !method.has_body())
            .collect();
        check!(bodiless == vec![Method::Get]);
    }
}
