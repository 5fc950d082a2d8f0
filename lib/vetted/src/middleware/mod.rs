//! Tower middleware layers for the vetted HTTP transport.
//!
//! Layers wrap [`crate::HyperClient`] through [`crate::HyperClientBuilder::layer`].
//! The crate ships [`LoggingLayer`]; any Tower layer over
//! `Request<Bytes>`/`Response<Bytes>` fits.
//!
//! # Example
//!
//! ```ignore
//! use vetted::HyperClient;
//! use vetted::middleware::LoggingLayer;
//!
//! let client = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
