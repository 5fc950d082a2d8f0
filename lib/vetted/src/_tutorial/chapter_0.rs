//! # Chapter 0: Getting Started
//!
//! Your first vetted API client in 5 minutes.
//!
//! ## What You'll Learn
//!
//! - Declare endpoints with [`Endpoint`][crate::Endpoint]
//! - Bind them with [`endpoints!`][crate::endpoints]
//! - Call them and branch on the result
//!
//! ## Prerequisites
//!
//! Add to `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! vetted = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! ## Your First Client
//!
//! ```ignore
//! use vetted::prelude::*;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! pub struct User {
//!     pub id: u64,
//!     pub name: String,
//! }
//!
//! #[derive(Serialize)]
//! pub struct UserId {
//!     pub id: u64,
//! }
//!
//! vetted::endpoints! {
//!     pub struct UserApi {
//!         get_user: Endpoint<UserId, Shape<User>, Ignored> =
//!             Endpoint::get("/users/{id}", Shape::new(), Ignored),
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), vetted::Error> {
//!     let client = ApiClient::builder("https://api.example.com").build()?;
//!     let api = UserApi::new(&client);
//!
//!     match api.get_user.call(UserId { id: 42 }, CallOptions::new()).await {
//!         Ok(response) => println!("User: {:?}", response.body.data()),
//!         Err(err) => eprintln!("call failed: {err}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## What Gets Generated
//!
//! ```text
//! vetted::endpoints! {              pub struct UserApi<C, B> {
//!     pub struct UserApi {     →        pub get_user: Bound<UserId, Shape<User>, Ignored, C, B>,
//!         get_user: ... = ...,      }
//!     }                             impl UserApi { fn new(&ApiClient<C, B>) -> Self }
//! }
//! ```
//!
//! Each field is a [`Bound`][crate::Bound] endpoint: the declaration plus a
//! handle on the client. Building the client only fails for an invalid base
//! URL; calls never panic.
//!
//! ## Next Steps
//!
//! - [Chapter 1: Parameters & Bodies][super::chapter_1] - Path placeholders, JSON, multipart
