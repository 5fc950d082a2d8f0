//! # Tutorial: Calling APIs with vetted
//!
//! Learn to declare endpoints, validate responses and manage calls step by step.
//!
//! ## Chapters
//!
//! 1. [Getting Started][chapter_0] - Your first endpoint
//! 2. [Parameters & Bodies][chapter_1] - Path placeholders, JSON, multipart
//! 3. [Results & Errors][chapter_2] - Schemas, base schemas, error variants
//! 4. [Call State][chapter_3] - Superseding, aborting, teardown, logging
//!
//! Ready? Start with [Chapter 0: Getting Started][chapter_0].

pub mod chapter_0;
pub mod chapter_1;
pub mod chapter_2;
pub mod chapter_3;
