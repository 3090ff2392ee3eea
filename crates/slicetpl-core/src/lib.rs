//! # slicetpl-core
//!
//! Jinja template preview with Python-style slice syntax.
//!
//! Templates are rendered with [minijinja](https://docs.rs/minijinja). Before
//! compiling, a preprocessor rewrites bracket slices such as `name[1:-1]`
//! into calls to an index-aware `slice` filter, so negative indexes and
//! open-ended ranges behave the way they do in Python.
//!
//! ## Quick start
//!
//! ```rust
//! use slicetpl_core::{build_environment, render_preview, DataFormat};
//!
//! let env = build_environment();
//!
//! let out = render_preview(&env, "Hello {{ name[1:-1] }}", r#"{"name":"World"}"#, DataFormat::Json).unwrap();
//! assert_eq!(out, "Hello orl");
//!
//! let out = render_preview(&env, "{{ items | slice(-2) | dump }}", r#"{"items":["a","b","c","d"]}"#, DataFormat::Json).unwrap();
//! assert_eq!(out, r#"["c","d"]"#);
//! ```
//!
//! ## Modules
//!
//! - [`preprocess`] — bracket-slice syntax → `| slice(...)` filter calls
//! - [`filters`] — `slice`, `substring` and `dump`
//! - [`sliceable`] — text/list/other dispatch and shared bound arithmetic
//! - [`data`] — JSON or YAML data block → template context
//! - [`render`] — environment construction and the render pipeline
//! - [`error`] — error types for data and template failures

pub mod data;
pub mod error;
pub mod filters;
pub mod preprocess;
pub mod render;
pub mod sliceable;

pub use data::{parse_context, DataFormat};
pub use error::PreviewError;
pub use preprocess::{preprocess, rewrites, Rewrite};
pub use render::{build_environment, render_preview, Preview, RenderOptions, Renderer};
pub use sliceable::Sliceable;
