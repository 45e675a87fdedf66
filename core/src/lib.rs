//! # Explorer Core
//!
//! The parts of the API explorer that do not depend on a transport or a UI
//! toolkit. Compiles for both the server and the wasm front-end.
//!
//! ## Components
//!
//! - **Schema / Discovery**: the model of a discovery document
//! - **Editors**: a closed set of schema-driven editors built by
//!   [`EditorFactory`]
//! - **Form**: [`SchemaForm`] owns the editor tree for the selected method
//!   and serializes it into a request body
//! - **Render**: [`JsonTreeRenderer`] turns a response into a collapsible
//!   tree, linking request URLs back into the explorer through
//!   [`LinkResolver`]
//! - **Request**: [`ApiRequest`] builds request paths from parameter values
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use explorer_core::{ApiService, AppState, SchemaForm};
//!
//! let service = Arc::new(ApiService::new("tasks", "v1"));
//! let form = SchemaForm::new(Arc::new(AppState::new(service)));
//! assert_eq!(form.string_value(), "");
//! ```

pub mod discovery;
pub mod editor;
pub mod error;
pub mod form;
pub mod link;
pub mod render;
pub mod request;
pub mod schema;

pub use discovery::{
    ApiMethod, ApiParameter, ApiResource, ApiService, AppState, HttpMethod, ParameterLocation,
    ServiceContext,
};
pub use editor::{Editor, EditorFactory, EditorPath, EditorView, PathSegment};
pub use error::{EditorError, RequestError};
pub use form::SchemaForm;
pub use link::{LinkResolver, LinkTarget};
pub use render::{JsonTree, JsonTreeRenderer, Line, Span, TokenClass};
pub use request::{discovery_path, ApiRequest};
pub use schema::{Schema, SchemaType};
