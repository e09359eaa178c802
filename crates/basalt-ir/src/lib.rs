//! Basalt API intermediate representation.
//!
//! The resolver produces an [`Api`]: an ordered set of [`ApiNamespace`]s that
//! share one [`TypeRegistry`](basalt_core::type_system::TypeRegistry).
//! Namespaces refer to their types and aliases by id and own their routes.
//! Code generators walk this structure; the views they rely on are
//!
//! - [`ApiNamespace::linearize_data_types`] and
//!   [`ApiNamespace::linearize_aliases`], parents before children
//! - [`ApiNamespace::get_route_io_data_types`], the user types routes touch
//! - [`ApiNamespace::get_imported_namespaces`], filtered by [`ImportReason`]
//!
//! # Example
//!
//! ```rust
//! use basalt_core::Span;
//! use basalt_core::type_system::TypeRegistry;
//! use basalt_ir::{Api, ApiNamespace};
//!
//! let mut registry = TypeRegistry::new();
//! let quota = registry.declare_struct("Quota", "team", Span::default());
//!
//! let mut namespace = ApiNamespace::new("team");
//! namespace.add_data_type("Quota", quota);
//!
//! let mut api = Api::new("1.0.0", registry);
//! api.add_namespace(namespace);
//! assert!(api.namespace("team").is_some());
//! ```

mod api;
mod display;
mod linearize;
mod namespace;
mod route;

pub use api::Api;
pub use namespace::{ApiNamespace, ImportReason};
pub use route::{ApiRoute, Deprecation, RouteKey};
