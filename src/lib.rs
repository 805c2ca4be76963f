//! A GraphQL query execution engine.
//!
//! Given a [`Schema`](schema::Schema), a parsed [`ast::Document`], and
//! optional root/variable values, [`execute`] resolves an operation against
//! the schema and produces a response tree plus an ordered error list, per
//! the GraphQL specification's execution algorithm.
//!
//! The engine is three tightly coupled pieces:
//!
//! - [`collector`] walks selection sets, fragment spreads and `@include`/
//!   `@skip` directives into a deduplicated, merged field list per object
//!   type.
//! - [`completer`] applies type-directed value completion: non-null
//!   enforcement with propagation to the nearest nullable ancestor, list
//!   iteration, leaf serialization, abstract-type resolution, and recursive
//!   descent into composite types.
//! - [`executor`] wires the two together: it locates the operation, builds
//!   the fragment table, derives the root type, and drives completion to a
//!   finished [`ExecutionResult`](executor::ExecutionResult).
//!
//! Out of scope: subscriptions, query validation (assumed to have happened
//! upstream), HTTP/transport, persisted queries, and response serialization
//! beyond converting the result tree to plain map/list form (see
//! [`value::Value`]).

pub mod ast;
pub mod coercion;
pub mod collector;
pub mod completer;
pub mod context;
pub mod error;
pub mod executor;
pub mod resolve;
pub mod schema;
pub mod value;

pub use ast::Document;
pub use error::{ExecutionError, FieldError, FieldResult, GraphQLError};
pub use executor::{execute, ExecutionResult};
pub use resolve::{FieldContext, Resolved};
pub use schema::{resolver, serializer, Schema, SchemaBuilder};
pub use value::{Object, Scalar, Value};
