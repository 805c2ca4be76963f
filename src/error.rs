//! Error kinds, per §7: parse errors, collection errors, coercion errors,
//! resolver errors and completion errors all flow through this module.

use std::fmt;

use derive_more::{Display, Error, From};

use crate::context::Path;
use crate::value::Value;

/// Error produced by a user resolver, or synthesized by the completer when a
/// resolved value doesn't fit its schema type.
///
/// Mirrors `juniper::FieldError`: a message plus an arbitrary `extensions`
/// payload that is echoed back to the client unexamined.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    message: String,
    extensions: Value,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: Value::Null,
        }
    }

    pub fn with_extensions(message: impl Into<String>, extensions: Value) -> Self {
        Self {
            message: message.into(),
            extensions,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn extensions(&self) -> &Value {
        &self.extensions
    }
}

impl<T: fmt::Display> From<T> for FieldError {
    fn from(e: T) -> Self {
        Self::new(e.to_string())
    }
}

/// The result type every resolver, coercion step and completion step returns.
pub type FieldResult<T> = Result<T, FieldError>;

/// A [`FieldError`] located at the point in the response where it surfaced,
/// per §7 ("errors carry the response path of the field that produced
/// them").
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionError {
    path: Path,
    error: FieldError,
}

impl ExecutionError {
    pub fn new(path: Path, error: FieldError) -> Self {
        Self { path, error }
    }

    pub fn at_root(error: FieldError) -> Self {
        Self {
            path: Path::root(),
            error,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn message(&self) -> &str {
        self.error.message()
    }

    pub fn extensions(&self) -> &Value {
        self.error.extensions()
    }
}

impl Eq for ExecutionError {}

/// Custom error handling trait, so a resolver can return any error type that
/// knows how to become a [`FieldError`] rather than being forced to produce
/// one directly.
pub trait IntoFieldError {
    fn into_field_error(self) -> FieldError;
}

impl IntoFieldError for FieldError {
    fn into_field_error(self) -> FieldError {
        self
    }
}

/// Top-level error that prevents query execution from starting at all:
/// a malformed document, or a document/operation-name mismatch. Distinct
/// from [`ExecutionError`], which is always attached to a field and always
/// collected alongside a (possibly partial) result rather than aborting it.
#[derive(Debug, Clone, Display, Error, From, PartialEq)]
pub enum GraphQLError {
    #[display("{_0}")]
    ParseError(#[error(not(source))] String),
    #[display("no operation provided")]
    NoOperationProvided,
    #[display("multiple operations provided and no operation name given")]
    MultipleOperationsProvided,
    #[display("unknown operation name")]
    UnknownOperationName,
    #[display("operation is a subscription")]
    IsSubscription,
    #[display("schema has no mutation root type")]
    NoMutationTypeDefined,
    #[display("{_0}")]
    VariableCoercion(#[error(not(source))] String),
}
