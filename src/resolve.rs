//! The dynamic, resolver-facing value model.
//!
//! Resolvers are external collaborators (§1, "user resolvers" are explicitly
//! out of core scope): the engine only needs a value shape flexible enough to
//! carry whatever they hand back, plus enough structure for the default
//! field resolver and the completer's fast path to do their jobs. Rather
//! than the teacher's generic, codegen-derived `GraphQLValue<S>` trait
//! (which requires a type to know its own GraphQL shape at compile time),
//! this is a tagged runtime enum in the spirit of a dynamic schema builder,
//! per the design guidance to model resolver output as a small value
//! variant rather than as a static Rust type (§9).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use arcstr::ArcStr;
use futures::future::BoxFuture;
use indexmap::IndexMap;

use crate::context::Path;
use crate::error::{FieldError, FieldResult};
use crate::value::Scalar;

/// What a resolver, the default field resolver, or an argument/variable
/// coercion step hands to the completer.
///
/// [`Resolved::Object`] is an opaque handle to whatever business object a
/// resolver produced; the completer never inspects it directly, it only
/// passes it back into the next resolver down (as that resolver's parent).
/// [`Resolved::Map`] exists for the common case where a resolver (or the
/// default field resolver) wants to hand back a plain property bag instead
/// of a typed object.
pub enum Resolved {
    Null,
    Scalar(Scalar),
    List(Vec<Resolved>),
    Object(Arc<dyn Any + Send + Sync>),
    Map(IndexMap<String, Resolved>),
    /// A still-pending resolver result (the "thenable" of §4.3/GLOSSARY).
    /// The completer awaits it in place before proceeding, which is the one
    /// suspension point the scheduler needs to know about.
    Thenable(BoxFuture<'static, FieldResult<Resolved>>),
}

/// Every call site that clones a [`Resolved`] does so with an already
/// `settle()`d value in hand (a composite's resolved value becomes the
/// `parent` for each of its children's resolvers only after step 2 of
/// completion has awaited it, per §4.4); a pending [`Resolved::Thenable`]
/// is therefore never actually cloned; it cannot derive `Clone` since a
/// boxed future is not `Clone`, so this manual impl exists only to let the
/// other five variants derive the common case.
impl Clone for Resolved {
    fn clone(&self) -> Self {
        match self {
            Self::Null => Self::Null,
            Self::Scalar(s) => Self::Scalar(s.clone()),
            Self::List(items) => Self::List(items.clone()),
            Self::Object(obj) => Self::Object(obj.clone()),
            Self::Map(map) => Self::Map(map.clone()),
            Self::Thenable(_) => {
                unreachable!("a pending Resolved is always settled before it can be cloned")
            }
        }
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Object(_) => write!(f, "Object(..)"),
            Self::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Self::Thenable(_) => write!(f, "Thenable(..)"),
        }
    }
}

/// Structural equality for the settled variants, used by tests comparing
/// resolver output. A pending [`Self::Thenable`] never compares equal to
/// anything, including another pending thenable - there's no sensible notion
/// of equality for two opaque futures.
impl PartialEq for Resolved {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Resolved {
    pub fn null() -> Self {
        Self::Null
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn object(handle: impl Any + Send + Sync) -> Self {
        Self::Object(Arc::new(handle))
    }

    pub fn downcast_object<T: Any + Send + Sync>(&self) -> Option<&T> {
        match self {
            Self::Object(obj) => obj.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Resolves a [`Resolved::Thenable`] until a non-thenable value comes
    /// back. Every other variant is already "settled" and returns
    /// immediately, which is what lets the completer call this
    /// unconditionally at the top of each step of its state machine (§4.4
    /// step 1, "await the resolver's thenable, if any").
    pub async fn settle(self) -> FieldResult<Self> {
        match self {
            Self::Thenable(fut) => fut.await,
            other => Ok(other),
        }
    }
}

impl From<Scalar> for Resolved {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<String> for Resolved {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::String(s))
    }
}

impl From<bool> for Resolved {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Boolean(b))
    }
}

impl<T: Into<Resolved>> From<Option<T>> for Resolved {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl<T: Into<Resolved>> From<Vec<T>> for Resolved {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Everything a resolver needs about the field occurrence it is being asked
/// to resolve. Owned rather than borrowed (unlike the teacher's
/// `Executor<'r, 'a, CtxT, S>`) so that the resolver closure's future can be
/// `'static` and the engine's own hand-rolled scheduler doesn't have to
/// thread a lifetime through every strand.
pub struct FieldContext {
    pub parent: Resolved,
    pub field_name: ArcStr,
    pub arguments: IndexMap<String, Resolved>,
    pub path: Path,
}

impl FieldContext {
    pub fn argument(&self, name: &str) -> Option<&Resolved> {
        self.arguments.get(name)
    }
}

pub type ResolverFuture = BoxFuture<'static, FieldResult<Resolved>>;

/// The one callback surface user code plugs into (§4.6): given a field
/// occurrence, produce the resolved value (or a thenable standing in for
/// one).
pub type ResolverFn = Arc<dyn Fn(FieldContext) -> ResolverFuture + Send + Sync>;

/// `resolveType` hook for interfaces and unions: given a resolved value,
/// name the concrete object type it belongs to. Returning `None` triggers
/// the abstract-type slow path (every `isTypeOf` in schema order, §4.4).
pub type TypeResolverFn = Arc<dyn Fn(&Resolved) -> Option<String> + Send + Sync>;

/// `isTypeOf` hook attached to a single object type, used by the abstract
/// slow path and, for object-typed fields declared as an interface's
/// possible type, to validate a resolver's claim.
pub type IsTypeOfFn = Arc<dyn Fn(&Resolved) -> bool + Send + Sync>;

/// Converts a resolved leaf value into the [`Scalar`] that goes into the
/// response, or rejects it if it doesn't fit the scalar's coercion rules.
/// This is the "value coercion (external)" collaborator of §1/§4.5 as it
/// applies to output position.
pub type SerializeFn = Arc<dyn Fn(&Resolved) -> FieldResult<Scalar> + Send + Sync>;

/// The default field resolver (§6): used whenever a field definition
/// doesn't carry its own resolver. Treats the parent as a property bag,
/// which only [`Resolved::Map`] can be.
pub fn default_field_resolver(ctx: FieldContext) -> ResolverFuture {
    Box::pin(async move {
        match &ctx.parent {
            Resolved::Map(map) => Ok(map.get(ctx.field_name.as_str()).cloned().unwrap_or(Resolved::Null)),
            _ => Err(FieldError::new(format!(
                "no resolver registered for field \"{}\" and parent value is not a map",
                ctx.field_name
            ))),
        }
    })
}
