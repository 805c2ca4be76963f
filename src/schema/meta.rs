//! Type and field metadata, the `MetaType`/`Field`/`Argument` family from the
//! teacher's `schema::meta`, reshaped around resolver closures instead of
//! the `GraphQLType` trait + `Registry` codegen path.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::ast::Value as AstValue;
use crate::resolve::{IsTypeOfFn, ResolverFn, SerializeFn, TypeResolverFn};

/// A type reference, as attached to a field's return type or an argument's
/// declared type. Structurally identical to [`crate::ast::Type`]; kept as
/// its own type so schema construction doesn't depend on the query AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Named(String),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    pub fn non_null(self) -> Self {
        Self::NonNull(Box::new(self))
    }

    pub fn innermost_name(&self) -> &str {
        match self {
            Self::Named(n) => n,
            Self::List(t) | Self::NonNull(t) => t.innermost_name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }
}

pub struct ArgumentDefinition {
    pub name: String,
    pub arg_type: Type,
    pub default_value: Option<AstValue>,
}

impl ArgumentDefinition {
    pub fn new(name: impl Into<String>, arg_type: Type) -> Self {
        Self {
            name: name.into(),
            arg_type,
            default_value: None,
        }
    }

    pub fn default_value(mut self, value: AstValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// A single field on an object or interface type.
///
/// `resolver` is `None` for fields meant to go through the schema's, or the
/// enclosing type's, default field resolver (§6).
pub struct FieldDefinition {
    pub name: String,
    pub field_type: Type,
    pub arguments: IndexMap<String, ArgumentDefinition>,
    pub resolver: Option<ResolverFn>,
    pub deprecation_reason: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: Type) -> Self {
        Self {
            name: name.into(),
            field_type,
            arguments: IndexMap::new(),
            resolver: None,
            deprecation_reason: None,
        }
    }

    pub fn argument(mut self, arg: ArgumentDefinition) -> Self {
        self.arguments.insert(arg.name.clone(), arg);
        self
    }

    pub fn resolver(mut self, resolver: ResolverFn) -> Self {
        self.resolver = Some(resolver);
        self
    }
}

#[derive(Default)]
pub struct ObjectMeta {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, FieldDefinition>,
    pub interfaces: Vec<String>,
    /// `isTypeOf`, consulted by the abstract-type slow path (§4.4) and, when
    /// present, to validate a `resolveType` result that named this type.
    pub is_type_of: Option<IsTypeOfFn>,
    /// Per-type default resolver override (`resolveFieldFn`, §6), consulted
    /// before falling back to the schema-wide default field resolver.
    pub resolve_field_fn: Option<ResolverFn>,
}

#[derive(Default)]
pub struct InterfaceMeta {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, FieldDefinition>,
    pub resolve_type: Option<TypeResolverFn>,
}

#[derive(Default)]
pub struct UnionMeta {
    pub name: String,
    pub description: Option<String>,
    pub possible_type_names: Vec<String>,
    pub resolve_type: Option<TypeResolverFn>,
}

pub struct ScalarMeta {
    pub name: String,
    pub description: Option<String>,
    pub serialize: SerializeFn,
}

#[derive(Default)]
pub struct EnumMeta {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<String>,
}

#[derive(Default)]
pub struct InputObjectMeta {
    pub name: String,
    pub description: Option<String>,
    pub fields: IndexMap<String, ArgumentDefinition>,
}

/// One named type in the schema. The engine doesn't need the teacher's
/// `Placeholder`/lazy-registration machinery because schemas here are built
/// eagerly and completely before a request ever runs (§2, "Schema
/// (external)" has no notion of incremental registration).
pub enum NamedType {
    Scalar(ScalarMeta),
    Object(ObjectMeta),
    Interface(InterfaceMeta),
    Union(UnionMeta),
    Enum(EnumMeta),
    InputObject(InputObjectMeta),
}

impl NamedType {
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(t) => &t.name,
            Self::Object(t) => &t.name,
            Self::Interface(t) => &t.name,
            Self::Union(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::InputObject(t) => &t.name,
        }
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_))
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        match self {
            Self::Object(t) => t.fields.get(name),
            Self::Interface(t) => t.fields.get(name),
            _ => None,
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// Registration-order-preserving: the abstract-type slow path (§4.4) walks
/// possible types "in schema order", which only means something if the type
/// map itself remembers the order types were added in.
pub(super) type TypeMap = IndexMap<String, Arc<NamedType>>;
