//! The schema collaborator (§2, §6): named types, the query/mutation root
//! types, and the handful of lookups the rest of the engine is allowed to
//! call on it.
//!
//! Grounded on the shape of `juniper::schema::model::SchemaType` (a flat
//! `HashMap<String, MetaType>` plus named root types and `possible_types`/
//! `is_possible_type` queries), but built directly rather than derived from
//! a `GraphQLType` registry walk, since this engine has no codegen macros
//! to populate one.

pub mod meta;

use std::sync::Arc;

use indexmap::IndexMap;

use meta::{NamedType, ObjectMeta, TypeMap};

pub use meta::{ArgumentDefinition, FieldDefinition, Type};

use crate::resolve::{FieldContext, ResolverFuture, SerializeFn};

/// Type-identity violation (§2, "for any referenced type T,
/// `schema.getType(T.name) == T`"): a field, possible-type list, or
/// interface reference names a type the schema doesn't actually have.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("type \"{name}\" referenced but not defined in the schema")]
pub struct UnknownTypeError {
    pub name: String,
}

pub struct Schema {
    types: TypeMap,
    query_type_name: String,
    mutation_type_name: Option<String>,
}

impl Schema {
    pub fn get_type(&self, name: &str) -> Option<&Arc<NamedType>> {
        self.types.get(name)
    }

    pub fn query_type(&self) -> &Arc<NamedType> {
        self.types
            .get(&self.query_type_name)
            .expect("query root type was validated at build time")
    }

    pub fn mutation_type(&self) -> Option<&Arc<NamedType>> {
        self.mutation_type_name
            .as_deref()
            .map(|name| self.types.get(name).expect("validated at build time"))
    }

    /// The query root's [`ObjectMeta`], for callers (the executor façade)
    /// that need to complete fields against it rather than merely look it
    /// up by name. `SchemaBuilder::build` validates the query root is an
    /// object type, so the downcast here cannot fail.
    pub fn query_object(&self) -> &ObjectMeta {
        match self.query_type().as_ref() {
            NamedType::Object(o) => o,
            _ => unreachable!("SchemaBuilder::build validated the query root is an object type"),
        }
    }

    /// The mutation root's [`ObjectMeta`], if the schema registered one.
    pub fn mutation_object(&self) -> Option<&ObjectMeta> {
        self.mutation_type().map(|t| match t.as_ref() {
            NamedType::Object(o) => o,
            _ => unreachable!("SchemaBuilder::build validated the mutation root is an object type"),
        })
    }

    /// `getPossibleTypes(abstract)`: the concrete object types an interface
    /// or union can resolve to.
    pub fn possible_types(&self, abstract_type: &NamedType) -> Vec<&Arc<NamedType>> {
        match abstract_type {
            NamedType::Union(u) => u
                .possible_type_names
                .iter()
                .filter_map(|name| self.types.get(name))
                .collect(),
            NamedType::Interface(i) => self
                .types
                .values()
                .filter(|t| match t.as_ref() {
                    NamedType::Object(o) => o.interfaces.iter().any(|name| name == &i.name),
                    _ => false,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// `isPossibleType(abstract, object)`.
    pub fn is_possible_type(&self, abstract_type: &NamedType, object_type: &NamedType) -> bool {
        self.possible_types(abstract_type)
            .iter()
            .any(|t| t.name() == object_type.name())
    }

    /// Runs the abstract-type slow path (§4.4): every possible type's
    /// `isTypeOf` is invoked, in schema order, with no short-circuiting;
    /// the first `true` wins.
    pub fn resolve_abstract_by_is_type_of(
        &self,
        abstract_type: &NamedType,
        value: &crate::resolve::Resolved,
    ) -> Option<String> {
        let mut winner = None;
        for candidate in self.possible_types(abstract_type) {
            if let NamedType::Object(ObjectMeta {
                is_type_of: Some(is_type_of),
                name,
                ..
            }) = candidate.as_ref()
            {
                if is_type_of(value) && winner.is_none() {
                    winner = Some(name.clone());
                }
            }
        }
        winner
    }
}

/// Builds a [`Schema`], validating type identity once at the end rather than
/// per-lookup, matching `SchemaType::new`'s eager, panic-on-build-error
/// posture (the teacher panics; this engine returns a [`SchemaBuildError`]
/// since user-constructed schemas are reachable from library callers, not
/// only from codegen output).
#[derive(Default)]
pub struct SchemaBuilder {
    types: IndexMap<String, NamedType>,
    query_type_name: Option<String>,
    mutation_type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SchemaBuildError {
    #[display("no query root type registered")]
    MissingQueryType,
    #[display("query root type \"{_0}\" was not registered")]
    QueryTypeNotFound(#[error(not(source))] String),
    #[display("mutation root type \"{_0}\" was not registered")]
    MutationTypeNotFound(#[error(not(source))] String),
    #[display("query root type \"{_0}\" is not an object type")]
    QueryTypeNotObject(#[error(not(source))] String),
    #[display("mutation root type \"{_0}\" is not an object type")]
    MutationTypeNotObject(#[error(not(source))] String),
    #[display("field \"{type_name}.{field_name}\" references unknown type \"{referenced}\"")]
    DanglingFieldType {
        type_name: String,
        field_name: String,
        referenced: String,
    },
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(mut self, named_type: NamedType) -> Self {
        self.types.insert(named_type.name().to_owned(), named_type);
        self
    }

    pub fn query_type(mut self, name: impl Into<String>) -> Self {
        self.query_type_name = Some(name.into());
        self
    }

    pub fn mutation_type(mut self, name: impl Into<String>) -> Self {
        self.mutation_type_name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Schema, SchemaBuildError> {
        let query_type_name = self.query_type_name.ok_or(SchemaBuildError::MissingQueryType)?;
        match self.types.get(&query_type_name) {
            None => return Err(SchemaBuildError::QueryTypeNotFound(query_type_name)),
            Some(t) if !matches!(t, NamedType::Object(_)) => {
                return Err(SchemaBuildError::QueryTypeNotObject(query_type_name));
            }
            Some(_) => {}
        }
        if let Some(mutation_name) = &self.mutation_type_name {
            match self.types.get(mutation_name) {
                None => return Err(SchemaBuildError::MutationTypeNotFound(mutation_name.clone())),
                Some(t) if !matches!(t, NamedType::Object(_)) => {
                    return Err(SchemaBuildError::MutationTypeNotObject(mutation_name.clone()));
                }
                Some(_) => {}
            }
        }

        for named_type in self.types.values() {
            let fields: Box<dyn Iterator<Item = (&String, &FieldDefinition)>> = match named_type {
                NamedType::Object(o) => Box::new(o.fields.iter()),
                NamedType::Interface(i) => Box::new(i.fields.iter()),
                _ => Box::new(std::iter::empty()),
            };
            for (field_name, field) in fields {
                let referenced = field.field_type.innermost_name();
                if !self.types.contains_key(referenced) {
                    return Err(SchemaBuildError::DanglingFieldType {
                        type_name: named_type.name().to_owned(),
                        field_name: field_name.clone(),
                        referenced: referenced.to_owned(),
                    });
                }
            }
        }

        let types = self
            .types
            .into_iter()
            .map(|(name, ty)| (name, Arc::new(ty)))
            .collect();

        Ok(Schema {
            types,
            query_type_name,
            mutation_type_name: self.mutation_type_name,
        })
    }
}

/// Wraps a plain closure into the [`crate::resolve::ResolverFn`] shape,
/// for schema construction call sites that want ordinary `async fn`-style
/// ergonomics rather than hand-writing `Box::pin`.
pub fn resolver<F, Fut>(f: F) -> crate::resolve::ResolverFn
where
    F: Fn(FieldContext) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = crate::error::FieldResult<crate::resolve::Resolved>>
        + Send
        + 'static,
{
    Arc::new(move |ctx| -> ResolverFuture { Box::pin(f(ctx)) })
}

pub fn serializer<F>(f: F) -> SerializeFn
where
    F: Fn(&crate::resolve::Resolved) -> crate::error::FieldResult<crate::value::Scalar>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}
