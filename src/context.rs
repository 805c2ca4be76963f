//! Response paths, the result tree, and the per-field-group memoization the
//! collector and completer share (§4.2).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use arcstr::ArcStr;

use crate::ast::Field;
use crate::ast::FragmentDefinition;
use crate::error::ExecutionError;
use crate::resolve::Resolved;
use crate::schema::{FieldDefinition, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(ArcStr),
    Index(usize),
}

/// A response-tree location, from the root down. Cloning a [`Path`] to hand
/// it to a child field is the steady-state operation in this engine (every
/// completion step does it at least once), so segments are cheap-to-clone
/// [`ArcStr`]s rather than owned [`String`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn push_field(&self, name: impl Into<ArcStr>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.into()));
        Self(segments)
    }

    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            match seg {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

/// One response key's worth of selection: all the field nodes that merged
/// into it (§4.1, field merging), in encounter order. `nodes[0]` is the
/// node whose arguments and directives govern the group, per the
/// spec-mandated "first occurrence wins" rule; the rest only contribute
/// their selection sets.
#[derive(Clone)]
pub struct CollectedField {
    pub result_key: ArcStr,
    pub nodes: Vec<Arc<Field>>,
    /// Memoization scoped to this one field-group occurrence (§4.2), shared
    /// across every concrete-type invocation it is completed against - e.g.
    /// every element of a list field sharing this selection.
    pub shared: Arc<SharedState>,
}

impl CollectedField {
    pub fn primary(&self) -> &Arc<Field> {
        &self.nodes[0]
    }

    /// The merged child selection set: every node's own selections,
    /// concatenated. Re-collecting this against a concrete type is what
    /// `SharedState::child_templates` caches.
    pub fn merged_selection_set(&self) -> impl Iterator<Item = &crate::ast::Selection> {
        self.nodes.iter().flat_map(|f| f.selection_set.iter())
    }
}

struct IfTypeCache {
    type_name: ArcStr,
    field_def: Arc<FieldDefinition>,
    arguments: Arc<indexmap::IndexMap<String, Resolved>>,
}

/// Per-field-group memoization (§4.2). One instance is created by the
/// collector for each occurrence of a field group in a selection set, and
/// shared (via [`Arc`]) across every concrete-type instance that occurrence
/// is completed against - typically every element of a list field.
///
/// Two independent caches live here:
/// - `if_type`: a single-slot memo of "field definition + coerced
///   arguments", valid as long as the enclosing concrete type doesn't
///   change from the last time it was consulted. List elements sharing a
///   concrete type keep hitting the same slot; a list of an interface type
///   with mixed concrete types invalidates it on every type change instead
///   of accumulating entries, since in practice runs of same-typed
///   elements are the common case.
/// - `child_templates`: the full re-collection of this field's child
///   selection set against a concrete type, keyed by that type's name, kept
///   indefinitely for the lifetime of the request. Two list elements of the
///   same concrete type reuse the same `Vec<CollectedField>` rather than
///   re-walking fragments and directives from scratch.
#[derive(Default)]
pub struct SharedState {
    if_type: RefCell<Option<IfTypeCache>>,
    child_templates: RefCell<HashMap<ArcStr, Arc<Vec<CollectedField>>>>,
}

impl SharedState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn field_plan_for_type(
        &self,
        type_name: &str,
        compute: impl FnOnce() -> (Arc<FieldDefinition>, indexmap::IndexMap<String, Resolved>),
    ) -> (Arc<FieldDefinition>, Arc<indexmap::IndexMap<String, Resolved>>) {
        {
            let cached = self.if_type.borrow();
            if let Some(entry) = cached.as_ref() {
                if entry.type_name.as_str() == type_name {
                    return (entry.field_def.clone(), entry.arguments.clone());
                }
            }
        }
        let (field_def, arguments) = compute();
        let arguments = Arc::new(arguments);
        *self.if_type.borrow_mut() = Some(IfTypeCache {
            type_name: ArcStr::from(type_name),
            field_def: field_def.clone(),
            arguments: arguments.clone(),
        });
        (field_def, arguments)
    }

    pub fn child_template_for_type(
        &self,
        type_name: &str,
        compute: impl FnOnce() -> Vec<CollectedField>,
    ) -> Arc<Vec<CollectedField>> {
        if let Some(existing) = self.child_templates.borrow().get(type_name) {
            return existing.clone();
        }
        let computed = Arc::new(compute());
        self.child_templates
            .borrow_mut()
            .insert(ArcStr::from(type_name), computed.clone());
        computed
    }
}

/// Shared, read-mostly state for one request: the schema, the document's
/// fragments, the coerced variables, and the two collectors of
/// per-execution output (errors and the result tree itself). Passed by
/// reference to every strand; `errors` is the only mutable part and is
/// synchronized since strands for sibling fields may run concurrently
/// (§5). Unlike the teacher's `Executor`, there is no separate mutable
/// result tree: completion builds the response [`Value`] purely as a
/// return value (see [`crate::completer`]), so sibling result-key
/// ordering falls out of collection order rather than needing a
/// prefilled-null trick to survive out-of-order writes.
pub struct ExecutionContext<'a> {
    pub schema: &'a Schema,
    pub fragments: &'a HashMap<String, FragmentDefinition>,
    pub variables: &'a indexmap::IndexMap<String, Resolved>,
    pub errors: Mutex<Vec<ExecutionError>>,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(
        schema: &'a Schema,
        fragments: &'a HashMap<String, FragmentDefinition>,
        variables: &'a indexmap::IndexMap<String, Resolved>,
    ) -> Self {
        Self {
            schema,
            fragments,
            variables,
            errors: Mutex::new(Vec::new()),
        }
    }

    pub fn push_error(&self, error: ExecutionError) {
        self.errors.lock().expect("errors mutex poisoned").push(error);
    }

    /// Errors in report order (§5: "appended to the error list in the order
    /// they are reported"), not sorted - `join_all`'s own polling order
    /// already makes that report order deterministic for a given request.
    pub fn into_errors(self) -> Vec<ExecutionError> {
        self.errors.into_inner().expect("errors mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc as StdArc;

    use crate::resolve::Resolved;
    use crate::schema::Type;
    use crate::value::Scalar;

    use super::*;

    #[test]
    fn path_display_renders_fields_dotted_and_indices_bracketed() {
        let path = Path::root().push_field("hero").push_field("friends").push_index(2);
        assert_eq!(path.to_string(), "hero.friends[2]");
    }

    #[test]
    fn field_plan_for_type_reuses_the_cached_slot_for_the_same_concrete_type() {
        let shared = SharedState::new();
        let calls = StdArc::new(std::sync::atomic::AtomicUsize::new(0));

        let compute = || {
            calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            (
                StdArc::new(FieldDefinition::new("name", Type::named("String"))),
                IndexMap::new(),
            )
        };

        let _ = shared.field_plan_for_type("Human", compute);
        let _ = shared.field_plan_for_type("Human", compute);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1, "second lookup hit the cache");

        let _ = shared.field_plan_for_type("Droid", compute);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2, "a different concrete type recomputes");
    }

    #[test]
    fn child_template_for_type_is_cached_indefinitely_per_concrete_type() {
        let shared = SharedState::new();
        let calls = StdArc::new(std::sync::atomic::AtomicUsize::new(0));

        let make_template = || {
            calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            vec![CollectedField {
                result_key: ArcStr::from("name"),
                nodes: Vec::new(),
                shared: SharedState::new(),
            }]
        };

        let first = shared.child_template_for_type("Human", make_template);
        let second = shared.child_template_for_type("Human", make_template);
        assert!(StdArc::ptr_eq(&first, &second), "same concrete type reuses the same template");
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);

        let _ = shared.child_template_for_type("Droid", make_template);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn execution_context_collects_errors_in_report_order() {
        let schema_src = {
            let mut fields = IndexMap::new();
            fields.insert("ok".to_owned(), crate::schema::FieldDefinition::new("ok", Type::named("String")));
            crate::schema::SchemaBuilder::new()
                .add_type(crate::schema::meta::NamedType::Scalar(crate::schema::meta::ScalarMeta {
                    name: "String".to_owned(),
                    description: None,
                    serialize: crate::schema::serializer(|v| match v {
                        Resolved::Scalar(Scalar::String(s)) => Ok(Scalar::String(s.clone())),
                        _ => Err(crate::error::FieldError::new("not a string")),
                    }),
                }))
                .add_type(crate::schema::meta::NamedType::Object(crate::schema::meta::ObjectMeta {
                    name: "Query".to_owned(),
                    fields,
                    ..Default::default()
                }))
                .query_type("Query")
                .build()
                .unwrap()
        };
        let fragments = HashMap::new();
        let variables = IndexMap::new();
        let ctx = ExecutionContext::new(&schema_src, &fragments, &variables);

        ctx.push_error(ExecutionError::new(
            Path::root().push_field("b"),
            crate::error::FieldError::new("second"),
        ));
        ctx.push_error(ExecutionError::new(
            Path::root().push_field("a"),
            crate::error::FieldError::new("first"),
        ));

        let errors = ctx.into_errors();
        assert_eq!(errors[0].message(), "second", "report order, not sorted by path");
        assert_eq!(errors[1].message(), "first");
    }
}
