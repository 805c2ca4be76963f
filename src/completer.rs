//! The value-completion state machine (§4.4): turns a resolver's dynamic
//! [`Resolved`] output into a typed, schema-shaped [`Value`], chasing
//! thenables, coercing leaves, resolving abstract types, and recursing into
//! lists and composite selections.
//!
//! The teacher drives this with an explicit coroutine/trampoline
//! (`Executor::resolve_into_value_async` walking a hand-written future
//! state machine); here the same recursion is native `async fn` recursion,
//! per the design guidance to let the host language's own call stack stand
//! in for a bespoke coroutine stack wherever the runtime allows it (§9).
//! Native `join_all` over sibling futures also means result keys keep
//! their collected order for free, so unlike the informal model this
//! engine needs no "prefilled null" placeholder step: a field's value is
//! simply the function's return value, assembled into its parent's
//! `Object`/list only once every sibling has settled.

use std::sync::Arc;

use arcstr::ArcStr;
use futures::future::{join_all, BoxFuture};
use indexmap::IndexMap;
use itertools::Itertools as _;

use crate::coercion::evaluate_arguments;
use crate::collector::collect_fields;
use crate::context::{CollectedField, ExecutionContext, Path};
use crate::error::{ExecutionError, FieldError};
use crate::resolve::{default_field_resolver, FieldContext, Resolved};
use crate::schema::meta::{NamedType, ObjectMeta};
use crate::schema::{FieldDefinition, Type};
use crate::value::{Object, Scalar, Value};

/// The result of one completion step: either a fully completed value, or a
/// signal that the nearest enclosing nullable ancestor (at `Path`, the
/// "null fence") must become null instead (the `UNDEFINED` of §4.4).
pub enum Outcome {
    Value(Value),
    Propagate(Path),
}

/// Folds a composite's already-completed field outcomes into its `Object`,
/// or decides whether a propagated signal is this object's own fence (in
/// which case the whole object collapses to null) or must keep bubbling
/// past it unchanged.
fn reduce_object_fields(path: &Path, fields: Vec<(ArcStr, Outcome)>) -> Result<Value, Outcome> {
    let mut object = Object::with_capacity(fields.len());
    for (key, outcome) in fields {
        match outcome {
            Outcome::Value(value) => object.set(key.to_string(), value),
            Outcome::Propagate(fence) => {
                return if &fence == path {
                    Ok(Value::Null)
                } else {
                    Err(Outcome::Propagate(fence))
                };
            }
        }
    }
    Ok(Value::Object(object))
}

fn reduce_list_elements(path: &Path, elements: Vec<Outcome>) -> Result<Value, Outcome> {
    let mut values = Vec::with_capacity(elements.len());
    for outcome in elements {
        match outcome {
            Outcome::Value(value) => values.push(value),
            Outcome::Propagate(fence) => {
                return if &fence == path {
                    Ok(Value::Null)
                } else {
                    Err(Outcome::Propagate(fence))
                };
            }
        }
    }
    Ok(Value::List(values))
}

/// Step 8: if the declared type was non-null and the value we arrived at
/// (whether directly, or by locally absorbing a child's propagate) is
/// still null, this is the frame where the violation is actually detected
/// and reported; every other frame just passes an already-decided
/// [`Outcome::Propagate`] through untouched.
fn finish(ctx: &ExecutionContext<'_>, non_null: bool, value: Value, path: &Path, fence: &Path) -> Outcome {
    if non_null && value.is_null() {
        ctx.push_error(ExecutionError::new(
            path.clone(),
            FieldError::new("cannot return null for non-nullable field"),
        ));
        Outcome::Propagate(fence.clone())
    } else {
        Outcome::Value(value)
    }
}

/// Validates a `resolveType`/slow-path name against the abstract type it
/// was resolved for (§4.4 step 7: "non-null, is an ObjectType, is a
/// possible type for T, has type identity").
fn validate_resolved_object(
    ctx: &ExecutionContext<'_>,
    abstract_type: &NamedType,
    name: &str,
    path: &Path,
) -> Option<Arc<NamedType>> {
    let Some(candidate) = ctx.schema.get_type(name) else {
        ctx.push_error(ExecutionError::new(
            path.clone(),
            FieldError::new(format!("abstract type resolved to unknown type \"{name}\"")),
        ));
        return None;
    };
    if !matches!(candidate.as_ref(), NamedType::Object(_)) {
        ctx.push_error(ExecutionError::new(
            path.clone(),
            FieldError::new(format!("abstract type resolved to non-object type \"{name}\"")),
        ));
        return None;
    }
    if !ctx.schema.is_possible_type(abstract_type, candidate) {
        let possible = ctx.schema.possible_types(abstract_type).iter().map(|t| t.name()).join(", ");
        ctx.push_error(ExecutionError::new(
            path.clone(),
            FieldError::new(format!(
                "type \"{name}\" is not a possible type of \"{}\" (expected one of: {possible})",
                abstract_type.name()
            )),
        ));
        return None;
    }
    Some(candidate.clone())
}

/// Determines the concrete object type a composite value completes
/// against: `resolveType` first, falling back to the abstract slow path
/// (every `isTypeOf` invoked, no short-circuiting) when it returns
/// nothing, per §4.4/§8.
fn resolve_concrete_type(
    ctx: &ExecutionContext<'_>,
    declared: &Arc<NamedType>,
    value: &Resolved,
    path: &Path,
) -> Option<Arc<NamedType>> {
    let resolve_type = match declared.as_ref() {
        NamedType::Object(_) => return Some(declared.clone()),
        NamedType::Interface(i) => i.resolve_type.as_ref(),
        NamedType::Union(u) => u.resolve_type.as_ref(),
        _ => return None,
    };
    if let Some(resolve_type) = resolve_type {
        if let Some(name) = resolve_type(value) {
            return validate_resolved_object(ctx, declared, &name, path);
        }
    }
    let name = ctx.schema.resolve_abstract_by_is_type_of(declared, value)?;
    validate_resolved_object(ctx, declared, &name, path)
}

fn serialize_enum(value: &Resolved, values: &[String]) -> Result<Scalar, FieldError> {
    match value {
        Resolved::Scalar(Scalar::String(s)) if values.iter().any(|v| v == s) => {
            Ok(Scalar::String(s.clone()))
        }
        Resolved::Scalar(Scalar::String(s)) => Err(FieldError::new(format!(
            "\"{s}\" is not a member of this enum"
        ))),
        _ => Err(FieldError::new("enum value must be a string")),
    }
}

/// The 8-step state machine. `owner` is the field occurrence this value
/// was resolved for: its merged selection set and [`crate::context::SharedState`]
/// are what a composite result needs to collect and cache its own
/// children against whichever concrete type it resolves to. Boxed because
/// it recurses through `async fn`, which the compiler cannot otherwise
/// size.
pub fn complete_value<'a>(
    ctx: &'a ExecutionContext<'a>,
    owner: &'a CollectedField,
    field_type: &'a Type,
    value: Resolved,
    path: Path,
    inherited_fence: Path,
) -> BoxFuture<'a, Outcome> {
    Box::pin(async move {
        // Step 1: peel NonNull, updating the fence only when this call's
        // type is nullable at this level.
        let mut non_null = false;
        let mut ty = field_type;
        while let Type::NonNull(inner) = ty {
            non_null = true;
            ty = inner;
        }
        let fence = if non_null { inherited_fence } else { path.clone() };

        // Step 2: resolve async.
        let value = match value.settle().await {
            Ok(v) => v,
            Err(err) => {
                ctx.push_error(ExecutionError::new(path.clone(), err));
                return finish(ctx, non_null, Value::Null, &path, &fence);
            }
        };

        // Step 3: null.
        if value.is_null() {
            return finish(ctx, non_null, Value::Null, &path, &fence);
        }

        // The list modifier is checked before any named-type lookup, since
        // it names no schema type of its own.
        if let Type::List(element_type) = ty {
            let Resolved::List(items) = value else {
                ctx.push_error(ExecutionError::new(
                    path.clone(),
                    FieldError::new("resolved value is not a list for a list-typed field"),
                ));
                return finish(ctx, non_null, Value::Null, &path, &fence);
            };
            let elements = join_all(items.into_iter().enumerate().map(|(index, item)| {
                complete_value(ctx, owner, element_type, item, path.push_index(index), fence.clone())
            }))
            .await;
            return match reduce_list_elements(&path, elements) {
                Ok(v) => finish(ctx, non_null, v, &path, &fence),
                Err(propagate) => propagate,
            };
        }

        // Step 4: type-identity lookup for the named type.
        let name = ty.innermost_name();
        let Some(named) = ctx.schema.get_type(name) else {
            ctx.push_error(ExecutionError::new(
                path.clone(),
                FieldError::new(format!("type \"{name}\" is not defined in the schema")),
            ));
            return finish(ctx, non_null, Value::Null, &path, &fence);
        };
        let named = named.clone();

        // A leaf field carrying a sub-selection is a query shape error the
        // collector doesn't catch (it has no notion of a field's declared
        // type); diagnosed here but non-fatal (§8 "Scalar on sub-selection":
        // the field's own value still completes and serializes normally).
        if named.is_leaf() && owner.merged_selection_set().next().is_some() {
            ctx.push_error(ExecutionError::new(
                path.clone(),
                FieldError::new(format!(
                    "field \"{}\" is not composite - cannot query sub-fields",
                    owner.result_key
                )),
            ));
        }

        match named.as_ref() {
            // Step 5: leaf.
            NamedType::Scalar(scalar) => match (scalar.serialize)(&value) {
                Ok(v) => finish(ctx, non_null, Value::Scalar(v), &path, &fence),
                Err(err) => {
                    ctx.push_error(ExecutionError::new(path.clone(), err));
                    finish(ctx, non_null, Value::Null, &path, &fence)
                }
            },
            NamedType::Enum(e) => match serialize_enum(&value, &e.values) {
                Ok(v) => finish(ctx, non_null, Value::Scalar(v), &path, &fence),
                Err(err) => {
                    ctx.push_error(ExecutionError::new(path.clone(), err));
                    finish(ctx, non_null, Value::Null, &path, &fence)
                }
            },

            // Step 7: composite.
            NamedType::Object(_) | NamedType::Interface(_) | NamedType::Union(_) => {
                let Some(object_type) = resolve_concrete_type(ctx, &named, &value, &path) else {
                    return finish(ctx, non_null, Value::Null, &path, &fence);
                };
                let NamedType::Object(object_meta) = object_type.as_ref() else {
                    unreachable!("resolve_concrete_type only ever returns an Object variant")
                };
                if let Some(is_type_of) = &object_meta.is_type_of {
                    if !is_type_of(&value) {
                        ctx.push_error(ExecutionError::new(
                            path.clone(),
                            FieldError::new(format!(
                                "\"isTypeOf\" returned false for type \"{}\"",
                                object_meta.name
                            )),
                        ));
                        return finish(ctx, non_null, Value::Null, &path, &fence);
                    }
                }

                let child_selection: Vec<_> = owner.merged_selection_set().cloned().collect();
                let mut child_errors = Vec::new();
                let children = owner.shared.child_template_for_type(&object_meta.name, || {
                    collect_fields(
                        &child_selection,
                        ctx.fragments,
                        ctx.variables,
                        ctx.schema,
                        object_type.as_ref(),
                        false,
                        &path,
                        &mut child_errors,
                    )
                });
                for error in child_errors {
                    ctx.push_error(error);
                }

                let outcomes =
                    complete_fields_for_type(ctx, &children, object_meta, value, path.clone(), fence.clone()).await;
                match reduce_object_fields(&path, outcomes) {
                    Ok(v) => finish(ctx, non_null, v, &path, &fence),
                    Err(propagate) => propagate,
                }
            }
            NamedType::InputObject(_) => {
                ctx.push_error(ExecutionError::new(
                    path.clone(),
                    FieldError::new(format!("input type \"{name}\" cannot be used as an output type")),
                ));
                finish(ctx, non_null, Value::Null, &path, &fence)
            }
        }
    })
}

/// Runs every field of an already-merged selection set against a concrete
/// object type concurrently (the native-`join_all` stand-in for the
/// scheduler's queue at this level - nested sibling ordering needs
/// nothing beyond what `join_all` already preserves, §5).
pub async fn complete_fields_for_type<'a>(
    ctx: &'a ExecutionContext<'a>,
    fields: &'a [CollectedField],
    object_meta: &'a ObjectMeta,
    parent: Resolved,
    base_path: Path,
    enclosing_fence: Path,
) -> Vec<(ArcStr, Outcome)> {
    join_all(fields.iter().map(|field| {
        let parent = parent.clone();
        let base_path = base_path.clone();
        let enclosing_fence = enclosing_fence.clone();
        async move {
            let key = field.result_key.clone();
            let outcome =
                complete_one_field(ctx, field, object_meta, parent, base_path, enclosing_fence).await;
            (key, outcome)
        }
    }))
    .await
}

/// Completes the root selection set, per §4.3 "Mutations": query roots run
/// every top-level field concurrently, the same `join_all` fan-out every
/// composite uses elsewhere in this engine; mutation roots run top-level
/// fields one at a time, awaiting each one's entire subtree - including
/// every thenable it transitively produces - before the next root field's
/// resolver is even invoked. This is the one place the native-`async`
/// rendition of the strand scheduler cannot just reuse
/// [`complete_fields_for_type`]'s blanket concurrency: a `join_all` over
/// root fields polls every resolver future the instant it starts, which is
/// exactly the interleaving mutation semantics forbid.
///
/// Returns `Value::Null` when a top-level non-null field's own resolution
/// fails (§4.4: "for root non-null fields, the entire response data is
/// nulled"): the root fence and the root path coincide, so
/// [`reduce_object_fields`] always resolves at this level rather than
/// bubbling any further.
pub async fn complete_root<'a>(
    ctx: &'a ExecutionContext<'a>,
    fields: &'a [CollectedField],
    object_meta: &'a ObjectMeta,
    root_value: Resolved,
    serialize: bool,
) -> Value {
    let base_path = Path::root();
    let root_fence = Path::root();

    let outcomes = if serialize {
        let mut outcomes = Vec::with_capacity(fields.len());
        for field in fields {
            let key = field.result_key.clone();
            let outcome = complete_one_field(
                ctx,
                field,
                object_meta,
                root_value.clone(),
                base_path.clone(),
                root_fence.clone(),
            )
            .await;
            outcomes.push((key, outcome));
        }
        outcomes
    } else {
        complete_fields_for_type(
            ctx,
            fields,
            object_meta,
            root_value,
            base_path.clone(),
            root_fence.clone(),
        )
        .await
    };

    match reduce_object_fields(&base_path, outcomes) {
        Ok(value) => value,
        // Unreachable in practice: a `Propagate` can only bubble past this
        // frame if its fence differs from `base_path`, but every fence this
        // engine ever constructs is either the root path or a path nested
        // under it, and the root path is the path `reduce_object_fields` is
        // called with here.
        Err(Outcome::Propagate(_)) => Value::Null,
        Err(Outcome::Value(_)) => unreachable!("reduce_object_fields only ever errors with Propagate"),
    }
}

pub(crate) async fn complete_one_field<'a>(
    ctx: &'a ExecutionContext<'a>,
    field: &'a CollectedField,
    object_meta: &'a ObjectMeta,
    parent: Resolved,
    base_path: Path,
    enclosing_fence: Path,
) -> Outcome {
    let node = field.primary();
    let path = base_path.push_field(field.result_key.as_str());

    if node.name == "__typename" {
        return Outcome::Value(Value::Scalar(Scalar::String(object_meta.name.clone())));
    }

    // `__schema`/`__type` are admitted by the collector (valid only at the
    // query root, §6) but this engine has no introspection meta-schema to
    // resolve them against (§1 excludes the schema/type system itself);
    // see SPEC_FULL.md §5E. Reported as a field error rather than a panic.
    if node.name == "__schema" || node.name == "__type" {
        ctx.push_error(ExecutionError::new(
            path.clone(),
            FieldError::new("introspection is not implemented by this engine"),
        ));
        return Outcome::Value(Value::Null);
    }

    let (field_def, arguments) = field.shared.field_plan_for_type(&object_meta.name, || {
        let def = object_meta
            .fields
            .get(node.name.as_str())
            .expect("collector only admits fields present on the concrete type");
        let args = evaluate_arguments(&node.arguments, &def.arguments, ctx.variables);
        (
            Arc::new(FieldDefinition {
                name: def.name.clone(),
                field_type: def.field_type.clone(),
                arguments: IndexMap::new(),
                resolver: def.resolver.clone(),
                deprecation_reason: def.deprecation_reason.clone(),
            }),
            args,
        )
    });

    let field_context = FieldContext {
        parent,
        field_name: field.result_key.clone(),
        arguments: (*arguments).clone(),
        path: path.clone(),
    };
    let resolved = match object_meta.resolve_field_fn.as_ref().or(field_def.resolver.as_ref()) {
        Some(resolver) => resolver(field_context),
        None => default_field_resolver(field_context),
    };

    complete_value(
        ctx,
        field,
        &field_def.field_type,
        Resolved::Thenable(resolved),
        path,
        enclosing_fence,
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::ast;
    use crate::schema::meta::ScalarMeta;
    use crate::schema::{resolver, serializer, SchemaBuilder};

    use super::*;

    fn string_type() -> NamedType {
        NamedType::Scalar(ScalarMeta {
            name: "String".to_owned(),
            description: None,
            serialize: serializer(|v| match v {
                Resolved::Scalar(Scalar::String(s)) => Ok(Scalar::String(s.clone())),
                _ => Err(FieldError::new("not a string")),
            }),
        })
    }

    fn field_node(name: &str) -> Arc<ast::Field> {
        Arc::new(ast::Field {
            alias: None,
            name: name.to_owned(),
            arguments: IndexMap::new(),
            directives: Vec::new(),
            selection_set: Vec::new(),
        })
    }

    fn collected(name: &str) -> CollectedField {
        CollectedField {
            result_key: ArcStr::from(name),
            nodes: vec![field_node(name)],
            shared: crate::context::SharedState::new(),
        }
    }

    #[test]
    fn reduce_object_fields_collapses_to_null_when_propagate_matches_this_path() {
        let path = Path::root();
        let fields = vec![
            (ArcStr::from("a"), Outcome::Value(Value::Scalar(Scalar::Int(1)))),
            (ArcStr::from("b"), Outcome::Propagate(path.clone())),
        ];
        assert_eq!(reduce_object_fields(&path, fields), Ok(Value::Null));
    }

    #[test]
    fn reduce_object_fields_passes_through_a_propagate_for_an_outer_fence() {
        let path = Path::root().push_field("parent");
        let outer_fence = Path::root();
        let fields = vec![(ArcStr::from("b"), Outcome::Propagate(outer_fence.clone()))];
        match reduce_object_fields(&path, fields) {
            Err(Outcome::Propagate(fence)) => assert_eq!(fence, outer_fence),
            other => panic!("expected a propagate to bubble past this frame, got {other:?}"),
        }
    }

    #[test]
    fn reduce_object_fields_assembles_the_completed_object_in_field_order() {
        let path = Path::root();
        let fields = vec![
            (ArcStr::from("b"), Outcome::Value(Value::Scalar(Scalar::Int(2)))),
            (ArcStr::from("a"), Outcome::Value(Value::Scalar(Scalar::Int(1)))),
        ];
        let Ok(Value::Object(object)) = reduce_object_fields(&path, fields) else {
            panic!("expected an object");
        };
        let keys: Vec<_> = object.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec!["b".to_owned(), "a".to_owned()], "collection order, not sorted");
    }

    #[test]
    fn reduce_list_elements_collapses_to_null_when_an_element_propagates_to_the_list_itself() {
        let path = Path::root().push_field("items");
        let elements = vec![
            Outcome::Value(Value::Scalar(Scalar::Int(1))),
            Outcome::Propagate(path.clone()),
        ];
        assert_eq!(reduce_list_elements(&path, elements), Ok(Value::Null));
    }

    impl std::fmt::Debug for Outcome {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Value(v) => write!(f, "Value({v:?})"),
                Self::Propagate(p) => write!(f, "Propagate({p})"),
            }
        }
    }

    impl PartialEq for Outcome {
        fn eq(&self, other: &Self) -> bool {
            match (self, other) {
                (Self::Value(a), Self::Value(b)) => a == b,
                (Self::Propagate(a), Self::Propagate(b)) => a == b,
                _ => false,
            }
        }
    }

    fn query_schema_with(field_type: Type, resolved: Resolved) -> (crate::schema::Schema, Resolved) {
        let mut fields = IndexMap::new();
        let resolver_value = resolved.clone();
        fields.insert(
            "value".to_owned(),
            FieldDefinition::new("value", field_type).resolver(resolver(move |_ctx| {
                let value = resolver_value.clone();
                async move { Ok(value) }
            })),
        );
        let schema = SchemaBuilder::new()
            .add_type(string_type())
            .add_type(NamedType::Object(ObjectMeta {
                name: "Query".to_owned(),
                fields,
                ..Default::default()
            }))
            .query_type("Query")
            .build()
            .unwrap();
        (schema, resolved)
    }

    #[tokio::test]
    async fn non_null_leaf_resolving_to_null_propagates_to_its_own_fence() {
        let (schema, _) = query_schema_with(Type::named("String").non_null(), Resolved::Null);
        let fragments = HashMap::new();
        let variables = IndexMap::new();
        let ctx = ExecutionContext::new(&schema, &fragments, &variables);
        let object_meta = schema.query_object();
        let fields = vec![collected("value")];

        let data = complete_root(&ctx, &fields, object_meta, Resolved::Map(IndexMap::new()), false).await;

        assert_eq!(data, Value::Null, "a root non-null field failing nulls the whole response");
        assert_eq!(ctx.into_errors().len(), 1);
    }

    #[tokio::test]
    async fn nullable_leaf_resolving_to_null_just_completes_to_null() {
        let (schema, _) = query_schema_with(Type::named("String"), Resolved::Null);
        let fragments = HashMap::new();
        let variables = IndexMap::new();
        let ctx = ExecutionContext::new(&schema, &fragments, &variables);
        let object_meta = schema.query_object();
        let fields = vec![collected("value")];

        let data = complete_root(&ctx, &fields, object_meta, Resolved::Map(IndexMap::new()), false).await;

        let object = data.as_object().expect("query root completes to an object");
        assert_eq!(object.get("value"), Some(&Value::Null));
        assert!(ctx.into_errors().is_empty());
    }

    #[tokio::test]
    async fn mutation_root_fields_run_strictly_in_order() {
        let order = Arc::new(Mutex::new(Vec::new()));

        let mut fields = IndexMap::new();
        for name in ["first", "second"] {
            let order = order.clone();
            fields.insert(
                name.to_owned(),
                FieldDefinition::new(name, Type::named("String")).resolver(resolver(move |_ctx| {
                    let order = order.clone();
                    let name = name.to_owned();
                    async move {
                        // The first field's resolver suspends on a yield before
                        // recording itself; if mutation fields ran concurrently
                        // (a blanket `join_all`) "second" would record before
                        // "first" resumes.
                        tokio::task::yield_now().await;
                        order.lock().unwrap().push(name.clone());
                        Ok(Resolved::Scalar(Scalar::String(name)))
                    }
                })),
            );
        }
        let schema = SchemaBuilder::new()
            .add_type(string_type())
            .add_type(NamedType::Object(ObjectMeta {
                name: "Mutation".to_owned(),
                fields,
                ..Default::default()
            }))
            .add_type(NamedType::Object(ObjectMeta {
                name: "Query".to_owned(),
                ..Default::default()
            }))
            .query_type("Query")
            .mutation_type("Mutation")
            .build()
            .unwrap();

        let fragments = HashMap::new();
        let variables = IndexMap::new();
        let ctx = ExecutionContext::new(&schema, &fragments, &variables);
        let object_meta = schema.mutation_object().unwrap();
        let root_fields = vec![collected("first"), collected("second")];

        let _ = complete_root(&ctx, &root_fields, object_meta, Resolved::Map(IndexMap::new()), true).await;

        assert_eq!(*order.lock().unwrap(), vec!["first".to_owned(), "second".to_owned()]);
    }

    #[tokio::test]
    async fn typename_completes_without_a_field_definition() {
        let (schema, _) = query_schema_with(Type::named("String"), Resolved::Null);
        let fragments = HashMap::new();
        let variables = IndexMap::new();
        let ctx = ExecutionContext::new(&schema, &fragments, &variables);
        let object_meta = schema.query_object();
        let fields = vec![collected("__typename")];

        let outcome = complete_one_field(
            &ctx,
            &fields[0],
            object_meta,
            Resolved::Map(IndexMap::new()),
            Path::root(),
            Path::root(),
        )
        .await;

        assert_eq!(outcome, Outcome::Value(Value::Scalar(Scalar::String("Query".to_owned()))));
    }
}
