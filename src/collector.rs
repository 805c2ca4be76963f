//! The selection-set walk (§4.1): turns a selection set plus an enclosing
//! concrete object type into a deduplicated, ordered, per-result-key field
//! list, resolving fragment spreads, inline fragments and `@include`/
//! `@skip` directives along the way.
//!
//! Kept independent of the completer and the scheduler so it is reusable
//! outside a full executor (e.g. by a static-analysis tool that only wants
//! the merged field set for a type) - the same independence the teacher
//! gives its own validation visitors.

use std::collections::HashMap;

use arcstr::ArcStr;
use indexmap::IndexMap;

use crate::ast::{self, FragmentDefinition, Selection};
use crate::coercion::evaluate_value;
use crate::context::{CollectedField, Path, SharedState};
use crate::error::{ExecutionError, FieldError};
use crate::resolve::Resolved;
use crate::schema::meta::NamedType;
use crate::schema::Schema;

/// `@skip`/`@include` dispatch table (§9, "keep the directive handling
/// table data-driven so future directives ... can extend it without
/// changing the Collector's core"). `bool` is the value of `if` that
/// causes the selection to be dropped.
const CONDITIONAL_DIRECTIVES: &[(&str, bool)] = &[("skip", true), ("include", false)];

fn truthy(value: &Resolved) -> bool {
    matches!(value, Resolved::Scalar(crate::value::Scalar::Boolean(true)))
}

fn should_skip(directives: &[ast::Directive], variables: &IndexMap<String, Resolved>) -> bool {
    directives.iter().any(|directive| {
        CONDITIONAL_DIRECTIVES
            .iter()
            .find(|(name, _)| *name == directive.name)
            .is_some_and(|(_, skip_on)| {
                directive
                    .argument("if")
                    .map(|arg| truthy(&evaluate_value(arg, variables)) == *skip_on)
                    .unwrap_or(false)
            })
    })
}

const META_FIELD_NAMES: &[&str] = &["__typename", "__schema", "__type"];

pub fn is_meta_field(name: &str) -> bool {
    META_FIELD_NAMES.contains(&name)
}

fn fragment_applies(type_condition: Option<&str>, object_type: &NamedType, schema: &Schema) -> bool {
    let Some(condition_name) = type_condition else {
        return true;
    };
    if condition_name == object_type.name() {
        return true;
    }
    match schema.get_type(condition_name) {
        Some(condition_type) if condition_type.is_abstract() => {
            schema.is_possible_type(condition_type, object_type)
        }
        _ => false,
    }
}

/// Walks `selection_set` against `object_type`, reporting unknown fields
/// and unknown fragments at `path` into `errors`, and returns the merged,
/// result-key-ordered field groups.
///
/// `is_query_root` gates `__schema`/`__type`, which are only valid there
/// (§6, "Introspection meta-fields"); `__typename` is always valid and is
/// never checked against the type's own field set.
pub fn collect_fields(
    selection_set: &[Selection],
    fragments: &HashMap<String, FragmentDefinition>,
    variables: &IndexMap<String, Resolved>,
    schema: &Schema,
    object_type: &NamedType,
    is_query_root: bool,
    path: &Path,
    errors: &mut Vec<ExecutionError>,
) -> Vec<CollectedField> {
    let mut groups: IndexMap<ArcStr, Vec<_>> = IndexMap::new();
    walk(
        selection_set,
        fragments,
        variables,
        schema,
        object_type,
        is_query_root,
        path,
        errors,
        &mut groups,
    );
    groups
        .into_iter()
        .map(|(result_key, nodes)| CollectedField {
            result_key,
            nodes,
            shared: SharedState::new(),
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn walk(
    selection_set: &[Selection],
    fragments: &HashMap<String, FragmentDefinition>,
    variables: &IndexMap<String, Resolved>,
    schema: &Schema,
    object_type: &NamedType,
    is_query_root: bool,
    path: &Path,
    errors: &mut Vec<ExecutionError>,
    groups: &mut IndexMap<ArcStr, Vec<std::sync::Arc<ast::Field>>>,
) {
    for selection in selection_set {
        match selection {
            Selection::Field(field) => {
                if should_skip(&field.directives, variables) {
                    continue;
                }
                let name = field.name.as_str();
                let is_root_only_meta = name == "__schema" || name == "__type";
                if is_root_only_meta && !is_query_root {
                    errors.push(ExecutionError::new(
                        path.clone(),
                        FieldError::new(format!(
                            "unknown field \"{name}\" on type \"{}\"",
                            object_type.name()
                        )),
                    ));
                    continue;
                }
                if !is_meta_field(name) && !object_type.has_field(name) {
                    errors.push(ExecutionError::new(
                        path.clone(),
                        FieldError::new(format!(
                            "unknown field \"{name}\" on type \"{}\"",
                            object_type.name()
                        )),
                    ));
                    continue;
                }
                groups
                    .entry(ArcStr::from(field.result_key()))
                    .or_default()
                    .push(field.clone());
            }
            Selection::FragmentSpread(spread) => {
                if should_skip(&spread.directives, variables) {
                    continue;
                }
                let Some(fragment) = fragments.get(&spread.name) else {
                    errors.push(ExecutionError::new(
                        path.clone(),
                        FieldError::new(format!("unknown fragment \"{}\"", spread.name)),
                    ));
                    continue;
                };
                if !fragment_applies(Some(&fragment.type_condition), object_type, schema) {
                    continue;
                }
                walk(
                    &fragment.selection_set,
                    fragments,
                    variables,
                    schema,
                    object_type,
                    is_query_root,
                    path,
                    errors,
                    groups,
                );
            }
            Selection::InlineFragment(inline) => {
                if should_skip(&inline.directives, variables) {
                    continue;
                }
                if !fragment_applies(inline.type_condition.as_deref(), object_type, schema) {
                    continue;
                }
                walk(
                    &inline.selection_set,
                    fragments,
                    variables,
                    schema,
                    object_type,
                    is_query_root,
                    path,
                    errors,
                    groups,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use indexmap::IndexMap;

    use super::*;
    use crate::schema::meta::{FieldDefinition, InterfaceMeta, ObjectMeta, ScalarMeta, Type};
    use crate::schema::SchemaBuilder;
    use crate::value::Scalar;

    fn string_scalar() -> NamedType {
        NamedType::Scalar(ScalarMeta {
            name: "String".to_owned(),
            description: None,
            serialize: crate::schema::serializer(|v| match v {
                Resolved::Scalar(Scalar::String(s)) => Ok(Scalar::String(s.clone())),
                _ => Err(FieldError::new("not a string")),
            }),
        })
    }

    fn field(alias: Option<&str>, name: &str) -> Selection {
        Selection::Field(Arc::new(ast::Field {
            alias: alias.map(str::to_owned),
            name: name.to_owned(),
            arguments: IndexMap::new(),
            directives: Vec::new(),
            selection_set: Vec::new(),
        }))
    }

    fn directive(name: &str, if_value: ast::Value) -> ast::Directive {
        let mut arguments = IndexMap::new();
        arguments.insert("if".to_owned(), if_value);
        ast::Directive {
            name: name.to_owned(),
            arguments,
        }
    }

    fn query_object_schema() -> crate::schema::Schema {
        let mut fields = IndexMap::new();
        fields.insert("a".to_owned(), FieldDefinition::new("a", Type::named("String")));
        fields.insert("b".to_owned(), FieldDefinition::new("b", Type::named("String")));
        SchemaBuilder::new()
            .add_type(string_scalar())
            .add_type(NamedType::Object(ObjectMeta {
                name: "Query".to_owned(),
                fields,
                ..Default::default()
            }))
            .query_type("Query")
            .build()
            .unwrap()
    }

    fn no_variables() -> IndexMap<String, Resolved> {
        IndexMap::new()
    }

    #[test]
    fn merges_repeated_result_keys_into_one_group_in_source_order() {
        let schema = query_object_schema();
        let query_type = schema.query_type().clone();
        let selection = vec![field(None, "a"), field(None, "b"), field(None, "a")];
        let mut errors = Vec::new();
        let groups = collect_fields(
            &selection,
            &HashMap::new(),
            &no_variables(),
            &schema,
            &query_type,
            true,
            &Path::root(),
            &mut errors,
        );

        assert!(errors.is_empty());
        assert_eq!(groups.len(), 2, "a and b, not three separate entries");
        assert_eq!(groups[0].result_key.as_str(), "a");
        assert_eq!(groups[0].nodes.len(), 2, "both occurrences of `a` merged");
        assert_eq!(groups[1].result_key.as_str(), "b");
    }

    #[test]
    fn unknown_field_is_reported_and_skipped() {
        let schema = query_object_schema();
        let query_type = schema.query_type().clone();
        let selection = vec![field(None, "a"), field(None, "doesNotExist")];
        let mut errors = Vec::new();
        let groups = collect_fields(
            &selection,
            &HashMap::new(),
            &no_variables(),
            &schema,
            &query_type,
            true,
            &Path::root(),
            &mut errors,
        );

        assert_eq!(groups.len(), 1);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message().contains("doesNotExist"));
    }

    #[test]
    fn include_false_drops_the_selection() {
        let schema = query_object_schema();
        let query_type = schema.query_type().clone();
        let a = ast::Field {
            alias: None,
            name: "a".to_owned(),
            arguments: IndexMap::new(),
            directives: vec![directive("include", ast::Value::Boolean(false))],
            selection_set: Vec::new(),
        };
        let selection = vec![Selection::Field(Arc::new(a))];
        let mut errors = Vec::new();
        let groups = collect_fields(
            &selection,
            &HashMap::new(),
            &no_variables(),
            &schema,
            &query_type,
            true,
            &Path::root(),
            &mut errors,
        );
        assert!(groups.is_empty());
    }

    #[test]
    fn skip_true_drops_the_selection_even_when_include_is_true() {
        let schema = query_object_schema();
        let query_type = schema.query_type().clone();
        let a = ast::Field {
            alias: None,
            name: "a".to_owned(),
            arguments: IndexMap::new(),
            directives: vec![
                directive("include", ast::Value::Boolean(true)),
                directive("skip", ast::Value::Boolean(true)),
            ],
            selection_set: Vec::new(),
        };
        let selection = vec![Selection::Field(Arc::new(a))];
        let mut errors = Vec::new();
        let groups = collect_fields(
            &selection,
            &HashMap::new(),
            &no_variables(),
            &schema,
            &query_type,
            true,
            &Path::root(),
            &mut errors,
        );
        assert!(groups.is_empty());
    }

    #[test]
    fn typename_is_admitted_without_a_field_definition() {
        let schema = query_object_schema();
        let query_type = schema.query_type().clone();
        let selection = vec![field(None, "__typename")];
        let mut errors = Vec::new();
        let groups = collect_fields(
            &selection,
            &HashMap::new(),
            &no_variables(),
            &schema,
            &query_type,
            true,
            &Path::root(),
            &mut errors,
        );
        assert!(errors.is_empty());
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn schema_meta_fields_are_unknown_fields_outside_the_query_root() {
        let schema = query_object_schema();
        let query_type = schema.query_type().clone();
        let selection = vec![field(None, "__schema")];
        let mut errors = Vec::new();
        let groups = collect_fields(
            &selection,
            &HashMap::new(),
            &no_variables(),
            &schema,
            &query_type,
            false,
            &Path::root(),
            &mut errors,
        );
        assert!(groups.is_empty());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn unknown_fragment_spread_is_reported() {
        let schema = query_object_schema();
        let query_type = schema.query_type().clone();
        let selection = vec![Selection::FragmentSpread(ast::FragmentSpread {
            name: "Missing".to_owned(),
            directives: Vec::new(),
        })];
        let mut errors = Vec::new();
        let groups = collect_fields(
            &selection,
            &HashMap::new(),
            &no_variables(),
            &schema,
            &query_type,
            true,
            &Path::root(),
            &mut errors,
        );
        assert!(groups.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message().contains("Missing"));
    }

    #[test]
    fn fragment_applies_to_interface_possible_type() {
        let mut interface_fields = IndexMap::new();
        interface_fields.insert("a".to_owned(), FieldDefinition::new("a", Type::named("String")));
        let mut object_fields = IndexMap::new();
        object_fields.insert("a".to_owned(), FieldDefinition::new("a", Type::named("String")));
        let schema = SchemaBuilder::new()
            .add_type(string_scalar())
            .add_type(NamedType::Interface(InterfaceMeta {
                name: "Node".to_owned(),
                fields: interface_fields,
                ..Default::default()
            }))
            .add_type(NamedType::Object(ObjectMeta {
                name: "Query".to_owned(),
                interfaces: vec!["Node".to_owned()],
                fields: object_fields,
                ..Default::default()
            }))
            .query_type("Query")
            .build()
            .unwrap();
        let query_type = schema.query_type().clone();
        assert!(fragment_applies(Some("Node"), &query_type, &schema));
        assert!(!fragment_applies(Some("OtherType"), &query_type, &schema));
    }
}
