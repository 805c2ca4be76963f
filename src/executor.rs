//! The executor façade (component F, §2 of the specification this engine
//! implements): locates the operation to run, builds the fragment table,
//! coerces variables, derives the root type, and drives the completer to a
//! finished [`ExecutionResult`].
//!
//! Grounded on `juniper::executor::{execute_validated_query_async,
//! get_operation}` and the top-level `juniper::execute` entry point: same
//! shape (select operation, build fragment table, apply variable defaults,
//! pick root type by operation kind, run, sort errors), minus the
//! validation pass (an explicit Non-goal of this engine; the caller is
//! assumed to have validated the document beforehand).

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::ast::{Document, FragmentDefinition, OperationDefinition, OperationType};
use crate::coercion::coerce_variables;
use crate::collector::collect_fields;
use crate::completer::complete_root;
use crate::context::{ExecutionContext, Path};
use crate::error::{ExecutionError, GraphQLError};
use crate::resolve::Resolved;
use crate::schema::Schema;
use crate::value::Value;

/// The outcome of a successful [`execute`] call. Unlike a pre-execution
/// [`GraphQLError`] (which aborts with no result at all, §7 kinds (a)/(b)),
/// a field-level failure still produces a `data` tree - possibly
/// `Value::Null` if a root non-null field failed (§4.4) - alongside
/// whatever [`ExecutionError`]s were recorded along the way (§7 kinds
/// (c)-(e)).
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub data: Value,
    pub errors: Vec<ExecutionError>,
}

/// Selects the operation to run, per §4.1 "It also initializes the
/// operation (locates the named or sole operation ...)". Grounded on
/// `juniper::executor::get_operation`.
fn select_operation<'d>(
    document: &'d Document,
    operation_name: Option<&str>,
) -> Result<&'d OperationDefinition, GraphQLError> {
    let mut selected = None;
    let mut any_operations = false;
    for op in document.operations() {
        any_operations = true;
        match operation_name {
            None => {
                if selected.is_some() {
                    return Err(GraphQLError::MultipleOperationsProvided);
                }
                selected = Some(op);
            }
            Some(name) => {
                if op.name.as_deref() == Some(name) {
                    selected = Some(op);
                }
            }
        }
    }
    selected.ok_or(if any_operations {
        GraphQLError::UnknownOperationName
    } else {
        GraphQLError::NoOperationProvided
    })
}

/// Executes `operation_name` (or the document's sole operation, if `None`)
/// from `document` against `schema`, with `root_value` as the resolver
/// parent for every root field and `raw_variables` as the transport-decoded
/// (but not yet type-coerced) variable values.
///
/// Returns `Err` only for the pre-execution failures of §7 kinds (a)/(b):
/// an unresolvable operation, a subscription operation (out of scope, §1),
/// a mutation against a schema with no mutation root, or a variable
/// coercion failure. Every other error surfaces inside
/// `ExecutionResult::errors` alongside a best-effort, possibly partially
/// null, `data` tree.
pub async fn execute(
    schema: &Schema,
    document: &Document,
    operation_name: Option<&str>,
    root_value: Resolved,
    raw_variables: IndexMap<String, Resolved>,
) -> Result<ExecutionResult, GraphQLError> {
    let operation = select_operation(document, operation_name)?;

    if operation.operation == OperationType::Subscription {
        return Err(GraphQLError::IsSubscription);
    }

    let fragments: HashMap<String, FragmentDefinition> = document
        .fragments()
        .map(|f| (f.name.clone(), f.clone()))
        .collect();

    let variables = coerce_variables(&operation.variable_definitions, &raw_variables)
        .map_err(|err| GraphQLError::VariableCoercion(err.message().to_string()))?;

    let is_mutation = operation.operation == OperationType::Mutation;
    let (root_named, object_meta) = if is_mutation {
        let mutation_meta = schema
            .mutation_object()
            .ok_or(GraphQLError::NoMutationTypeDefined)?;
        (
            schema
                .mutation_type()
                .expect("mutation_object returned Some, so mutation_type must too"),
            mutation_meta,
        )
    } else {
        (schema.query_type(), schema.query_object())
    };

    let ctx = ExecutionContext::new(schema, &fragments, &variables);

    let mut root_errors = Vec::new();
    let root_fields = collect_fields(
        &operation.selection_set,
        &fragments,
        &variables,
        schema,
        root_named.as_ref(),
        !is_mutation,
        &Path::root(),
        &mut root_errors,
    );
    for error in root_errors {
        ctx.push_error(error);
    }

    let data = complete_root(&ctx, &root_fields, object_meta, root_value, is_mutation).await;

    Ok(ExecutionResult {
        data,
        errors: ctx.into_errors(),
    })
}
