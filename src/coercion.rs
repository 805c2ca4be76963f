//! Turns AST value nodes (literals, variable references) into the runtime
//! [`Resolved`] values arguments and variables are represented as.
//!
//! The specification explicitly keeps full input coercion (§1, "value
//! coercion") an external collaborator; what belongs in the engine is the
//! structural part - substituting variables into literals and applying
//! variable defaults - which is what every resolver argument map and the
//! request's variable map needs regardless of how deep that external
//! coercion goes.

use indexmap::IndexMap;

use crate::ast;
use crate::error::{FieldError, FieldResult};
use crate::resolve::Resolved;
use crate::value::Scalar;

/// Converts a query-document AST value into a [`Resolved`], substituting
/// any [`ast::Value::Variable`] references from `variables`.
///
/// Variables that are absent resolve to [`Resolved::Null`] rather than an
/// error here; whether that is actually acceptable for a given argument's
/// type is a question for the (external) coercion step described in §4.5,
/// not for this structural substitution.
pub fn evaluate_value(value: &ast::Value, variables: &IndexMap<String, Resolved>) -> Resolved {
    match value {
        ast::Value::Null => Resolved::Null,
        ast::Value::Int(i) => Resolved::Scalar(Scalar::Int(*i as i32)),
        ast::Value::Float(f) => Resolved::Scalar(Scalar::Float(*f)),
        ast::Value::String(s) => Resolved::Scalar(Scalar::String(s.clone())),
        ast::Value::Boolean(b) => Resolved::Scalar(Scalar::Boolean(*b)),
        ast::Value::Enum(name) => Resolved::Scalar(Scalar::String(name.clone())),
        ast::Value::Variable(name) => variables.get(name).cloned().unwrap_or(Resolved::Null),
        ast::Value::List(items) => {
            Resolved::List(items.iter().map(|v| evaluate_value(v, variables)).collect())
        }
        ast::Value::Object(fields) => Resolved::Map(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), evaluate_value(v, variables)))
                .collect(),
        ),
    }
}

/// Evaluates a field or directive's argument map into the map a resolver
/// receives, applying each argument definition's default value when the
/// query omitted it.
pub fn evaluate_arguments(
    provided: &IndexMap<String, ast::Value>,
    defs: &IndexMap<String, crate::schema::ArgumentDefinition>,
    variables: &IndexMap<String, Resolved>,
) -> IndexMap<String, Resolved> {
    let mut out = IndexMap::with_capacity(defs.len());
    for (name, def) in defs {
        let value = match provided.get(name) {
            Some(v) => evaluate_value(v, variables),
            None => match &def.default_value {
                Some(default) => evaluate_value(default, variables),
                None => Resolved::Null,
            },
        };
        out.insert(name.clone(), value);
    }
    out
}

/// Builds the request's coerced variable map: each variable definition's
/// raw, already-decoded input value (or its default) keyed by name.
/// `raw` holds whatever the transport layer decoded straight off the wire
/// (e.g. from a JSON `"variables"` object) with no knowledge yet of the
/// operation's declared variable types.
pub fn coerce_variables(
    variable_definitions: &[ast::VariableDefinition],
    raw: &IndexMap<String, Resolved>,
) -> FieldResult<IndexMap<String, Resolved>> {
    let mut out = IndexMap::with_capacity(variable_definitions.len());
    for def in variable_definitions {
        let value = match raw.get(&def.name) {
            Some(v) => v.clone(),
            None => match &def.default_value {
                Some(default) => evaluate_value(default, &IndexMap::new()),
                None => {
                    if def.var_type.is_non_null_literal() {
                        return Err(FieldError::new(format!(
                            "missing value for non-null variable \"${}\"",
                            def.name
                        )));
                    }
                    Resolved::Null
                }
            },
        };
        out.insert(def.name.clone(), value);
    }
    Ok(out)
}

impl ast::Type {
    fn is_non_null_literal(&self) -> bool {
        matches!(self, ast::Type::NonNull(_))
    }
}
