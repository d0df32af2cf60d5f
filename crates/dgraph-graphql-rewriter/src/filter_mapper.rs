// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::ConstValue;

use dgraph_core_model::types::{EntityType, Field, ScalarType};
use exo_dql::{AbstractFilter, FilterOp};

use crate::rewrite_error::RewriteError;

/// Map a GraphQL `filter` argument value into the abstract filter tree for the
/// given type.
///
/// Sibling keys of a filter object conjoin; they are visited in lexicographic
/// order so the emitted conjunction is deterministic regardless of how the
/// caller ordered the document. The node-id key becomes an [`AbstractFilter::IdSet`],
/// which the transformer later pulls into the `uid(…)` root function.
pub(crate) fn map_filter(
    entity: &EntityType,
    value: &ConstValue,
) -> Result<AbstractFilter, RewriteError> {
    let object = match value {
        ConstValue::Object(object) => object,
        _ => {
            return Err(RewriteError::InvalidFilter(format!(
                "filter for {} must be an object",
                entity.name
            )))
        }
    };

    let mut keys: Vec<&str> = object.keys().map(|key| key.as_str()).collect();
    keys.sort_unstable();

    let mut filter = AbstractFilter::True;
    for key in keys {
        let key_value = &object[key];
        let key_filter = match key {
            "and" => map_compound(entity, key_value, AbstractFilter::and, AbstractFilter::True)?,
            "or" => map_compound(entity, key_value, AbstractFilter::or, AbstractFilter::False)?,
            "not" => AbstractFilter::not(map_filter(entity, key_value)?),
            field_name => {
                let field = entity.field_by_name(field_name).ok_or_else(|| {
                    RewriteError::UnknownType(format!("{}.{}", entity.name, field_name))
                })?;
                map_field_filter(entity, field, key_value)?
            }
        };
        filter = AbstractFilter::and(filter, key_filter);
    }
    Ok(filter)
}

/// `and`/`or` accept a single nested filter object or a list of them.
fn map_compound(
    entity: &EntityType,
    value: &ConstValue,
    combine: fn(AbstractFilter, AbstractFilter) -> AbstractFilter,
    identity: AbstractFilter,
) -> Result<AbstractFilter, RewriteError> {
    match value {
        ConstValue::List(items) => {
            let mut combined = identity;
            for item in items {
                combined = combine(combined, map_filter(entity, item)?);
            }
            Ok(combined)
        }
        value => map_filter(entity, value),
    }
}

fn map_field_filter(
    entity: &EntityType,
    field: &Field,
    value: &ConstValue,
) -> Result<AbstractFilter, RewriteError> {
    if field.is_node_id() {
        return map_id_set(entity, field, value);
    }

    let scalar = field.typ.scalar_type().ok_or_else(|| {
        RewriteError::InvalidFilter(format!("{} is not a scalar field", field.predicate))
    })?;

    let operators = match value {
        ConstValue::Object(operators) => operators,
        _ => {
            return Err(RewriteError::InvalidFilter(format!(
                "comparator object expected for {}",
                field.predicate
            )))
        }
    };

    let mut names: Vec<&str> = operators.keys().map(|name| name.as_str()).collect();
    names.sort_unstable();

    let mut filter = AbstractFilter::True;
    for name in names {
        let op = FilterOp::from_name(name).ok_or_else(|| {
            RewriteError::InvalidFilter(format!("unsupported operator `{name}`"))
        })?;
        if !operator_legal(op, scalar) {
            return Err(RewriteError::InvalidFilter(format!(
                "operator `{name}` is not applicable to {}",
                field.predicate
            )));
        }

        let args = comparator_args(op, &field.predicate, &operators[name])?;
        filter = AbstractFilter::and(
            filter,
            AbstractFilter::Leaf {
                predicate: field.predicate.clone(),
                op,
                args,
            },
        );
    }
    Ok(filter)
}

fn map_id_set(
    entity: &EntityType,
    field: &Field,
    value: &ConstValue,
) -> Result<AbstractFilter, RewriteError> {
    let items = match value {
        ConstValue::List(items) => items,
        _ => {
            return Err(RewriteError::InvalidFilter(format!(
                "the {} filter of {} takes a list of ids",
                field.name, entity.name
            )))
        }
    };
    if items.is_empty() {
        return Err(RewriteError::InvalidFilter(format!(
            "empty id list in the {} filter",
            entity.name
        )));
    }

    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        match item {
            ConstValue::String(id) => ids.push(id.clone()),
            _ => {
                return Err(RewriteError::InvalidFilter(format!(
                    "non-string id in the {} filter",
                    entity.name
                )))
            }
        }
    }
    Ok(AbstractFilter::IdSet(ids))
}

fn comparator_args(
    op: FilterOp,
    predicate: &str,
    value: &ConstValue,
) -> Result<Vec<serde_json::Value>, RewriteError> {
    match op {
        FilterOp::Between => match value {
            ConstValue::Object(bounds) => {
                let min = bounds.get("min").ok_or_else(|| {
                    RewriteError::InvalidFilter(format!("`between` on {predicate} needs `min`"))
                })?;
                let max = bounds.get("max").ok_or_else(|| {
                    RewriteError::InvalidFilter(format!("`between` on {predicate} needs `max`"))
                })?;
                Ok(vec![to_json(min)?, to_json(max)?])
            }
            _ => Err(RewriteError::InvalidFilter(format!(
                "`between` on {predicate} takes a min/max object"
            ))),
        },
        FilterOp::In => match value {
            ConstValue::List(_) => Ok(vec![to_json(value)?]),
            _ => Err(RewriteError::InvalidFilter(format!(
                "`in` on {predicate} takes a list"
            ))),
        },
        _ => match value {
            ConstValue::List(_) | ConstValue::Object(_) => {
                Err(RewriteError::InvalidFilter(format!(
                    "scalar value expected for {predicate}"
                )))
            }
            value => Ok(vec![to_json(value)?]),
        },
    }
}

fn operator_legal(op: FilterOp, scalar: ScalarType) -> bool {
    match op {
        FilterOp::Eq | FilterOp::In => true,
        FilterOp::Le | FilterOp::Lt | FilterOp::Ge | FilterOp::Gt | FilterOp::Between => matches!(
            scalar,
            ScalarType::Int | ScalarType::Float | ScalarType::DateTime | ScalarType::String
        ),
        FilterOp::AnyOfTerms
        | FilterOp::AllOfTerms
        | FilterOp::AnyOfText
        | FilterOp::AllOfText
        | FilterOp::Regexp => scalar == ScalarType::String,
    }
}

fn to_json(value: &ConstValue) -> Result<serde_json::Value, RewriteError> {
    value
        .clone()
        .into_json()
        .map_err(|_| RewriteError::InvalidFilter("filter value is not representable".to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::test_utils::TestSchema;

    use super::*;

    fn filter_value(value: serde_json::Value) -> ConstValue {
        ConstValue::from_json(value).unwrap()
    }

    #[test]
    fn id_and_field_keys() {
        let schema = TestSchema::new();
        let author = schema.entity("Author");

        let filter = map_filter(
            author,
            &filter_value(json!({"name": {"eq": "A.N. Author"}, "id": ["0x1", "0x2"]})),
        )
        .unwrap();

        assert_eq!(
            filter,
            AbstractFilter::And(vec![
                AbstractFilter::IdSet(vec!["0x1".to_string(), "0x2".to_string()]),
                AbstractFilter::Leaf {
                    predicate: "Author.name".to_string(),
                    op: FilterOp::Eq,
                    args: vec![json!("A.N. Author")],
                },
            ])
        );
    }

    #[test]
    fn sibling_fields_order_lexicographically() {
        let schema = TestSchema::new();
        let author = schema.entity("Author");

        let filter = map_filter(
            author,
            &filter_value(json!({"name": {"eq": "A.N. Author"}, "dob": {"eq": "2000-01-01"}})),
        )
        .unwrap();

        assert_eq!(
            filter,
            AbstractFilter::And(vec![
                AbstractFilter::Leaf {
                    predicate: "Author.dob".to_string(),
                    op: FilterOp::Eq,
                    args: vec![json!("2000-01-01")],
                },
                AbstractFilter::Leaf {
                    predicate: "Author.name".to_string(),
                    op: FilterOp::Eq,
                    args: vec![json!("A.N. Author")],
                },
            ])
        );
    }

    #[test]
    fn or_over_list() {
        let schema = TestSchema::new();
        let author = schema.entity("Author");

        let filter = map_filter(
            author,
            &filter_value(
                json!({"or": [{"name": {"eq": "A"}}, {"name": {"eq": "B"}}]}),
            ),
        )
        .unwrap();

        assert!(matches!(filter, AbstractFilter::Or(disjuncts) if disjuncts.len() == 2));
    }

    #[test]
    fn between_takes_bounds() {
        let schema = TestSchema::new();
        let author = schema.entity("Author");

        let filter = map_filter(
            author,
            &filter_value(json!({"dob": {"between": {"min": "2000-01-01", "max": "2001-01-01"}}})),
        )
        .unwrap();

        assert_eq!(
            filter,
            AbstractFilter::Leaf {
                predicate: "Author.dob".to_string(),
                op: FilterOp::Between,
                args: vec![json!("2000-01-01"), json!("2001-01-01")],
            }
        );
    }

    #[test]
    fn empty_id_list_is_rejected() {
        let schema = TestSchema::new();
        let author = schema.entity("Author");

        let result = map_filter(author, &filter_value(json!({"id": []})));
        assert!(matches!(result, Err(RewriteError::InvalidFilter(_))));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let schema = TestSchema::new();
        let author = schema.entity("Author");

        let result = map_filter(author, &filter_value(json!({"publisher": {"eq": "x"}})));
        assert!(matches!(result, Err(RewriteError::UnknownType(field)) if field == "Author.publisher"));
    }

    #[test]
    fn term_operator_on_date_is_rejected() {
        let schema = TestSchema::new();
        let author = schema.entity("Author");

        let result = map_filter(
            author,
            &filter_value(json!({"dob": {"anyofterms": "2000"}})),
        );
        assert!(matches!(result, Err(RewriteError::InvalidFilter(_))));
    }

    #[test]
    fn id_marker_field_uses_comparators() {
        let schema = TestSchema::new();
        let book = schema.entity("Book");

        let filter = map_filter(
            book,
            &filter_value(json!({"isbn": {"in": ["123", "456"]}})),
        )
        .unwrap();

        assert_eq!(
            filter,
            AbstractFilter::Leaf {
                predicate: "Book.isbn".to_string(),
                op: FilterOp::In,
                args: vec![json!(["123", "456"])],
            }
        );
    }
}
