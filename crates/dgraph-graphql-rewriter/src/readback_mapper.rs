// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_value::ConstValue;

use dgraph_core_model::{schema::GraphSchema, types::EntityType};
use exo_dql::{AbstractFilter, AbstractOrderBy, AbstractSelect, SelectionField};

use crate::{
    access_solver::solve_query_access, context::RequestContext, filter_mapper::map_filter,
    operation::ValidatedField, rewrite_error::RewriteError,
    variable_generator::VariableGenerator,
};

/// Map the payload's entity selection into the read-back select.
///
/// Returns `None` when the block must be dropped: the type's query rules
/// denied, or they need a join no read-back block can host. Nested selections
/// are vetted the same way, field by field.
pub(crate) fn compute_read_back(
    field: &ValidatedField,
    entity: &EntityType,
    schema: &GraphSchema,
    request_context: &RequestContext,
    generator: &mut VariableGenerator,
) -> Result<Option<AbstractSelect>, RewriteError> {
    let access_filter =
        match solve_query_access(entity, schema, request_context, generator)? {
            Some(filter) => filter,
            None => return Ok(None),
        };

    let arg_filter = field
        .arguments
        .get("filter")
        .map(|value| map_filter(entity, value))
        .transpose()?
        .unwrap_or(AbstractFilter::True);

    let mut fields = Vec::new();
    for subfield in &field.subfields {
        if subfield.name.as_str() == "__typename" {
            continue;
        }
        let entity_field = entity.field_by_name(subfield.name.as_str()).ok_or_else(|| {
            RewriteError::UnknownType(format!("{}.{}", entity.name, subfield.name))
        })?;

        if entity_field.is_node_id() {
            fields.push(SelectionField::Id {
                alias: subfield.output_name(),
            });
        } else if let Some(edge) = &entity_field.edge {
            let target = schema
                .resolve(&edge.target_type)
                .ok_or_else(|| RewriteError::UnknownType(edge.target_type.clone()))?;
            if let Some(select) =
                compute_read_back(subfield, target, schema, request_context, generator)?
            {
                fields.push(SelectionField::Nested {
                    predicate: entity_field.predicate.clone(),
                    select,
                });
            }
        } else {
            fields.push(SelectionField::Scalar {
                alias: subfield.output_name(),
                predicate: entity_field.predicate.clone(),
            });
        }
    }

    Ok(Some(AbstractSelect {
        alias: field.output_name(),
        type_name: entity.name.clone(),
        filter: AbstractFilter::and(arg_filter, access_filter),
        order: compute_order(field, entity)?,
        first: int_argument(field, "first")?,
        offset: int_argument(field, "offset")?,
        fields,
    }))
}

/// `order: {asc: name}` / `order: {desc: name}`, resolved to the persisted
/// predicate.
fn compute_order(
    field: &ValidatedField,
    entity: &EntityType,
) -> Result<Option<AbstractOrderBy>, RewriteError> {
    let value = match field.arguments.get("order") {
        Some(value) => value,
        None => return Ok(None),
    };
    let object = match value {
        ConstValue::Object(object) => object,
        _ => {
            return Err(RewriteError::InvalidFilter(format!(
                "order for {} must be an object",
                entity.name
            )))
        }
    };

    for (direction, desc) in [("asc", false), ("desc", true)] {
        if let Some(field_value) = object.get(direction) {
            let field_name = match field_value {
                ConstValue::Enum(name) => name.as_str().to_string(),
                ConstValue::String(name) => name.clone(),
                _ => {
                    return Err(RewriteError::InvalidFilter(format!(
                        "order for {} must name a field",
                        entity.name
                    )))
                }
            };
            let ordered_field = entity.field_by_name(&field_name).ok_or_else(|| {
                RewriteError::UnknownType(format!("{}.{}", entity.name, field_name))
            })?;
            return Ok(Some(AbstractOrderBy {
                predicate: ordered_field.predicate.clone(),
                desc,
            }));
        }
    }
    Ok(None)
}

fn int_argument(field: &ValidatedField, name: &str) -> Result<Option<i64>, RewriteError> {
    match field.arguments.get(name) {
        None => Ok(None),
        Some(ConstValue::Number(number)) => Ok(number.as_i64()),
        Some(_) => Err(RewriteError::InvalidFilter(format!(
            "`{name}` must be an integer"
        ))),
    }
}
