// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dgraph_core_model::{schema::GraphSchema, types::EntityType};
use exo_dql::InverseEdge;

use crate::{rewrite_error::RewriteError, variable_generator::VariableGenerator};

/// Plan the inverse-edge cleanup for a delete of the given type.
///
/// Every edge whose other side holds a reference back (a forward edge with a
/// declared inverse, or a field mapped onto a reverse predicate) gets a
/// projection variable and a matching edge-removal shape. Fields are walked in
/// declaration order; the variable counter keeps advancing across them, so a
/// `Post` delete yields `Author2`, `Category3`.
pub(crate) fn plan_inverse_edges(
    entity: &EntityType,
    schema: &GraphSchema,
    generator: &mut VariableGenerator,
) -> Result<Vec<InverseEdge>, RewriteError> {
    let mut inverses = Vec::new();

    for field in &entity.fields {
        let edge = match &field.edge {
            Some(edge) => edge,
            None => continue,
        };
        let target = schema
            .resolve(&edge.target_type)
            .ok_or_else(|| RewriteError::UnknownType(edge.target_type.clone()))?;

        if field.is_reverse() {
            // The field *is* the reverse direction: the forward predicate on
            // the other side is the reference to clear.
            let inverse_predicate = field.predicate.trim_start_matches('~').to_string();
            let inverse_is_list = target
                .field_by_predicate(&inverse_predicate)
                .map(|remote| remote.typ.list)
                .unwrap_or(true);

            inverses.push(InverseEdge {
                var: generator.next_var(&edge.target_type),
                projection: field.predicate.clone(),
                inverse_predicate,
                inverse_is_list,
            });
        } else if let Some(inverse_field) = &edge.inverse_field {
            let remote = target.field_by_name(inverse_field).ok_or_else(|| {
                RewriteError::UnknownType(format!("{}.{}", target.name, inverse_field))
            })?;

            inverses.push(InverseEdge {
                var: generator.next_var(&edge.target_type),
                projection: field.predicate.clone(),
                inverse_predicate: remote.predicate.clone(),
                inverse_is_list: remote.typ.list,
            });
        }
        // An edge without any inverse leaves nothing dangling; skip it.
    }

    Ok(inverses)
}
