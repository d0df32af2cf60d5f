// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing::instrument;

use dgraph_core_model::{schema::GraphSchema, types::TypeKind};
use exo_dql::{
    transform::{dgraph::Dgraph, transformer::Transformer},
    AbstractDelete, AbstractFilter, AbstractOperation, RewrittenRequest,
};

use crate::{
    access_solver::{solve_delete_access, AccessOutcome},
    context::RequestContext,
    filter_mapper::map_filter,
    inverse_planner::plan_inverse_edges,
    operation::DeleteMutation,
    readback_mapper::compute_read_back,
    rewrite_error::RewriteError,
    variable_generator::VariableGenerator,
};

/// Rewrite a GraphQL delete mutation into the query/mutation bundle the
/// backend executes.
///
/// The pipeline is straight: solve the type's delete rules, map the filter,
/// plan the inverse edges, map the read-back selection, lower. The only branch
/// is the degenerate one, where auth collapses the whole plan.
#[instrument(skip_all, fields(operation = %operation.name))]
pub fn rewrite_delete(
    operation: &DeleteMutation,
    schema: &GraphSchema,
    request_context: &RequestContext,
) -> Result<RewrittenRequest, RewriteError> {
    let entity = schema
        .resolve(&operation.type_name)
        .ok_or_else(|| RewriteError::UnknownType(operation.type_name.clone()))?;
    if entity.kind == TypeKind::Union {
        return Err(RewriteError::UnsupportedOperation(format!(
            "cannot delete the union type {}",
            entity.name
        )));
    }

    let mut generator = VariableGenerator::new();

    let abstract_delete =
        match solve_delete_access(entity, schema, request_context, &mut generator)? {
            AccessOutcome::Denied => {
                AbstractDelete::degenerate(entity.name.clone(), operation.name.clone())
            }
            AccessOutcome::Granted {
                filter: access_filter,
                auth_blocks,
            } => {
                let arg_filter = operation
                    .filter
                    .as_ref()
                    .map(|value| map_filter(entity, value))
                    .transpose()?
                    .unwrap_or(AbstractFilter::True);

                let inverses = plan_inverse_edges(entity, schema, &mut generator)?;

                let selection = match operation.entity_selection() {
                    Some(field) => {
                        compute_read_back(field, entity, schema, request_context, &mut generator)?
                    }
                    None => None,
                };

                AbstractDelete {
                    type_name: entity.name.clone(),
                    alias: operation.name.clone(),
                    filter: AbstractFilter::and(arg_filter, access_filter),
                    auth_blocks,
                    inverses,
                    selection,
                    degenerate: false,
                }
            }
        };

    let mut rewritten =
        (Dgraph {}).to_rewritten_request(&AbstractOperation::Delete(abstract_delete));
    rewritten.variables = operation
        .variables
        .iter()
        .map(|(name, value)| {
            value
                .clone()
                .into_json()
                .map(|value| (name.clone(), value))
                .map_err(|_| {
                    RewriteError::InvalidFilter(format!("variable `{name}` is not representable"))
                })
        })
        .collect::<Result<_, _>>()?;
    Ok(rewritten)
}
