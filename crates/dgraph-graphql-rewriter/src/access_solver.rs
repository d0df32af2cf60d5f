// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use dgraph_core_model::{
    access::{
        AccessLogicalExpression, AccessPredicateExpression, AccessPrimitiveExpression,
        AccessRelationalOp, FieldPathComparison,
    },
    schema::GraphSchema,
    types::{EntityType, TypeKind},
};
use exo_dql::{AbstractFilter, AuthVarBlock, FilterOp};

use crate::{
    context::RequestContext, rewrite_error::RewriteError, variable_generator::VariableGenerator,
};

/// What solving a type's delete rules yields. `Denied` collapses the rewrite
/// into the degenerate plan; an absent or satisfied rule grants with no
/// residue.
pub(crate) enum AccessOutcome {
    Granted {
        /// Residual predicate to conjoin with the user's filter; `True` when
        /// the rules resolved entirely from the claims.
        filter: AbstractFilter,
        /// Auxiliary `var` blocks the residual joins against.
        auth_blocks: Vec<AuthVarBlock>,
    },
    Denied,
}

/// Solve the delete rules of a type against the caller's claims.
///
/// The rule expression is reduced as far as the claims allow: claim-only legs
/// disappear into `True`/`False`, entity legs survive as filter residue. A rule
/// that turns `False` because a required claim is absent surfaces
/// [`RewriteError::Unauthorized`]; `False` on present-but-mismatched claims
/// quietly denies instead.
pub(crate) fn solve_delete_access(
    entity: &EntityType,
    schema: &GraphSchema,
    request_context: &RequestContext,
    generator: &mut VariableGenerator,
) -> Result<AccessOutcome, RewriteError> {
    // An interface whose implementations carry their own delete rules cannot
    // be vetted type-by-type at rewrite time; such deletes collapse to the
    // degenerate plan.
    if entity.kind == TypeKind::Interface {
        let gated = entity.implementing_types.iter().any(|name| {
            schema
                .resolve(name)
                .map(|implementing| implementing.access.delete.is_some())
                .unwrap_or(false)
        });
        if gated {
            return Ok(AccessOutcome::Denied);
        }
    }

    let rule = match &entity.access.delete {
        Some(rule) => rule,
        None => {
            return Ok(AccessOutcome::Granted {
                filter: AbstractFilter::True,
                auth_blocks: vec![],
            })
        }
    };

    match solve(rule, entity, schema, request_context, generator)? {
        Solved::True => Ok(AccessOutcome::Granted {
            filter: AbstractFilter::True,
            auth_blocks: vec![],
        }),
        Solved::False {
            missing_claim: Some(claim),
        } => Err(RewriteError::Unauthorized(claim)),
        Solved::False {
            missing_claim: None,
        } => Ok(AccessOutcome::Denied),
        Solved::Residual { filter, blocks } => Ok(AccessOutcome::Granted {
            filter,
            auth_blocks: blocks,
        }),
    }
}

/// Solve the query rules of a type, for read-back blocks. Returns the residual
/// filter to conjoin, or `None` when the read-back must be dropped: the rule
/// denied outright, or it needs a variable join that a read-back block has no
/// place for.
pub(crate) fn solve_query_access(
    entity: &EntityType,
    schema: &GraphSchema,
    request_context: &RequestContext,
    generator: &mut VariableGenerator,
) -> Result<Option<AbstractFilter>, RewriteError> {
    let rule = match &entity.access.query {
        Some(rule) => rule,
        None => return Ok(Some(AbstractFilter::True)),
    };

    match solve(rule, entity, schema, request_context, generator)? {
        Solved::True => Ok(Some(AbstractFilter::True)),
        Solved::False { .. } => Ok(None),
        Solved::Residual { filter, blocks } => {
            if blocks.is_empty() {
                Ok(Some(filter))
            } else {
                Ok(None)
            }
        }
    }
}

enum Solved {
    True,
    False { missing_claim: Option<String> },
    Residual {
        filter: AbstractFilter,
        blocks: Vec<AuthVarBlock>,
    },
}

impl Solved {
    fn boolean(value: bool) -> Solved {
        if value {
            Solved::True
        } else {
            Solved::False {
                missing_claim: None,
            }
        }
    }
}

fn solve(
    expr: &AccessPredicateExpression,
    entity: &EntityType,
    schema: &GraphSchema,
    request_context: &RequestContext,
    generator: &mut VariableGenerator,
) -> Result<Solved, RewriteError> {
    match expr {
        AccessPredicateExpression::BooleanLiteral(value) => Ok(Solved::boolean(*value)),
        AccessPredicateExpression::RelationalOp(op) => Ok(solve_relational_op(op, request_context)),
        AccessPredicateExpression::FieldComparison(comparison) => {
            solve_field_comparison(comparison, entity, schema, request_context, generator)
        }
        AccessPredicateExpression::LogicalOp(op) => {
            solve_logical_op(op, entity, schema, request_context, generator)
        }
    }
}

enum SolvedPrimitive {
    Value(serde_json::Value),
    /// A claim selection the context cannot answer.
    Missing(String),
}

fn reduce_primitive(
    expr: &AccessPrimitiveExpression,
    request_context: &RequestContext,
) -> SolvedPrimitive {
    match expr {
        AccessPrimitiveExpression::ClaimSelection(key) => match request_context.claim(key) {
            Some(value) => SolvedPrimitive::Value(value.clone()),
            None => SolvedPrimitive::Missing(key.clone()),
        },
        AccessPrimitiveExpression::StringLiteral(value) => {
            SolvedPrimitive::Value(serde_json::Value::String(value.clone()))
        }
        AccessPrimitiveExpression::BooleanLiteral(value) => {
            SolvedPrimitive::Value(serde_json::Value::Bool(*value))
        }
        AccessPrimitiveExpression::NumberLiteral(value) => {
            SolvedPrimitive::Value(serde_json::Value::from(*value))
        }
        AccessPrimitiveExpression::StringList(values) => SolvedPrimitive::Value(
            serde_json::Value::Array(
                values
                    .iter()
                    .map(|value| serde_json::Value::String(value.clone()))
                    .collect(),
            ),
        ),
    }
}

fn solve_relational_op(op: &AccessRelationalOp, request_context: &RequestContext) -> Solved {
    let (left, right) = op.sides();
    let left = reduce_primitive(left, request_context);
    let right = reduce_primitive(right, request_context);

    match (op, left, right) {
        // An absent claim trivially differs from anything
        (AccessRelationalOp::Neq(..), SolvedPrimitive::Missing(_), _)
        | (AccessRelationalOp::Neq(..), _, SolvedPrimitive::Missing(_)) => Solved::True,
        (_, SolvedPrimitive::Missing(claim), _) | (_, _, SolvedPrimitive::Missing(claim)) => {
            Solved::False {
                missing_claim: Some(claim),
            }
        }
        (AccessRelationalOp::Eq(..), SolvedPrimitive::Value(left), SolvedPrimitive::Value(right)) => {
            Solved::boolean(left == right)
        }
        (AccessRelationalOp::Neq(..), SolvedPrimitive::Value(left), SolvedPrimitive::Value(right)) => {
            Solved::boolean(left != right)
        }
        (AccessRelationalOp::In(..), SolvedPrimitive::Value(left), SolvedPrimitive::Value(right)) => {
            match right {
                serde_json::Value::Array(values) => Solved::boolean(values.contains(&left)),
                _ => Solved::boolean(false),
            }
        }
    }
}

/// An entity leg: a single-field comparison becomes a filter conjunct on the
/// victim block; a path through edges becomes a `var` block joined via
/// `uid(var)`.
fn solve_field_comparison(
    comparison: &FieldPathComparison,
    entity: &EntityType,
    schema: &GraphSchema,
    request_context: &RequestContext,
    generator: &mut VariableGenerator,
) -> Result<Solved, RewriteError> {
    let claim_value = match request_context.claim(&comparison.claim) {
        Some(value) => value.clone(),
        None => {
            return Ok(Solved::False {
                missing_claim: Some(comparison.claim.clone()),
            })
        }
    };

    let mut current = entity;
    let mut edge_predicates = Vec::new();
    let mut leaf = None;
    for (position, field_name) in comparison.path.iter().enumerate() {
        let field = current.field_by_name(field_name).ok_or_else(|| {
            RewriteError::UnknownType(format!("{}.{}", current.name, field_name))
        })?;

        if position + 1 == comparison.path.len() {
            if field.typ.scalar_type().is_none() {
                return Err(RewriteError::UnknownType(format!(
                    "auth rule of {} ends on non-scalar {}",
                    entity.name, field.predicate
                )));
            }
            leaf = Some(AbstractFilter::Leaf {
                predicate: field.predicate.clone(),
                op: FilterOp::Eq,
                args: vec![claim_value.clone()],
            });
        } else {
            let edge = field.edge.as_ref().ok_or_else(|| {
                RewriteError::UnknownType(format!(
                    "auth rule of {} traverses non-edge {}",
                    entity.name, field.predicate
                ))
            })?;
            edge_predicates.push(field.predicate.clone());
            current = schema.resolve(&edge.target_type).ok_or_else(|| {
                RewriteError::UnknownType(edge.target_type.clone())
            })?;
        }
    }

    let leaf = leaf.ok_or_else(|| {
        RewriteError::UnknownType(format!("auth rule of {} has an empty path", entity.name))
    })?;

    if edge_predicates.is_empty() {
        return Ok(Solved::Residual {
            filter: leaf,
            blocks: vec![],
        });
    }

    let var = generator.next_var(&format!("{}Auth", entity.name));
    Ok(Solved::Residual {
        filter: AbstractFilter::UidVar(var.clone()),
        blocks: vec![AuthVarBlock {
            var,
            type_name: entity.name.clone(),
            path: edge_predicates,
            leaf,
        }],
    })
}

fn solve_logical_op(
    op: &AccessLogicalExpression,
    entity: &EntityType,
    schema: &GraphSchema,
    request_context: &RequestContext,
    generator: &mut VariableGenerator,
) -> Result<Solved, RewriteError> {
    match op {
        AccessLogicalExpression::Not(inner) => {
            Ok(
                match solve(inner, entity, schema, request_context, generator)? {
                    Solved::True => Solved::False {
                        missing_claim: None,
                    },
                    Solved::False { .. } => Solved::True,
                    Solved::Residual { filter, blocks } => Solved::Residual {
                        filter: AbstractFilter::not(filter),
                        blocks,
                    },
                },
            )
        }
        AccessLogicalExpression::And(left, right) => {
            let left = solve(left, entity, schema, request_context, generator)?;
            let right = solve(right, entity, schema, request_context, generator)?;
            Ok(match (left, right) {
                (Solved::False { missing_claim: left }, Solved::False { missing_claim: right }) => {
                    Solved::False {
                        missing_claim: left.or(right),
                    }
                }
                (falsy @ Solved::False { .. }, _) | (_, falsy @ Solved::False { .. }) => falsy,
                (Solved::True, other) | (other, Solved::True) => other,
                (
                    Solved::Residual {
                        filter: left_filter,
                        blocks: mut left_blocks,
                    },
                    Solved::Residual {
                        filter: right_filter,
                        blocks: right_blocks,
                    },
                ) => {
                    left_blocks.extend(right_blocks);
                    Solved::Residual {
                        filter: AbstractFilter::and(left_filter, right_filter),
                        blocks: left_blocks,
                    }
                }
            })
        }
        AccessLogicalExpression::Or(left, right) => {
            let left = solve(left, entity, schema, request_context, generator)?;
            let right = solve(right, entity, schema, request_context, generator)?;
            Ok(match (left, right) {
                (Solved::True, _) | (_, Solved::True) => Solved::True,
                (Solved::False { missing_claim: left }, Solved::False { missing_claim: right }) => {
                    Solved::False {
                        missing_claim: left.or(right),
                    }
                }
                (Solved::False { .. }, other) | (other, Solved::False { .. }) => other,
                (
                    Solved::Residual {
                        filter: left_filter,
                        blocks: mut left_blocks,
                    },
                    Solved::Residual {
                        filter: right_filter,
                        blocks: right_blocks,
                    },
                ) => {
                    left_blocks.extend(right_blocks);
                    Solved::Residual {
                        filter: AbstractFilter::or(left_filter, right_filter),
                        blocks: left_blocks,
                    }
                }
            })
        }
    }
}
