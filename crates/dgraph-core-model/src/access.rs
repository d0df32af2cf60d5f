// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// The per-operation authorization rules of an entity type. An absent rule
/// leaves the operation open.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Access {
    pub query: Option<AccessPredicateExpression>,
    pub add: Option<AccessPredicateExpression>,
    pub update: Option<AccessPredicateExpression>,
    pub delete: Option<AccessPredicateExpression>,
}

/// An authorization rule: a boolean expression over caller claims and entity
/// fields. Claim-only (RBAC) legs resolve at rewrite time; field legs become
/// filter predicates or auxiliary query blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AccessPredicateExpression {
    BooleanLiteral(bool),
    LogicalOp(AccessLogicalExpression),
    RelationalOp(AccessRelationalOp),
    FieldComparison(FieldPathComparison),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AccessLogicalExpression {
    Not(Box<AccessPredicateExpression>),
    And(
        Box<AccessPredicateExpression>,
        Box<AccessPredicateExpression>,
    ),
    Or(
        Box<AccessPredicateExpression>,
        Box<AccessPredicateExpression>,
    ),
}

/// A claim-level comparison, e.g. `ROLE == "ADMIN"` or `ROLE in ["ADMIN",
/// "MOD"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AccessRelationalOp {
    Eq(
        Box<AccessPrimitiveExpression>,
        Box<AccessPrimitiveExpression>,
    ),
    Neq(
        Box<AccessPrimitiveExpression>,
        Box<AccessPrimitiveExpression>,
    ),
    In(
        Box<AccessPrimitiveExpression>,
        Box<AccessPrimitiveExpression>,
    ),
}

impl AccessRelationalOp {
    pub fn sides(&self) -> (&AccessPrimitiveExpression, &AccessPrimitiveExpression) {
        match self {
            AccessRelationalOp::Eq(left, right)
            | AccessRelationalOp::Neq(left, right)
            | AccessRelationalOp::In(left, right) => (left, right),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AccessPrimitiveExpression {
    /// The value of a caller claim, by claim key.
    ClaimSelection(String),
    StringLiteral(String),
    BooleanLiteral(bool),
    NumberLiteral(i64),
    StringList(Vec<String>),
}

/// An entity-side rule leg: the field path from the guarded type to a scalar
/// whose value must equal a caller claim. A single-element path compares a
/// field of the guarded type itself; a longer path traverses edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPathComparison {
    pub path: Vec<String>,
    pub claim: String,
}
