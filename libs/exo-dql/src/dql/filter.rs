// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{DqlBuilder, ExpressionBuilder};

/// A concrete DQL filter expression, ready to render inside `@filter(…)` or as
/// a root function argument.
///
/// Conjunctions and disjunctions are n-ary: the lowering step flattens nested
/// `AND`s so that `(a AND b AND type(T))` renders as a single parenthesized
/// group rather than a nest of pairs. A group with a single member renders
/// without the surrounding parentheses.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// A comparator call such as `eq(Author.name, "A.N. Author")` or
    /// `between(Author.dob, "2000-01-01", "2001-01-01")`.
    Comparison {
        function: &'static str,
        predicate: String,
        args: Vec<serde_json::Value>,
    },
    /// `uid(0x1, 0x2)` over literal uids, or `uid(varName)` as a variable join.
    Uid(Vec<String>),
    /// The membership guard `type(Author)`.
    Type(String),

    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    /// Conjoin two filters, flattening top-level `And` groups so sibling
    /// conjuncts stay in one group.
    pub fn and(lhs: Filter, rhs: Filter) -> Filter {
        match (lhs, rhs) {
            (Filter::And(mut lhs), Filter::And(rhs)) => {
                lhs.extend(rhs);
                Filter::And(lhs)
            }
            (Filter::And(mut lhs), rhs) => {
                lhs.push(rhs);
                Filter::And(lhs)
            }
            (lhs, Filter::And(mut rhs)) => {
                rhs.insert(0, lhs);
                Filter::And(rhs)
            }
            (lhs, rhs) => Filter::And(vec![lhs, rhs]),
        }
    }
}

impl ExpressionBuilder for Filter {
    /// Build the filter into a DQL string.
    fn build(&self, builder: &mut DqlBuilder) {
        match self {
            Filter::Comparison {
                function,
                predicate,
                args,
            } => {
                builder.push_str(function);
                builder.push('(');
                builder.push_str(predicate);
                for arg in args {
                    builder.push_str(", ");
                    builder.push_str(arg.to_string());
                }
                builder.push(')');
            }
            Filter::Uid(uids) => {
                builder.push_str("uid(");
                builder.push_str(uids.join(", "));
                builder.push(')');
            }
            Filter::Type(type_name) => {
                builder.push_str("type(");
                builder.push_str(type_name);
                builder.push(')');
            }
            Filter::And(conjuncts) => logical_combine(conjuncts, "AND", builder),
            Filter::Or(disjuncts) => logical_combine(disjuncts, "OR", builder),
            Filter::Not(filter) => {
                builder.push_str("NOT (");
                filter.build(builder);
                builder.push(')');
            }
        }
    }
}

/// Combine group members with a logical operator. The parentheses appear only
/// when the group has more than one member.
fn logical_combine(members: &[Filter], op: &'static str, builder: &mut DqlBuilder) {
    match members {
        [single] => single.build(builder),
        _ => {
            builder.push('(');
            for (position, member) in members.iter().enumerate() {
                if position > 0 {
                    builder.push(' ');
                    builder.push_str(op);
                    builder.push(' ');
                }
                member.build(builder);
            }
            builder.push(')');
        }
    }
}
