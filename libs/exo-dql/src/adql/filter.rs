// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// A comparator of the GraphQL filter input, by its argument name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    In,
    Le,
    Lt,
    Ge,
    Gt,
    Between,
    AnyOfTerms,
    AllOfTerms,
    AnyOfText,
    AllOfText,
    Regexp,
}

impl FilterOp {
    pub fn from_name(name: &str) -> Option<FilterOp> {
        match name {
            "eq" => Some(FilterOp::Eq),
            "in" => Some(FilterOp::In),
            "le" => Some(FilterOp::Le),
            "lt" => Some(FilterOp::Lt),
            "ge" => Some(FilterOp::Ge),
            "gt" => Some(FilterOp::Gt),
            "between" => Some(FilterOp::Between),
            "anyofterms" => Some(FilterOp::AnyOfTerms),
            "allofterms" => Some(FilterOp::AllOfTerms),
            "anyoftext" => Some(FilterOp::AnyOfText),
            "alloftext" => Some(FilterOp::AllOfText),
            "regexp" => Some(FilterOp::Regexp),
            _ => None,
        }
    }

    /// The DQL function the comparator lowers to. `in` has no DQL counterpart
    /// of its own; it lowers to `eq` over the value list.
    pub fn dql_function(&self) -> &'static str {
        match self {
            FilterOp::Eq | FilterOp::In => "eq",
            FilterOp::Le => "le",
            FilterOp::Lt => "lt",
            FilterOp::Ge => "ge",
            FilterOp::Gt => "gt",
            FilterOp::Between => "between",
            FilterOp::AnyOfTerms => "anyofterms",
            FilterOp::AllOfTerms => "allofterms",
            FilterOp::AnyOfText => "anyoftext",
            FilterOp::AllOfText => "alloftext",
            FilterOp::Regexp => "regexp",
        }
    }
}

/// The abstract filter tree: logical connectives over comparator leaves and
/// id-sets, plus the two boolean constants the access solver reduces to.
///
/// `True` and `False` never render; `and`/`or` eliminate them, and the driver
/// turns a `False` root into the degenerate plan before lowering.
#[derive(Debug, Clone, PartialEq)]
pub enum AbstractFilter {
    True,
    False,
    /// The id-set of the filter; becomes the `uid(…)` root function.
    IdSet(Vec<String>),
    /// A join against a variable bound elsewhere in the query: `uid(varName)`.
    /// Unlike an id-set, a join never migrates into the root function.
    UidVar(String),
    /// A comparator over a persisted predicate: `eq(Author.name, "…")`.
    Leaf {
        predicate: String,
        op: FilterOp,
        args: Vec<serde_json::Value>,
    },
    And(Vec<AbstractFilter>),
    Or(Vec<AbstractFilter>),
    Not(Box<AbstractFilter>),
}

impl AbstractFilter {
    /// Logical and of two filters, reducing and flattening so sibling conjuncts
    /// stay in a single group.
    pub fn and(lhs: AbstractFilter, rhs: AbstractFilter) -> AbstractFilter {
        match (lhs, rhs) {
            (AbstractFilter::False, _) | (_, AbstractFilter::False) => AbstractFilter::False,
            (AbstractFilter::True, rhs) => rhs,
            (lhs, AbstractFilter::True) => lhs,
            (AbstractFilter::And(mut lhs), AbstractFilter::And(rhs)) => {
                lhs.extend(rhs);
                AbstractFilter::And(lhs)
            }
            (AbstractFilter::And(mut lhs), rhs) => {
                lhs.push(rhs);
                AbstractFilter::And(lhs)
            }
            (lhs, AbstractFilter::And(mut rhs)) => {
                rhs.insert(0, lhs);
                AbstractFilter::And(rhs)
            }
            (lhs, rhs) => AbstractFilter::And(vec![lhs, rhs]),
        }
    }

    /// Logical or of two filters, reducing and flattening like [`Self::and`].
    pub fn or(lhs: AbstractFilter, rhs: AbstractFilter) -> AbstractFilter {
        match (lhs, rhs) {
            (AbstractFilter::True, _) | (_, AbstractFilter::True) => AbstractFilter::True,
            (AbstractFilter::False, rhs) => rhs,
            (lhs, AbstractFilter::False) => lhs,
            (AbstractFilter::Or(mut lhs), AbstractFilter::Or(rhs)) => {
                lhs.extend(rhs);
                AbstractFilter::Or(lhs)
            }
            (AbstractFilter::Or(mut lhs), rhs) => {
                lhs.push(rhs);
                AbstractFilter::Or(lhs)
            }
            (lhs, AbstractFilter::Or(mut rhs)) => {
                rhs.insert(0, lhs);
                AbstractFilter::Or(rhs)
            }
            (lhs, rhs) => AbstractFilter::Or(vec![lhs, rhs]),
        }
    }

    /// Logical negation, reducing the boolean constants.
    pub fn not(filter: AbstractFilter) -> AbstractFilter {
        match filter {
            AbstractFilter::True => AbstractFilter::False,
            AbstractFilter::False => AbstractFilter::True,
            filter => AbstractFilter::Not(Box::new(filter)),
        }
    }

    /// Split the id-set out of the filter. The id term is removed before any
    /// further translation; the remaining filter keeps its structure.
    pub fn take_ids(self) -> (Option<Vec<String>>, AbstractFilter) {
        match self {
            AbstractFilter::IdSet(ids) => (Some(ids), AbstractFilter::True),
            AbstractFilter::And(conjuncts) => {
                let mut ids = None;
                let mut rest = AbstractFilter::True;
                for conjunct in conjuncts {
                    match conjunct {
                        AbstractFilter::IdSet(found) if ids.is_none() => ids = Some(found),
                        other => rest = AbstractFilter::and(rest, other),
                    }
                }
                (ids, rest)
            }
            filter => (None, filter),
        }
    }
}
