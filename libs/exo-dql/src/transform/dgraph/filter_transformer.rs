// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{adql::filter::AbstractFilter, dql::filter::Filter, transform::transformer::FilterTransformer};

use super::Dgraph;

impl FilterTransformer for Dgraph {
    fn to_filter(&self, abstract_filter: &AbstractFilter) -> Option<Filter> {
        match abstract_filter {
            AbstractFilter::True => None,
            filter => Some(lower(filter)),
        }
    }
}

fn lower(filter: &AbstractFilter) -> Filter {
    match filter {
        AbstractFilter::True => unreachable!("the and/or constructors eliminate nested True"),
        // uid 0x0 is never allocated, so the clause admits nothing
        AbstractFilter::False => Filter::Uid(vec!["0x0".to_string()]),
        AbstractFilter::IdSet(ids) => Filter::Uid(ids.clone()),
        AbstractFilter::UidVar(var) => Filter::Uid(vec![var.clone()]),
        AbstractFilter::Leaf {
            predicate,
            op,
            args,
        } => Filter::Comparison {
            function: op.dql_function(),
            predicate: predicate.clone(),
            args: args.clone(),
        },
        AbstractFilter::And(conjuncts) => Filter::And(conjuncts.iter().map(lower).collect()),
        AbstractFilter::Or(disjuncts) => Filter::Or(disjuncts.iter().map(lower).collect()),
        AbstractFilter::Not(negated) => Filter::Not(Box::new(lower(negated))),
    }
}
