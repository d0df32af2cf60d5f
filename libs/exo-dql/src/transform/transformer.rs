// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{
    adql::{
        abstract_operation::AbstractOperation, delete::AbstractDelete, filter::AbstractFilter,
        select::AbstractSelect,
    },
    dql::{filter::Filter, query::QueryBlock, rewritten_request::RewrittenRequest},
};

use super::dgraph::Dgraph;

pub trait Transformer {
    fn to_rewritten_request(&self, abstract_operation: &AbstractOperation) -> RewrittenRequest;
}

impl Transformer for Dgraph {
    fn to_rewritten_request(&self, abstract_operation: &AbstractOperation) -> RewrittenRequest {
        match abstract_operation {
            AbstractOperation::Delete(delete) => DeleteTransformer::to_rewritten(self, delete),
        }
    }
}

pub trait DeleteTransformer {
    fn to_rewritten(&self, abstract_delete: &AbstractDelete) -> RewrittenRequest;
}

pub trait SelectTransformer {
    fn to_select_block(&self, abstract_select: &AbstractSelect) -> QueryBlock;
}

pub trait FilterTransformer {
    /// Lower an abstract filter. `True` lowers to `None`: an absent `@filter`
    /// clause admits everything.
    fn to_filter(&self, abstract_filter: &AbstractFilter) -> Option<Filter>;
}
