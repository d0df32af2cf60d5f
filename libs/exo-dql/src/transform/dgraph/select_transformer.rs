// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing::instrument;

use crate::{
    adql::select::{AbstractSelect, SelectionField},
    dql::query::{BlockItem, BlockOrder, ChildBlock, QueryBlock, RootFunc},
    transform::transformer::{FilterTransformer, SelectTransformer},
};

use super::Dgraph;

impl SelectTransformer for Dgraph {
    /// Lower the read-back selection into its query block. The block iterates
    /// over the victim binding (`func: uid(x)`) so the response carries the
    /// pre-delete state of exactly the deleted nodes.
    #[instrument(name = "SelectTransformer::to_select_block for Dgraph", skip(self))]
    fn to_select_block(&self, abstract_select: &AbstractSelect) -> QueryBlock {
        QueryBlock {
            var: None,
            alias: abstract_select.alias.clone(),
            func: Some(RootFunc::Uid(vec!["x".to_string()])),
            order: self.to_order(abstract_select),
            first: abstract_select.first,
            offset: abstract_select.offset,
            filter: self.to_filter(&abstract_select.filter),
            cascade: false,
            body: self.to_select_body(&abstract_select.fields),
        }
    }
}

impl Dgraph {
    fn to_order(&self, abstract_select: &AbstractSelect) -> Option<BlockOrder> {
        abstract_select.order.as_ref().map(|order| BlockOrder {
            predicate: order.predicate.clone(),
            desc: order.desc,
        })
    }

    /// Every object level ends with the `dgraph.uid : uid` terminator so the
    /// response shaper can key nodes even when no id field was requested.
    fn to_select_body(&self, fields: &[SelectionField]) -> Vec<BlockItem> {
        let mut body: Vec<BlockItem> = fields
            .iter()
            .map(|field| match field {
                SelectionField::Id { alias } => BlockItem::Aliased {
                    alias: alias.clone(),
                    predicate: "uid".to_string(),
                },
                SelectionField::Scalar { alias, predicate } => BlockItem::Aliased {
                    alias: alias.clone(),
                    predicate: predicate.clone(),
                },
                SelectionField::Nested { predicate, select } => {
                    BlockItem::Block(ChildBlock {
                        alias: Some(select.alias.clone()),
                        predicate: predicate.clone(),
                        order: self.to_order(select),
                        first: select.first,
                        offset: select.offset,
                        filter: self.to_filter(&select.filter),
                        body: self.to_select_body(&select.fields),
                    })
                }
            })
            .collect();
        body.push(BlockItem::Aliased {
            alias: "dgraph.uid".to_string(),
            predicate: "uid".to_string(),
        });
        body
    }
}
