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
    adql::delete::{AbstractDelete, AuthVarBlock},
    dql::{
        filter::Filter,
        mutation::{DeleteObject, EdgeRemoval},
        query::{BlockItem, ChildBlock, DqlQuery, QueryBlock, RootFunc},
        rewritten_request::RewrittenRequest,
        ExpressionBuilder,
    },
    transform::transformer::{DeleteTransformer, FilterTransformer, SelectTransformer},
};

use super::Dgraph;

impl DeleteTransformer for Dgraph {
    #[instrument(name = "DeleteTransformer::to_rewritten for Dgraph", skip(self))]
    fn to_rewritten(&self, abstract_delete: &AbstractDelete) -> RewrittenRequest {
        if abstract_delete.degenerate {
            return degenerate_request(&abstract_delete.alias);
        }

        let (ids, rest) = abstract_delete.filter.clone().take_ids();

        let func = match &ids {
            Some(ids) => RootFunc::Uid(ids.clone()),
            None => RootFunc::Type(abstract_delete.type_name.clone()),
        };

        let mut filter = self.to_filter(&rest);
        // With a uid root there is nothing constraining the type, so the guard
        // moves into the filter; a type(T) root already is the guard.
        if ids.is_some() {
            filter = and_filter(filter, Filter::Type(abstract_delete.type_name.clone()));
        }

        let mut body = vec![BlockItem::Uid];
        body.extend(abstract_delete.inverses.iter().map(|inverse| {
            BlockItem::Projection {
                var: inverse.var.clone(),
                predicate: inverse.projection.clone(),
            }
        }));

        let binding_block = QueryBlock {
            var: Some("x".to_string()),
            alias: abstract_delete.alias.clone(),
            func: Some(func),
            order: None,
            first: None,
            offset: None,
            filter,
            cascade: false,
            body,
        };

        let mut blocks = vec![binding_block];
        blocks.extend(
            abstract_delete
                .auth_blocks
                .iter()
                .map(|auth_block| self.to_auth_block(auth_block)),
        );
        if let Some(selection) = &abstract_delete.selection {
            blocks.push(self.to_select_block(selection));
        }

        let mut mutations = vec![DeleteObject::victim()];
        mutations.extend(abstract_delete.inverses.iter().map(|inverse| DeleteObject {
            uid: format!("uid({})", inverse.var),
            edge: Some(EdgeRemoval {
                predicate: inverse.inverse_predicate.clone(),
                target: "uid(x)".to_string(),
                list: inverse.inverse_is_list,
            }),
        }));

        RewrittenRequest {
            query: DqlQuery { blocks }.to_dql(),
            mutations,
            ..Default::default()
        }
    }
}

impl Dgraph {
    /// Lower an authorization block into its `var` query block: the traversal
    /// path nests one child block per edge, the comparator lands on the last
    /// step, and `@cascade` prunes victims whose traversal comes up empty.
    fn to_auth_block(&self, auth_block: &AuthVarBlock) -> QueryBlock {
        let leaf_filter = self.to_filter(&auth_block.leaf);

        let mut path = auth_block.path.iter().rev();
        let mut child = match path.next() {
            Some(predicate) => ChildBlock {
                alias: None,
                predicate: predicate.clone(),
                order: None,
                first: None,
                offset: None,
                filter: leaf_filter,
                body: vec![],
            },
            None => {
                // An empty path cannot arise: single-field rules become plain
                // filter conjuncts instead of var blocks.
                unreachable!("auth var block with empty path")
            }
        };
        for predicate in path {
            child = ChildBlock {
                alias: None,
                predicate: predicate.clone(),
                order: None,
                first: None,
                offset: None,
                filter: None,
                body: vec![BlockItem::Block(child)],
            };
        }

        QueryBlock {
            var: Some(auth_block.var.clone()),
            alias: "var".to_string(),
            func: Some(RootFunc::Type(auth_block.type_name.clone())),
            order: None,
            first: None,
            offset: None,
            filter: None,
            cascade: true,
            body: vec![BlockItem::Block(child)],
        }
    }
}

fn degenerate_request(alias: &str) -> RewrittenRequest {
    let query = DqlQuery {
        blocks: vec![QueryBlock::new(
            Some("x".to_string()),
            alias.to_string(),
            None,
        )],
    };
    RewrittenRequest {
        query: query.to_dql(),
        mutations: vec![DeleteObject::victim()],
        ..Default::default()
    }
}

fn and_filter(filter: Option<Filter>, conjunct: Filter) -> Option<Filter> {
    Some(match filter {
        Some(filter) => Filter::and(filter, conjunct),
        None => conjunct,
    })
}
