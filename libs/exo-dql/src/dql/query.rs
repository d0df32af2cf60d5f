// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{filter::Filter, DqlBuilder, ExpressionBuilder};

/// The function a top-level query block iterates over.
#[derive(Debug, Clone, PartialEq)]
pub enum RootFunc {
    /// `func: uid(0x1, 0x2)` over literal uids, or `func: uid(x)` over a query
    /// variable.
    Uid(Vec<String>),
    /// `func: type(Author)`
    Type(String),
}

impl ExpressionBuilder for RootFunc {
    fn build(&self, builder: &mut DqlBuilder) {
        match self {
            RootFunc::Uid(uids) => {
                builder.push_str("uid(");
                builder.push_str(uids.join(", "));
                builder.push(')');
            }
            RootFunc::Type(type_name) => {
                builder.push_str("type(");
                builder.push_str(type_name);
                builder.push(')');
            }
        }
    }
}

/// Ordering argument of a query block: `orderasc: Author.name` or
/// `orderdesc: Author.name`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockOrder {
    pub predicate: String,
    pub desc: bool,
}

impl ExpressionBuilder for BlockOrder {
    fn build(&self, builder: &mut DqlBuilder) {
        builder.push_str(if self.desc { "orderdesc: " } else { "orderasc: " });
        builder.push_str(&self.predicate);
    }
}

/// One line in the body of a query block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockItem {
    /// The bare `uid` of the victim binding block.
    Uid,
    /// A variable projection such as `Post2 as Author.posts`.
    Projection { var: String, predicate: String },
    /// An aliased scalar such as `name : Author.name`, `id : uid`, or the
    /// `dgraph.uid : uid` terminator.
    Aliased { alias: String, predicate: String },
    /// A nested block with its own arguments, filter, and body.
    Block(ChildBlock),
}

impl ExpressionBuilder for BlockItem {
    fn build(&self, builder: &mut DqlBuilder) {
        match self {
            BlockItem::Uid => builder.push_str("uid"),
            BlockItem::Projection { var, predicate } => {
                builder.push_str(var);
                builder.push_str(" as ");
                builder.push_str(predicate);
            }
            BlockItem::Aliased { alias, predicate } => {
                builder.push_str(alias);
                builder.push_str(" : ");
                builder.push_str(predicate);
            }
            BlockItem::Block(block) => block.build(builder),
        }
    }
}

/// A nested (non-root) block: `country : Author.country @filter(…) { … }`,
/// optionally carrying ordering and pagination arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildBlock {
    pub alias: Option<String>,
    pub predicate: String,
    pub order: Option<BlockOrder>,
    pub first: Option<i64>,
    pub offset: Option<i64>,
    pub filter: Option<Filter>,
    pub body: Vec<BlockItem>,
}

impl ExpressionBuilder for ChildBlock {
    fn build(&self, builder: &mut DqlBuilder) {
        if let Some(alias) = &self.alias {
            builder.push_str(alias);
            builder.push_str(" : ");
        }
        builder.push_str(&self.predicate);

        if self.order.is_some() || self.first.is_some() || self.offset.is_some() {
            builder.push_str(" (");
            build_block_args(&self.order, self.first, self.offset, false, builder);
            builder.push(')');
        }
        build_filter(&self.filter, builder);
        build_body(&self.body, builder);
    }
}

/// A top-level query block: the victim binding block, an authorization `var`
/// block, or a read-back block.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBlock {
    /// Variable bound to the block's result (`x as …`), if any.
    pub var: Option<String>,
    /// The root-function alias: the GraphQL field name for binding and
    /// read-back blocks, `var` for authorization blocks.
    pub alias: String,
    /// `None` renders the degenerate empty argument list `()`.
    pub func: Option<RootFunc>,
    pub order: Option<BlockOrder>,
    pub first: Option<i64>,
    pub offset: Option<i64>,
    pub filter: Option<Filter>,
    pub cascade: bool,
    pub body: Vec<BlockItem>,
}

impl QueryBlock {
    pub fn new(var: Option<String>, alias: String, func: Option<RootFunc>) -> Self {
        Self {
            var,
            alias,
            func,
            order: None,
            first: None,
            offset: None,
            filter: None,
            cascade: false,
            body: vec![],
        }
    }
}

impl ExpressionBuilder for QueryBlock {
    fn build(&self, builder: &mut DqlBuilder) {
        if let Some(var) = &self.var {
            builder.push_str(var);
            builder.push_str(" as ");
        }
        builder.push_str(&self.alias);
        builder.push('(');
        if let Some(func) = &self.func {
            builder.push_str("func: ");
            func.build(builder);
        }
        build_block_args(
            &self.order,
            self.first,
            self.offset,
            self.func.is_some(),
            builder,
        );
        builder.push(')');

        build_filter(&self.filter, builder);
        if self.cascade {
            builder.push_str(" @cascade");
        }
        build_body(&self.body, builder);
    }
}

/// The whole `query { … }` request, one block per line.
#[derive(Debug, Clone, PartialEq)]
pub struct DqlQuery {
    pub blocks: Vec<QueryBlock>,
}

impl ExpressionBuilder for DqlQuery {
    fn build(&self, builder: &mut DqlBuilder) {
        builder.push_str("query {");
        builder.with_deeper(|builder| {
            for block in &self.blocks {
                builder.push_indent();
                block.build(builder);
            }
        });
        builder.push_indent();
        builder.push('}');
    }
}

fn build_block_args(
    order: &Option<BlockOrder>,
    first: Option<i64>,
    offset: Option<i64>,
    leading_sep: bool,
    builder: &mut DqlBuilder,
) {
    let mut sep_needed = leading_sep;
    let mut sep = |builder: &mut DqlBuilder| {
        if sep_needed {
            builder.push_str(", ");
        }
        sep_needed = true;
    };

    if let Some(order) = order {
        sep(builder);
        order.build(builder);
    }
    if let Some(first) = first {
        sep(builder);
        builder.push_str("first: ");
        builder.push_str(first.to_string());
    }
    if let Some(offset) = offset {
        sep(builder);
        builder.push_str("offset: ");
        builder.push_str(offset.to_string());
    }
}

fn build_filter(filter: &Option<Filter>, builder: &mut DqlBuilder) {
    if let Some(filter) = filter {
        builder.push_str(" @filter(");
        filter.build(builder);
        builder.push(')');
    }
}

fn build_body(body: &[BlockItem], builder: &mut DqlBuilder) {
    if body.is_empty() {
        return;
    }
    builder.push_str(" {");
    builder.with_deeper(|builder| {
        for item in body {
            builder.push_indent();
            item.build(builder);
        }
    });
    builder.push_indent();
    builder.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding_block() -> QueryBlock {
        QueryBlock {
            var: Some("x".to_string()),
            alias: "deleteAuthor".to_string(),
            func: Some(RootFunc::Uid(vec!["0x1".to_string(), "0x2".to_string()])),
            order: None,
            first: None,
            offset: None,
            filter: Some(Filter::Type("Author".to_string())),
            cascade: false,
            body: vec![
                BlockItem::Uid,
                BlockItem::Projection {
                    var: "Post2".to_string(),
                    predicate: "Author.posts".to_string(),
                },
            ],
        }
    }

    #[test]
    fn binding_block_with_projection() {
        assert_query!(
            DqlQuery {
                blocks: vec![binding_block()]
            },
            "query {\n  x as deleteAuthor(func: uid(0x1, 0x2)) @filter(type(Author)) {\n    uid\n    Post2 as Author.posts\n  }\n}"
        );
    }

    #[test]
    fn degenerate_block() {
        let block = QueryBlock::new(Some("x".to_string()), "deleteX".to_string(), None);
        assert_query!(
            DqlQuery {
                blocks: vec![block]
            },
            "query {\n  x as deleteX()\n}"
        );
    }

    #[test]
    fn read_back_block_arguments() {
        let block = QueryBlock {
            var: None,
            alias: "author".to_string(),
            func: Some(RootFunc::Uid(vec!["x".to_string()])),
            order: Some(BlockOrder {
                predicate: "Author.name".to_string(),
                desc: false,
            }),
            first: Some(10),
            offset: Some(2),
            filter: None,
            cascade: false,
            body: vec![
                BlockItem::Aliased {
                    alias: "name".to_string(),
                    predicate: "Author.name".to_string(),
                },
                BlockItem::Aliased {
                    alias: "dgraph.uid".to_string(),
                    predicate: "uid".to_string(),
                },
            ],
        };
        assert_query!(
            block,
            "author(func: uid(x), orderasc: Author.name, first: 10, offset: 2) {\n  name : Author.name\n  dgraph.uid : uid\n}"
        );
    }

    #[test]
    fn nested_child_block() {
        let child = ChildBlock {
            alias: Some("country".to_string()),
            predicate: "Author.country".to_string(),
            order: None,
            first: Some(1),
            offset: None,
            filter: None,
            body: vec![BlockItem::Aliased {
                alias: "name".to_string(),
                predicate: "Country.name".to_string(),
            }],
        };
        assert_query!(
            child,
            "country : Author.country (first: 1) {\n  name : Country.name\n}"
        );
    }

    #[test]
    fn cascade_var_block() {
        let block = QueryBlock {
            var: Some("TicketAuth2".to_string()),
            alias: "var".to_string(),
            func: Some(RootFunc::Type("Ticket".to_string())),
            order: None,
            first: None,
            offset: None,
            filter: None,
            cascade: true,
            body: vec![BlockItem::Block(ChildBlock {
                alias: None,
                predicate: "Ticket.onlyFor".to_string(),
                order: None,
                first: None,
                offset: None,
                filter: Some(Filter::Comparison {
                    function: "eq",
                    predicate: "User.username".to_string(),
                    args: vec![serde_json::json!("user1")],
                }),
                body: vec![],
            })],
        };
        assert_query!(
            block,
            "TicketAuth2 as var(func: type(Ticket)) @cascade {\n  Ticket.onlyFor @filter(eq(User.username, \"user1\"))\n}"
        );
    }
}
