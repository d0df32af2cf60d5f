// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{filter::AbstractFilter, order_by::AbstractOrderBy};

/// Abstract representation of a read-back selection: the block that returns the
/// pre-delete state of the victims, and (recursively) its nested blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct AbstractSelect {
    /// The output name of the block: the payload field at the root, the
    /// (possibly aliased) GraphQL field below it.
    pub alias: String,
    /// The type the block's fields belong to.
    pub type_name: String,
    /// The predicate to filter the block. This is not an `Option` to ensure
    /// that the caller makes a conscious decision about whether to use `True`
    /// (rather than assuming that `None` means `True`).
    pub filter: AbstractFilter,
    pub order: Option<AbstractOrderBy>,
    pub first: Option<i64>,
    pub offset: Option<i64>,
    pub fields: Vec<SelectionField>,
}

/// One requested field of a read-back block.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionField {
    /// The synthetic node id; renders `<alias> : uid`.
    Id { alias: String },
    /// A scalar field; renders `<alias> : <predicate>`.
    Scalar { alias: String, predicate: String },
    /// An edge field with its own nested selection.
    Nested {
        predicate: String,
        select: AbstractSelect,
    },
}
