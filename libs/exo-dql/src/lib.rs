// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// The core idea in this library is that of [AbstractOperation], which along with
/// its variants, allows declaring an intention of a graph-database operation at a
/// higher level. The `transform` module is responsible for lowering an
/// [AbstractOperation] into the concrete request a Dgraph backend consumes: a DQL
/// query string plus a list of delete-mutation JSON objects. This separation of
/// intention vs execution keeps the callers (the GraphQL resolvers) free of any
/// wire-format details.
///
/// For example, [AbstractDelete] expresses the intention to delete the nodes of a
/// type matching a filter, optionally reading their pre-delete state back. It
/// doesn't, however, express how the victims are bound to a query variable, how
/// inverse edges are projected, or how the delete JSON references those
/// variables; all of that is the business of the Dgraph transformer.
///
/// To express predicates the library uses [AbstractFilter], a tagged tree of
/// logical connectives over comparator leaves and id-sets, which the transformer
/// lowers into the parenthesized infix filter expressions of DQL.
#[macro_use]
mod dql;
mod adql;
pub mod transform;

/// Public types at the root level of this crate
pub use adql::{
    abstract_operation::AbstractOperation,
    delete::{AbstractDelete, AuthVarBlock, InverseEdge},
    filter::{AbstractFilter, FilterOp},
    order_by::AbstractOrderBy,
    select::{AbstractSelect, SelectionField},
};

pub use dql::{
    filter::Filter,
    mutation::{DeleteObject, EdgeRemoval},
    query::{BlockItem, BlockOrder, ChildBlock, DqlQuery, QueryBlock, RootFunc},
    rewritten_request::RewrittenRequest,
};
