// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Rewrites GraphQL delete mutations into the query/mutation bundle a Dgraph
//! backend executes: a DQL query that binds the victims and projects the
//! inverse edges to clean up, the delete-mutation JSON referencing those
//! bindings, and (when the payload asks for it) a read-back block over the
//! victims' pre-delete state.
//!
//! The rewrite is a pure function of the operation, the schema view, and the
//! caller's claims; it holds no state and performs no I/O.

mod access_solver;
mod delete_resolver;
mod filter_mapper;
mod inverse_planner;
mod readback_mapper;
mod variable_generator;

pub mod context;
pub mod operation;
pub mod rewrite_error;

#[cfg(test)]
mod test_utils;

pub use delete_resolver::rewrite_delete;
pub use rewrite_error::RewriteError;
