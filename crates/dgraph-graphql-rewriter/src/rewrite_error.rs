// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

/// The rewriter's error surface. Every failure is terminal: nothing partial is
/// emitted, and the transport layer maps the error into the GraphQL `errors`
/// array.
#[derive(Error, Debug)]
pub enum RewriteError {
    /// The operation or its filter names a type or field the schema view
    /// doesn't have.
    #[error("unknown type or field: {0}")]
    UnknownType(String),

    /// Ill-typed comparator, empty id list, or a combination the schema rules
    /// out.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// An authorization rule requires a claim the caller didn't present.
    #[error("not authorized: rule requires the `{0}` claim")]
    Unauthorized(String),

    /// The operation itself cannot be rewritten (e.g. deleting a union).
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}
