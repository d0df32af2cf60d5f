// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::delete::AbstractDelete;

/// An abstract graph-database operation.
///
/// Deletes are the only write the rewriter currently expresses; the enum keeps
/// the transformer entry point uniform for the other mutation kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum AbstractOperation {
    Delete(AbstractDelete),
}
