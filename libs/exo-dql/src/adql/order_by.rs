// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// Ordering of a read-back block, resolved to the persisted predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct AbstractOrderBy {
    pub predicate: String,
    pub desc: bool,
}
