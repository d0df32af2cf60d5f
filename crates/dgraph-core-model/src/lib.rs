// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The normalized view of a user-defined GraphQL schema, as the rewriter
//! consumes it: types with their persisted predicates, edges with their
//! inverses, and the per-operation authorization rules. The view is produced
//! by the schema loader, is immutable, and may be shared freely across
//! threads.

pub mod access;
pub mod relation;
pub mod schema;
pub mod types;
