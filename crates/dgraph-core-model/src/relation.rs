// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// Edge metadata of an object-typed field.
///
/// The direction lives on the owning field's predicate (a `~` prefix marks the
/// reverse direction); the edge records what the predicate points at and, when
/// the remote type declares one, the field realizing the inverse direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// The entity type the edge points at.
    pub target_type: String,
    /// The field on the target type realizing the inverse direction
    /// (`@hasInverse` in the schema source). Absent for reverse-mapped fields,
    /// whose inverse is the forward predicate itself.
    pub inverse_field: Option<String>,
}
