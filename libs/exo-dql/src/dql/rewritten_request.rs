// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use super::mutation::{mutations_json, DeleteObject};

/// The bundle a rewrite produces: the DQL query that binds the victims (and,
/// when requested, reads their pre-delete state back), plus the ordered delete
/// objects referencing the query's variables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RewrittenRequest {
    pub query: String,
    pub mutations: Vec<DeleteObject>,
    /// Uids of freshly created nodes. Always empty for deletes; kept so the
    /// result shape is uniform across the mutation kinds.
    pub new_nodes: HashMap<String, String>,
    /// GraphQL variables, passed through for read-back substitution.
    pub variables: HashMap<String, serde_json::Value>,
}

impl RewrittenRequest {
    /// The mutation list serialized as the JSON array the backend consumes.
    pub fn mutations_json(&self) -> String {
        mutations_json(&self.mutations)
    }
}
