// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

/// The caller's claim set, as extracted from the request by the transport
/// layer (typically out of a verified JWT).
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    claims: HashMap<String, serde_json::Value>,
}

impl RequestContext {
    pub fn new(claims: HashMap<String, serde_json::Value>) -> Self {
        Self { claims }
    }

    /// A context with no claims at all (an unauthenticated caller).
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn claim(&self, key: &str) -> Option<&serde_json::Value> {
        self.claims.get(key)
    }
}
