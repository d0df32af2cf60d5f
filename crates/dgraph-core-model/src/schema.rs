// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::types::EntityType;

/// The whole schema view. Constructed once by the loader, then only read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSchema {
    pub types: Vec<EntityType>,
}

impl GraphSchema {
    pub fn resolve(&self, type_name: &str) -> Option<&EntityType> {
        self.types.iter().find(|typ| typ.name == type_name)
    }
}
