// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use async_graphql_value::{indexmap::IndexMap, ConstValue, Name};

/// A field of the validated operation document, with its arguments already
/// resolved against the operation's variables.
#[derive(Debug, Clone)]
pub struct ValidatedField {
    pub alias: Option<Name>,
    /// The name of the field.
    pub name: Name,
    /// The arguments to the field, empty if no arguments are provided.
    pub arguments: IndexMap<String, ConstValue>,

    /// The subfields being selected in this field, if it is an object. Empty if
    /// no fields are being selected.
    pub subfields: Vec<ValidatedField>,
}

impl ValidatedField {
    pub fn output_name(&self) -> String {
        self.alias.as_ref().unwrap_or(&self.name).to_string()
    }
}

/// A delete mutation, as handed over by the GraphQL layer.
#[derive(Debug, Clone)]
pub struct DeleteMutation {
    /// The mutation field name, e.g. `deleteAuthor`.
    pub name: String,
    /// The victim type, e.g. `Author`.
    pub type_name: String,
    /// The `filter` argument value, if the caller passed one.
    pub filter: Option<ConstValue>,
    /// The selection over the mutation payload.
    pub selection: Vec<ValidatedField>,
    /// The operation's variables, passed through for read-back substitution.
    pub variables: HashMap<String, ConstValue>,
}

impl DeleteMutation {
    /// The payload subfield carrying the deleted entities (e.g. `author` in
    /// `deleteAuthor`), which triggers a read-back. The payload's `msg` and
    /// `numUids` fields are the response shaper's business, not ours.
    pub fn entity_selection(&self) -> Option<&ValidatedField> {
        let field_name = lower_first(&self.type_name);
        self.selection.iter().find(|field| field.name.as_str() == field_name)
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
