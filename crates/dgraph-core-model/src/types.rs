// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{access::Access, relation::Edge};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Object,
    Interface,
    Union,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarType {
    Id,
    String,
    Int,
    Float,
    Boolean,
    DateTime,
}

/// The declared type of a field: a scalar or an edge to another entity type,
/// either of which may be list-valued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldType {
    pub base: BaseType,
    pub list: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseType {
    Scalar(ScalarType),
    Object(String),
}

impl FieldType {
    pub fn scalar(scalar: ScalarType) -> Self {
        Self {
            base: BaseType::Scalar(scalar),
            list: false,
        }
    }

    pub fn object(type_name: &str, list: bool) -> Self {
        Self {
            base: BaseType::Object(type_name.to_string()),
            list,
        }
    }

    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self.base {
            BaseType::Scalar(scalar) => Some(scalar),
            BaseType::Object(_) => None,
        }
    }
}

/// A field of an entity type, with the predicate it persists under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub typ: FieldType,
    /// The persisted predicate: `Author.name`, or `~directed.movies` for a
    /// field mapped onto the reverse direction of another predicate.
    pub predicate: String,
    /// A user-designated key usable in filters in lieu of the synthetic node
    /// id (`@id` in the schema source).
    pub id_marker: bool,
    /// Present when the field is an edge to another entity type.
    pub edge: Option<Edge>,
}

impl Field {
    /// Whether this is the synthetic node id (`ID`-typed) field.
    pub fn is_node_id(&self) -> bool {
        self.typ.scalar_type() == Some(ScalarType::Id)
    }

    /// Whether the field's predicate maps the reverse direction of an edge.
    pub fn is_reverse(&self) -> bool {
        self.predicate.starts_with('~')
    }
}

/// An entity type of the user-defined schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityType {
    pub name: String,
    pub kind: TypeKind,
    /// Fields in declaration order; inverse-edge planning relies on it.
    pub fields: Vec<Field>,
    /// For interfaces: the object types implementing it.
    pub implementing_types: Vec<String>,
    pub access: Access,
}

impl EntityType {
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_by_predicate(&self, predicate: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.predicate == predicate)
    }
}
