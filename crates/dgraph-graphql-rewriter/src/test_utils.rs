// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#![cfg(test)]

use std::collections::HashMap;

use async_graphql_value::{indexmap::IndexMap, ConstValue, Name};
use dgraph_core_model::{
    access::{
        Access, AccessPredicateExpression, AccessPrimitiveExpression, AccessRelationalOp,
        FieldPathComparison,
    },
    relation::Edge,
    schema::GraphSchema,
    types::{BaseType, EntityType, Field, FieldType, ScalarType, TypeKind},
};

use crate::{
    context::RequestContext,
    operation::{DeleteMutation, ValidatedField},
};

/// The schema the rewriter tests run against: a bookstore-ish corner (authors,
/// posts, categories), a geography corner (countries, states), movies with a
/// reverse-mapped edge, and auth-guarded tickets and logs.
pub(crate) struct TestSchema {
    pub schema: GraphSchema,
}

impl TestSchema {
    pub(crate) fn new() -> Self {
        let author = EntityType {
            name: "Author".to_string(),
            kind: TypeKind::Object,
            fields: vec![
                id_field(),
                scalar_field("Author", "name", ScalarType::String),
                scalar_field("Author", "dob", ScalarType::DateTime),
                scalar_field("Author", "reputation", ScalarType::Float),
                edge_field("Author", "posts", "Post", Some("author"), true),
                edge_field("Author", "country", "Country", None, false),
            ],
            implementing_types: vec![],
            access: Access::default(),
        };

        let post = EntityType {
            name: "Post".to_string(),
            kind: TypeKind::Object,
            fields: vec![
                id_field(),
                scalar_field("Post", "title", ScalarType::String),
                edge_field("Post", "author", "Author", Some("posts"), false),
                edge_field("Post", "category", "Category", Some("posts"), false),
            ],
            implementing_types: vec![],
            access: Access::default(),
        };

        let category = EntityType {
            name: "Category".to_string(),
            kind: TypeKind::Object,
            fields: vec![
                id_field(),
                scalar_field("Category", "name", ScalarType::String),
                edge_field("Category", "posts", "Post", Some("category"), true),
            ],
            implementing_types: vec![],
            access: Access::default(),
        };

        let country = EntityType {
            name: "Country".to_string(),
            kind: TypeKind::Object,
            fields: vec![
                id_field(),
                scalar_field("Country", "name", ScalarType::String),
                edge_field("Country", "states", "State", Some("country"), true),
            ],
            implementing_types: vec![],
            access: Access::default(),
        };

        let state = EntityType {
            name: "State".to_string(),
            kind: TypeKind::Object,
            fields: vec![
                id_field(),
                id_marked_field("State", "code"),
                scalar_field("State", "name", ScalarType::String),
                edge_field("State", "country", "Country", Some("states"), false),
            ],
            implementing_types: vec![],
            access: Access::default(),
        };

        let movie = EntityType {
            name: "Movie".to_string(),
            kind: TypeKind::Object,
            fields: vec![
                id_field(),
                scalar_field("Movie", "name", ScalarType::String),
                Field {
                    name: "directors".to_string(),
                    typ: FieldType::object("MovieDirector", true),
                    predicate: "~directed.movies".to_string(),
                    id_marker: false,
                    edge: Some(Edge {
                        target_type: "MovieDirector".to_string(),
                        inverse_field: None,
                    }),
                },
            ],
            implementing_types: vec![],
            access: Access::default(),
        };

        let movie_director = EntityType {
            name: "MovieDirector".to_string(),
            kind: TypeKind::Object,
            fields: vec![
                id_field(),
                scalar_field("MovieDirector", "name", ScalarType::String),
                Field {
                    name: "directed".to_string(),
                    typ: FieldType::object("Movie", true),
                    predicate: "directed.movies".to_string(),
                    id_marker: false,
                    edge: Some(Edge {
                        target_type: "Movie".to_string(),
                        inverse_field: None,
                    }),
                },
            ],
            implementing_types: vec![],
            access: Access::default(),
        };

        let book = EntityType {
            name: "Book".to_string(),
            kind: TypeKind::Object,
            fields: vec![
                id_marked_field("Book", "isbn"),
                scalar_field("Book", "title", ScalarType::String),
            ],
            implementing_types: vec![],
            access: Access::default(),
        };

        let user = EntityType {
            name: "User".to_string(),
            kind: TypeKind::Object,
            fields: vec![
                id_marked_field("User", "username"),
                scalar_field("User", "age", ScalarType::Int),
            ],
            implementing_types: vec![],
            access: Access {
                query: Some(AccessPredicateExpression::FieldComparison(
                    FieldPathComparison {
                        path: vec!["username".to_string()],
                        claim: "USER".to_string(),
                    },
                )),
                ..Access::default()
            },
        };

        let secret = EntityType {
            name: "Secret".to_string(),
            kind: TypeKind::Object,
            fields: vec![id_field(), scalar_field("Secret", "value", ScalarType::String)],
            implementing_types: vec![],
            access: Access {
                query: Some(role_is_admin()),
                ..Access::default()
            },
        };

        let ticket = EntityType {
            name: "Ticket".to_string(),
            kind: TypeKind::Object,
            fields: vec![
                id_field(),
                scalar_field("Ticket", "title", ScalarType::String),
                edge_field("Ticket", "onlyFor", "User", None, false),
            ],
            implementing_types: vec![],
            access: Access {
                delete: Some(AccessPredicateExpression::FieldComparison(
                    FieldPathComparison {
                        path: vec!["onlyFor".to_string(), "username".to_string()],
                        claim: "USER".to_string(),
                    },
                )),
                ..Access::default()
            },
        };

        let log = EntityType {
            name: "Log".to_string(),
            kind: TypeKind::Object,
            fields: vec![id_field(), scalar_field("Log", "logs", ScalarType::String)],
            implementing_types: vec![],
            access: Access {
                delete: Some(role_is_admin()),
                ..Access::default()
            },
        };

        let x = EntityType {
            name: "X".to_string(),
            kind: TypeKind::Interface,
            fields: vec![id_field(), scalar_field("X", "name", ScalarType::String)],
            implementing_types: vec!["Y".to_string()],
            access: Access::default(),
        };

        let y = EntityType {
            name: "Y".to_string(),
            kind: TypeKind::Object,
            fields: vec![id_field(), scalar_field("Y", "name", ScalarType::String)],
            implementing_types: vec![],
            access: Access {
                delete: Some(role_is_admin()),
                ..Access::default()
            },
        };

        let oldie = EntityType {
            name: "Oldie".to_string(),
            kind: TypeKind::Union,
            fields: vec![],
            implementing_types: vec!["Book".to_string(), "Movie".to_string()],
            access: Access::default(),
        };

        Self {
            schema: GraphSchema {
                types: vec![
                    author,
                    post,
                    category,
                    country,
                    state,
                    movie,
                    movie_director,
                    book,
                    user,
                    secret,
                    ticket,
                    log,
                    x,
                    y,
                    oldie,
                ],
            },
        }
    }

    pub(crate) fn entity(&self, name: &str) -> &EntityType {
        self.schema
            .resolve(name)
            .unwrap_or_else(|| panic!("test schema has no type {name}"))
    }

    /// A request context from a JSON object of claims.
    pub(crate) fn context(claims: serde_json::Value) -> RequestContext {
        let claims = match claims {
            serde_json::Value::Object(claims) => claims.into_iter().collect(),
            _ => HashMap::new(),
        };
        RequestContext::new(claims)
    }
}

fn role_is_admin() -> AccessPredicateExpression {
    AccessPredicateExpression::RelationalOp(AccessRelationalOp::Eq(
        Box::new(AccessPrimitiveExpression::ClaimSelection("ROLE".to_string())),
        Box::new(AccessPrimitiveExpression::StringLiteral("ADMIN".to_string())),
    ))
}

fn id_field() -> Field {
    Field {
        name: "id".to_string(),
        typ: FieldType {
            base: BaseType::Scalar(ScalarType::Id),
            list: false,
        },
        predicate: "uid".to_string(),
        id_marker: false,
        edge: None,
    }
}

fn scalar_field(type_name: &str, name: &str, scalar: ScalarType) -> Field {
    Field {
        name: name.to_string(),
        typ: FieldType::scalar(scalar),
        predicate: format!("{type_name}.{name}"),
        id_marker: false,
        edge: None,
    }
}

fn id_marked_field(type_name: &str, name: &str) -> Field {
    Field {
        id_marker: true,
        ..scalar_field(type_name, name, ScalarType::String)
    }
}

fn edge_field(
    type_name: &str,
    name: &str,
    target: &str,
    inverse_field: Option<&str>,
    list: bool,
) -> Field {
    Field {
        name: name.to_string(),
        typ: FieldType::object(target, list),
        predicate: format!("{type_name}.{name}"),
        id_marker: false,
        edge: Some(Edge {
            target_type: target.to_string(),
            inverse_field: inverse_field.map(|name| name.to_string()),
        }),
    }
}

/// A `ValidatedField` with arguments given as a JSON object.
pub(crate) fn selection_field(
    name: &str,
    arguments: serde_json::Value,
    subfields: Vec<ValidatedField>,
) -> ValidatedField {
    let arguments = match arguments {
        serde_json::Value::Object(arguments) => arguments
            .into_iter()
            .map(|(name, value)| {
                (
                    name,
                    ConstValue::from_json(value).expect("test argument converts"),
                )
            })
            .collect(),
        _ => IndexMap::new(),
    };
    ValidatedField {
        alias: None,
        name: Name::new(name),
        arguments,
        subfields,
    }
}

/// A delete mutation over `type_name` with an optional JSON filter value.
pub(crate) fn delete_operation(
    type_name: &str,
    filter: Option<serde_json::Value>,
    selection: Vec<ValidatedField>,
) -> DeleteMutation {
    DeleteMutation {
        name: format!("delete{type_name}"),
        type_name: type_name.to_string(),
        filter: filter.map(|value| ConstValue::from_json(value).expect("test filter converts")),
        selection,
        variables: HashMap::new(),
    }
}
