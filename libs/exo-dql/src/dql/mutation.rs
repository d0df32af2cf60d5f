// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One object of the delete-mutation array.
///
/// The victim removal is `{"uid": "uid(x)"}`; each inverse-edge cleanup names
/// the holder variable and the edge to null out, e.g.
/// `{"uid": "uid(Post2)", "Post.author": {"uid": "uid(x)"}}`.
///
/// Serialization is hand-rolled so the `uid` key always precedes the edge
/// predicate, independent of any map implementation's iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteObject {
    /// The query variable the object refers to, in `uid(…)` reference form.
    pub uid: String,
    pub edge: Option<EdgeRemoval>,
}

/// The edge entry of an inverse-edge cleanup object.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRemoval {
    /// The persisted predicate of the inverse edge (`Post.author`,
    /// `Country.states`, `directed.movies`).
    pub predicate: String,
    /// The victim reference, `uid(x)`.
    pub target: String,
    /// List-valued inverse edges wrap the reference in a singleton array.
    pub list: bool,
}

impl DeleteObject {
    pub fn victim() -> Self {
        Self {
            uid: "uid(x)".to_string(),
            edge: None,
        }
    }
}

#[derive(Debug)]
struct UidRef<'a>(&'a str);

impl Serialize for UidRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("uid", self.0)?;
        map.end()
    }
}

impl Serialize for DeleteObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.edge.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("uid", &self.uid)?;
        if let Some(edge) = &self.edge {
            if edge.list {
                map.serialize_entry(&edge.predicate, &[UidRef(&edge.target)])?;
            } else {
                map.serialize_entry(&edge.predicate, &UidRef(&edge.target))?;
            }
        }
        map.end()
    }
}

/// Render a mutation list as the JSON array the backend consumes.
pub fn mutations_json(mutations: &[DeleteObject]) -> String {
    serde_json::to_string(mutations).expect("delete objects serialize infallibly")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn victim_only() {
        assert_eq!(mutations_json(&[DeleteObject::victim()]), r#"[{"uid":"uid(x)"}]"#);
    }

    #[test]
    fn singular_inverse() {
        let cleanup = DeleteObject {
            uid: "uid(Post2)".to_string(),
            edge: Some(EdgeRemoval {
                predicate: "Post.author".to_string(),
                target: "uid(x)".to_string(),
                list: false,
            }),
        };
        assert_eq!(
            mutations_json(&[DeleteObject::victim(), cleanup]),
            r#"[{"uid":"uid(x)"},{"uid":"uid(Post2)","Post.author":{"uid":"uid(x)"}}]"#
        );
    }

    #[test]
    fn list_inverse() {
        let cleanup = DeleteObject {
            uid: "uid(Country2)".to_string(),
            edge: Some(EdgeRemoval {
                predicate: "Country.states".to_string(),
                target: "uid(x)".to_string(),
                list: true,
            }),
        };
        assert_eq!(
            mutations_json(&[cleanup]),
            r#"[{"uid":"uid(Country2)","Country.states":[{"uid":"uid(x)"}]}]"#
        );
    }
}
