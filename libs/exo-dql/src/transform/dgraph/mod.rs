// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod delete_transformer;
mod filter_transformer;
mod select_transformer;

/// The Dgraph backend: lowers abstract operations into DQL text and
/// delete-mutation JSON.
pub struct Dgraph {}
