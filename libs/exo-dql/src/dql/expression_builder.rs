// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::DqlBuilder;

/// A DQL expression that knows how to render itself.
pub trait ExpressionBuilder {
    /// Build the expression into the given builder.
    fn build(&self, builder: &mut DqlBuilder);

    /// Render the expression as a standalone string. Useful primarily in tests;
    /// the production path always builds into a shared [`DqlBuilder`].
    fn to_dql(&self) -> String {
        let mut builder = DqlBuilder::new();
        self.build(&mut builder);
        builder.into_dql()
    }
}
