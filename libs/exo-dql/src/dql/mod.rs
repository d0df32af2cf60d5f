// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#[macro_use]
#[cfg(test)]
mod test_util;

pub(crate) mod filter;
pub(crate) mod mutation;
pub(crate) mod query;
pub(crate) mod rewritten_request;

pub(crate) use dql_builder::DqlBuilder;
pub(crate) use expression_builder::ExpressionBuilder;

mod dql_builder;
mod expression_builder;
