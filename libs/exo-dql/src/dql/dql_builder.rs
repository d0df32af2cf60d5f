// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

const INDENT: &str = "  ";

/// Accumulates the text of a DQL query. Keeps track of the current block depth
/// so that query blocks and their bodies land at the two-space indentation the
/// backend's whitespace convention demands.
///
/// DQL's list-like positions (uid arguments, `AND`/`OR` chains) are joined at
/// the call sites; the builder itself only knows about text and depth.
pub struct DqlBuilder {
    dql: String,
    depth: usize,
}

impl DqlBuilder {
    pub fn new() -> Self {
        Self {
            dql: String::new(),
            depth: 0,
        }
    }

    /// Append raw text to the current line.
    pub fn push_str<T: AsRef<str>>(&mut self, s: T) {
        self.dql.push_str(s.as_ref());
    }

    /// Append a single character to the current line.
    pub fn push(&mut self, c: char) {
        self.dql.push(c);
    }

    /// Start a fresh line at the current depth.
    pub fn push_indent(&mut self) {
        self.dql.push('\n');
        for _ in 0..self.depth {
            self.dql.push_str(INDENT);
        }
    }

    /// Execute the given function one block level deeper. The depth is restored
    /// afterwards, so nested blocks compose.
    pub fn with_deeper<F, R>(&mut self, func: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.depth += 1;
        let ret = func(self);
        self.depth -= 1;
        ret
    }

    /// Get the DQL string. Calling this method should be the final step in
    /// building a query, and thus this builder consumes the `self`.
    pub fn into_dql(self) -> String {
        self.dql
    }
}
