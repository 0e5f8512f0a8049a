// Copyright (C) 2021 Andreas Doerr
// SPDX-License-Identifier: Apache-2.0

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// 	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bounded, compile-time-sized stack driving the verification VM.
//!
//! No heap allocation: the stack is a fixed-size array, sized generously
//! enough for any MMR with up to roughly 2^256 nodes.

use crate::{error::Error, node::Node};

#[cfg(test)]
#[path = "stack_tests.rs"]
mod tests;

/// Default stack capacity: worst-case tree height plus a small headroom for
/// in-flight proof nodes.
pub const MMR_STACK_SIZE: usize = 257;

/// What a [`StackEntry`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    /// A reconstructed subtree root with a known position and height.
    Node,
    /// A sibling hash supplied by the proof; position/height unknown.
    Proof,
    /// A finalized peak root.
    Peak,
}

/// One entry on the verifier's stack.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StackEntry<'a> {
    pub(crate) kind: Kind,
    pub(crate) node: Node<'a>,
    pub(crate) position: u64,
    pub(crate) height: u64,
}

impl<'a> StackEntry<'a> {
    pub(crate) fn node(node: Node<'a>, position: u64, height: u64) -> Self {
        StackEntry {
            kind: Kind::Node,
            node,
            position,
            height,
        }
    }

    pub(crate) fn proof(node: Node<'a>) -> Self {
        StackEntry {
            kind: Kind::Proof,
            node,
            position: 0,
            height: 0,
        }
    }

    pub(crate) fn is_proof(&self) -> bool {
        self.kind == Kind::Proof
    }

    pub(crate) fn is_peak(&self) -> bool {
        self.kind == Kind::Peak
    }
}

/// Fixed-capacity LIFO stack of [`StackEntry`] values.
pub(crate) struct Stack<'a> {
    entries: [Option<StackEntry<'a>>; MMR_STACK_SIZE],
    top: usize,
}

impl<'a> Stack<'a> {
    pub(crate) fn new() -> Self {
        Stack {
            entries: [None; MMR_STACK_SIZE],
            top: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.top
    }

    pub(crate) fn push(&mut self, entry: StackEntry<'a>) -> Result<(), Error> {
        if self.top >= MMR_STACK_SIZE {
            return Err(Error::InvalidStack);
        }

        self.entries[self.top] = Some(entry);
        self.top += 1;

        Ok(())
    }

    /// Replace the top `n` entries with `entry`. `n` must be `>= 1` and
    /// `<= self.len()`.
    pub(crate) fn replace_top(&mut self, n: usize, entry: StackEntry<'a>) {
        debug_assert!(n >= 1 && n <= self.top);

        self.top -= n;
        self.entries[self.top] = Some(entry);
        self.top += 1;
    }

    pub(crate) fn peek(&self, from_top: usize) -> Result<&StackEntry<'a>, Error> {
        if from_top >= self.top {
            return Err(Error::InvalidStack);
        }

        self.entries[self.top - 1 - from_top]
            .as_ref()
            .ok_or(Error::InvalidStack)
    }

    pub(crate) fn require(&self, n: usize) -> Result<(), Error> {
        if self.top < n {
            return Err(Error::InvalidStack);
        }
        Ok(())
    }

    /// The sole remaining entry, if the stack holds exactly one.
    pub(crate) fn sole_entry(&self) -> Result<&StackEntry<'a>, Error> {
        if self.top != 1 {
            return Err(Error::InvalidStack);
        }
        self.peek(0)
    }
}
