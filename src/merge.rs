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

//! The 2-ary hash-merge primitive driving both intermediate node
//! reconstruction and peak bagging.

use blake2::{
    digest::{Update, VariableOutput},
    Blake2bVar,
};

use crate::node::{Node, MAX_NODE_LEN};

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;

/// Default personalisation applied to every merge. Deployments that need a
/// different domain separation supply their own [`Merge`] implementation.
pub const DEFAULT_PERSONAL: &[u8] = b"mmr-verifier/v1";

/// A 2-ary hash-merge over two nodes, producing a single 32-byte node.
///
/// `merge` is used to reconstruct intermediate tree nodes; `merge_peaks` is
/// used to bag peaks. The default implementation uses the same
/// personalisation for both, but the two are distinguished so a deployment
/// can separate the domains if it wishes.
pub trait Merge {
    /// `H(lhs.bytes || rhs.bytes)`, 32 bytes wide.
    fn merge(&self, lhs: &Node<'_>, rhs: &Node<'_>) -> Node<'static>;

    /// Bag two peaks into one. Defaults to [`Merge::merge`].
    fn merge_peaks(&self, lhs: &Node<'_>, rhs: &Node<'_>) -> Node<'static> {
        self.merge(lhs, rhs)
    }
}

/// Default [`Merge`] implementation: 32-byte, personalised BLAKE2b.
pub struct Blake2bMerge {
    personal: &'static [u8],
}

impl Blake2bMerge {
    /// Build a merge primitive using [`DEFAULT_PERSONAL`].
    pub fn new() -> Self {
        Blake2bMerge {
            personal: DEFAULT_PERSONAL,
        }
    }

    /// Build a merge primitive with a caller-supplied personalisation,
    /// e.g. to pin down an alternative domain separation in tests.
    pub fn with_personalisation(personal: &'static [u8]) -> Self {
        Blake2bMerge { personal }
    }

    fn hash(&self, lhs: &[u8], rhs: &[u8]) -> Node<'static> {
        // Blake2bVar has no built-in personalisation knob; fold it into the
        // preimage instead so the output still depends on `self.personal`.
        let mut hasher = Blake2bVar::new(MAX_NODE_LEN).expect("32 is a valid Blake2b output size");
        hasher.update(self.personal);
        hasher.update(lhs);
        hasher.update(rhs);

        let mut out = [0u8; MAX_NODE_LEN];
        hasher
            .finalize_variable(&mut out)
            .expect("output buffer matches requested size");

        Node::inline(&out)
    }
}

impl Default for Blake2bMerge {
    fn default() -> Self {
        Self::new()
    }
}

impl Merge for Blake2bMerge {
    fn merge(&self, lhs: &Node<'_>, rhs: &Node<'_>) -> Node<'static> {
        self.hash(lhs.value(), rhs.value())
    }
}
