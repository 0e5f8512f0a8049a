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

//! Uniform view over an owned, inline hash buffer and a borrowed byte slice.
//!
//! Merge results always live in the inline variant; values pulled off the
//! proof or leaf stream are borrowed from the caller's buffer for the
//! lifetime of a single [`crate::verify`] call.

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;

/// Maximum length of an inline node, i.e. the width of a merge output.
pub const MAX_NODE_LEN: usize = 32;

/// A hash-node: either an owned, inline buffer (the output of a merge), or a
/// slice borrowed from an external proof/leaf buffer.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    /// Freshly computed hash, owned inline.
    Inline([u8; MAX_NODE_LEN], u8),
    /// A hash read from an external buffer.
    Borrowed(&'a [u8]),
}

impl<'a> Node<'a> {
    /// Build an inline node from a merge result. `bytes` must be at most
    /// [`MAX_NODE_LEN`] long.
    pub(crate) fn inline(bytes: &[u8]) -> Node<'static> {
        debug_assert!(bytes.len() <= MAX_NODE_LEN);

        let mut buf = [0u8; MAX_NODE_LEN];
        let len = bytes.len().min(MAX_NODE_LEN);
        buf[..len].copy_from_slice(&bytes[..len]);

        Node::Inline(buf, len as u8)
    }

    /// Borrow a node from an external buffer.
    pub(crate) fn borrowed(bytes: &'a [u8]) -> Node<'a> {
        Node::Borrowed(bytes)
    }

    /// Read-only view of this node's bytes.
    pub fn value(&self) -> &[u8] {
        match self {
            Node::Inline(buf, len) => &buf[..*len as usize],
            Node::Borrowed(bytes) => bytes,
        }
    }

    /// Length, in bytes, of this node.
    pub fn length(&self) -> usize {
        self.value().len()
    }
}

impl<'a> PartialEq for Node<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl<'a> Eq for Node<'a> {}

impl<'a> AsRef<[u8]> for Node<'a> {
    fn as_ref(&self) -> &[u8] {
        self.value()
    }
}
