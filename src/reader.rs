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

//! Pull-style stream readers for the command/proof-node stream and the leaf
//! stream, plus the default in-memory, slice-backed implementations.

use core::convert::TryInto;

use crate::{error::Error, node::Node};

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;

/// Pull interface over the interleaved command/proof-node stream.
///
/// `read_command` and `read_proof_node` share a single cursor: a command 2
/// byte is immediately followed, on the wire, by the length-prefixed node it
/// pushes.
pub trait ProofReader<'a> {
    /// Return the next command byte, or `None` at a clean end of stream.
    fn read_command(&mut self) -> Option<u8>;

    /// Read a 2-byte little-endian length prefix followed by that many
    /// bytes, returning a node borrowed from the underlying buffer.
    fn read_proof_node(&mut self) -> Result<Node<'a>, Error>;
}

/// Pull interface over the leaf stream.
pub trait LeafReader<'a> {
    /// Read one `(position, payload)` leaf record.
    ///
    /// Returns `Ok(None)` when the stream is already exhausted before the
    /// position prefix (a clean end of stream).
    fn read_leaf(&mut self) -> Result<Option<(u64, Node<'a>)>, Error>;
}

/// Default, dependency-free `ProofReader` over a byte slice.
pub struct SliceProofReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SliceProofReader<'a> {
    /// Build a reader cursor over `buf`, starting at the front.
    pub fn new(buf: &'a [u8]) -> Self {
        SliceProofReader { buf, pos: 0 }
    }

    /// `true` once every byte of `buf` has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.buf.len() - self.pos < n {
            return None;
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Some(slice)
    }
}

impl<'a> ProofReader<'a> for SliceProofReader<'a> {
    fn read_command(&mut self) -> Option<u8> {
        let byte = *self.buf.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn read_proof_node(&mut self) -> Result<Node<'a>, Error> {
        let len_bytes = self.take(2).ok_or(Error::NodeEof)?;
        let len = u16::from_le_bytes([len_bytes[0], len_bytes[1]]) as usize;
        let bytes = self.take(len).ok_or(Error::NodeEof)?;

        Ok(Node::borrowed(bytes))
    }
}

/// Default, dependency-free `LeafReader` over a byte slice.
pub struct SliceLeafReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SliceLeafReader<'a> {
    /// Build a reader cursor over `buf`, starting at the front.
    pub fn new(buf: &'a [u8]) -> Self {
        SliceLeafReader { buf, pos: 0 }
    }

    /// `true` once every byte of `buf` has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.buf.len() - self.pos < n {
            return None;
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Some(slice)
    }
}

impl<'a> LeafReader<'a> for SliceLeafReader<'a> {
    fn read_leaf(&mut self) -> Result<Option<(u64, Node<'a>)>, Error> {
        if self.is_empty() {
            return Ok(None);
        }

        let pos_bytes = self.take(8).ok_or(Error::LeafEof)?;
        let position = u64::from_le_bytes(pos_bytes.try_into().expect("8 bytes"));

        let len_bytes = self.take(2).ok_or(Error::NodeEof)?;
        let len = u16::from_le_bytes([len_bytes[0], len_bytes[1]]) as usize;
        let payload = self.take(len).ok_or(Error::NodeEof)?;

        Ok(Some((position, Node::borrowed(payload))))
    }
}
