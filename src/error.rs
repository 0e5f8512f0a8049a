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

//! Verifier errors.
//!
//! Every variant carries its wire-visible numeric code as its discriminant,
//! starting at 80 so the codes don't collide with whatever surrounding
//! system embeds this verifier.

use displaydoc::Display;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

/// First numeric code handed out to an [`Error`] variant.
pub const ERROR_CODE_BASE: u8 = 80;

/// A proof was rejected, or the supplied buffers were malformed.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Error {
    /// stack overflow or underflow
    InvalidStack = 80,
    /// unknown command byte
    InvalidCommand = 81,
    /// invalid proof
    InvalidProof = 82,
    /// unexpected end of proof stream
    ProofEof = 83,
    /// unexpected end of leaf stream
    LeafEof = 84,
    /// proof expects a leaf but the leaf stream is exhausted
    NoMoreLeafs = 85,
    /// proof expects a command but the command stream is exhausted
    NoMoreCommands = 86,
    /// truncated length-prefixed node
    NodeEof = 87,
}

impl Error {
    /// The wire-visible exit code for this error, matching [`ERROR_CODE_BASE`]
    /// plus the variant's position in declaration order.
    pub fn code(self) -> u8 {
        self as u8
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// `Result` specialised to [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
