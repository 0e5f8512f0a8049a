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

//! Merkle-Mountain-Range (MMR) inclusion proof verifier.
//!
//! This crate does not build or update an MMR, nor does it generate
//! proofs. It verifies one: given a claimed root, the total MMR size, a
//! sequence of leaves, and a compact command stream describing how to
//! reconstruct peaks and bag them into the root, [`verify`] decides
//! whether the claim holds.
//!
//! The verifier is a bounded stack machine (see [`stack`]) over a
//! command-driven loop (see [`verify`]); it performs no I/O, allocates no
//! heap memory, and is generic over the hash ([`merge::Merge`]) and the
//! stream readers ([`reader::ProofReader`], [`reader::LeafReader`]) so it
//! can run unmodified in `no_std`/embedded and on-chain contexts.

#![cfg_attr(not(feature = "std"), no_std)]

mod error;
mod merge;
mod node;
mod peaks;
mod position;
mod reader;
mod stack;
mod verify;

pub use error::{Error, Result, ERROR_CODE_BASE};
pub use merge::{Blake2bMerge, Merge, DEFAULT_PERSONAL};
pub use node::{Node, MAX_NODE_LEN};
pub use reader::{LeafReader, ProofReader, SliceLeafReader, SliceProofReader};
pub use stack::MMR_STACK_SIZE;
pub use verify::{verify, verify_slices};
