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

//! The verification VM: a command-driven stack machine that consumes
//! leaves and proof nodes, reconstructs intermediate nodes, identifies
//! peaks and bags them into a root.

use crate::{
    error::Error,
    merge::{Blake2bMerge, Merge},
    peaks::PeakWalker,
    position,
    reader::{LeafReader, ProofReader, SliceLeafReader, SliceProofReader},
    stack::{Kind, Stack, StackEntry},
};

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;

const CMD_PUSH_LEAF: u8 = 1;
const CMD_PUSH_PROOF_NODE: u8 = 2;
const CMD_MERGE: u8 = 3;
const CMD_BAG_PEAKS: u8 = 4;
const CMD_MARK_PEAK: u8 = 5;

/// Verify an MMR inclusion proof against `root`.
///
/// `proof` drives the command/proof-node stream, `leaves` drives the leaf
/// stream, and `merge` supplies the hash-merge primitive. Returns `Ok(())`
/// when the proof is accepted, or the first [`Error`] encountered
/// otherwise.
pub fn verify<'p, 'l, P, L, M>(
    root: &[u8],
    mmr_size: u64,
    mut proof: P,
    mut leaves: L,
    merge: &M,
) -> Result<(), Error>
where
    P: ProofReader<'p>,
    L: LeafReader<'l>,
    M: Merge,
{
    if mmr_size == 0 {
        return Err(Error::InvalidProof);
    }

    let mut stack: Stack = Stack::new();
    let mut peak_walker = PeakWalker::new(mmr_size);
    let mut last_leaf_position: Option<u64> = None;

    loop {
        let command = match proof.read_command() {
            Some(command) => command,
            None => break,
        };

        match command {
            CMD_PUSH_LEAF => {
                push_leaf(&mut stack, &mut leaves, mmr_size, &mut last_leaf_position)?
            }
            CMD_PUSH_PROOF_NODE => {
                let node = proof.read_proof_node()?;
                stack.push(StackEntry::proof(node))?;
            }
            CMD_MERGE => merge_top(&mut stack, merge)?,
            CMD_BAG_PEAKS => bag_peaks(&mut stack, merge)?,
            CMD_MARK_PEAK => mark_peak(&mut stack, &mut peak_walker)?,
            _ => return Err(Error::InvalidCommand),
        }
    }

    let sole = *stack.sole_entry()?;

    match leaves.read_leaf()? {
        None => {}
        Some(_) => return Err(Error::InvalidProof),
    }

    if sole.node.value() != root {
        return Err(Error::InvalidProof);
    }

    Ok(())
}

fn push_leaf<'l, L>(
    stack: &mut Stack<'l>,
    leaves: &mut L,
    mmr_size: u64,
    last_leaf_position: &mut Option<u64>,
) -> Result<(), Error>
where
    L: LeafReader<'l>,
{
    let (position, node) = leaves.read_leaf()?.ok_or(Error::NoMoreLeafs)?;

    if position >= mmr_size {
        return Err(Error::InvalidProof);
    }

    if position::height_in_tree(position) != 0 {
        return Err(Error::InvalidProof);
    }

    if let Some(last) = *last_leaf_position {
        if position <= last {
            return Err(Error::InvalidProof);
        }
    }

    stack.push(StackEntry::node(node, position, 0))?;
    *last_leaf_position = Some(position);

    Ok(())
}

fn merge_top<'a, M: Merge>(stack: &mut Stack<'a>, merge: &M) -> Result<(), Error> {
    stack.require(2)?;

    let top = *stack.peek(0)?;
    let second = *stack.peek(1)?;

    let (node_entry, sibling_entry) = if second.is_proof() {
        (top, second)
    } else {
        (second, top)
    };

    let h = node_entry.height;
    let pos = node_entry.position;
    let next_height = position::height_in_tree(pos + 1);

    let (sib, parent, merged) = if next_height > h {
        // `pos` is a right child.
        let sib = pos - position::sibling_offset(h);
        let parent = pos + 1;
        (sib, parent, merge.merge(&sibling_entry.node, &node_entry.node))
    } else {
        // `pos` is a left child.
        let sib = pos + position::sibling_offset(h);
        let parent = pos + position::parent_offset(h);
        (sib, parent, merge.merge(&node_entry.node, &sibling_entry.node))
    };

    if sibling_entry.kind == Kind::Node && sibling_entry.position != sib {
        return Err(Error::InvalidProof);
    }

    stack.replace_top(2, StackEntry::node(merged, parent, h + 1));

    Ok(())
}

fn bag_peaks<'a, M: Merge>(stack: &mut Stack<'a>, merge: &M) -> Result<(), Error> {
    stack.require(2)?;

    let top = *stack.peek(0)?;
    let second = *stack.peek(1)?;

    if !top.is_peak() || !second.is_peak() {
        return Err(Error::InvalidProof);
    }

    let bagged = merge.merge_peaks(&top.node, &second.node);
    let entry = StackEntry {
        kind: Kind::Peak,
        node: bagged,
        position: 0,
        height: 0,
    };

    stack.replace_top(2, entry);

    Ok(())
}

fn mark_peak<'a>(stack: &mut Stack<'a>, peak_walker: &mut PeakWalker) -> Result<(), Error> {
    stack.require(1)?;

    let top = *stack.peek(0)?;

    if top.is_proof() {
        stack.replace_top(1, StackEntry { kind: Kind::Peak, ..top });
        return Ok(());
    }

    loop {
        match peak_walker.position() {
            Some(expected) if expected == top.position => break,
            Some(_) => peak_walker.advance(),
            None => return Err(Error::InvalidProof),
        }
    }

    peak_walker.advance();

    stack.replace_top(1, StackEntry { kind: Kind::Peak, ..top });

    Ok(())
}

/// Verify a proof carried as plain byte slices, using the default
/// slice-backed readers and the default BLAKE2b merge primitive.
pub fn verify_slices(
    root: &[u8],
    mmr_size: u64,
    proof_bytes: &[u8],
    leaf_bytes: &[u8],
) -> Result<(), Error> {
    let proof = SliceProofReader::new(proof_bytes);
    let leaves = SliceLeafReader::new(leaf_bytes);
    let merge = Blake2bMerge::new();

    verify(root, mmr_size, proof, leaves, &merge)
}
