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

//! End-to-end tests against the public API: build small proofs by hand (the
//! way a real prover would lay out the wire format) and feed them to
//! [`mmr_verifier::verify_slices`] / [`mmr_verifier::verify`].

use mmr_verifier::{verify, verify_slices, Blake2bMerge, Error, LeafReader, Merge, Node, ProofReader};

fn leaf(label: &[u8]) -> [u8; 32] {
    let merge = Blake2bMerge::new();
    let n = merge.merge(&Node::Borrowed(label), &Node::Borrowed(label));
    let mut buf = [0u8; 32];
    buf.copy_from_slice(n.value());
    buf
}

fn leaf_record(position: u64, payload: &[u8; 32], out: &mut Vec<u8>) {
    out.extend_from_slice(&position.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    out.extend_from_slice(payload);
}

fn proof_node(payload: &[u8; 32], out: &mut Vec<u8>) {
    out.push(2);
    out.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    out.extend_from_slice(payload);
}

#[test]
fn single_leaf_single_tree() {
    // mmr_size=1, leaves=[(0,"a")], commands=[1,5]
    let a = leaf(b"a");

    let proof = vec![1u8, 5];
    let mut leaves = Vec::new();
    leaf_record(0, &a, &mut leaves);

    assert_eq!(verify_slices(&a, 1, &proof, &leaves), Ok(()));
}

#[test]
fn two_leaves_one_peak() {
    // mmr_size=3, leaves=[(0,"a"),(1,"b")], commands=[1,1,3,5]
    let a = leaf(b"a");
    let b = leaf(b"b");

    let merge = Blake2bMerge::new();
    let root = merge.merge(&Node::Borrowed(&a), &Node::Borrowed(&b));

    let proof = vec![1u8, 1, 3, 5];
    let mut leaves = Vec::new();
    leaf_record(0, &a, &mut leaves);
    leaf_record(1, &b, &mut leaves);

    assert_eq!(verify_slices(root.value(), 3, &proof, &leaves), Ok(()));
}

#[test]
fn three_leaves_two_peaks_bagging() {
    // mmr_size=4, leaves=[(0,"a"),(1,"b"),(3,"c")], commands=[1,1,3,5,1,5,4]
    let a = leaf(b"a");
    let b = leaf(b"b");
    let c = leaf(b"c");

    let merge = Blake2bMerge::new();
    let ab = merge.merge(&Node::Borrowed(&a), &Node::Borrowed(&b));
    let root = merge.merge_peaks(&Node::Borrowed(&c), &ab);

    let mut proof = vec![1u8, 1, 3, 5, 1, 5, 4];
    let mut leaves = Vec::new();
    leaf_record(0, &a, &mut leaves);
    leaf_record(1, &b, &mut leaves);
    leaf_record(3, &c, &mut leaves);

    assert_eq!(verify_slices(root.value(), 4, &proof, &leaves), Ok(()));

    // sanity: tampering the proof stream is rejected
    proof[0] = 9;
    assert_eq!(
        verify_slices(root.value(), 4, &proof, &leaves),
        Err(Error::InvalidCommand)
    );
}

#[test]
fn selective_proof_with_proof_nodes() {
    // mmr_size=7, four leaves (a,b,c,d); prove only leaf "c" at position 3
    // using the sibling hashes H(a,b) and hash(d) as supplied proof nodes.
    let a = leaf(b"a");
    let b = leaf(b"b");
    let c = leaf(b"c");
    let d = leaf(b"d");

    let merge = Blake2bMerge::new();
    let ab = merge.merge(&Node::Borrowed(&a), &Node::Borrowed(&b));
    let cd = merge.merge(&Node::Borrowed(&c), &Node::Borrowed(&d));
    let root = merge.merge(&ab, &cd);

    // command 1 pushes leaf "c"; command 2 pushes hash(d), command 3 merges
    // (c is a left child of the (c,d) pair); command 2 pushes H(a,b), command
    // 3 merges again (the (c,d) subtree is the right child of the root);
    // command 5 marks the lone result as the single peak.
    let mut ab_bytes = [0u8; 32];
    ab_bytes.copy_from_slice(ab.value());

    let mut proof = vec![1u8];
    proof_node(&d, &mut proof);
    proof.push(3);
    proof_node(&ab_bytes, &mut proof);
    proof.push(3);
    proof.push(5);

    let mut leaves = Vec::new();
    leaf_record(3, &c, &mut leaves);

    assert_eq!(verify_slices(root.value(), 7, &proof, &leaves), Ok(()));
}

#[test]
fn tampered_proof_node_is_rejected() {
    let a = leaf(b"a");
    let b = leaf(b"b");

    let merge = Blake2bMerge::new();
    let root = merge.merge(&Node::Borrowed(&a), &Node::Borrowed(&b));

    let mut tampered_b = b;
    tampered_b[0] ^= 0xff;

    let proof = vec![1u8, 1, 3, 5];
    let mut leaves = Vec::new();
    leaf_record(0, &a, &mut leaves);
    leaf_record(1, &tampered_b, &mut leaves);

    assert_eq!(verify_slices(root.value(), 3, &proof, &leaves), Err(Error::InvalidProof));
}

#[test]
fn out_of_order_leaves_rejected() {
    let a = leaf(b"a");
    let b = leaf(b"b");

    let proof = vec![1u8, 1, 3, 5];
    let mut leaves = Vec::new();
    leaf_record(1, &b, &mut leaves);
    leaf_record(0, &a, &mut leaves);

    assert_eq!(
        verify_slices(&[0u8; 32], 3, &proof, &leaves),
        Err(Error::InvalidProof)
    );
}

#[test]
fn empty_mmr_is_rejected() {
    assert_eq!(verify_slices(&[0u8; 32], 0, &[], &[]), Err(Error::InvalidProof));
}

/// A minimal custom `ProofReader`/`LeafReader` pair, demonstrating that
/// `verify` is generic over the reader traits rather than tied to the
/// default slice-backed readers.
struct OneLeafReader<'a> {
    leaf: Option<(u64, &'a [u8])>,
}

impl<'a> LeafReader<'a> for OneLeafReader<'a> {
    fn read_leaf(&mut self) -> Result<Option<(u64, Node<'a>)>, Error> {
        match self.leaf.take() {
            Some((pos, bytes)) => Ok(Some((pos, Node::Borrowed(bytes)))),
            None => Ok(None),
        }
    }
}

struct FixedCommandReader {
    commands: std::vec::IntoIter<u8>,
}

impl<'a> ProofReader<'a> for FixedCommandReader {
    fn read_command(&mut self) -> Option<u8> {
        self.commands.next()
    }

    fn read_proof_node(&mut self) -> Result<Node<'a>, Error> {
        unreachable!("this scenario never pushes a proof node")
    }
}

#[test]
fn custom_readers_work_with_generic_verify() {
    let a = leaf(b"a");

    let proof = FixedCommandReader {
        commands: vec![1u8, 5].into_iter(),
    };
    let leaves = OneLeafReader { leaf: Some((0, &a)) };
    let merge = Blake2bMerge::new();

    assert_eq!(verify(&a, 1, proof, leaves, &merge), Ok(()));
}
