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

//! Pure MMR position arithmetic: index <-> height/peak computations.
//!
//! Positions are 0-based, depth-first post-order indices into the MMR's flat
//! node layout (as opposed to [`crate::node`], which never sees a position).

#[cfg(test)]
#[path = "position_tests.rs"]
mod tests;

/// `true` iff `x` is non-zero and every bit within its bit-length is set,
/// i.e. `x` is of the form `2^n - 1` for some `n >= 1`.
pub(crate) fn all_ones(x: u64) -> bool {
    x != 0 && x.count_zeros() == x.leading_zeros()
}

/// Distance from a node at height `h` to its parent.
pub(crate) fn parent_offset(h: u64) -> u64 {
    1u64 << (h + 1)
}

/// Distance between siblings at height `h`.
pub(crate) fn sibling_offset(h: u64) -> u64 {
    (1u64 << (h + 1)) - 1
}

/// Position of the peak rooting a perfect subtree of height `h`.
pub(crate) fn peak_pos(h: u64) -> u64 {
    (1u64 << (h + 1)) - 2
}

/// Height of the perfect subtree rooted at position `pos`.
///
/// Adds one to `pos` and repeatedly "jumps left" (subtracts `msb - 1`) until
/// the value is all-ones; the height is then `bit_length - 1`.
pub(crate) fn height_in_tree(pos: u64) -> u64 {
    let mut x = pos + 1;

    while !all_ones(x) {
        let bit_length = 64 - x.leading_zeros();
        let msb = 1u64 << (bit_length - 1);
        x -= msb - 1;
    }

    (64 - x.leading_zeros() - 1) as u64
}

/// Height and position of the leftmost (and tallest) peak for an MMR with
/// `mmr_size` nodes.
///
/// Callers must not pass `mmr_size == 0`.
pub(crate) fn left_peak(mmr_size: u64) -> (u64, u64) {
    let mut height = 0u64;
    let mut pos = peak_pos(height);
    let mut prev_pos = pos;

    while pos < mmr_size {
        height += 1;
        prev_pos = pos;
        pos = peak_pos(height);
    }

    (height - 1, prev_pos)
}

/// Given the current peak `(height, pos)`, return the next peak to the
/// right, or `None` if `pos` is the rightmost peak.
pub(crate) fn right_peak(mut height: u64, mut pos: u64, mmr_size: u64) -> Option<(u64, u64)> {
    pos += sibling_offset(height);

    while pos > mmr_size - 1 {
        if height == 0 {
            return None;
        }
        height -= 1;
        pos -= parent_offset(height);
    }

    Some((height, pos))
}
