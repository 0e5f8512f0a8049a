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

//! Cursor enumerating the expected peak positions of an MMR, left (tallest)
//! to right (shortest).

use crate::position;

#[cfg(test)]
#[path = "peaks_tests.rs"]
mod tests;

/// Walks the expected peak positions of an MMR with a fixed `mmr_size`, from
/// the leftmost (tallest) peak to the rightmost (shortest).
pub(crate) struct PeakWalker {
    position: u64,
    height: u64,
    present: bool,
    mmr_size: u64,
}

impl PeakWalker {
    /// Build a walker starting at the leftmost peak. `mmr_size` must be
    /// non-zero.
    pub(crate) fn new(mmr_size: u64) -> Self {
        let (height, position) = position::left_peak(mmr_size);

        PeakWalker {
            position,
            height,
            present: true,
            mmr_size,
        }
    }

    /// Position of the currently expected peak, if any remain.
    pub(crate) fn position(&self) -> Option<u64> {
        self.present.then_some(self.position)
    }

    /// Advance to the next (strictly smaller) peak position.
    pub(crate) fn advance(&mut self) {
        if !self.present {
            return;
        }

        match position::right_peak(self.height, self.position, self.mmr_size) {
            Some((height, position)) => {
                self.height = height;
                self.position = position;
            }
            None => self.present = false,
        }
    }
}
