/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;
use std::ops::Range;

/// One dimension of a fixed-shape array: `extent` slots addressed by
/// the coordinates `base..base + extent`.
///
/// The base may be any integer, including a negative one, so a
/// 32-slot dimension can be addressed as `-16..16`:
///
/// ```
/// # use multi_array::Dim;
/// let d = Dim::new(32, -16);
/// assert!(d.contains(-16));
/// assert!(d.contains(15));
/// assert!(!d.contains(16));
/// assert_eq!(d.range(), -16..16);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dim {
    extent: usize,
    base: isize,
}

impl Dim {
    /// A dimension of `extent` slots whose first coordinate is `base`.
    ///
    /// No validation happens here; see [`crate::Layout::try_new`].
    pub const fn new(extent: usize, base: isize) -> Self {
        Self { extent, base }
    }

    /// The number of slots in this dimension.
    pub const fn extent(&self) -> usize {
        self.extent
    }

    /// The lowest valid coordinate.
    pub const fn base(&self) -> isize {
        self.base
    }

    /// One past the highest valid coordinate. Only meaningful for
    /// dimensions accepted by a [`crate::Layout`], which guarantees
    /// that the sum does not overflow.
    pub const fn upper(&self) -> isize {
        self.base.wrapping_add(self.extent as isize)
    }

    /// Whether `coord` lies in `base..base + extent`.
    pub const fn contains(&self, coord: isize) -> bool {
        // For `coord >= base` the true difference fits in a `usize`.
        coord >= self.base && (coord.wrapping_sub(self.base) as usize) < self.extent
    }

    /// The valid coordinates of this dimension.
    pub fn range(&self) -> Range<isize> {
        self.base..self.upper()
    }
}

impl From<(usize, isize)> for Dim {
    fn from((extent, base): (usize, isize)) -> Self {
        Dim::new(extent, base)
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.base, self.upper())
    }
}
