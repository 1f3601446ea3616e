/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use crate::array::MultiArray;
use crate::array::impl_multi_array;
use crate::element::Element;

/// An `I × J` row-major matrix. Rows are addressed by `BI..BI + I`
/// and columns by `BJ..BJ + J`; the column index varies fastest in
/// storage.
///
/// The element at `(i, j)` lives at offset
///
/// ```text
/// (i − BI) × J + (j − BJ) = rebase + i × J + j      rebase = −(BI × J + BJ)
/// ```
///
/// A 32 × 32 grid centred on the origin:
///
/// ```
/// # use multi_array::Matrix;
/// # use multi_array::MultiArray;
/// type Grid = Matrix<i32, 32, 32, -16, -16>;
///
/// assert_eq!(Grid::LAYOUT.offset_of([-16, -16]), 0);
/// assert_eq!(Grid::LAYOUT.offset_of([0, 0]), 16 * 32 + 16);
/// assert_eq!(Grid::LAYOUT.offset_of([15, 15]), 1023);
///
/// let mut g = Grid::default();
/// *g.at_mut(0, 0) = 1;
/// assert_eq!(g.as_slice()[528], 1);
/// assert_eq!(*g.fat(0, 0), 1);
/// assert_eq!(g[[0, 0]], 1);
/// ```
#[derive(Clone, Copy)]
pub struct Matrix<T: Element, const I: usize, const J: usize, const BI: isize = 0, const BJ: isize = 0>
{
    data: [[T; J]; I],
}

impl_multi_array!(Matrix<T; I, J; BI, BJ>, rank = 2, storage = [[T; J]; I]);

impl<T: Element, const I: usize, const J: usize, const BI: isize, const BJ: isize>
    Matrix<T, I, J, BI, BJ>
{
    /// A matrix with every element set to `value`.
    pub const fn filled(value: T) -> Self {
        Self::assert_layout();
        Self {
            data: [[value; J]; I],
        }
    }

    pub const fn as_slice(&self) -> &[T] {
        self.data.as_flattened()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_flattened_mut()
    }

    /// The element at `(i, j)`. The coordinates are only
    /// range-checked in debug builds.
    #[inline]
    pub const fn at(&self, i: isize, j: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.offset_of([i, j])]
    }

    #[inline]
    pub fn at_mut(&mut self, i: isize, j: isize) -> &mut T {
        &mut self.as_mut_slice()[Self::LAYOUT.offset_of([i, j])]
    }

    /// The element at `(i, j)` of the buffer read back-to-front:
    /// `rat(BI, BJ)` is the last element.
    #[inline]
    pub const fn rat(&self, i: isize, j: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.reverse_offset_of([i, j])]
    }

    #[inline]
    pub fn rat_mut(&mut self, i: isize, j: isize) -> &mut T {
        &mut self.as_mut_slice()[Self::LAYOUT.reverse_offset_of([i, j])]
    }

    #[inline]
    pub const fn fat(&self, i: isize, j: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.offset_with(Self::REBASE, [i, j])]
    }

    #[inline]
    pub fn fat_mut(&mut self, i: isize, j: isize) -> &mut T {
        &mut self.as_mut_slice()[Self::LAYOUT.offset_with(Self::REBASE, [i, j])]
    }

    #[inline]
    pub const fn frat(&self, i: isize, j: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.reverse_offset_with(Self::REVERSE_REBASE, [i, j])]
    }

    #[inline]
    pub fn frat_mut(&mut self, i: isize, j: isize) -> &mut T {
        &mut self.as_mut_slice()[Self::LAYOUT.reverse_offset_with(Self::REVERSE_REBASE, [i, j])]
    }

    /// Row `i`, where `i` is a row coordinate in `BI..BI + I`.
    pub fn row(&self, i: isize) -> &[T; J] {
        &self.data[Self::LAYOUT.offset_of([i, BJ]) / J]
    }

    pub fn row_mut(&mut self, i: isize) -> &mut [T; J] {
        &mut self.data[Self::LAYOUT.offset_of([i, BJ]) / J]
    }
}
