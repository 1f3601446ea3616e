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

/// A four-dimensional `I × J × K × L` array; `l` varies fastest.
#[derive(Clone, Copy)]
pub struct HyperCube<
    T: Element,
    const I: usize,
    const J: usize,
    const K: usize,
    const L: usize,
    const BI: isize = 0,
    const BJ: isize = 0,
    const BK: isize = 0,
    const BL: isize = 0,
> {
    data: [[[[T; L]; K]; J]; I],
}

impl_multi_array!(
    HyperCube<T; I, J, K, L; BI, BJ, BK, BL>,
    rank = 4,
    storage = [[[[T; L]; K]; J]; I],
);

impl<
    T: Element,
    const I: usize,
    const J: usize,
    const K: usize,
    const L: usize,
    const BI: isize,
    const BJ: isize,
    const BK: isize,
    const BL: isize,
> HyperCube<T, I, J, K, L, BI, BJ, BK, BL>
{
    pub const fn filled(value: T) -> Self {
        Self::assert_layout();
        Self {
            data: [[[[value; L]; K]; J]; I],
        }
    }

    pub const fn as_slice(&self) -> &[T] {
        self.data.as_flattened().as_flattened().as_flattened()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
            .as_flattened_mut()
            .as_flattened_mut()
            .as_flattened_mut()
    }

    #[inline]
    pub const fn at(&self, i: isize, j: isize, k: isize, l: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.offset_of([i, j, k, l])]
    }

    #[inline]
    pub fn at_mut(&mut self, i: isize, j: isize, k: isize, l: isize) -> &mut T {
        &mut self.as_mut_slice()[Self::LAYOUT.offset_of([i, j, k, l])]
    }

    #[inline]
    pub const fn rat(&self, i: isize, j: isize, k: isize, l: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.reverse_offset_of([i, j, k, l])]
    }

    #[inline]
    pub fn rat_mut(&mut self, i: isize, j: isize, k: isize, l: isize) -> &mut T {
        &mut self.as_mut_slice()[Self::LAYOUT.reverse_offset_of([i, j, k, l])]
    }

    #[inline]
    pub const fn fat(&self, i: isize, j: isize, k: isize, l: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.offset_with(Self::REBASE, [i, j, k, l])]
    }

    #[inline]
    pub fn fat_mut(&mut self, i: isize, j: isize, k: isize, l: isize) -> &mut T {
        let offset = Self::LAYOUT.offset_with(Self::REBASE, [i, j, k, l]);
        &mut self.as_mut_slice()[offset]
    }

    #[inline]
    pub const fn frat(&self, i: isize, j: isize, k: isize, l: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.reverse_offset_with(Self::REVERSE_REBASE, [i, j, k, l])]
    }

    #[inline]
    pub fn frat_mut(&mut self, i: isize, j: isize, k: isize, l: isize) -> &mut T {
        let offset = Self::LAYOUT.reverse_offset_with(Self::REVERSE_REBASE, [i, j, k, l]);
        &mut self.as_mut_slice()[offset]
    }
}
