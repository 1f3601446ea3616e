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

/// A fixed-size array of `I` elements addressed by the coordinates
/// `BI..BI + I`.
///
/// ```
/// # use multi_array::Vector;
/// let v = Vector::<i32, 5>::new([10, 20, 30, 40, 50]);
/// assert_eq!(*v.at(0), 10);
/// assert_eq!(*v.rat(0), 50);
/// assert_eq!(*v.rat(4), 10);
///
/// let mut w = Vector::<u8, 4, -2>::default();
/// *w.at_mut(-2) = 1;
/// *w.fat_mut(1) = 4;
/// assert_eq!(w.as_slice(), &[1, 0, 0, 4]);
/// ```
#[derive(Clone, Copy)]
pub struct Vector<T: Element, const I: usize, const BI: isize = 0> {
    data: [T; I],
}

impl_multi_array!(Vector<T; I; BI>, rank = 1, storage = [T; I]);

impl<T: Element, const I: usize, const BI: isize> Vector<T, I, BI> {
    /// A vector with every element set to `value`.
    pub const fn filled(value: T) -> Self {
        Self::assert_layout();
        Self { data: [value; I] }
    }

    pub const fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// The element at `i`. `i` must be in `BI..BI + I`; this is
    /// only asserted in debug builds.
    #[inline]
    pub const fn at(&self, i: isize) -> &T {
        &self.data[Self::LAYOUT.offset_of([i])]
    }

    #[inline]
    pub fn at_mut(&mut self, i: isize) -> &mut T {
        &mut self.data[Self::LAYOUT.offset_of([i])]
    }

    /// The element at `i`, counting from the end: `rat(BI)` is the
    /// last element.
    #[inline]
    pub const fn rat(&self, i: isize) -> &T {
        &self.data[Self::LAYOUT.reverse_offset_of([i])]
    }

    #[inline]
    pub fn rat_mut(&mut self, i: isize) -> &mut T {
        &mut self.data[Self::LAYOUT.reverse_offset_of([i])]
    }

    /// [`Vector::at`] through the precomputed [`MultiArray::REBASE`].
    #[inline]
    pub const fn fat(&self, i: isize) -> &T {
        &self.data[Self::LAYOUT.offset_with(Self::REBASE, [i])]
    }

    #[inline]
    pub fn fat_mut(&mut self, i: isize) -> &mut T {
        &mut self.data[Self::LAYOUT.offset_with(Self::REBASE, [i])]
    }

    /// [`Vector::rat`] through the precomputed
    /// [`MultiArray::REVERSE_REBASE`].
    #[inline]
    pub const fn frat(&self, i: isize) -> &T {
        &self.data[Self::LAYOUT.reverse_offset_with(Self::REVERSE_REBASE, [i])]
    }

    #[inline]
    pub fn frat_mut(&mut self, i: isize) -> &mut T {
        &mut self.data[Self::LAYOUT.reverse_offset_with(Self::REVERSE_REBASE, [i])]
    }
}
