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

/// An `I × J × K` array stored plane by plane, row by row; `k`
/// varies fastest.
///
/// ```
/// # use multi_array::Cube;
/// # use multi_array::MultiArray;
/// type Box3 = Cube<u8, 2, 3, 4, 1, -1, 0>;
///
/// assert_eq!(Box3::LAYOUT.strides(), &[12, 4, 1]);
/// assert_eq!(Box3::REBASE, -(12 - 4));
///
/// let mut c = Box3::default();
/// *c.at_mut(2, 1, 3) = 9;
/// assert_eq!(c.as_slice()[23], 9);
/// assert_eq!(*c.rat(1, -1, 0), 9);
/// ```
#[derive(Clone, Copy)]
pub struct Cube<
    T: Element,
    const I: usize,
    const J: usize,
    const K: usize,
    const BI: isize = 0,
    const BJ: isize = 0,
    const BK: isize = 0,
> {
    data: [[[T; K]; J]; I],
}

impl_multi_array!(Cube<T; I, J, K; BI, BJ, BK>, rank = 3, storage = [[[T; K]; J]; I]);

impl<
    T: Element,
    const I: usize,
    const J: usize,
    const K: usize,
    const BI: isize,
    const BJ: isize,
    const BK: isize,
> Cube<T, I, J, K, BI, BJ, BK>
{
    pub const fn filled(value: T) -> Self {
        Self::assert_layout();
        Self {
            data: [[[value; K]; J]; I],
        }
    }

    pub const fn as_slice(&self) -> &[T] {
        self.data.as_flattened().as_flattened()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_flattened_mut().as_flattened_mut()
    }

    #[inline]
    pub const fn at(&self, i: isize, j: isize, k: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.offset_of([i, j, k])]
    }

    #[inline]
    pub fn at_mut(&mut self, i: isize, j: isize, k: isize) -> &mut T {
        &mut self.as_mut_slice()[Self::LAYOUT.offset_of([i, j, k])]
    }

    #[inline]
    pub const fn rat(&self, i: isize, j: isize, k: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.reverse_offset_of([i, j, k])]
    }

    #[inline]
    pub fn rat_mut(&mut self, i: isize, j: isize, k: isize) -> &mut T {
        &mut self.as_mut_slice()[Self::LAYOUT.reverse_offset_of([i, j, k])]
    }

    #[inline]
    pub const fn fat(&self, i: isize, j: isize, k: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.offset_with(Self::REBASE, [i, j, k])]
    }

    #[inline]
    pub fn fat_mut(&mut self, i: isize, j: isize, k: isize) -> &mut T {
        &mut self.as_mut_slice()[Self::LAYOUT.offset_with(Self::REBASE, [i, j, k])]
    }

    #[inline]
    pub const fn frat(&self, i: isize, j: isize, k: isize) -> &T {
        &self.as_slice()[Self::LAYOUT.reverse_offset_with(Self::REVERSE_REBASE, [i, j, k])]
    }

    #[inline]
    pub fn frat_mut(&mut self, i: isize, j: isize, k: isize) -> &mut T {
        let offset = Self::LAYOUT.reverse_offset_with(Self::REVERSE_REBASE, [i, j, k]);
        &mut self.as_mut_slice()[offset]
    }

    /// The `J × K` plane at `i`.
    pub fn plane(&self, i: isize) -> &[[T; K]; J] {
        &self.data[Self::LAYOUT.offset_of([i, BJ, BK]) / (J * K)]
    }

    pub fn plane_mut(&mut self, i: isize) -> &mut [[T; K]; J] {
        &mut self.data[Self::LAYOUT.offset_of([i, BJ, BK]) / (J * K)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type C = Cube<i32, 3, 4, 5, -1, 2, -10>;

    fn numbered() -> C {
        C::from_fn(|[i, j, k]| (i * 10_000 + j * 100 + k) as i32)
    }

    #[test]
    fn test_addressing() {
        let c = numbered();
        assert_eq!(C::REBASE, 20 - 2 * 5 + 10);
        assert_eq!(C::REVERSE_REBASE, 59 - C::REBASE);
        assert_eq!(*c.at(-1, 2, -10), -10_000 + 200 - 10);
        assert_eq!(c.as_slice()[59], *c.at(1, 5, -6));
        assert_eq!(*c.rat(-1, 2, -10), *c.at(1, 5, -6));
        assert_eq!(*c.frat(1, 5, -6), *c.at(-1, 2, -10));
        for (coord, value) in c.indexed_iter() {
            let [i, j, k] = coord;
            assert_eq!(c.at(i, j, k), value);
            assert_eq!(c.fat(i, j, k), value);
            assert_eq!(c.rat(i, j, k), c.frat(i, j, k));
        }
    }

    #[test]
    fn test_writes_through_every_mode() {
        let mut c = Cube::<u16, 2, 2, 2>::default();
        *c.at_mut(0, 0, 1) = 1;
        *c.fat_mut(0, 1, 0) = 2;
        *c.rat_mut(1, 0, 0) = 3;
        *c.frat_mut(0, 0, 0) = 7;
        assert_eq!(c.as_slice(), &[0, 1, 2, 3, 0, 0, 0, 7]);
    }

    #[test]
    fn test_planes() {
        let mut c = numbered();
        assert_eq!(c.plane(0)[0][0], *c.at(0, 2, -10));
        assert_eq!(c.plane(1)[3][4], *c.at(1, 5, -6));
        c.plane_mut(-1)[1][2] = 42;
        assert_eq!(*c.at(-1, 3, -8), 42);
    }

    #[test]
    fn test_introspection() {
        assert_eq!(C::extents(), [3, 4, 5]);
        assert_eq!(C::bases(), [-1, 2, -10]);
        assert_eq!(C::size(), 60);
        assert_eq!(C::rank(), 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "below its dimension's base")]
    fn test_rat_below_base() {
        let c = C::default();
        let _ = c.rat(0, 1, -10);
    }
}
