/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The addressing engine shared by every container arity.
//!
//! A [`Layout<N>`] describes a dense row-major array of `N`
//! dimensions, each with its own extent `Eₖ` and base `Bₖ`. A
//! coordinate `c` maps to the flat offset
//!
//! ```text
//! offset(c) = Σ (cₖ − Bₖ) × strideₖ        strideₖ = ∏(Eⱼ for j > k)
//! ```
//!
//! Regrouping pulls every base out of the sum:
//!
//! ```text
//! offset(c) = rebase + Σ cₖ × strideₖ       rebase = −Σ Bₖ × strideₖ
//! ```
//!
//! `rebase` depends only on the shape, so it is computed once and the
//! per-access work is a multiply-add chain. Reading the buffer
//! back-to-front gives the reverse offset
//!
//! ```text
//! reverse_offset(c) = (len − 1) − offset(c)
//!                   = reverse_rebase − Σ cₖ × strideₖ
//! reverse_rebase    = len − 1 − rebase
//! ```
//!
//! All offset arithmetic is done in `isize` with wrapping operations.
//! Wrapping arithmetic is exact whenever the true result is in range,
//! and a layout only exists if its element count fits in `isize`.

use std::fmt;
use std::iter::FusedIterator;

use crate::dim::Dim;

/// The type of error for layout operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LayoutError {
    #[error("dimension {dim} has zero extent")]
    ZeroExtent { dim: usize },

    #[error("dimension {dim}: base {base} + extent {extent} overflows")]
    BoundOverflow {
        dim: usize,
        base: isize,
        extent: usize,
    },

    #[error("element count does not fit in isize")]
    TooLarge,

    #[error("coordinate {coord} out of range {lower}..{upper} in dimension {dim}")]
    CoordinateOutOfRange {
        dim: usize,
        coord: isize,
        lower: isize,
        upper: isize,
    },

    #[error("offset {offset} out of range {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("length mismatch: expected {expected} elements, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}

/// The shape of a dense, row-major, `N`-dimensional array whose
/// dimensions may start at arbitrary coordinates.
///
/// ```
/// # use multi_array::Dim;
/// # use multi_array::Layout;
/// const L: Layout<2> = Layout::new([Dim::new(32, -16), Dim::new(32, -16)]);
/// assert_eq!(L.offset_of([-16, -16]), 0);
/// assert_eq!(L.offset_of([0, 0]), 16 * 32 + 16);
/// assert_eq!(L.offset_of([15, 15]), 1023);
/// assert_eq!(L.reverse_offset_of([15, 15]), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout<const N: usize> {
    dims: [Dim; N],
    strides: [isize; N],
    len: usize,
}

/// The dot product `Σ coordₖ × strideₖ` plus `rebase`. Every access
/// mode funnels through here.
#[inline(always)]
pub(crate) const fn linear<const N: usize>(
    rebase: isize,
    strides: &[isize; N],
    coord: &[isize; N],
) -> isize {
    let mut acc: isize = 0;
    let mut k = 0;
    while k < N {
        acc = acc.wrapping_add(coord[k].wrapping_mul(strides[k]));
        k += 1;
    }
    rebase.wrapping_add(acc)
}

impl<const N: usize> Layout<N> {
    /// Build a layout, panicking if it is invalid. Meant for constant
    /// contexts, where the panic becomes a compile error.
    pub const fn new(dims: [Dim; N]) -> Self {
        match Self::build(dims) {
            Ok(layout) => layout,
            Err(LayoutError::ZeroExtent { .. }) => panic!("layout has a zero extent"),
            Err(LayoutError::BoundOverflow { .. }) => {
                panic!("layout has a dimension whose upper bound overflows isize")
            }
            Err(_) => panic!("layout element count does not fit in isize"),
        }
    }

    /// Build a layout, validating that:
    ///   - every extent is at least 1,
    ///   - `base + extent` fits in `isize` for every dimension,
    ///   - the element count fits in `isize`.
    pub const fn try_new(dims: [Dim; N]) -> Result<Self, LayoutError> {
        Self::build(dims)
    }

    /// Build a layout from separate extent and base lists.
    pub fn from_parts(extents: [usize; N], bases: [isize; N]) -> Result<Self, LayoutError> {
        let mut dims = [Dim::new(0, 0); N];
        for (dim, (extent, base)) in dims.iter_mut().zip(extents.into_iter().zip(bases)) {
            *dim = Dim::new(extent, base);
        }
        Self::try_new(dims)
    }

    const fn build(dims: [Dim; N]) -> Result<Self, LayoutError> {
        let mut k = 0;
        while k < N {
            let dim = dims[k];
            if dim.extent() == 0 {
                return Err(LayoutError::ZeroExtent { dim: k });
            }
            if dim.extent() > isize::MAX as usize
                || dim.base().checked_add(dim.extent() as isize).is_none()
            {
                return Err(LayoutError::BoundOverflow {
                    dim: k,
                    base: dim.base(),
                    extent: dim.extent(),
                });
            }
            k += 1;
        }

        // Row-major: the last dimension varies fastest.
        let mut strides = [0isize; N];
        let mut len: usize = 1;
        let mut k = N;
        while k > 0 {
            k -= 1;
            strides[k] = len as isize;
            len = match len.checked_mul(dims[k].extent()) {
                Some(len) if len <= isize::MAX as usize => len,
                _ => return Err(LayoutError::TooLarge),
            };
        }

        Ok(Self { dims, strides, len })
    }

    /// The number of dimensions.
    pub const fn rank(&self) -> usize {
        N
    }

    pub const fn dims(&self) -> &[Dim; N] {
        &self.dims
    }

    /// The extent of each dimension.
    pub const fn extents(&self) -> [usize; N] {
        let mut extents = [0usize; N];
        let mut k = 0;
        while k < N {
            extents[k] = self.dims[k].extent();
            k += 1;
        }
        extents
    }

    /// The base (lowest coordinate) of each dimension.
    pub const fn bases(&self) -> [isize; N] {
        let mut bases = [0isize; N];
        let mut k = 0;
        while k < N {
            bases[k] = self.dims[k].base();
            k += 1;
        }
        bases
    }

    /// The distance in the flat buffer between neighbours along
    /// each dimension.
    pub const fn strides(&self) -> &[isize; N] {
        &self.strides
    }

    /// The total number of elements.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always false: every extent is at least 1.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The offset the all-zero coordinate would have; adding it to
    /// `Σ cₖ × strideₖ` yields `offset(c)`.
    pub const fn rebase(&self) -> isize {
        let mut rebase: isize = 0;
        let mut k = 0;
        while k < N {
            rebase = rebase.wrapping_sub(self.dims[k].base().wrapping_mul(self.strides[k]));
            k += 1;
        }
        rebase
    }

    /// `len − 1 − rebase`; subtracting `Σ cₖ × strideₖ` from it yields
    /// `reverse_offset(c)`.
    pub const fn reverse_rebase(&self) -> isize {
        (self.len as isize - 1).wrapping_sub(self.rebase())
    }

    /// Whether every coordinate lies in its dimension's range.
    pub const fn contains(&self, coord: [isize; N]) -> bool {
        let mut k = 0;
        while k < N {
            if !self.dims[k].contains(coord[k]) {
                return false;
            }
            k += 1;
        }
        true
    }

    /// Asserts, in debug builds only, that `coord` is in range.
    #[inline(always)]
    pub(crate) const fn debug_check(&self, coord: &[isize; N]) {
        if cfg!(debug_assertions) {
            let mut k = 0;
            while k < N {
                assert!(
                    coord[k] >= self.dims[k].base(),
                    "coordinate is below its dimension's base"
                );
                assert!(
                    coord[k] < self.dims[k].upper(),
                    "coordinate is past its dimension's upper bound"
                );
                k += 1;
            }
        }
    }

    /// The flat offset of `coord`, recomputing the rebase. The
    /// coordinate is only range-checked in debug builds.
    #[inline]
    pub const fn offset_of(&self, coord: [isize; N]) -> usize {
        self.offset_with(self.rebase(), coord)
    }

    /// The flat offset of `coord` counted from the end of the buffer.
    #[inline]
    pub const fn reverse_offset_of(&self, coord: [isize; N]) -> usize {
        self.reverse_offset_with(self.reverse_rebase(), coord)
    }

    /// [`Layout::offset_of`] with a rebase the caller already holds.
    #[inline(always)]
    pub(crate) const fn offset_with(&self, rebase: isize, coord: [isize; N]) -> usize {
        self.debug_check(&coord);
        linear(rebase, &self.strides, &coord) as usize
    }

    /// [`Layout::reverse_offset_of`] with a reverse rebase the caller
    /// already holds.
    #[inline(always)]
    pub(crate) const fn reverse_offset_with(&self, reverse_rebase: isize, coord: [isize; N]) -> usize {
        self.debug_check(&coord);
        reverse_rebase.wrapping_sub(linear(0, &self.strides, &coord)) as usize
    }

    /// Returns the first dimension in which `coord` is out of range.
    pub fn check(&self, coord: [isize; N]) -> Result<(), LayoutError> {
        for (k, (dim, &c)) in self.dims.iter().zip(&coord).enumerate() {
            if !dim.contains(c) {
                return Err(LayoutError::CoordinateOutOfRange {
                    dim: k,
                    coord: c,
                    lower: dim.base(),
                    upper: dim.upper(),
                });
            }
        }
        Ok(())
    }

    /// [`Layout::offset_of`], always range-checked.
    pub fn checked_offset_of(&self, coord: [isize; N]) -> Result<usize, LayoutError> {
        self.check(coord)?;
        Ok(self.offset_of(coord))
    }

    /// [`Layout::reverse_offset_of`], always range-checked.
    pub fn checked_reverse_offset_of(&self, coord: [isize; N]) -> Result<usize, LayoutError> {
        self.check(coord)?;
        Ok(self.reverse_offset_of(coord))
    }

    /// Return the coordinates of the element at `offset`: the inverse
    /// of [`Layout::offset_of`].
    pub fn coord_of(&self, offset: usize) -> Result<[isize; N], LayoutError> {
        if offset >= self.len {
            return Err(LayoutError::OffsetOutOfRange {
                offset,
                len: self.len,
            });
        }
        Ok(self.coord_at(offset))
    }

    /// Peel off coordinates from the fastest dimension up. `offset`
    /// must be below `len`.
    fn coord_at(&self, offset: usize) -> [isize; N] {
        let mut coord = [0isize; N];
        let mut rest = offset;
        for (c, dim) in coord.iter_mut().zip(&self.dims).rev() {
            *c = dim.base() + (rest % dim.extent()) as isize;
            rest /= dim.extent();
        }
        coord
    }

    /// Iterator over every valid coordinate, in storage order.
    pub fn coords(&self) -> Coords<N> {
        Coords {
            layout: *self,
            front: 0,
            back: self.len,
        }
    }
}

impl<const N: usize> fmt::Display for Layout<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (k, dim) in self.dims.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dim)?;
        }
        write!(f, "]")
    }
}

impl<const N: usize> IntoIterator for &Layout<N> {
    type Item = [isize; N];
    type IntoIter = Coords<N>;
    fn into_iter(self) -> Self::IntoIter {
        self.coords()
    }
}

/// Iterates over all coordinates of a [`Layout`].
///
/// Coordinates are yielded in row-major order (last dimension varies
/// fastest), so the `n`th item is the coordinate stored at offset `n`.
/// # Example
/// ```
/// # use multi_array::Layout;
/// let layout = Layout::from_parts([2, 3], [-1, 10]).unwrap();
/// let coords: Vec<_> = layout.coords().collect();
/// assert_eq!(coords, vec![
///     [-1, 10], [-1, 11], [-1, 12],
///     [0, 10], [0, 11], [0, 12],
/// ]);
/// ```
#[derive(Clone, Debug)]
pub struct Coords<const N: usize> {
    layout: Layout<N>,
    front: usize,
    back: usize,
}

impl<const N: usize> Iterator for Coords<N> {
    type Item = [isize; N];

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let coord = self.layout.coord_at(self.front);
        self.front += 1;
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<const N: usize> DoubleEndedIterator for Coords<N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.layout.coord_at(self.back))
    }
}

impl<const N: usize> ExactSizeIterator for Coords<N> {}

impl<const N: usize> FusedIterator for Coords<N> {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::strategy::gen_layout;
    use crate::strategy::gen_layout_and_coord;
    use crate::strategy::gen_outside_coord;

    const GRID: Layout<2> = Layout::new([Dim::new(32, -16), Dim::new(32, -16)]);

    #[test]
    fn test_grid_offsets() {
        assert_eq!(GRID.len(), 1024);
        assert_eq!(GRID.strides(), &[32, 1]);
        assert_eq!(GRID.rebase(), 16 * 32 + 16);
        assert_eq!(GRID.reverse_rebase(), 1023 - 528);

        assert_eq!(GRID.offset_of([-16, -16]), 0);
        assert_eq!(GRID.offset_of([15, 15]), 1023);
        assert_eq!(GRID.offset_of([0, 0]), 528);
        assert_eq!(GRID.offset_of([-16, -15]), 1);
        assert_eq!(GRID.offset_of([-15, -16]), 32);

        assert_eq!(GRID.reverse_offset_of([-16, -16]), 1023);
        assert_eq!(GRID.reverse_offset_of([15, 15]), 0);
    }

    #[test]
    fn test_row_major_strides() {
        let l = Layout::from_parts([2, 3, 4, 5], [0, 0, 0, 0]).unwrap();
        assert_eq!(l.strides(), &[60, 20, 5, 1]);
        assert_eq!(l.len(), 120);
        assert_eq!(l.rank(), 4);
        assert_eq!(l.rebase(), 0);
        assert_eq!(l.offset_of([1, 2, 3, 4]), 119);
    }

    #[test]
    fn test_scalar_degenerates_to_zero() {
        let l = Layout::new([Dim::new(1, 0)]);
        assert_eq!(l.offset_of([0]), 0);
        assert_eq!(l.reverse_offset_of([0]), 0);

        let l = Layout::new([Dim::new(1, 0), Dim::new(1, 0), Dim::new(1, 0)]);
        assert_eq!(l.offset_of([0, 0, 0]), 0);
        assert_eq!(l.coords().collect::<Vec<_>>(), vec![[0, 0, 0]]);
    }

    #[test]
    fn test_rebase_absorbs_bases() {
        let l = Layout::from_parts([3, 4, 5], [7, -2, 100]).unwrap();
        assert_eq!(l.rebase(), -(7 * 20 + -2 * 5 + 100));
        for c in &l {
            let by_definition: isize = c
                .iter()
                .zip(l.bases())
                .zip(l.strides())
                .map(|((c, b), s)| (c - b) * s)
                .sum();
            assert_eq!(l.offset_of(c) as isize, by_definition);
        }
    }

    #[test]
    fn test_invalid_layouts() {
        assert_eq!(
            Layout::from_parts([3, 0, 2], [0, 0, 0]),
            Err(LayoutError::ZeroExtent { dim: 1 })
        );
        assert_eq!(
            Layout::from_parts([4], [isize::MAX - 2]),
            Err(LayoutError::BoundOverflow {
                dim: 0,
                base: isize::MAX - 2,
                extent: 4,
            })
        );
        assert_eq!(
            Layout::from_parts([usize::MAX / 2, 4], [0, 0]),
            Err(LayoutError::TooLarge)
        );
        assert_eq!(
            Layout::from_parts([1 << 20, 1 << 20, 1 << 20, 1 << 20], [0, 0, 0, 0]),
            Err(LayoutError::TooLarge)
        );
    }

    #[test]
    fn test_extreme_bases() {
        // Bases near the ends of isize are fine as long as the
        // coordinates themselves fit.
        let l = Layout::from_parts([4, 8], [isize::MIN, isize::MAX - 8]).unwrap();
        assert_eq!(l.offset_of([isize::MIN, isize::MAX - 8]), 0);
        assert_eq!(l.offset_of([isize::MIN + 3, isize::MAX - 1]), 31);
        assert_eq!(l.offset_of([isize::MIN + 1, isize::MAX - 7]), 9);
        assert_eq!(l.reverse_offset_of([isize::MIN + 1, isize::MAX - 7]), 22);
    }

    #[test]
    fn test_checked_offsets() {
        let l = Layout::from_parts([2, 3], [-1, 5]).unwrap();
        assert_eq!(l.checked_offset_of([0, 7]), Ok(5));
        assert_eq!(l.checked_reverse_offset_of([0, 7]), Ok(0));
        assert_eq!(
            l.checked_offset_of([1, 5]),
            Err(LayoutError::CoordinateOutOfRange {
                dim: 0,
                coord: 1,
                lower: -1,
                upper: 1,
            })
        );
        assert_eq!(
            l.checked_reverse_offset_of([-1, 4]),
            Err(LayoutError::CoordinateOutOfRange {
                dim: 1,
                coord: 4,
                lower: 5,
                upper: 8,
            })
        );
        assert!(l.check([-1, 5]).is_ok());
        assert!(!l.contains([-2, 5]));
    }

    #[test]
    fn test_coord_of() {
        let l = Layout::from_parts([2, 3], [-1, 5]).unwrap();
        assert_eq!(l.coord_of(0), Ok([-1, 5]));
        assert_eq!(l.coord_of(4), Ok([0, 6]));
        assert_eq!(
            l.coord_of(6),
            Err(LayoutError::OffsetOutOfRange { offset: 6, len: 6 })
        );
    }

    #[test]
    fn test_coords_double_ended() {
        let l = Layout::from_parts([2, 2], [1, 1]).unwrap();
        let mut it = l.coords();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some([1, 1]));
        assert_eq!(it.next_back(), Some([2, 2]));
        assert_eq!(it.len(), 2);
        assert_eq!(it.next(), Some([1, 2]));
        assert_eq!(it.next_back(), Some([2, 1]));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(GRID.to_string(), "[-16..16, -16..16]");
        assert_eq!(
            LayoutError::CoordinateOutOfRange {
                dim: 1,
                coord: 16,
                lower: -16,
                upper: 16,
            }
            .to_string(),
            "coordinate 16 out of range -16..16 in dimension 1"
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "below its dimension's base")]
    fn test_debug_check_below() {
        let _ = GRID.offset_of([0, -17]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "past its dimension's upper bound")]
    fn test_debug_check_above() {
        let _ = GRID.reverse_offset_of([16, 0]);
    }

    proptest! {
        #[test]
        fn offsets_cover_buffer_exactly(layout in gen_layout::<3>(5, 20)) {
            let offsets: HashSet<usize> = layout.coords().map(|c| layout.offset_of(c)).collect();
            prop_assert_eq!(offsets.len(), layout.len());
            prop_assert_eq!(offsets, (0..layout.len()).collect::<HashSet<_>>());
        }

        #[test]
        fn forward_plus_reverse_is_last(layout in gen_layout::<4>(4, 1000)) {
            for c in &layout {
                prop_assert_eq!(
                    layout.offset_of(c) + layout.reverse_offset_of(c),
                    layout.len() - 1
                );
            }
        }

        #[test]
        fn coords_follow_storage_order(layout in gen_layout::<2>(6, 50)) {
            for (n, c) in layout.coords().enumerate() {
                prop_assert_eq!(layout.offset_of(c), n);
                prop_assert_eq!(layout.coord_of(n).unwrap(), c);
            }
        }

        #[test]
        fn checked_offsets_round_trip((layout, coord) in gen_layout_and_coord::<4>(4, 100)) {
            let offset = layout.offset_of(coord);
            prop_assert_eq!(layout.checked_offset_of(coord), Ok(offset));
            prop_assert_eq!(layout.checked_reverse_offset_of(coord), Ok(layout.len() - 1 - offset));
            prop_assert_eq!(layout.coord_of(offset), Ok(coord));
        }

        #[test]
        fn checked_offsets_name_the_bad_dimension(
            (layout, coord) in gen_layout::<3>(4, 50)
                .prop_flat_map(|l| (Just(l), gen_outside_coord(l, 3)))
        ) {
            let dim = layout
                .dims()
                .iter()
                .zip(&coord)
                .position(|(d, &c)| !d.contains(c))
                .unwrap();
            let expected = LayoutError::CoordinateOutOfRange {
                dim,
                coord: coord[dim],
                lower: layout.dims()[dim].base(),
                upper: layout.dims()[dim].upper(),
            };
            prop_assert!(!layout.contains(coord));
            prop_assert_eq!(layout.check(coord), Err(expected));
            prop_assert_eq!(layout.checked_offset_of(coord), Err(expected));
            prop_assert_eq!(layout.checked_reverse_offset_of(coord), Err(expected));

            let data = vec![0u8; layout.len()];
            prop_assert_eq!(layout.rebased(&data).unwrap().get(coord), None);
            prop_assert_eq!(layout.reversed(&data).unwrap().get(coord), None);
        }
    }
}
