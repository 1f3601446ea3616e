/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Access handles that carry a precomputed rebase.
//!
//! Addressing an element of a based array costs a multiply-add chain
//! plus the subtraction of every dimension's base. A [`Rebased`]
//! handle pays for the bases once, when it is created, by storing the
//! signed rebase constant next to the strides. Each access then adds
//! the rebase to `Σ cₖ × strideₖ`, which yields an index relative to
//! the start of the buffer, and indexes the buffer with it. The rebase
//! is never applied to a pointer, so no reference outside the buffer
//! is ever formed.
//!
//! A reverse handle stores the reverse rebase and negated strides, so
//! the same computation addresses the buffer back-to-front.

use std::fmt;

use crate::dim::Dim;
use crate::layout::Layout;
use crate::layout::LayoutError;
use crate::layout::linear;

/// Which end of the buffer coordinates are counted from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Direction {
    Forward,
    Reverse,
}

/// Rebase and strides for one direction of one layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Origin<const N: usize> {
    dims: [Dim; N],
    strides: [isize; N],
    rebase: isize,
}

impl<const N: usize> Origin<N> {
    fn new(layout: &Layout<N>, rebase: isize, direction: Direction) -> Self {
        let mut strides = *layout.strides();
        if direction == Direction::Reverse {
            for stride in &mut strides {
                *stride = -*stride;
            }
        }
        Self {
            dims: *layout.dims(),
            strides,
            rebase,
        }
    }

    #[inline(always)]
    fn index_of(&self, coord: [isize; N]) -> usize {
        if cfg!(debug_assertions) {
            for (k, (dim, &c)) in self.dims.iter().zip(&coord).enumerate() {
                debug_assert!(
                    dim.contains(c),
                    "coordinate {} out of range {} in dimension {}",
                    c,
                    dim,
                    k
                );
            }
        }
        linear(self.rebase, &self.strides, &coord) as usize
    }

    fn checked_index_of(&self, coord: [isize; N]) -> Option<usize> {
        self.dims
            .iter()
            .zip(&coord)
            .all(|(dim, &c)| dim.contains(c))
            .then(|| linear(self.rebase, &self.strides, &coord) as usize)
    }
}

/// A shared view of a buffer addressed through a precomputed rebase.
///
/// ```
/// # use multi_array::Matrix;
/// # use multi_array::MultiArray;
/// let mut m = Matrix::<i32, 4, 4, -2, -2>::default();
/// *m.at_mut(-2, 1) = 7;
/// let view = m.rebased();
/// assert_eq!(*view.at([-2, 1]), 7);
/// assert_eq!(*m.reversed().at([1, -2]), 7);
/// ```
#[derive(Clone, Copy)]
pub struct Rebased<'a, T, const N: usize> {
    data: &'a [T],
    origin: Origin<N>,
}

impl<'a, T, const N: usize> Rebased<'a, T, N> {
    /// `data.len()` must equal `layout.len()`.
    pub(crate) fn new(data: &'a [T], layout: &Layout<N>, rebase: isize, direction: Direction) -> Self {
        debug_assert_eq!(data.len(), layout.len());
        Self {
            data,
            origin: Origin::new(layout, rebase, direction),
        }
    }

    /// The rebase constant this handle adds to every access.
    pub fn rebase(&self) -> isize {
        self.origin.rebase
    }

    /// The (signed) strides this handle multiplies coordinates by.
    pub fn strides(&self) -> &[isize; N] {
        &self.origin.strides
    }

    /// The buffer index `coord` maps to. The coordinate is only
    /// range-checked in debug builds.
    #[inline]
    pub fn index_of(&self, coord: [isize; N]) -> usize {
        self.origin.index_of(coord)
    }

    #[inline]
    pub fn at(&self, coord: [isize; N]) -> &'a T {
        &self.data[self.origin.index_of(coord)]
    }

    /// Like [`Rebased::at`], but returns `None` for out-of-range
    /// coordinates in every build.
    pub fn get(&self, coord: [isize; N]) -> Option<&'a T> {
        self.origin
            .checked_index_of(coord)
            .map(|index| &self.data[index])
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Rebased<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rebased")
            .field("rebase", &self.origin.rebase)
            .field("strides", &self.origin.strides)
            .field("data", &self.data)
            .finish()
    }
}

/// A mutable view of a buffer addressed through a precomputed rebase.
pub struct RebasedMut<'a, T, const N: usize> {
    data: &'a mut [T],
    origin: Origin<N>,
}

impl<'a, T, const N: usize> RebasedMut<'a, T, N> {
    /// `data.len()` must equal `layout.len()`.
    pub(crate) fn new(
        data: &'a mut [T],
        layout: &Layout<N>,
        rebase: isize,
        direction: Direction,
    ) -> Self {
        debug_assert_eq!(data.len(), layout.len());
        Self {
            data,
            origin: Origin::new(layout, rebase, direction),
        }
    }

    pub fn rebase(&self) -> isize {
        self.origin.rebase
    }

    #[inline]
    pub fn at(&self, coord: [isize; N]) -> &T {
        &self.data[self.origin.index_of(coord)]
    }

    #[inline]
    pub fn at_mut(&mut self, coord: [isize; N]) -> &mut T {
        &mut self.data[self.origin.index_of(coord)]
    }

    pub fn get(&self, coord: [isize; N]) -> Option<&T> {
        self.origin
            .checked_index_of(coord)
            .map(|index| &self.data[index])
    }

    pub fn get_mut(&mut self, coord: [isize; N]) -> Option<&mut T> {
        self.origin
            .checked_index_of(coord)
            .map(|index| &mut self.data[index])
    }

    /// Reborrow as a shared handle.
    pub fn as_rebased(&self) -> Rebased<'_, T, N> {
        Rebased {
            data: self.data,
            origin: self.origin,
        }
    }
}

impl<const N: usize> Layout<N> {
    /// A forward handle over `data`, which must hold exactly
    /// [`Layout::len`] elements.
    pub fn rebased<'a, T>(&self, data: &'a [T]) -> Result<Rebased<'a, T, N>, LayoutError> {
        self.check_len(data.len())?;
        Ok(Rebased::new(data, self, self.rebase(), Direction::Forward))
    }

    /// A mutable forward handle over `data`.
    pub fn rebased_mut<'a, T>(
        &self,
        data: &'a mut [T],
    ) -> Result<RebasedMut<'a, T, N>, LayoutError> {
        self.check_len(data.len())?;
        Ok(RebasedMut::new(
            data,
            self,
            self.rebase(),
            Direction::Forward,
        ))
    }

    /// A reverse handle over `data`.
    pub fn reversed<'a, T>(&self, data: &'a [T]) -> Result<Rebased<'a, T, N>, LayoutError> {
        self.check_len(data.len())?;
        Ok(Rebased::new(
            data,
            self,
            self.reverse_rebase(),
            Direction::Reverse,
        ))
    }

    pub(crate) fn check_len(&self, got: usize) -> Result<(), LayoutError> {
        if got != self.len() {
            return Err(LayoutError::LengthMismatch {
                expected: self.len(),
                got,
            });
        }
        Ok(())
    }
}
