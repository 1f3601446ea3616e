/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Fixed-size multidimensional arrays with per-dimension bases.
//!
//! [`Vector`], [`Matrix`], [`Cube`] and [`HyperCube`] hold 1 to 4
//! dimensional arrays inline, in row-major order. Both the extent and
//! the base (lowest valid coordinate) of every dimension are const
//! generic parameters, so a 32 × 32 grid addressed by `-16..16` on
//! both axes is simply `Matrix<i32, 32, 32, -16, -16>`.
//!
//! Every container offers four element accessors:
//!
//! - `at`: forward access, `at(BI, BJ)` is the first element;
//! - `rat`: reverse access, `rat(BI, BJ)` is the last element;
//! - `fat` and `frat`: the same two, through the rebase constant
//!   that [`MultiArray`] folds at compile time.
//!
//! Coordinates passed to these accessors are only range-checked in
//! debug builds. [`MultiArray::get`] and [`Layout::checked_offset_of`]
//! check in every build. The addressing arithmetic itself lives in
//! [`Layout`], which can also be used on its own over any buffer of
//! the right length (see [`Layout::rebased`]).

mod array;
mod cube;
mod dim;
mod element;
mod hypercube;
mod matrix;
mod rebased;
mod vector;

pub use array::IndexedIter;
pub use array::MultiArray;
pub use cube::Cube;
pub use dim::Dim;
pub use element::Element;
pub use hypercube::HyperCube;
pub use matrix::Matrix;
pub use rebased::Rebased;
pub use rebased::RebasedMut;
pub use vector::Vector;

/// The shape and offset arithmetic shared by every container.
pub mod layout;
pub use layout::Coords;
pub use layout::Layout;
pub use layout::LayoutError;

/// Property-based generators for randomized test input.
#[cfg(test)]
pub mod strategy;
