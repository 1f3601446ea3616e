/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Property-based generators for [`Layout`] and coordinates.
//!
//! The main entry point is [`gen_layout`], which generates a valid
//! layout of a given rank with small extents and arbitrary (possibly
//! negative) bases. [`gen_coord`] and [`gen_outside_coord`] then
//! produce coordinates inside and just outside such a layout.
//!
//! This module is only included in test builds (`#[cfg(test)]`).

use proptest::prelude::*;

use crate::dim::Dim;
use crate::layout::Layout;

/// Generates a [`Dim`] with an extent in `1..=max_extent` and a base
/// in `-max_abs_base..=max_abs_base`.
pub fn gen_dim(max_extent: usize, max_abs_base: isize) -> impl Strategy<Value = Dim> {
    (1..=max_extent, -max_abs_base..=max_abs_base).prop_map(|(extent, base)| Dim::new(extent, base))
}

/// Generates a valid rank-`N` [`Layout`].
///
/// # Parameters
///
/// - `max_extent`: Maximum size per dimension.
/// - `max_abs_base`: Maximum magnitude of each base.
pub fn gen_layout<const N: usize>(
    max_extent: usize,
    max_abs_base: isize,
) -> impl Strategy<Value = Layout<N>> {
    prop::collection::vec(gen_dim(max_extent, max_abs_base), N).prop_map(|dims| {
        let dims: [Dim; N] = dims.try_into().expect("vec has exactly N dims");
        Layout::try_new(dims).expect("small dimensions form a valid layout")
    })
}

/// Generates a coordinate inside `layout`, uniformly over its
/// elements.
pub fn gen_coord<const N: usize>(layout: Layout<N>) -> impl Strategy<Value = [isize; N]> {
    (0..layout.len()).prop_map(move |offset| {
        layout
            .coord_of(offset)
            .expect("offsets below len have coordinates")
    })
}

/// Generates a coordinate that is out of range in exactly one
/// dimension, by at most `max_miss`, on either side.
pub fn gen_outside_coord<const N: usize>(
    layout: Layout<N>,
    max_miss: isize,
) -> impl Strategy<Value = [isize; N]> {
    (gen_coord(layout), 0..N, 1..=max_miss, any::<bool>()).prop_map(
        move |(mut coord, k, miss, below)| {
            let dim = layout.dims()[k];
            coord[k] = if below {
                dim.base() - miss
            } else {
                dim.upper() - 1 + miss
            };
            coord
        },
    )
}

/// Generates a layout together with a coordinate inside it.
pub fn gen_layout_and_coord<const N: usize>(
    max_extent: usize,
    max_abs_base: isize,
) -> impl Strategy<Value = (Layout<N>, [isize; N])> {
    gen_layout::<N>(max_extent, max_abs_base)
        .prop_flat_map(|layout| (Just(layout), gen_coord(layout)))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_layouts_respect_limits(layout in gen_layout::<3>(4, 10)) {
            for dim in layout.dims() {
                prop_assert!((1..=4).contains(&dim.extent()));
                prop_assert!((-10..=10).contains(&dim.base()));
            }
            prop_assert_eq!(layout.len(), layout.extents().iter().product::<usize>());
        }

        #[test]
        fn generated_coords_are_inside((layout, coord) in gen_layout_and_coord::<4>(3, 50)) {
            prop_assert!(layout.contains(coord));
        }

        #[test]
        fn outside_coords_miss_one_dimension(
            (layout, coord) in gen_layout::<2>(5, 20)
                .prop_flat_map(|l| (Just(l), gen_outside_coord(l, 3)))
        ) {
            prop_assert!(!layout.contains(coord));
            let misses = layout
                .dims()
                .iter()
                .zip(&coord)
                .filter(|(dim, c)| !dim.contains(**c))
                .count();
            prop_assert_eq!(misses, 1);
        }
    }
}
