/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::iter::Zip;
use std::slice;

use crate::element::Element;
use crate::layout::Coords;
use crate::layout::Layout;
use crate::rebased::Direction;
use crate::rebased::Rebased;
use crate::rebased::RebasedMut;

pub(crate) mod sealed {
    // Only the containers of this crate implement this.
    pub trait Sealed {}
}

/// `(coordinate, element)` pairs in storage order.
pub type IndexedIter<'a, T, const N: usize> = Zip<Coords<N>, slice::Iter<'a, T>>;

/// The interface shared by [`crate::Vector`], [`crate::Matrix`],
/// [`crate::Cube`] and [`crate::HyperCube`], with coordinates passed
/// as `[isize; N]`.
///
/// The shape of an implementor is part of its type: [`Self::LAYOUT`]
/// and the rebase constants are evaluated once, at compile time.
/// Constructing a container whose type has a zero extent, or more
/// elements than fit in `isize`, fails to compile:
///
/// ```compile_fail
/// let v = multi_array::Vector::<u8, 0>::default();
/// ```
///
/// ```compile_fail
/// let m = multi_array::Matrix::<u32, 0, 5>::new([]);
/// ```
///
/// ```compile_fail
/// let c = multi_array::Cube::<u8, 2, 0, 2, -1, 4>::filled(1);
/// ```
///
/// ```compile_fail
/// let h = multi_array::HyperCube::<u8, 1, 1, 1, 2, 0, 0, 0, { isize::MAX - 1 }>::default();
/// ```
pub trait MultiArray<const N: usize>: sealed::Sealed + Copy + Default {
    /// The element type.
    type Elem: Element;

    /// The shape of this container type.
    const LAYOUT: Layout<N>;

    /// `LAYOUT.rebase()`, folded into a constant.
    const REBASE: isize = Self::LAYOUT.rebase();

    /// `LAYOUT.reverse_rebase()`, folded into a constant.
    const REVERSE_REBASE: isize = Self::LAYOUT.reverse_rebase();

    /// The flat buffer in storage order.
    fn as_slice(&self) -> &[Self::Elem];

    fn as_mut_slice(&mut self) -> &mut [Self::Elem];

    /// The element at `coord`, or `None` if any coordinate is out of
    /// range. Checked in every build.
    fn get(&self, coord: [isize; N]) -> Option<&Self::Elem> {
        let offset = Self::LAYOUT.checked_offset_of(coord).ok()?;
        Some(&self.as_slice()[offset])
    }

    fn get_mut(&mut self, coord: [isize; N]) -> Option<&mut Self::Elem> {
        let offset = Self::LAYOUT.checked_offset_of(coord).ok()?;
        Some(&mut self.as_mut_slice()[offset])
    }

    /// A handle that addresses this container through [`Self::REBASE`].
    fn rebased(&self) -> Rebased<'_, Self::Elem, N> {
        Rebased::new(
            self.as_slice(),
            &Self::LAYOUT,
            Self::REBASE,
            Direction::Forward,
        )
    }

    fn rebased_mut(&mut self) -> RebasedMut<'_, Self::Elem, N> {
        RebasedMut::new(
            self.as_mut_slice(),
            &Self::LAYOUT,
            Self::REBASE,
            Direction::Forward,
        )
    }

    /// A handle that addresses this container back-to-front, through
    /// [`Self::REVERSE_REBASE`].
    fn reversed(&self) -> Rebased<'_, Self::Elem, N> {
        Rebased::new(
            self.as_slice(),
            &Self::LAYOUT,
            Self::REVERSE_REBASE,
            Direction::Reverse,
        )
    }

    fn reversed_mut(&mut self) -> RebasedMut<'_, Self::Elem, N> {
        RebasedMut::new(
            self.as_mut_slice(),
            &Self::LAYOUT,
            Self::REVERSE_REBASE,
            Direction::Reverse,
        )
    }

    /// Iterate over `(coordinate, element)` pairs in storage order.
    fn indexed_iter(&self) -> IndexedIter<'_, Self::Elem, N> {
        Self::LAYOUT.coords().zip(self.as_slice().iter())
    }

    /// Build a container by calling `f` on every coordinate, in
    /// storage order.
    fn from_fn(mut f: impl FnMut([isize; N]) -> Self::Elem) -> Self {
        let mut array = Self::default();
        for (slot, coord) in array.as_mut_slice().iter_mut().zip(Self::LAYOUT.coords()) {
            *slot = f(coord);
        }
        array
    }

    fn fill(&mut self, value: Self::Elem) {
        self.as_mut_slice().fill(value);
    }
}

/// Implements the container shell shared by every arity: the
/// [`MultiArray`] impl, construction, comparison, iteration and
/// indexing. Each arity supplies `filled`, `as_slice`, `as_mut_slice`
/// and its coordinate accessors.
macro_rules! impl_multi_array {
    (
        $name:ident<$t:ident; $($extent:ident),+; $($base:ident),+>,
        rank = $rank:literal,
        storage = $storage:ty $(,)?
    ) => {
        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+>
            $crate::array::sealed::Sealed for $name<$t, $($extent,)+ $($base,)+>
        {
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+>
            $crate::array::MultiArray<$rank> for $name<$t, $($extent,)+ $($base,)+>
        {
            type Elem = $t;

            const LAYOUT: $crate::layout::Layout<$rank> =
                $crate::layout::Layout::new([$($crate::dim::Dim::new($extent, $base)),+]);

            fn as_slice(&self) -> &[$t] {
                Self::as_slice(self)
            }

            fn as_mut_slice(&mut self) -> &mut [$t] {
                Self::as_mut_slice(self)
            }
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+>
            $name<$t, $($extent,)+ $($base,)+>
        {
            /// A container holding `data`, whose nesting follows the
            /// dimensions from slowest to fastest.
            pub const fn new(data: $storage) -> Self {
                Self::assert_layout();
                Self { data }
            }

            // Forces evaluation of `LAYOUT`: constructing a container
            // with an invalid shape fails to compile.
            #[inline(always)]
            const fn assert_layout() {
                const { assert!(<Self as $crate::array::MultiArray<$rank>>::LAYOUT.len() > 0) }
            }

            pub fn into_inner(self) -> $storage {
                self.data
            }

            pub const fn as_array(&self) -> &$storage {
                &self.data
            }

            pub fn as_mut_array(&mut self) -> &mut $storage {
                &mut self.data
            }

            /// A container holding `items`, in storage order.
            pub fn try_from_slice(items: &[$t]) -> Result<Self, $crate::layout::LayoutError> {
                <Self as $crate::array::MultiArray<$rank>>::LAYOUT.check_len(items.len())?;
                let mut array = Self::default();
                array.as_mut_slice().copy_from_slice(items);
                Ok(array)
            }

            /// The extent of each dimension.
            pub const fn extents() -> [usize; $rank] {
                <Self as $crate::array::MultiArray<$rank>>::LAYOUT.extents()
            }

            /// The lowest valid coordinate of each dimension.
            pub const fn bases() -> [isize; $rank] {
                <Self as $crate::array::MultiArray<$rank>>::LAYOUT.bases()
            }

            /// The number of elements.
            pub const fn size() -> usize {
                <Self as $crate::array::MultiArray<$rank>>::LAYOUT.len()
            }

            /// Same as [`Self::size`]; the storage never grows.
            pub const fn capacity() -> usize {
                Self::size()
            }

            pub const fn rank() -> usize {
                $rank
            }

            pub const fn as_ptr(&self) -> *const $t {
                self.as_slice().as_ptr()
            }

            pub fn as_mut_ptr(&mut self) -> *mut $t {
                self.as_mut_slice().as_mut_ptr()
            }

            /// Iterate over the elements in storage order, regardless
            /// of the bases. Use `.rev()` for the reverse order.
            pub fn iter(&self) -> ::std::slice::Iter<'_, $t> {
                self.as_slice().iter()
            }

            pub fn iter_mut(&mut self) -> ::std::slice::IterMut<'_, $t> {
                self.as_mut_slice().iter_mut()
            }
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+> Default
            for $name<$t, $($extent,)+ $($base,)+>
        {
            fn default() -> Self {
                Self::filled($t::default())
            }
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+> PartialEq
            for $name<$t, $($extent,)+ $($base,)+>
        {
            /// Byte-wise comparison of the two buffers.
            fn eq(&self, other: &Self) -> bool {
                ::bytemuck::cast_slice::<$t, u8>(self.as_slice())
                    == ::bytemuck::cast_slice::<$t, u8>(other.as_slice())
            }
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+> Eq
            for $name<$t, $($extent,)+ $($base,)+>
        {
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+> ::std::hash::Hash
            for $name<$t, $($extent,)+ $($base,)+>
        {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(::bytemuck::cast_slice::<$t, u8>(self.as_slice()), state);
            }
        }

        impl<$t: $crate::element::Element + ::std::fmt::Debug, $(const $extent: usize,)+ $(const $base: isize,)+>
            ::std::fmt::Debug for $name<$t, $($extent,)+ $($base,)+>
        {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field(
                        "layout",
                        &format_args!("{}", <Self as $crate::array::MultiArray<$rank>>::LAYOUT),
                    )
                    .field("data", &self.as_slice())
                    .finish()
            }
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+> From<$storage>
            for $name<$t, $($extent,)+ $($base,)+>
        {
            fn from(data: $storage) -> Self {
                Self::new(data)
            }
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+> TryFrom<&[$t]>
            for $name<$t, $($extent,)+ $($base,)+>
        {
            type Error = $crate::layout::LayoutError;

            fn try_from(items: &[$t]) -> Result<Self, Self::Error> {
                Self::try_from_slice(items)
            }
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+> AsRef<[$t]>
            for $name<$t, $($extent,)+ $($base,)+>
        {
            fn as_ref(&self) -> &[$t] {
                self.as_slice()
            }
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+> AsMut<[$t]>
            for $name<$t, $($extent,)+ $($base,)+>
        {
            fn as_mut(&mut self) -> &mut [$t] {
                self.as_mut_slice()
            }
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+>
            ::std::ops::Index<[isize; $rank]> for $name<$t, $($extent,)+ $($base,)+>
        {
            type Output = $t;

            fn index(&self, coord: [isize; $rank]) -> &$t {
                let offset = <Self as $crate::array::MultiArray<$rank>>::LAYOUT.offset_of(coord);
                &self.as_slice()[offset]
            }
        }

        impl<$t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+>
            ::std::ops::IndexMut<[isize; $rank]> for $name<$t, $($extent,)+ $($base,)+>
        {
            fn index_mut(&mut self, coord: [isize; $rank]) -> &mut $t {
                let offset = <Self as $crate::array::MultiArray<$rank>>::LAYOUT.offset_of(coord);
                &mut self.as_mut_slice()[offset]
            }
        }

        impl<'a, $t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+> IntoIterator
            for &'a $name<$t, $($extent,)+ $($base,)+>
        {
            type Item = &'a $t;
            type IntoIter = ::std::slice::Iter<'a, $t>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        impl<'a, $t: $crate::element::Element, $(const $extent: usize,)+ $(const $base: isize,)+> IntoIterator
            for &'a mut $name<$t, $($extent,)+ $($base,)+>
        {
            type Item = &'a mut $t;
            type IntoIter = ::std::slice::IterMut<'a, $t>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter_mut()
            }
        }
    };
}

pub(crate) use impl_multi_array;
