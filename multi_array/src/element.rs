/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

/// Element types storable in the fixed-size arrays of this crate.
///
/// Elements must be plain data: [`bytemuck::Pod`] guarantees that a
/// value can be copied and compared as raw bytes, which is how the
/// containers copy and compare their buffers. [`Default`] supplies
/// the value every slot starts with.
///
/// The bound is checked wherever a container type is named, so an
/// unsuitable element type is a compile error:
///
/// ```compile_fail
/// let v = multi_array::Vector::<String, 4>::default();
/// ```
pub trait Element: bytemuck::Pod + Default {}

impl<T: bytemuck::Pod + Default> Element for T {}
