/*
 * Copyright (c) Radzivon Bartoshyk, 10/2024. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use std::ops::{Add, AddAssign, Mul, Sub};

/// A bundle of up to 4 `f32` lanes carried through the two-pass pipeline.
///
/// Grounded in the teacher's `color_group::ColorGroup<const COMPS, J>`, but
/// narrowed to a single `f32` lane: the pipeline's intermediate buffers are
/// floating-point linear light throughout (spec §2, §3, §5), so the
/// teacher's parallel fixed-point `i32` accumulator path has no counterpart
/// here (see DESIGN.md).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorGroup<const COMPS: usize> {
    pub v: [f32; 4],
}

impl<const COMPS: usize> ColorGroup<COMPS> {
    pub fn dup(value: f32) -> Self {
        ColorGroup { v: [value; 4] }
    }

    pub fn from_slice(slice: &[f32]) -> Self {
        let mut v = [0f32; 4];
        v[..COMPS].copy_from_slice(&slice[..COMPS]);
        ColorGroup { v }
    }

    pub fn store(&self, slice: &mut [f32]) {
        slice[..COMPS].copy_from_slice(&self.v[..COMPS]);
    }

    #[inline(always)]
    pub fn mul_add(self, other: Self, weight: f32) -> Self {
        let mut out = self;
        for c in 0..COMPS {
            out.v[c] += other.v[c] * weight;
        }
        out
    }

    pub fn clamp01(self) -> Self {
        let mut out = self;
        for c in 0..COMPS {
            out.v[c] = out.v[c].clamp(0.0, 1.0);
        }
        out
    }
}

impl<const COMPS: usize> Add for ColorGroup<COMPS> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        for c in 0..COMPS {
            out.v[c] += rhs.v[c];
        }
        out
    }
}

impl<const COMPS: usize> AddAssign for ColorGroup<COMPS> {
    fn add_assign(&mut self, rhs: Self) {
        for c in 0..COMPS {
            self.v[c] += rhs.v[c];
        }
    }
}

impl<const COMPS: usize> Sub for ColorGroup<COMPS> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let mut out = self;
        for c in 0..COMPS {
            out.v[c] -= rhs.v[c];
        }
        out
    }
}

impl<const COMPS: usize> Mul<f32> for ColorGroup<COMPS> {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        let mut out = self;
        for c in 0..COMPS {
            out.v[c] *= rhs;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_add_accumulates_weighted_sum() {
        let a = ColorGroup::<3>::from_slice(&[1.0, 2.0, 3.0]);
        let b = ColorGroup::<3>::from_slice(&[1.0, 1.0, 1.0]);
        let sum = ColorGroup::<3>::dup(0.0).mul_add(a, 0.5).mul_add(b, 0.5);
        assert_eq!(sum.v[0], 1.0);
        assert_eq!(sum.v[1], 1.5);
        assert_eq!(sum.v[2], 2.0);
    }

    #[test]
    fn clamp01_bounds_each_lane() {
        let a = ColorGroup::<2>::from_slice(&[-0.5, 1.5]);
        let clamped = a.clamp01();
        assert_eq!(clamped.v[0], 0.0);
        assert_eq!(clamped.v[1], 1.0);
    }
}
