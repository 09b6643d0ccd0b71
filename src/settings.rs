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
use crate::sampler::{CubicParams, ResamplingFunction};
use crate::weights::EdgePolicy;

/// Per-dimension resize configuration (spec §3 "Resize settings").
#[derive(Debug, Copy, Clone)]
pub struct ResizeSettings {
    pub function: ResamplingFunction,
    pub blur_factor: f32,
    pub cubic: CubicParams,
    pub edge_policy: EdgePolicy,
    /// Sub-pixel offset in destination pixels; only meaningful for R/G/B
    /// channels (a channel-offset effect, e.g. chromatic fringing repair).
    pub channel_offset: f32,
    /// Sub-pixel translation applied uniformly to every channel.
    pub translation: f32,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        ResizeSettings {
            function: ResamplingFunction::Auto,
            blur_factor: 1.0,
            cubic: CubicParams::default(),
            edge_policy: EdgePolicy::Standard,
            channel_offset: 0.0,
            translation: 0.0,
        }
    }
}

impl ResizeSettings {
    pub fn clamped_blur(&self) -> f32 {
        self.blur_factor.clamp(0.0001, 10000.0)
    }

    pub fn total_subpixel_offset(&self) -> f32 {
        self.channel_offset + self.translation
    }
}

/// Grayscale conversion formula (spec §4.5 step 3).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GrayscaleFormula {
    /// sRGB luma weights 0.2126/0.7152/0.0722.
    Srgb,
    /// Rec.601 compatibility weights 0.299/0.587/0.114.
    Rec601,
    /// Sort (R,G,B) by value, then apply the sRGB weights to the sorted
    /// values — a permutation-invariant function of the triple.
    OrderByValue,
}

impl GrayscaleFormula {
    pub fn apply(self, r: f32, g: f32, b: f32) -> f32 {
        match self {
            GrayscaleFormula::Srgb => 0.2126 * r + 0.7152 * g + 0.0722 * b,
            GrayscaleFormula::Rec601 => 0.299 * r + 0.587 * g + 0.114 * b,
            GrayscaleFormula::OrderByValue => {
                let mut v = [r, g, b];
                v.sort_by(|a, b| a.partial_cmp(b).unwrap());
                0.2126 * v[0] + 0.7152 * v[1] + 0.0722 * v[2]
            }
        }
    }
}

/// A solid background color in linear RGB, with an optional alpha (partial
/// transparency is honored per spec §4.5 step 2).
#[derive(Debug, Copy, Clone)]
pub struct BackgroundColor {
    pub rgb: [f32; 3],
    pub alpha: f32,
}

impl BackgroundColor {
    pub fn opaque(rgb: [f32; 3]) -> BackgroundColor {
        BackgroundColor { rgb, alpha: 1.0 }
    }

    pub fn has_transparency(&self) -> bool {
        self.alpha < 1.0
    }
}

/// Optional checkerboard background: alternates between two colors in
/// `cell_size`-pixel blocks; forces LATE compositing (spec §4.6).
#[derive(Debug, Copy, Clone)]
pub struct CheckerboardBackground {
    pub color_a: BackgroundColor,
    pub color_b: BackgroundColor,
    pub cell_size: usize,
}

impl CheckerboardBackground {
    pub fn color_at(&self, x: usize, y: usize) -> BackgroundColor {
        let cell = self.cell_size.max(1);
        if ((x / cell) + (y / cell)) % 2 == 0 {
            self.color_a
        } else {
            self.color_b
        }
    }
}

/// Applied-background strategy, decided by the strategy selector (spec §4.6).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BackgroundStrategy {
    None,
    Early,
    Late,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_by_value_is_permutation_invariant() {
        let a = GrayscaleFormula::OrderByValue.apply(0.1, 0.5, 0.9);
        let b = GrayscaleFormula::OrderByValue.apply(0.9, 0.1, 0.5);
        let c = GrayscaleFormula::OrderByValue.apply(0.5, 0.9, 0.1);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn checkerboard_alternates() {
        let cb = CheckerboardBackground {
            color_a: BackgroundColor::opaque([1.0, 0.0, 0.0]),
            color_b: BackgroundColor::opaque([0.0, 0.0, 0.0]),
            cell_size: 1,
        };
        assert_eq!(cb.color_at(0, 0).rgb, [1.0, 0.0, 0.0]);
        assert_eq!(cb.color_at(1, 0).rgb, [0.0, 0.0, 0.0]);
    }
}
