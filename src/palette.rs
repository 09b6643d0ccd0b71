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
use crate::colorspace::ColorSpace;

/// One palette entry: 8-bit sRGB-coded components plus alpha.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// An ordered color table. A palette exists only on the output side,
/// assembled by the post-optimizer collaborator after the resize pipeline
/// runs (out of scope here per spec §1 Non-goals) — `ResizeContext` never
/// reads an [`ImageType::Palette`](crate::image::ImageType) input, only
/// `Gray`/`GrayAlpha`/`Rgb`/`Rgba`. This type and [`Palette::linear_rgba`]
/// are provided for that collaborator to expand the core's output indices
/// back to color when previewing or re-encoding a palette it built.
#[derive(Debug, Clone)]
pub struct Palette {
    pub entries: Vec<Rgba8>,
}

impl Palette {
    pub const MAX_ENTRIES: usize = 256;

    pub fn new(entries: Vec<Rgba8>) -> Palette {
        debug_assert!(entries.len() <= Self::MAX_ENTRIES);
        Palette { entries }
    }

    /// Expands index `idx` to linear-light `(r, g, b, a)`, treating palette
    /// color entries as encoded in `colorspace` and alpha as always linear
    /// (spec §4.1 convention, consistent with how the core itself treats
    /// alpha on the output side).
    pub fn linear_rgba(&self, idx: u8, colorspace: ColorSpace) -> [f32; 4] {
        let entry = self.entries.get(idx as usize).copied().unwrap_or(Rgba8 {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        });
        [
            colorspace.to_linear(entry.r as f32 / 255.0),
            colorspace.to_linear(entry.g as f32 / 255.0),
            colorspace.to_linear(entry.b as f32 / 255.0),
            entry.a as f32 / 255.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_opaque_white_entry() {
        let palette = Palette::new(vec![Rgba8 { r: 255, g: 255, b: 255, a: 255 }]);
        let [r, g, b, a] = palette.linear_rgba(0, ColorSpace::Srgb);
        assert!((r - 1.0).abs() < 1e-5);
        assert!((g - 1.0).abs() < 1e-5);
        assert!((b - 1.0).abs() < 1e-5);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn out_of_range_index_falls_back_to_opaque_black() {
        let palette = Palette::new(vec![Rgba8 { r: 10, g: 20, b: 30, a: 255 }]);
        let [r, g, b, a] = palette.linear_rgba(5, ColorSpace::Linear);
        assert_eq!((r, g, b, a), (0.0, 0.0, 0.0, 1.0));
    }
}
