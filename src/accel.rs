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

/// The boundary, in linear light, between successive output codes 0..M —
/// i.e. `boundary[k]` is the linear value exactly halfway (in output
/// colorspace) between code `k` and code `k+1`. Built once when quantizing
/// to a non-dithered, non-posterized UINT output on a large-enough image
/// (spec §4.7 "Acceleration"), then used to replace the per-sample
/// find-candidates-then-distance computation with a binary search.
#[derive(Debug, Clone)]
pub struct OutputBoundaryTable {
    boundaries: Vec<f32>,
    max_code: u32,
}

impl OutputBoundaryTable {
    pub const AREA_THRESHOLD: usize = 512;

    pub fn build(colorspace: ColorSpace, max_code: u32) -> OutputBoundaryTable {
        let mut boundaries = Vec::with_capacity(max_code as usize);
        for k in 0..max_code {
            let mid_code = k as f32 + 0.5;
            let s_conv = mid_code / max_code as f32;
            boundaries.push(colorspace.to_linear(s_conv));
        }
        OutputBoundaryTable { boundaries, max_code }
    }

    pub fn is_usable(
        output_is_uint: bool,
        dithered: bool,
        posterized: bool,
        image_area: usize,
    ) -> bool {
        output_is_uint && !dithered && !posterized && image_area > Self::AREA_THRESHOLD
    }

    /// Binary-searches the boundary table for the nearest output code to a
    /// linear-light sample, returning the code directly (bypassing the
    /// floor/ceil-then-distance comparison quantize.rs otherwise performs).
    pub fn nearest_code(&self, s_lin: f32) -> u32 {
        match self
            .boundaries
            .binary_search_by(|b| b.partial_cmp(&s_lin).unwrap())
        {
            // An exact hit on a boundary is a tie between the two codes it
            // separates; quantize_sample's direct path breaks such ties
            // toward the higher code, so this must match.
            Ok(idx) => idx as u32 + 1,
            Err(idx) => idx as u32,
        }
        .min(self.max_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_table_matches_direct_rounding_for_srgb() {
        let table = OutputBoundaryTable::build(ColorSpace::Srgb, 255);
        for code in 0..=255u32 {
            let s_conv = code as f32 / 255.0;
            let s_lin = ColorSpace::Srgb.to_linear(s_conv);
            let nearest = table.nearest_code(s_lin);
            assert!((nearest as i32 - code as i32).abs() <= 1, "code={code} nearest={nearest}");
        }
    }

    #[test]
    fn exact_boundary_hit_rounds_up() {
        let table = OutputBoundaryTable::build(ColorSpace::Linear, 255);
        // boundaries[10] is the exact midpoint between codes 10 and 11.
        let s_lin = 10.5 / 255.0;
        assert_eq!(table.nearest_code(s_lin), 11);
    }
}
