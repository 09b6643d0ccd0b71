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
use crate::weights::FilterWeights;

/// Which of the three row-resizer variants applies to a pass (spec §4.4,
/// §9: "the row resizer is one of three variants, picked at weight-list
/// construction and invoked for every row").
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RowResizeKind {
    /// Apply a precomputed weight list.
    Std,
    /// Direct nearest-source-position lookup, no weight list.
    Nearest,
    /// Identity copy when pixel-aligned, zero-fill beyond the input extent.
    Null,
}

/// `out[d] = sum(w_i * in[s_i])`, one destination sample at a time.
pub fn resize_row_std(input: &[f32], weights: &FilterWeights) -> Vec<f32> {
    let mut out = vec![0f32; weights.out_size];
    for (d, slot) in out.iter_mut().enumerate() {
        let mut acc = 0f32;
        for tap in weights.taps_for(d) {
            acc += tap.weight * input[tap.source_index];
        }
        *slot = acc;
    }
    out
}

/// Direct lookup: `out[d] = in[round(d * in_size/out_size)]`, clamped into range.
pub fn resize_row_nearest(input: &[f32], in_size: usize, out_size: usize) -> Vec<f32> {
    let mut out = vec![0f32; out_size];
    let scale = in_size as f32 / out_size as f32;
    for (d, slot) in out.iter_mut().enumerate() {
        let src = ((d as f32 + 0.5) * scale).floor() as usize;
        *slot = input[src.min(in_size - 1)];
    }
    out
}

/// Identity copy for pixel-aligned positions, zero-fill beyond the input
/// extent (spec §4.2 "null": "copy pixel-aligned or zero-fill beyond input").
pub fn resize_row_null(input: &[f32], out_size: usize) -> Vec<f32> {
    let mut out = vec![0f32; out_size];
    let n = input.len().min(out_size);
    out[..n].copy_from_slice(&input[..n]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::CubicParams;
    use crate::weights::{generate_weights, EdgePolicy};

    #[test]
    fn null_resize_is_identity_when_sizes_match() {
        let input = vec![0.1, 0.2, 0.3, 0.4];
        let out = resize_row_null(&input, 4);
        assert_eq!(out, input);
    }

    #[test]
    fn nearest_upsample_2_to_4_matches_spec_scenario() {
        // spec §8 scenario 2: input [10, 200] (8-bit) -> output [10,10,200,200]
        let input = [10.0 / 255.0, 200.0 / 255.0];
        let out = resize_row_nearest(&input, 2, 4);
        let codes: Vec<i32> = out.iter().map(|v| (v * 255.0).round() as i32).collect();
        assert_eq!(codes, vec![10, 10, 200, 200]);
    }

    #[test]
    fn std_resize_only_produces_existing_values_for_nearest_like_weights() {
        let fw = generate_weights(
            crate::sampler::ResamplingFunction::Box,
            CubicParams::default(),
            4,
            2,
            1.0,
            0.0,
            EdgePolicy::Standard,
        );
        let input = [0.0, 0.5, 0.5, 1.0];
        let out = resize_row_std(&input, &fw);
        assert_eq!(out.len(), 2);
    }
}
