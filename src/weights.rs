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
use crate::sampler::{evaluate, mix_p, mix_weight, CubicParams, ResamplingFunction};

/// What a filter's support does when it crosses the image boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Drop out-of-range contributions entirely.
    #[default]
    Standard,
    /// Clamp the out-of-range source coordinate to the nearest in-range one.
    Replicate,
    /// A virtual alpha channel is synthesized: 1.0 inside the source, 0.0
    /// outside. Handled by the strategy selector/orchestrator, not here;
    /// weight computation under `Transparent` behaves like `Standard`.
    Transparent,
}

/// One `(source_index, weight)` contribution to a destination sample
/// (spec §3 "Weight list entry").
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tap {
    pub source_index: usize,
    pub weight: f32,
}

/// The sparse weight list for one full row/column pass: `taps[d]` is the
/// list of source contributions for destination index `d`.
///
/// Stored as one `Vec<Tap>` per destination rather than the teacher's flat
/// `weights` buffer plus contiguous `FilterBounds`, because `EdgePolicy::Replicate`
/// can clamp several distinct source positions onto the same boundary
/// index — the resulting taps are no longer a contiguous source range, so a
/// flat-buffer-plus-bounds layout (correct for the teacher's Standard-only
/// edge handling) would silently misattribute weights. See DESIGN.md.
#[derive(Debug, Clone)]
pub struct FilterWeights {
    pub taps: Vec<Vec<Tap>>,
    pub out_size: usize,
    pub filter_radius: f32,
}

impl FilterWeights {
    pub fn taps_for(&self, dst: usize) -> &[Tap] {
        &self.taps[dst]
    }
}

/// Builds the weight list for one dimension's pass (spec §4.3).
///
/// Follows the original source's construction: a per-destination center in
/// source coordinates, a half-window scaled by the reduction factor, then
/// per-source weight evaluation and sum-normalization. Ported from
/// `iw_create_weightlist_std` in `original_source/src/imagew-resize.c`,
/// generalized to the blur factor and sub-pixel offset that spec.md's
/// `ResizeSettings` exposes.
pub fn generate_weights(
    function: ResamplingFunction,
    cubic: CubicParams,
    in_size: usize,
    out_size: usize,
    blur_factor: f32,
    subpixel_offset: f32,
    edge_policy: EdgePolicy,
) -> FilterWeights {
    let blur_factor = blur_factor.clamp(0.0001, 10000.0);
    let si = in_size as f32;
    let so = out_size as f32;

    // reduction factor: r = max(1, Si/So) * beta
    let reduction_factor = (si / so).max(1.0) * blur_factor;
    let mix_taper = mix_p(in_size, out_size);
    let radius = if function == ResamplingFunction::Mix {
        0.5 + mix_taper
    } else {
        function.radius()
    };
    let half_window = reduction_factor * radius;

    let mut taps = Vec::with_capacity(out_size);

    for d in 0..out_size {
        // destination center in source coordinates
        let mut p = ((d as f32 + 0.5 - subpixel_offset) / so) * si - 0.5;
        if matches!(function, ResamplingFunction::Box | ResamplingFunction::Nearest) {
            p -= 1e-11;
        }

        let first = (p - half_window).ceil() as i64;
        let last = (p + half_window).floor() as i64;

        let mut row: Vec<Tap> = Vec::new();
        let mut sum = 0f32;

        for s in first..=last {
            let (src_index, in_range) = if s < 0 || s >= in_size as i64 {
                match edge_policy {
                    EdgePolicy::Standard | EdgePolicy::Transparent => (0usize, false),
                    EdgePolicy::Replicate => (s.clamp(0, in_size as i64 - 1) as usize, true),
                }
            } else {
                (s as usize, true)
            };

            if !in_range {
                continue;
            }

            let dx = (s as f32 - p) / reduction_factor;
            let w = if function == ResamplingFunction::Mix {
                mix_weight(dx, mix_taper)
            } else {
                evaluate(function, dx, cubic)
            };
            if w == 0.0 {
                continue;
            }

            sum += w;
            if let Some(existing) = row.iter_mut().find(|t| t.source_index == src_index) {
                existing.weight += w;
            } else {
                row.push(Tap { source_index: src_index, weight: w });
            }
        }

        if sum != 0.0 {
            let recip = 1.0 / sum;
            for t in row.iter_mut() {
                t.weight *= recip;
            }
        }

        taps.push(row);
    }

    FilterWeights { taps, out_size, filter_radius: half_window }
}
