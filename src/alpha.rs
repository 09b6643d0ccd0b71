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
use crate::settings::BackgroundColor;

/// Premultiplies a linear-light color sample by alpha (`s <- alpha * s`),
/// the non-EARLY branch of spec §4.5 step 4.
#[inline]
pub fn premultiply(sample: f32, alpha: f32) -> f32 {
    sample * alpha
}

/// `EARLY` background compositing, applied before resize (spec §4.5 step 4):
/// `alpha*s + (1-alpha)*bg`.
#[inline]
pub fn composite_early(sample: f32, alpha: f32, bg: f32) -> f32 {
    alpha * sample + (1.0 - alpha) * bg
}

/// Re-divides a premultiplied color sample by its resized alpha
/// (unassociated-alpha recovery, spec §4.5 step 1 of Pass H's per-output-x
/// loop). `alpha == 0.0` short-circuits to `0.0` exactly as
/// `original_source` does; amplification for tiny nonzero alpha is allowed
/// and bounded by the caller's subsequent clamp (DESIGN.md Open Question).
#[inline]
pub fn unpremultiply(sample: f32, alpha: f32) -> f32 {
    if alpha == 0.0 {
        0.0
    } else {
        sample / alpha
    }
}

/// `LATE` background compositing, applied after resize (spec §4.5 step 2).
/// When the background itself carries partial transparency, the composited
/// alpha is also updated; otherwise alpha is left for the caller to drop
/// (background replaces transparency in the output).
pub fn composite_late(sample: f32, alpha: f32, bg: BackgroundColor, channel: usize) -> f32 {
    let bg_c = bg.rgb.get(channel).copied().unwrap_or(bg.rgb[0]);
    if bg.has_transparency() {
        sample * alpha + bg_c * bg.alpha * (1.0 - alpha)
    } else {
        sample * alpha + bg_c * (1.0 - alpha)
    }
}

/// New alpha after compositing against a background with partial
/// transparency: `alpha + alpha_bg*(1-alpha)`.
pub fn composite_late_alpha(alpha: f32, bg_alpha: f32) -> f32 {
    alpha + bg_alpha * (1.0 - alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpremultiply_zero_alpha_short_circuits() {
        assert_eq!(unpremultiply(0.5, 0.0), 0.0);
    }

    #[test]
    fn unassociated_alpha_preservation_scenario() {
        // spec §8 scenario 6: RGBA 2x1 = [(255,255,255,0), (0,0,0,255)],
        // box filter -> (0,0,0,128) (+/-1).
        let white_premul = premultiply(1.0, 0.0); // transparent white contributes 0 color
        let black_premul = premultiply(0.0, 1.0);
        let avg_color = (white_premul + black_premul) / 2.0;
        let avg_alpha = (0.0 + 1.0) / 2.0;
        let result = unpremultiply(avg_color, avg_alpha);
        assert!(result.abs() < 1e-6);
        let code_alpha = (avg_alpha * 255.0).round() as i32;
        assert!((code_alpha - 128).abs() <= 1);
    }

    #[test]
    fn early_composite_matches_formula() {
        let bg = 0.2;
        assert_eq!(composite_early(1.0, 0.0, bg), bg);
        assert_eq!(composite_early(1.0, 1.0, bg), 1.0);
    }
}
