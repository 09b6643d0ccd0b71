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

/// sRGB breakpoint between the linear segment and the power segment.
const SRGB_BREAKPOINT: f32 = 0.04045;
const SRGB_LINEAR_BREAKPOINT: f32 = 0.0031308;

/// Rec.709's two curve pieces intersect at linear value 0.020
/// (`imagew-main.c`'s `rec709_to_linear_sample`/`linear_to_rec709_sample`).
/// `to_linear` branches on the coded-domain sample, so its threshold is the
/// coded value that maps to that linear crossover, `4.5 * 0.020`; `from_linear`
/// branches on the linear-domain sample directly, so it compares against
/// `0.020` itself.
const REC709_BREAKPOINT: f32 = 4.5 * 0.020;
const REC709_LINEAR_BREAKPOINT: f32 = 0.020;

const NEAR_ONE_EPSILON: f32 = 1e-5;

/// Colorspace descriptor: a transfer-function family plus, for `Gamma`, its
/// exponent. Values within `(0.999995, 1.000005)` collapse to `Linear` at
/// construction so that a caller-supplied "gamma 1.0" behaves identically to
/// `Linear` rather than paying for a `powf` that is the identity anyway.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ColorSpace {
    Srgb,
    Rec709,
    Linear,
    Gamma(f32),
}

impl ColorSpace {
    pub fn gamma(value: f32) -> ColorSpace {
        if (0.999995..1.000005).contains(&value) {
            ColorSpace::Linear
        } else {
            ColorSpace::Gamma(value)
        }
    }

    /// Maps a coded sample in `[0, 1]` into linear light.
    pub fn to_linear(self, s: f32) -> f32 {
        match self {
            ColorSpace::Linear => s,
            ColorSpace::Srgb => {
                if s <= SRGB_BREAKPOINT {
                    s / 12.92
                } else {
                    ((s + 0.055) / 1.055).powf(2.4)
                }
            }
            ColorSpace::Rec709 => {
                if s <= REC709_BREAKPOINT {
                    s / 4.5
                } else {
                    ((s + 0.099) / 1.099).powf(1.0 / 0.45)
                }
            }
            ColorSpace::Gamma(g) => s.powf(g),
        }
    }

    /// Inverse of [`ColorSpace::to_linear`]. Short-circuits to `1.0` near the
    /// upper bound to avoid a slow `powf` call whose result is indistinguishable
    /// from 1.0 anyway.
    pub fn from_linear(self, s: f32) -> f32 {
        if s >= 1.0 - NEAR_ONE_EPSILON {
            return 1.0;
        }
        match self {
            ColorSpace::Linear => s,
            ColorSpace::Srgb => {
                if s <= SRGB_LINEAR_BREAKPOINT {
                    s * 12.92
                } else {
                    1.055 * s.powf(1.0 / 2.4) - 0.055
                }
            }
            ColorSpace::Rec709 => {
                if s <= REC709_LINEAR_BREAKPOINT {
                    s * 4.5
                } else {
                    1.099 * s.powf(0.45) - 0.099
                }
            }
            ColorSpace::Gamma(g) => s.powf(1.0 / g),
        }
    }
}

/// Lazily-built lookup table mapping an 8-bit-or-narrower coded sample
/// directly to its linear-light value, amortizing the transfer-function
/// `powf` calls across every pixel of a column/row. Built only when the
/// source image exceeds the ~512-pixel threshold below which the table-build
/// cost isn't amortized (spec §9).
#[derive(Debug, Clone)]
pub struct InputLinearTable {
    entries: Vec<f32>,
}

impl InputLinearTable {
    pub const AREA_THRESHOLD: usize = 512;

    pub fn build(colorspace: ColorSpace, max_code: u32) -> InputLinearTable {
        let n = max_code as usize + 1;
        let mut entries = Vec::with_capacity(n);
        for code in 0..n {
            entries.push(colorspace.to_linear(code as f32 / max_code as f32));
        }
        InputLinearTable { entries }
    }

    pub fn lookup(&self, code: u32) -> f32 {
        self.entries[code as usize]
    }

    pub fn is_profitable(image_area: usize, bit_depth: u32, colorspace: ColorSpace) -> bool {
        bit_depth <= 8 && colorspace != ColorSpace::Linear && image_area > Self::AREA_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_round_trips_within_tolerance() {
        for i in 0..=255u32 {
            let s = i as f32 / 255.0;
            let lin = ColorSpace::Srgb.to_linear(s);
            let back = ColorSpace::Srgb.from_linear(lin);
            assert!((back - s).abs() < 1e-5, "s={s} back={back}");
        }
    }

    #[test]
    fn rec709_breakpoint_is_continuous() {
        // the two pieces should agree closely right at the coded-domain junction
        let below = ColorSpace::Rec709.to_linear(REC709_BREAKPOINT - 1e-6);
        let above = ColorSpace::Rec709.to_linear(REC709_BREAKPOINT + 1e-6);
        assert!((below - above).abs() < 1e-3);
    }

    #[test]
    fn rec709_round_trips_within_tolerance() {
        for i in 0..=255u32 {
            let s = i as f32 / 255.0;
            let lin = ColorSpace::Rec709.to_linear(s);
            assert!(lin >= 0.0, "s={s} lin={lin}");
            let back = ColorSpace::Rec709.from_linear(lin);
            assert!((back - s).abs() < 1e-4, "s={s} back={back}");
        }
    }

    #[test]
    fn gamma_near_one_collapses_to_linear() {
        assert_eq!(ColorSpace::gamma(1.000001), ColorSpace::Linear);
        assert_eq!(ColorSpace::gamma(1.5), ColorSpace::Gamma(1.5));
    }

    #[test]
    fn linear_table_matches_direct_conversion() {
        let table = InputLinearTable::build(ColorSpace::Srgb, 255);
        for code in 0..=255u32 {
            let direct = ColorSpace::Srgb.to_linear(code as f32 / 255.0);
            assert!((table.lookup(code) - direct).abs() < 1e-7);
        }
    }
}
