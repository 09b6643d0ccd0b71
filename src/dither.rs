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
//! Dither family tables, ported from `iw_ordered_dither` / `iw_errdiff_dither`
//! in `original_source/src/imagew-main.c`.

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DitherFamily {
    #[default]
    None,
    Ordered,
    Random,
    ErrorDiffusion,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DitherSubtype {
    #[default]
    Default,
    /// Ordered: a dispersed Bayer-like pattern.
    Dispersed,
    /// Ordered: a clustered halftone-like pattern.
    Halftone,
    /// Random: every channel gets an independent PRNG stream.
    Independent,
    /// Random: color channels share one PRNG stream ("same pattern").
    SamePattern,
    FloydSteinberg,
    JarvisJudiceNinke,
    Stucki,
    Burkes,
    Sierra3,
    Sierra2,
    SierraLite,
    Atkinson,
}

impl DitherSubtype {
    pub fn default_for(family: DitherFamily) -> DitherSubtype {
        match family {
            DitherFamily::None => DitherSubtype::Default,
            DitherFamily::Ordered => DitherSubtype::Dispersed,
            DitherFamily::Random => DitherSubtype::Independent,
            DitherFamily::ErrorDiffusion => DitherSubtype::FloydSteinberg,
        }
    }
}

/// 8x8 dispersed (Bayer-like) ordered-dither threshold pattern, values in
/// `[0,1)`. Transcribed row-for-row from `iw_ordered_dither`'s
/// `pattern[0][(x%8) + 8*(y%8)]` in `original_source/src/imagew-main.c`.
pub const ORDERED_DISPERSED: [[f32; 8]; 8] = {
    const N: f32 = 64.0;
    [
        [0.5, 48.5, 12.5, 60.5, 3.5, 51.5, 15.5, 63.5],
        [32.5, 16.5, 44.5, 28.5, 35.5, 19.5, 47.5, 31.5],
        [8.5, 56.5, 4.5, 52.5, 11.5, 59.5, 7.5, 55.5],
        [40.5, 24.5, 36.5, 20.5, 43.5, 27.5, 39.5, 23.5],
        [2.5, 50.5, 14.5, 62.5, 1.5, 49.5, 13.5, 61.5],
        [34.5, 18.5, 46.5, 30.5, 33.5, 17.5, 45.5, 29.5],
        [10.5, 58.5, 6.5, 54.5, 9.5, 57.5, 5.5, 53.5],
        [42.5, 26.5, 38.5, 22.5, 41.5, 25.5, 37.5, 21.5],
    ]
    .map(|row| row.map(|v| v / N))
};

/// 8x8 clustered halftone-like ordered-dither threshold pattern. Transcribed
/// row-for-row from `iw_ordered_dither`'s `pattern[1][(x%8) + 8*(y%8)]` in
/// `original_source/src/imagew-main.c`.
pub const ORDERED_HALFTONE: [[f32; 8]; 8] = {
    const N: f32 = 64.0;
    [
        [3.5, 9.5, 17.5, 27.5, 25.5, 15.5, 7.5, 1.5],
        [11.5, 29.5, 37.5, 45.5, 43.5, 35.5, 23.5, 5.5],
        [19.5, 39.5, 51.5, 57.5, 55.5, 49.5, 33.5, 13.5],
        [31.5, 47.5, 59.5, 63.5, 61.5, 53.5, 41.5, 21.5],
        [30.5, 46.5, 58.5, 62.5, 60.5, 52.5, 40.5, 20.5],
        [18.5, 38.5, 50.5, 56.5, 54.5, 48.5, 32.5, 12.5],
        [10.5, 28.5, 36.5, 44.5, 42.5, 34.5, 22.5, 4.5],
        [2.5, 8.5, 16.5, 26.5, 24.5, 14.5, 6.5, 0.5],
    ]
    .map(|row| row.map(|v| v / N))
};

pub fn ordered_threshold(subtype: DitherSubtype, x: usize, y: usize) -> f32 {
    let table = match subtype {
        DitherSubtype::Halftone => &ORDERED_HALFTONE,
        _ => &ORDERED_DISPERSED,
    };
    table[y % 8][x % 8]
}

/// One error-diffusion matrix: `(dx, dy, numerator)` triples plus a shared
/// `denominator`, expressed for the "forward" (left-to-right) traversal
/// direction; odd rows mirror `dx` for the serpentine sweep.
#[derive(Debug, Clone, Copy)]
pub struct ErrorDiffusionMatrix {
    pub taps: &'static [(i32, i32, i32)],
    pub denominator: i32,
}

pub const FLOYD_STEINBERG: ErrorDiffusionMatrix = ErrorDiffusionMatrix {
    taps: &[(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
    denominator: 16,
};

pub const JARVIS_JUDICE_NINKE: ErrorDiffusionMatrix = ErrorDiffusionMatrix {
    taps: &[
        (1, 0, 7), (2, 0, 5),
        (-2, 1, 3), (-1, 1, 5), (0, 1, 7), (1, 1, 5), (2, 1, 3),
        (-2, 2, 1), (-1, 2, 3), (0, 2, 5), (1, 2, 3), (2, 2, 1),
    ],
    denominator: 48,
};

pub const STUCKI: ErrorDiffusionMatrix = ErrorDiffusionMatrix {
    taps: &[
        (1, 0, 8), (2, 0, 4),
        (-2, 1, 2), (-1, 1, 4), (0, 1, 8), (1, 1, 4), (2, 1, 2),
        (-2, 2, 1), (-1, 2, 2), (0, 2, 4), (1, 2, 2), (2, 2, 1),
    ],
    denominator: 42,
};

pub const BURKES: ErrorDiffusionMatrix = ErrorDiffusionMatrix {
    taps: &[
        (1, 0, 8), (2, 0, 4),
        (-2, 1, 2), (-1, 1, 4), (0, 1, 8), (1, 1, 4), (2, 1, 2),
    ],
    denominator: 32,
};

pub const SIERRA_3: ErrorDiffusionMatrix = ErrorDiffusionMatrix {
    taps: &[
        (1, 0, 5), (2, 0, 3),
        (-2, 1, 2), (-1, 1, 4), (0, 1, 5), (1, 1, 4), (2, 1, 2),
        (-1, 2, 2), (0, 2, 3), (1, 2, 2),
    ],
    denominator: 32,
};

pub const SIERRA_2: ErrorDiffusionMatrix = ErrorDiffusionMatrix {
    taps: &[
        (1, 0, 4), (2, 0, 3),
        (-2, 1, 1), (-1, 1, 2), (0, 1, 3), (1, 1, 2), (2, 1, 1),
    ],
    denominator: 16,
};

/// "Sierra-Lite" / Sierra-42a: the 3-tap minimal Sierra variant.
pub const SIERRA_LITE: ErrorDiffusionMatrix = ErrorDiffusionMatrix {
    taps: &[(1, 0, 2), (-1, 1, 1), (0, 1, 1)],
    denominator: 4,
};

pub const ATKINSON: ErrorDiffusionMatrix = ErrorDiffusionMatrix {
    taps: &[
        (1, 0, 1), (2, 0, 1),
        (-1, 1, 1), (0, 1, 1), (1, 1, 1),
        (0, 2, 1),
    ],
    denominator: 8,
};

pub fn matrix_for(subtype: DitherSubtype) -> ErrorDiffusionMatrix {
    match subtype {
        DitherSubtype::JarvisJudiceNinke => JARVIS_JUDICE_NINKE,
        DitherSubtype::Stucki => STUCKI,
        DitherSubtype::Burkes => BURKES,
        DitherSubtype::Sierra3 => SIERRA_3,
        DitherSubtype::Sierra2 => SIERRA_2,
        DitherSubtype::SierraLite => SIERRA_LITE,
        DitherSubtype::Atkinson => ATKINSON,
        _ => FLOYD_STEINBERG,
    }
}

/// Rolling buffer of `dither_errors[0..=2][x]` for one channel, shifted up
/// one row after each row of Pass H completes (spec §4.5, §5).
#[derive(Debug, Clone)]
pub struct DitherErrorRows {
    pub rows: [Vec<f32>; 3],
}

impl DitherErrorRows {
    pub fn new(width: usize) -> DitherErrorRows {
        DitherErrorRows {
            rows: [vec![0f32; width], vec![0f32; width], vec![0f32; width]],
        }
    }

    /// Distributes an error value from column `x` using `matrix`, honoring
    /// the serpentine `fwd` direction (`1` on even rows, `-1` on odd rows,
    /// matching `original_source`'s `fwd=(y%2)?-1:1`).
    pub fn diffuse(&mut self, x: usize, width: usize, error: f32, matrix: ErrorDiffusionMatrix, fwd: i32) {
        for &(dx, dy, num) in matrix.taps {
            let tx = x as i64 + (dx * fwd) as i64;
            if tx < 0 || tx >= width as i64 || dy < 0 || dy > 2 {
                continue;
            }
            self.rows[dy as usize][tx as usize] += error * num as f32 / matrix.denominator as f32;
        }
    }

    /// Shifts rows 1,2 into 0,1 and clears the new bottom row (row 2).
    pub fn advance(&mut self) {
        self.rows.swap(0, 1);
        self.rows.swap(1, 2);
        self.rows[2].iter_mut().for_each(|v| *v = 0.0);
    }
}
