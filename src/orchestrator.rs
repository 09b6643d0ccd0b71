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
//! The two-pass orchestrator (spec §4.5): Pass V resizes columns, Pass H
//! resizes rows, with colorspace conversion, grayscale, alpha handling,
//! background compositing and quantization folded into each pass's
//! per-pixel read/write step.
//!
//! Works on one `Vec<f32>` plane per channel rather than the teacher's
//! interleaved `ColorGroup` row buffer: row_resize.rs's weight application
//! only needs a flat `&[f32]`, and per-channel planes let Pass V treat a
//! "column" and Pass H a "row" with the exact same resize call. See
//! DESIGN.md for why this diverges from the teacher's interleaved layout.

use crate::alpha::{composite_early, composite_late, composite_late_alpha, premultiply, unpremultiply};
use crate::colorspace::{ColorSpace, InputLinearTable};
use crate::dither::DitherErrorRows;
use crate::error::{ProcessError, ProcessResult};
use crate::image::{Image, ImageType, Orientation, SampleType};
use crate::quantize::{quantize_sample, QuantizeParams};
use crate::row_resize::{resize_row_nearest, resize_row_null, resize_row_std};
use crate::settings::{BackgroundColor, BackgroundStrategy, CheckerboardBackground, ResizeSettings};
use crate::strategy::Strategy;
use crate::weights::{generate_weights, EdgePolicy, FilterWeights};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A plane per channel, row-major, linear-light `f32` samples.
struct Planes {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<Vec<f32>>,
}

impl Planes {
    fn new(width: usize, height: usize, channels: usize) -> Planes {
        Planes {
            width,
            height,
            channels,
            data: vec![vec![0f32; width * height]; channels],
        }
    }

    #[inline]
    fn get(&self, ch: usize, x: usize, y: usize) -> f32 {
        self.data[ch][y * self.width + x]
    }

    #[inline]
    fn set(&mut self, ch: usize, x: usize, y: usize, value: f32) {
        self.data[ch][y * self.width + x] = value;
    }
}

pub struct OrchestratorParams {
    pub output_width: usize,
    pub output_height: usize,
    pub input_colorspace: ColorSpace,
    pub output_colorspace: ColorSpace,
    pub orientation: Orientation,
    pub x_settings: ResizeSettings,
    pub y_settings: ResizeSettings,
    pub grayscale_formula: Option<crate::settings::GrayscaleFormula>,
    pub background: Option<BackgroundColor>,
    pub checkerboard: Option<CheckerboardBackground>,
    pub intermediate_clamp: bool,
    pub max_malloc: usize,
    pub random_seed: Option<u64>,
    /// `(x, y, width, height)` sub-rectangle of `input` to read, in the
    /// image's own physical (pre-orientation) pixel coordinates. `None`
    /// reads the whole image. Already validated against `input`'s bounds by
    /// the caller (`ResizeContext::process`).
    pub crop: Option<(usize, usize, usize, usize)>,
}

/// Runs the full two-pass resize, returning a finished output [`Image`].
pub fn run(input: &Image, strategy: &Strategy, params: &OrchestratorParams) -> ProcessResult<Image> {
    let (_, _, crop_w, crop_h) = params.crop.unwrap_or((0, 0, input.width, input.height));
    let (logical_w, logical_h) = params.orientation.logical_size(crop_w, crop_h);

    let cvt_to_grayscale = strategy.intermediate_type.is_gray() && !input.image_type.is_gray();
    let in_has_alpha = input.image_type.has_alpha();
    let intermediate_has_alpha = strategy.intermediate_type.has_alpha();

    let intermediate_channels = strategy.intermediate_type.channels();
    let _ = crate::error::alloc_checked(
        logical_w.max(1) * logical_h.max(1) * intermediate_channels.max(1),
        std::mem::size_of::<f32>(),
        params.max_malloc,
    )?;

    let mut input_planes = Planes::new(logical_w, logical_h, strategy.intermediate_type.channels());

    let linear_table = if input.sample_type == crate::image::SampleType::UInt
        && InputLinearTable::is_profitable(logical_w * logical_h, input.bit_depth, params.input_colorspace)
    {
        Some(InputLinearTable::build(params.input_colorspace, input.max_code()))
    } else {
        None
    };

    read_input(
        input,
        params,
        cvt_to_grayscale,
        in_has_alpha,
        intermediate_has_alpha,
        linear_table.as_ref(),
        &mut input_planes,
    )?;

    if strategy.virtual_alpha && !in_has_alpha {
        let alpha_ch = input_planes.channels - 1;
        input_planes.data[alpha_ch].iter_mut().for_each(|v| *v = 1.0);
    }

    let associate_alpha = intermediate_has_alpha && strategy.background_strategy != BackgroundStrategy::Early;
    if associate_alpha {
        premultiply_color_channels(&mut input_planes);
    }

    let x_same = logical_w == params.output_width;
    let y_same = logical_h == params.output_height;
    let v_weights = build_weights(
        &params.y_settings,
        logical_h,
        params.output_height,
        y_same,
    );
    let h_weights = build_weights(
        &params.x_settings,
        logical_w,
        params.output_width,
        x_same,
    );

    let after_v = pass_v(&input_planes, &v_weights, &params.y_settings);
    let after_h = pass_h(&after_v, &h_weights, &params.x_settings, params.output_width);

    finish(after_h, strategy, params, associate_alpha)
}

fn build_weights(settings: &ResizeSettings, in_size: usize, out_size: usize, same_length: bool) -> FilterWeights {
    let function = settings
        .function
        .resolve(same_length, settings.total_subpixel_offset() != 0.0);
    generate_weights(
        function,
        settings.cubic,
        in_size,
        out_size,
        settings.clamped_blur(),
        settings.total_subpixel_offset(),
        settings.edge_policy,
    )
}

fn read_input(
    input: &Image,
    params: &OrchestratorParams,
    cvt_to_grayscale: bool,
    in_has_alpha: bool,
    intermediate_has_alpha: bool,
    linear_table: Option<&InputLinearTable>,
    planes: &mut Planes,
) -> ProcessResult<()> {
    let in_channels = input.image_type.channels();
    let max_code = input.max_code();
    let (crop_x, crop_y, _, _) = params.crop.unwrap_or((0, 0, input.width, input.height));
    let to_linear = |raw: f32| match linear_table {
        Some(table) => table.lookup((raw * max_code as f32).round() as u32),
        None => params.input_colorspace.to_linear(raw),
    };
    for ly in 0..planes.height {
        for lx in 0..planes.width {
            let (ox, oy) = params.orientation.map(lx, ly, planes.width, planes.height);
            let (px, py) = (ox + crop_x, oy + crop_y);
            let mut raw = [0f32; 4];
            for ch in 0..in_channels {
                raw[ch] = input.read_sample(px, py, ch);
            }
            let alpha = if in_has_alpha { raw[in_channels - 1] } else { 1.0 };

            let linear: [f32; 3] = if input.image_type.is_gray() {
                let g = to_linear(raw[0]);
                [g, g, g]
            } else {
                [to_linear(raw[0]), to_linear(raw[1]), to_linear(raw[2])]
            };

            let color: Vec<f32> = if cvt_to_grayscale {
                let formula = params.grayscale_formula.unwrap_or(crate::settings::GrayscaleFormula::Srgb);
                vec![formula.apply(linear[0], linear[1], linear[2])]
            } else if input.image_type.is_gray() {
                vec![linear[0]]
            } else {
                vec![linear[0], linear[1], linear[2]]
            };

            let color: Vec<f32> = if params.background.is_some()
                && intermediate_has_alpha
                && early_strategy_active(params)
            {
                let bg = params.background.unwrap();
                color
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| composite_early(c, alpha, bg.rgb.get(i).copied().unwrap_or(bg.rgb[0])))
                    .collect()
            } else {
                color
            };

            for (ch, &v) in color.iter().enumerate() {
                planes.set(ch, lx, ly, v);
            }
            if intermediate_has_alpha {
                let alpha_ch = planes.channels - 1;
                planes.set(alpha_ch, lx, ly, alpha);
            }
        }
    }
    Ok(())
}

/// Whether EARLY background compositing should run on read (a channel
/// offset is active). Orchestrator-local helper since `Strategy` only
/// records the decision, not the raw input that produced it.
fn early_strategy_active(params: &OrchestratorParams) -> bool {
    params.x_settings.channel_offset != 0.0 || params.y_settings.channel_offset != 0.0
}

fn premultiply_color_channels(planes: &mut Planes) {
    let alpha_ch = planes.channels - 1;
    let (color_data, alpha_data) = planes.data.split_at_mut(alpha_ch);
    let alpha = &alpha_data[0];
    for plane in color_data.iter_mut() {
        for (sample, &a) in plane.iter_mut().zip(alpha.iter()) {
            *sample = premultiply(*sample, a);
        }
    }
}

#[cfg(feature = "rayon")]
use rayon::prelude::*;

fn resize_1d(
    samples: &[f32],
    in_size: usize,
    out_size: usize,
    weights: &FilterWeights,
    function: crate::sampler::ResamplingFunction,
) -> Vec<f32> {
    match function {
        crate::sampler::ResamplingFunction::Null => resize_row_null(samples, out_size),
        crate::sampler::ResamplingFunction::Nearest => resize_row_nearest(samples, in_size, out_size),
        _ => resize_row_std(samples, weights),
    }
}

/// Resizes every column independently (spec §4.5 Pass V); columns have no
/// cross-dependencies, so this is the orchestrator's first parallelism seam
/// (`#[cfg(feature = "rayon")]`, matching the teacher's per-row/per-column
/// `rayon` gating).
fn pass_v(input: &Planes, weights: &FilterWeights, settings: &ResizeSettings) -> Planes {
    let function = settings.function.resolve(input.height == weights.out_size, false);
    let mut out = Planes::new(input.width, weights.out_size, input.channels);
    for ch in 0..input.channels {
        let columns: Vec<usize> = (0..input.width).collect();
        #[cfg(feature = "rayon")]
        let resized: Vec<Vec<f32>> = columns
            .par_iter()
            .map(|&x| {
                let column: Vec<f32> = (0..input.height).map(|y| input.get(ch, x, y)).collect();
                resize_1d(&column, input.height, weights.out_size, weights, function)
            })
            .collect();
        #[cfg(not(feature = "rayon"))]
        let resized: Vec<Vec<f32>> = columns
            .iter()
            .map(|&x| {
                let column: Vec<f32> = (0..input.height).map(|y| input.get(ch, x, y)).collect();
                resize_1d(&column, input.height, weights.out_size, weights, function)
            })
            .collect();
        for (x, col) in resized.into_iter().enumerate() {
            for (y, v) in col.into_iter().enumerate() {
                out.set(ch, x, y, v);
            }
        }
    }
    out
}

/// Resizes every row independently (spec §4.5 Pass H); same parallelism
/// seam as [`pass_v`], over rows instead of columns.
fn pass_h(input: &Planes, weights: &FilterWeights, settings: &ResizeSettings, out_width: usize) -> Planes {
    let function = settings.function.resolve(input.width == out_width, false);
    let mut out = Planes::new(out_width, input.height, input.channels);
    for ch in 0..input.channels {
        let rows: Vec<usize> = (0..input.height).collect();
        #[cfg(feature = "rayon")]
        let resized: Vec<Vec<f32>> = rows
            .par_iter()
            .map(|&y| {
                let row: Vec<f32> = (0..input.width).map(|x| input.get(ch, x, y)).collect();
                resize_1d(&row, input.width, out_width, weights, function)
            })
            .collect();
        #[cfg(not(feature = "rayon"))]
        let resized: Vec<Vec<f32>> = rows
            .iter()
            .map(|&y| {
                let row: Vec<f32> = (0..input.width).map(|x| input.get(ch, x, y)).collect();
                resize_1d(&row, input.width, out_width, weights, function)
            })
            .collect();
        for (y, row) in resized.into_iter().enumerate() {
            for (x, v) in row.into_iter().enumerate() {
                out.set(ch, x, y, v);
            }
        }
    }
    out
}

fn finish(
    mut planes: Planes,
    strategy: &Strategy,
    params: &OrchestratorParams,
    was_premultiplied: bool,
) -> ProcessResult<Image> {
    let has_alpha = strategy.intermediate_type.has_alpha();
    let alpha_ch = if has_alpha { Some(planes.channels - 1) } else { None };

    if was_premultiplied {
        if let Some(alpha_ch) = alpha_ch {
            let alpha_plane = planes.data[alpha_ch].clone();
            for ch in 0..planes.channels {
                if Some(ch) == alpha_ch {
                    continue;
                }
                for (sample, &a) in planes.data[ch].iter_mut().zip(alpha_plane.iter()) {
                    *sample = unpremultiply(*sample, a);
                }
            }
        }
    }

    if let Some(ch) = alpha_ch {
        for v in planes.data[ch].iter_mut() {
            *v = v.clamp(0.0, 1.0);
        }
    }
    if params.intermediate_clamp {
        let color_channels = if has_alpha { planes.channels - 1 } else { planes.channels };
        for plane in planes.data[..color_channels].iter_mut() {
            for v in plane.iter_mut() {
                *v = v.clamp(0.0, 1.0);
            }
        }
    }

    if strategy.background_strategy == BackgroundStrategy::Late {
        let color_channels = planes.channels - usize::from(has_alpha);
        for y in 0..planes.height {
            for x in 0..planes.width {
                let bg = if let Some(cb) = &params.checkerboard {
                    cb.color_at(x, y)
                } else {
                    params.background.unwrap_or(BackgroundColor::opaque([0.0, 0.0, 0.0]))
                };
                let alpha = alpha_ch.map(|ch| planes.get(ch, x, y)).unwrap_or(1.0);
                for ch in 0..color_channels {
                    let v = planes.get(ch, x, y);
                    planes.set(ch, x, y, composite_late(v, alpha, bg, ch));
                }
                if bg.has_transparency() {
                    if let Some(ch) = alpha_ch {
                        let new_alpha = composite_late_alpha(alpha, bg.alpha);
                        planes.set(ch, x, y, new_alpha);
                    }
                }
            }
        }
    }

    let output_channels = strategy.output_type.channels();
    let output_has_alpha = strategy.output_type.has_alpha();
    let bytes_per_sample = match strategy.output_sample_type {
        SampleType::Float32 => 4,
        SampleType::UInt if strategy.output_bit_depth <= 8 => 1,
        SampleType::UInt => 2,
    };
    let bytes_per_row = crate::image::checked_bytes_per_row(planes.width, output_channels, bytes_per_sample)?;
    let total = crate::error::alloc_checked(bytes_per_row, planes.height.max(1), params.max_malloc)?;
    let mut out_image = Image {
        width: planes.width,
        height: planes.height,
        image_type: strategy.output_type,
        sample_type: strategy.output_sample_type,
        bit_depth: strategy.output_bit_depth,
        bytes_per_row,
        data: vec![0u8; total],
        metadata: crate::image::ImageMetadata::default(),
    };

    let max_code = out_image.max_code();
    let is_float = strategy.output_sample_type == SampleType::Float32;
    // Per-channel `max_code` (spec §6 `set_max_color_code_for`) usually
    // equals the output depth's own `max_code` above, but a caller can
    // narrow a channel to fewer representable codes than the storage depth
    // allows (e.g. a 6-bit channel packed into an 8-bit sample). Quantize
    // against the channel's own code count, then renormalize by it so
    // `write_sample` (which always scales by the image's storage depth)
    // still gets a plain `[0, 1]` fraction.
    let channel_max_code =
        |ch: usize| strategy.output_channels.get(ch).map(|c| c.max_code).unwrap_or(max_code);

    let mut rng = params.random_seed.map(StdRng::seed_from_u64);
    // Gates whether the table is worth building at all; per-channel use
    // below additionally checks each channel's own settings, since
    // `set_dither_for`/`set_color_count_for` can leave channels in this
    // `output_channels` list with different settings from one another.
    let any_dithered = strategy
        .output_channels
        .iter()
        .any(|c| c.dither_family != crate::dither::DitherFamily::None);
    let any_posterized = strategy.output_channels.iter().any(|c| c.color_count != 0);
    let boundary_table = if crate::accel::OutputBoundaryTable::is_usable(
        !is_float,
        any_dithered,
        any_posterized,
        planes.width * planes.height,
    ) {
        Some(crate::accel::OutputBoundaryTable::build(params.output_colorspace, max_code))
    } else {
        None
    };

    let mut error_rows: Vec<Option<DitherErrorRows>> = strategy
        .output_channels
        .iter()
        .map(|c| {
            if c.dither_family == crate::dither::DitherFamily::ErrorDiffusion {
                Some(DitherErrorRows::new(planes.width))
            } else {
                None
            }
        })
        .collect();

    for y in 0..planes.height {
        let fwd = if y % 2 == 0 { 1 } else { -1 };
        for x in 0..planes.width {
            for ch in 0..output_channels.min(planes.channels) {
                let channel_info = strategy.output_channels.get(ch);
                let dither_family = channel_info.map(|c| c.dither_family).unwrap_or_default();
                let dither_subtype = channel_info.map(|c| c.dither_subtype).unwrap_or_default();
                let color_count = channel_info.map(|c| c.color_count).unwrap_or(0);
                let is_alpha_channel = output_has_alpha && ch == output_channels - 1;
                // Alpha is never gamma-encoded: the source this was grounded
                // on runs the alpha channel through a fixed linear transfer
                // function on both input and output regardless of the
                // image's own colorspace.
                let channel_colorspace = if is_alpha_channel { ColorSpace::Linear } else { params.output_colorspace };
                let this_max_code = channel_max_code(ch);

                let s_lin = planes.get(ch, x, y);

                if is_float {
                    out_image.write_sample(x, y, ch, channel_colorspace.from_linear(s_lin.clamp(0.0, 1.0)));
                    continue;
                }

                let q = QuantizeParams {
                    colorspace: channel_colorspace,
                    max_code: this_max_code,
                    color_count: if is_alpha_channel { 0 } else { color_count },
                    dither_family: if is_alpha_channel { crate::dither::DitherFamily::None } else { dither_family },
                    dither_subtype,
                    boundary_table: if is_alpha_channel
                        || this_max_code != max_code
                        || dither_family != crate::dither::DitherFamily::None
                        || color_count != 0
                    {
                        None
                    } else {
                        boundary_table.as_ref()
                    },
                };
                let code = quantize_sample(
                    s_lin,
                    x,
                    y,
                    &q,
                    error_rows[ch].as_mut(),
                    rng.as_mut(),
                    fwd,
                );
                out_image.write_sample(x, y, ch, code as f32 / this_max_code as f32);
            }
        }
        for rows in error_rows.iter_mut().flatten() {
            rows.advance();
        }
    }

    if planes.width * planes.height == 0 {
        return Err(ProcessError::InvalidDimensions("output image has zero area".to_string()));
    }

    Ok(out_image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageMetadata;
    use crate::sampler::ResamplingFunction;
    use crate::strategy::{select_strategy, StrategyInput};

    fn gray_image(values: &[u8], width: usize, height: usize) -> Image {
        Image {
            width,
            height,
            image_type: ImageType::Gray,
            sample_type: SampleType::UInt,
            bit_depth: 8,
            bytes_per_row: width,
            data: values.to_vec(),
            metadata: ImageMetadata::default(),
        }
    }

    #[test]
    fn null_resize_identity_preserves_gray_samples() {
        let input = gray_image(&[10, 20, 30, 40], 2, 2);
        let strategy_input = StrategyInput {
            input_type: ImageType::Gray,
            cvt_to_grayscale: false,
            has_checkerboard: false,
            checkerboard: None,
            has_background: false,
            background_has_transparency: false,
            channel_offset_active: false,
            requested_output_depth: Some(8),
            requested_float_output: false,
            posterize_color_count: 0,
            x_settings: ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
            y_settings: ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
        };
        let strategy = select_strategy(&strategy_input);
        let params = OrchestratorParams {
            output_width: 2,
            output_height: 2,
            input_colorspace: ColorSpace::Linear,
            output_colorspace: ColorSpace::Linear,
            orientation: Orientation::Identity,
            x_settings: strategy_input.x_settings,
            y_settings: strategy_input.y_settings,
            grayscale_formula: None,
            background: None,
            checkerboard: None,
            intermediate_clamp: false,
            max_malloc: 1 << 30,
            random_seed: None,
            crop: None,
        };
        let output = run(&input, &strategy, &params).unwrap();
        assert_eq!(output.data, vec![10, 20, 30, 40]);
    }

    #[test]
    fn alpha_channel_ignores_output_colorspace_gamma() {
        let input = Image {
            width: 1,
            height: 1,
            image_type: ImageType::Rgba,
            sample_type: SampleType::UInt,
            bit_depth: 8,
            bytes_per_row: 4,
            data: vec![100, 100, 100, 128],
            metadata: ImageMetadata::default(),
        };
        let strategy_input = StrategyInput {
            input_type: ImageType::Rgba,
            cvt_to_grayscale: false,
            has_checkerboard: false,
            checkerboard: None,
            has_background: false,
            background_has_transparency: false,
            channel_offset_active: false,
            requested_output_depth: Some(8),
            requested_float_output: false,
            posterize_color_count: 0,
            x_settings: ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
            y_settings: ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
        };
        let strategy = select_strategy(&strategy_input);
        let params = OrchestratorParams {
            output_width: 1,
            output_height: 1,
            input_colorspace: ColorSpace::Srgb,
            output_colorspace: ColorSpace::Srgb,
            orientation: Orientation::Identity,
            x_settings: strategy_input.x_settings,
            y_settings: strategy_input.y_settings,
            grayscale_formula: None,
            background: None,
            checkerboard: None,
            intermediate_clamp: false,
            max_malloc: 1 << 30,
            random_seed: None,
            crop: None,
        };
        let output = run(&input, &strategy, &params).unwrap();
        // If the alpha channel were run through the sRGB curve like the
        // color channels, 128 would land around 187; it must come back
        // essentially unchanged.
        assert!((output.data[3] as i32 - 128).abs() <= 1, "alpha code was {}", output.data[3]);
    }

    #[test]
    fn boundary_table_is_not_used_for_a_channel_that_is_itself_posterized() {
        // Large enough to clear `OutputBoundaryTable::AREA_THRESHOLD` so the
        // table gets built at all.
        let (width, height) = (30, 20);
        let data: Vec<u8> = (0..width * height * 3).map(|_| 100u8).collect();
        let input = Image {
            width,
            height,
            image_type: ImageType::Rgb,
            sample_type: SampleType::UInt,
            bit_depth: 8,
            bytes_per_row: width * 3,
            data,
            metadata: ImageMetadata::default(),
        };
        let strategy_input = StrategyInput {
            input_type: ImageType::Rgb,
            cvt_to_grayscale: false,
            has_checkerboard: false,
            checkerboard: None,
            has_background: false,
            background_has_transparency: false,
            channel_offset_active: false,
            requested_output_depth: Some(8),
            requested_float_output: false,
            posterize_color_count: 0,
            x_settings: ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
            y_settings: ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
        };
        let mut strategy = select_strategy(&strategy_input);
        // Only the blue channel is posterized to 2 shades; red and green are
        // left at full depth, exactly the shape `set_color_count_for` with a
        // single-channel selector produces.
        strategy.output_channels[2].color_count = 2;
        let params = OrchestratorParams {
            output_width: width,
            output_height: height,
            input_colorspace: ColorSpace::Linear,
            output_colorspace: ColorSpace::Linear,
            orientation: Orientation::Identity,
            x_settings: strategy_input.x_settings,
            y_settings: strategy_input.y_settings,
            grayscale_formula: None,
            background: None,
            checkerboard: None,
            intermediate_clamp: false,
            max_malloc: 1 << 30,
            random_seed: None,
            crop: None,
        };
        let output = run(&input, &strategy, &params).unwrap();
        // Red (untouched) survives at full depth; blue (posterized to 2
        // shades) must land on one of the two posterized extremes, not the
        // direct-quantized value a shared boundary table would have given it.
        assert!((output.data[0] as i32 - 100).abs() <= 1, "red code was {}", output.data[0]);
        assert!(
            output.data[2] == 0 || output.data[2] == 255,
            "blue code was {}, expected a posterized extreme",
            output.data[2]
        );
    }
}
