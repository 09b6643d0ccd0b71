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
//! The public entry point (spec §6): a builder-style context owning one
//! resize job's settings, consumed exactly once by [`ResizeContext::process`].

use crate::channel::ChannelSelector;
use crate::colorspace::ColorSpace;
use crate::dither::{DitherFamily, DitherSubtype};
use crate::error::{ProcessError, ProcessResult, Warning};
use crate::image::{Image, ImageType, Orientation};
use crate::orchestrator::{self, OrchestratorParams};
use crate::palette::Palette;
use crate::settings::{BackgroundColor, CheckerboardBackground, GrayscaleFormula, ResizeSettings};
use crate::strategy::{select_strategy, StrategyInput};
use crate::weights::EdgePolicy;

/// Caller-installable warning sink, invoked once per [`Warning`] in addition
/// to the `log::warn!` record every warning always produces.
pub type WarnSink = Box<dyn FnMut(&Warning)>;

pub const DEFAULT_MAX_MALLOC: usize = 256 * 1024 * 1024;

/// Owns one resize job's configuration. Construct with [`ResizeContext::new`],
/// configure with the `set_*` builder methods, then call
/// [`ResizeContext::process`] exactly once — a second call returns
/// `ProcessError::Internal` rather than silently reprocessing (spec §9 Open
/// Question: chosen as a runtime flag over a type-state `Unused`/`Used`
/// pair because spec.md names an explicit *runtime* failure mode here).
pub struct ResizeContext {
    output_width: Option<usize>,
    output_height: Option<usize>,
    crop: Option<(usize, usize, usize, usize)>,
    x_settings: ResizeSettings,
    y_settings: ResizeSettings,
    input_colorspace: ColorSpace,
    output_colorspace: ColorSpace,
    background: Option<BackgroundColor>,
    checkerboard: Option<CheckerboardBackground>,
    grayscale_formula: Option<GrayscaleFormula>,
    intermediate_clamp: bool,
    max_malloc: usize,
    random_seed: Option<u64>,
    dither_family: DitherFamily,
    dither_subtype: DitherSubtype,
    color_count: u32,
    /// Per-channel/per-group overrides applied, in call order, after the
    /// `ALL`-channel defaults above. A later override for a channel that an
    /// earlier one also touches wins, same as the original's last-call-wins
    /// per-channeltype setter semantics.
    dither_overrides: Vec<(ChannelSelector, DitherFamily, DitherSubtype)>,
    color_count_overrides: Vec<(ChannelSelector, u32)>,
    max_color_code_overrides: Vec<(ChannelSelector, u32)>,
    output_depth: Option<u32>,
    output_float: bool,
    orientation: Orientation,
    used: bool,
    warn_sink: Option<WarnSink>,
}

impl ResizeContext {
    pub fn new() -> ResizeContext {
        ResizeContext {
            output_width: None,
            output_height: None,
            crop: None,
            x_settings: ResizeSettings::default(),
            y_settings: ResizeSettings::default(),
            input_colorspace: ColorSpace::Srgb,
            output_colorspace: ColorSpace::Srgb,
            background: None,
            checkerboard: None,
            grayscale_formula: None,
            intermediate_clamp: false,
            max_malloc: DEFAULT_MAX_MALLOC,
            random_seed: None,
            dither_family: DitherFamily::None,
            dither_subtype: DitherSubtype::Default,
            color_count: 0,
            dither_overrides: Vec::new(),
            color_count_overrides: Vec::new(),
            max_color_code_overrides: Vec::new(),
            output_depth: None,
            output_float: false,
            orientation: Orientation::Identity,
            used: false,
            warn_sink: None,
        }
    }

    pub fn set_output_size(&mut self, width: usize, height: usize) -> &mut Self {
        self.output_width = Some(width);
        self.output_height = Some(height);
        self
    }

    /// Restricts the resize to a sub-rectangle of the input, in the input's
    /// own physical (pre-orientation) pixel coordinates. Validated against
    /// the input's actual dimensions at [`ResizeContext::process`] time,
    /// since the input image isn't known yet when this is called.
    pub fn set_crop(&mut self, x: usize, y: usize, width: usize, height: usize) -> &mut Self {
        self.crop = Some((x, y, width, height));
        self
    }

    pub fn set_resize_settings(&mut self, x: ResizeSettings, y: ResizeSettings) -> &mut Self {
        self.x_settings = x;
        self.y_settings = y;
        self
    }

    pub fn set_colorspaces(&mut self, input: ColorSpace, output: ColorSpace) -> &mut Self {
        self.input_colorspace = input;
        self.output_colorspace = output;
        self
    }

    pub fn set_background(&mut self, color: BackgroundColor) -> &mut Self {
        self.background = Some(color);
        self
    }

    pub fn set_checkerboard_background(&mut self, checkerboard: CheckerboardBackground) -> &mut Self {
        self.checkerboard = Some(checkerboard);
        self
    }

    pub fn set_grayscale(&mut self, formula: GrayscaleFormula) -> &mut Self {
        self.grayscale_formula = Some(formula);
        self
    }

    pub fn set_edge_policy(&mut self, policy: EdgePolicy) -> &mut Self {
        self.x_settings.edge_policy = policy;
        self.y_settings.edge_policy = policy;
        self
    }

    pub fn set_intermediate_clamp(&mut self, enabled: bool) -> &mut Self {
        self.intermediate_clamp = enabled;
        self
    }

    pub fn set_max_malloc(&mut self, bytes: usize) -> &mut Self {
        self.max_malloc = bytes;
        self
    }

    pub fn set_random_seed(&mut self, seed: u64) -> &mut Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn set_dither(&mut self, family: DitherFamily, subtype: Option<DitherSubtype>) -> &mut Self {
        self.dither_family = family;
        self.dither_subtype = subtype.unwrap_or_else(|| DitherSubtype::default_for(family));
        self
    }

    /// Sets the posterization shade count; `0` disables posterization.
    /// Values above the output bit depth's code count silently snap down
    /// (spec §7 "silently snap to default"), logged at `log::debug!`.
    pub fn set_color_count(&mut self, count: u32) -> &mut Self {
        self.color_count = count;
        self
    }

    /// Overrides the dither family/subtype for one channel or channel group,
    /// applied on top of [`ResizeContext::set_dither`]'s all-channel default.
    /// Later calls touching the same channel win.
    pub fn set_dither_for(
        &mut self,
        selector: ChannelSelector,
        family: DitherFamily,
        subtype: Option<DitherSubtype>,
    ) -> &mut Self {
        let subtype = subtype.unwrap_or_else(|| DitherSubtype::default_for(family));
        self.dither_overrides.push((selector, family, subtype));
        self
    }

    /// Overrides the posterization shade count for one channel or channel
    /// group, applied on top of [`ResizeContext::set_color_count`]'s
    /// all-channel default. Same snap-down-above-depth rule as the default.
    pub fn set_color_count_for(&mut self, selector: ChannelSelector, count: u32) -> &mut Self {
        self.color_count_overrides.push((selector, count));
        self
    }

    /// Overrides a channel's maximum integer code, for output formats whose
    /// channels don't all share the output bit depth's default code count
    /// (e.g. a 6-bit-per-channel source re-encoded without widening to 8).
    pub fn set_max_color_code_for(&mut self, selector: ChannelSelector, code: u32) -> &mut Self {
        self.max_color_code_overrides.push((selector, code));
        self
    }

    pub fn set_channel_offset(&mut self, x_offset: f32, y_offset: f32) -> &mut Self {
        self.x_settings.channel_offset = x_offset;
        self.y_settings.channel_offset = y_offset;
        self
    }

    pub fn set_output_depth(&mut self, bit_depth: u32, float: bool) -> &mut Self {
        self.output_depth = Some(bit_depth);
        self.output_float = float;
        self
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> &mut Self {
        self.orientation = orientation;
        self
    }

    pub fn set_warn_sink(&mut self, sink: WarnSink) -> &mut Self {
        self.warn_sink = Some(sink);
        self
    }

    fn emit(&mut self, warnings: Vec<Warning>) {
        for w in warnings {
            log::warn!("{w}");
            if let Some(sink) = self.warn_sink.as_mut() {
                sink(&w);
            }
        }
    }

    /// Runs the configured resize job against `input`, consuming `input`'s
    /// pixel buffer. Returns `ProcessError::Internal` if this context was
    /// already used once. The second tuple element is always `None`: the
    /// core never emits a palette of its own (spec §1, §6).
    pub fn process(&mut self, input: Image) -> ProcessResult<(Image, Option<Palette>)> {
        if self.used {
            return Err(ProcessError::Internal(
                "ResizeContext::process called twice on the same context".to_string(),
            ));
        }
        self.used = true;

        if input.width == 0 || input.height == 0 {
            return Err(ProcessError::InvalidDimensions(
                "input image has zero width or height".to_string(),
            ));
        }

        // A palette exists only on the output side, built by the
        // post-optimizer after the main pipeline runs; the core never reads
        // a palette-indexed raster in.
        if input.image_type == ImageType::Palette {
            return Err(ProcessError::UnsupportedInputType(
                "Palette is an output-only image type; the core does not accept palette-indexed input".to_string(),
            ));
        }

        let output_width = self.output_width.unwrap_or(input.width);
        let output_height = self.output_height.unwrap_or(input.height);
        if output_width == 0 || output_height == 0 {
            return Err(ProcessError::InvalidDimensions(
                "requested output has zero width or height".to_string(),
            ));
        }

        if let Some((x, y, width, height)) = self.crop {
            if width == 0
                || height == 0
                || x.checked_add(width).map(|r| r > input.width).unwrap_or(true)
                || y.checked_add(height).map(|r| r > input.height).unwrap_or(true)
            {
                return Err(ProcessError::InvalidDimensions(format!(
                    "crop rectangle ({x}, {y}, {width}x{height}) does not fit inside the {}x{} input",
                    input.width, input.height
                )));
            }
        }

        let strategy_input = StrategyInput {
            input_type: input.image_type,
            cvt_to_grayscale: self.grayscale_formula.is_some(),
            has_checkerboard: self.checkerboard.is_some(),
            checkerboard: self.checkerboard,
            has_background: self.background.is_some(),
            background_has_transparency: self.background.map(|b| b.has_transparency()).unwrap_or(false),
            channel_offset_active: self.x_settings.channel_offset != 0.0
                || self.y_settings.channel_offset != 0.0,
            requested_output_depth: self.output_depth.or(Some(8)),
            requested_float_output: self.output_float,
            posterize_color_count: self.color_count,
            x_settings: self.x_settings,
            y_settings: self.y_settings,
        };
        let mut strategy = select_strategy(&strategy_input);
        let output_max_code = strategy.output_channels.first().map(|c| c.max_code).unwrap_or(255);
        for ch in strategy.output_channels.iter_mut() {
            ch.dither_family = self.dither_family;
            ch.dither_subtype = self.dither_subtype;
        }
        for &(selector, family, subtype) in &self.dither_overrides {
            for ch in strategy.output_channels.iter_mut() {
                if selector.matches(ch.channel_type) {
                    ch.dither_family = family;
                    ch.dither_subtype = subtype;
                }
            }
        }
        for &(selector, count) in &self.color_count_overrides {
            let count = if count > output_max_code + 1 {
                log::debug!(
                    "color_count {} exceeds {} codes available at this output depth; snapping down",
                    count,
                    output_max_code + 1
                );
                output_max_code + 1
            } else {
                count
            };
            for ch in strategy.output_channels.iter_mut() {
                if selector.matches(ch.channel_type) {
                    ch.color_count = count;
                }
            }
        }
        for &(selector, code) in &self.max_color_code_overrides {
            for ch in strategy.output_channels.iter_mut() {
                if selector.matches(ch.channel_type) {
                    ch.max_code = code;
                }
            }
        }
        let warnings = std::mem::take(&mut strategy.warnings);
        self.emit(warnings);

        let params = OrchestratorParams {
            output_width,
            output_height,
            input_colorspace: self.input_colorspace,
            output_colorspace: self.output_colorspace,
            orientation: self.orientation,
            x_settings: self.x_settings,
            y_settings: self.y_settings,
            grayscale_formula: self.grayscale_formula,
            background: self.background,
            checkerboard: self.checkerboard,
            intermediate_clamp: self.intermediate_clamp,
            max_malloc: self.max_malloc,
            random_seed: self.random_seed,
            crop: self.crop,
        };

        let output = orchestrator::run(&input, &strategy, &params)?;
        Ok((output, None))
    }
}

impl Default for ResizeContext {
    fn default() -> Self {
        ResizeContext::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageMetadata, ImageType, SampleType};
    use crate::sampler::ResamplingFunction;

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
    fn reprocessing_the_same_context_fails() {
        let mut ctx = ResizeContext::new();
        ctx.set_output_size(2, 2);
        let img = gray_image(&[1, 2, 3, 4], 2, 2);
        assert!(ctx.process(img).is_ok());
        let img2 = gray_image(&[1, 2, 3, 4], 2, 2);
        assert_eq!(
            ctx.process(img2),
            Err(ProcessError::Internal(
                "ResizeContext::process called twice on the same context".to_string()
            ))
        );
    }

    #[test]
    fn zero_sized_output_is_rejected() {
        let mut ctx = ResizeContext::new();
        ctx.set_output_size(0, 4);
        let img = gray_image(&[1, 2, 3, 4], 2, 2);
        assert!(matches!(ctx.process(img), Err(ProcessError::InvalidDimensions(_))));
    }

    #[test]
    fn palette_input_is_rejected() {
        let mut ctx = ResizeContext::new();
        ctx.set_output_size(2, 2);
        let mut img = gray_image(&[1, 2, 3, 4], 2, 2);
        img.image_type = ImageType::Palette;
        assert!(matches!(ctx.process(img), Err(ProcessError::UnsupportedInputType(_))));
    }

    #[test]
    fn crop_out_of_bounds_is_rejected() {
        let mut ctx = ResizeContext::new();
        ctx.set_output_size(2, 2);
        ctx.set_crop(1, 1, 2, 2);
        let img = gray_image(&[1, 2, 3, 4], 2, 2);
        assert!(matches!(ctx.process(img), Err(ProcessError::InvalidDimensions(_))));
    }

    #[test]
    fn crop_restricts_resize_to_sub_rectangle() {
        let mut ctx = ResizeContext::new();
        ctx.set_output_size(1, 1);
        ctx.set_crop(1, 1, 1, 1);
        ctx.set_resize_settings(
            ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
            ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
        );
        // 3x3 gray ramp; cropping to the bottom-right 1x1 pixel must read
        // exactly that sample (8), not the whole image's average.
        let img = gray_image(&[0, 1, 2, 3, 4, 5, 6, 7, 8], 3, 3);
        let (out, _) = ctx.process(img).unwrap();
        assert_eq!(out.data, vec![8]);
    }

    #[test]
    fn per_channel_dither_override_does_not_affect_other_channels() {
        use crate::channel::ChannelSelector;
        use crate::image::ImageType;

        let mut ctx = ResizeContext::new();
        ctx.set_output_size(2, 2);
        ctx.set_dither(DitherFamily::ErrorDiffusion, None);
        ctx.set_dither_for(ChannelSelector::Type(crate::channel::ChannelType::Alpha), DitherFamily::None, None);
        let img = Image {
            width: 2,
            height: 2,
            image_type: ImageType::GrayAlpha,
            sample_type: crate::image::SampleType::UInt,
            bit_depth: 8,
            bytes_per_row: 4,
            data: vec![10, 255, 20, 255, 30, 255, 40, 255],
            metadata: crate::image::ImageMetadata::default(),
        };
        assert!(ctx.process(img).is_ok());
    }

    #[test]
    fn per_channel_max_color_code_narrows_only_that_channel() {
        use crate::channel::{ChannelSelector, ChannelType};

        let mut ctx = ResizeContext::new();
        ctx.set_output_size(2, 2);
        ctx.set_colorspaces(ColorSpace::Linear, ColorSpace::Linear);
        ctx.set_max_color_code_for(ChannelSelector::Type(ChannelType::Gray), 3);
        ctx.set_resize_settings(
            ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
            ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
        );
        // Narrowed to a 4-level (max_code=3) channel, 200 and 100 each snap
        // down to the nearest representable level (170 and 85) rather than
        // surviving untouched as they would at the full 8-bit depth.
        let img = gray_image(&[255, 200, 100, 0], 2, 2);
        let (out, _) = ctx.process(img).unwrap();
        assert_eq!(out.data, vec![255, 170, 85, 0]);
    }

    #[test]
    fn default_output_size_matches_input() {
        let mut ctx = ResizeContext::new();
        ctx.set_resize_settings(
            ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
            ResizeSettings {
                function: ResamplingFunction::Null,
                ..Default::default()
            },
        );
        let img = gray_image(&[1, 2, 3, 4], 2, 2);
        let (out, palette) = ctx.process(img).unwrap();
        assert_eq!((out.width, out.height), (2, 2));
        assert!(palette.is_none());
    }
}
