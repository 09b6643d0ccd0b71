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
//! Decides, once per [`crate::ResizeContext::process`] call, the shapes and
//! strategies the orchestrator then executes mechanically (spec §4.6).

use crate::channel::{ChannelInfo, ChannelType};
use crate::error::Warning;
use crate::image::{ImageType, SampleType};
use crate::settings::{BackgroundStrategy, CheckerboardBackground, ResizeSettings};

/// The result of strategy selection: concrete intermediate/output shapes,
/// channel correspondences, and the background/alpha handling the
/// orchestrator must apply.
#[derive(Debug, Clone)]
pub struct Strategy {
    pub intermediate_type: ImageType,
    pub output_type: ImageType,
    pub output_sample_type: SampleType,
    pub output_bit_depth: u32,
    pub background_strategy: BackgroundStrategy,
    pub virtual_alpha: bool,
    pub intermediate_channels: Vec<ChannelInfo>,
    pub output_channels: Vec<ChannelInfo>,
    pub warnings: Vec<Warning>,
}

pub struct StrategyInput {
    pub input_type: ImageType,
    pub cvt_to_grayscale: bool,
    pub has_checkerboard: bool,
    pub checkerboard: Option<CheckerboardBackground>,
    pub has_background: bool,
    pub background_has_transparency: bool,
    pub channel_offset_active: bool,
    pub requested_output_depth: Option<u32>,
    pub requested_float_output: bool,
    pub posterize_color_count: u32,
    pub x_settings: ResizeSettings,
    pub y_settings: ResizeSettings,
}

/// Runs the strategy decision tree described in spec §4.6, in the order the
/// original source applies its own equivalent checks: grayscale first (it
/// changes the channel count everything else reasons about), then
/// background compositing, then virtual alpha, then output depth.
pub fn select_strategy(input: &StrategyInput) -> Strategy {
    let mut warnings = Vec::new();

    let mut intermediate_type = input.input_type;
    if input.cvt_to_grayscale {
        if input.input_type.is_gray() {
            warnings.push(Warning(
                "grayscale conversion requested on an already-grayscale image; ignored".to_string(),
            ));
        } else {
            intermediate_type = if input.input_type.has_alpha() {
                ImageType::GrayAlpha
            } else {
                ImageType::Gray
            };
        }
    }

    // Channel offset only makes sense on distinguishable color channels.
    let channel_offset_active = input.channel_offset_active && !intermediate_type.is_gray();
    if input.channel_offset_active && !channel_offset_active {
        warnings.push(Warning(
            "channel offset disabled: not meaningful on a grayscale image".to_string(),
        ));
    }

    // EARLY iff channel offset is in effect: resampling channels at
    // different sub-pixel phases means color must be pre-composited against
    // a solid background before resize, or fringe pixels would show the
    // unrelated alpha-weighted neighbor colors.
    let background_strategy = if channel_offset_active && input.has_background {
        BackgroundStrategy::Early
    } else if input.has_checkerboard {
        if channel_offset_active {
            warnings.push(Warning(
                "checkerboard background disabled: incompatible with an active channel offset"
                    .to_string(),
            ));
            if input.has_background {
                BackgroundStrategy::Early
            } else {
                BackgroundStrategy::None
            }
        } else {
            BackgroundStrategy::Late
        }
    } else if input.has_background {
        BackgroundStrategy::Late
    } else {
        BackgroundStrategy::None
    };

    if input.has_background && !intermediate_type.has_alpha() {
        warnings.push(Warning(
            "background color has no effect: input has no alpha channel".to_string(),
        ));
    }

    let x_transparent = input.x_settings.edge_policy == crate::weights::EdgePolicy::Transparent;
    let y_transparent = input.y_settings.edge_policy == crate::weights::EdgePolicy::Transparent;
    let virtual_alpha = (x_transparent || y_transparent) && !intermediate_type.has_alpha();
    if virtual_alpha {
        intermediate_type = intermediate_type.with_alpha();
    }

    let output_type = match background_strategy {
        BackgroundStrategy::Late if !input.background_has_transparency => {
            intermediate_type.without_alpha()
        }
        BackgroundStrategy::Early => intermediate_type.without_alpha(),
        _ => intermediate_type,
    };

    let output_sample_type = if input.requested_float_output {
        SampleType::Float32
    } else {
        SampleType::UInt
    };
    let output_bit_depth = input.requested_output_depth.unwrap_or(8);

    if input.posterize_color_count > 0 && output_sample_type == SampleType::Float32 {
        warnings.push(Warning(
            "posterization has no effect on floating-point output".to_string(),
        ));
    }

    let output_max_code = (1u32 << output_bit_depth) - 1;
    let intermediate_channels = channel_infos_for(intermediate_type, 16_777_215);
    let mut output_channels = channel_infos_for(output_type, output_max_code);

    // A color_count above the number of codes the output depth can hold is
    // meaningless; snap it down rather than letting posterization pick
    // shades it can't represent (spec §7 "silently snap to default").
    let color_count = if input.posterize_color_count > output_max_code + 1 {
        log::debug!(
            "color_count {} exceeds {} codes available at this output depth; snapping down",
            input.posterize_color_count,
            output_max_code + 1
        );
        output_max_code + 1
    } else {
        input.posterize_color_count
    };
    for ch in output_channels.iter_mut() {
        ch.color_count = color_count;
    }

    Strategy {
        intermediate_type,
        output_type,
        output_sample_type,
        output_bit_depth,
        background_strategy,
        virtual_alpha,
        intermediate_channels,
        output_channels,
        warnings,
    }
}

fn channel_infos_for(image_type: ImageType, max_code: u32) -> Vec<ChannelInfo> {
    let types: &[ChannelType] = match image_type {
        ImageType::Gray => &[ChannelType::Gray],
        ImageType::GrayAlpha => &[ChannelType::Gray, ChannelType::Alpha],
        ImageType::Rgb => &[ChannelType::Red, ChannelType::Green, ChannelType::Blue],
        ImageType::Rgba => &[
            ChannelType::Red,
            ChannelType::Green,
            ChannelType::Blue,
            ChannelType::Alpha,
        ],
        // Unreachable from `ResizeContext::process` (rejected as an input
        // type before strategy selection runs); kept here only so this match
        // stays exhaustive over `ImageType`.
        ImageType::Palette => &[ChannelType::Gray],
    };
    types.iter().map(|&t| ChannelInfo::new(t, max_code)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::EdgePolicy;

    fn base_input() -> StrategyInput {
        StrategyInput {
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
            x_settings: ResizeSettings::default(),
            y_settings: ResizeSettings::default(),
        }
    }

    #[test]
    fn no_background_no_alpha_change_is_none_strategy() {
        let strategy = select_strategy(&base_input());
        assert_eq!(strategy.background_strategy, BackgroundStrategy::None);
        assert_eq!(strategy.intermediate_type, ImageType::Rgba);
    }

    #[test]
    fn background_without_channel_offset_is_late() {
        let mut input = base_input();
        input.has_background = true;
        let strategy = select_strategy(&input);
        assert_eq!(strategy.background_strategy, BackgroundStrategy::Late);
        assert_eq!(strategy.output_type, ImageType::Rgb);
    }

    #[test]
    fn background_with_channel_offset_is_early() {
        let mut input = base_input();
        input.has_background = true;
        input.channel_offset_active = true;
        input.x_settings.channel_offset = 0.3;
        let strategy = select_strategy(&input);
        assert_eq!(strategy.background_strategy, BackgroundStrategy::Early);
    }

    #[test]
    fn grayscale_on_already_gray_image_warns() {
        let mut input = base_input();
        input.input_type = ImageType::Gray;
        input.cvt_to_grayscale = true;
        let strategy = select_strategy(&input);
        assert_eq!(strategy.intermediate_type, ImageType::Gray);
        assert!(!strategy.warnings.is_empty());
    }

    #[test]
    fn transparent_edge_policy_promotes_virtual_alpha() {
        let mut input = base_input();
        input.input_type = ImageType::Rgb;
        input.x_settings.edge_policy = EdgePolicy::Transparent;
        let strategy = select_strategy(&input);
        assert!(strategy.virtual_alpha);
        assert_eq!(strategy.intermediate_type, ImageType::Rgba);
    }

    #[test]
    fn posterize_on_float_output_warns() {
        let mut input = base_input();
        input.requested_float_output = true;
        input.posterize_color_count = 8;
        let strategy = select_strategy(&input);
        assert!(strategy.warnings.iter().any(|w| w.0.contains("posterization")));
    }

    #[test]
    fn color_count_above_output_depth_snaps_down() {
        let mut input = base_input();
        input.requested_output_depth = Some(1); // 2 codes available
        input.posterize_color_count = 200;
        let strategy = select_strategy(&input);
        assert_eq!(strategy.output_channels[0].color_count, 2);
    }
}
