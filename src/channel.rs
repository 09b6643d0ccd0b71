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
use crate::dither::{DitherFamily, DitherSubtype};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChannelType {
    Red,
    Green,
    Blue,
    Alpha,
    Gray,
}

impl ChannelType {
    pub fn is_alpha(self) -> bool {
        self == ChannelType::Alpha
    }
}

/// Which output channel(s) a per-channel setter applies to (spec §6
/// "per-channel or per-channel-group"), mirroring the original's
/// `IW_CHANNELTYPE_ALL`/`IW_CHANNELTYPE_NONALPHA` group codes alongside its
/// per-type ones.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChannelSelector {
    All,
    NonAlpha,
    Type(ChannelType),
}

impl ChannelSelector {
    pub fn matches(self, channel_type: ChannelType) -> bool {
        match self {
            ChannelSelector::All => true,
            ChannelSelector::NonAlpha => !channel_type.is_alpha(),
            ChannelSelector::Type(t) => t == channel_type,
        }
    }
}

/// Per-channel bookkeeping threaded through input, intermediate and output
/// stages (spec §3 "Channel info").
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub channel_type: ChannelType,
    pub max_code: u32,
    pub needs_unassociated_alpha: bool,
    pub cvt_to_grayscale: bool,
    /// Index of the corresponding channel in the previous pipeline stage.
    pub prev: Option<usize>,
    /// Index of the corresponding channel in the next pipeline stage.
    pub next: Option<usize>,
    pub dither_family: DitherFamily,
    pub dither_subtype: DitherSubtype,
    /// 0 = full depth, otherwise the number of posterized shades.
    pub color_count: u32,
    /// Per-channel background value in linear light, used when this channel
    /// carries a pre-composited (EARLY) background.
    pub background_linear: Option<f32>,
}

impl ChannelInfo {
    pub fn new(channel_type: ChannelType, max_code: u32) -> ChannelInfo {
        ChannelInfo {
            channel_type,
            max_code,
            needs_unassociated_alpha: false,
            cvt_to_grayscale: false,
            prev: None,
            next: None,
            dither_family: DitherFamily::None,
            dither_subtype: DitherSubtype::default_for(DitherFamily::None),
            color_count: 0,
            background_linear: None,
        }
    }
}
