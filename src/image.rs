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
use crate::error::{ProcessError, ProcessResult};

/// Width/height pair shared by every stage of the pipeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ImageSize {
    pub width: usize,
    pub height: usize,
}

impl ImageSize {
    pub fn new(width: usize, height: usize) -> ImageSize {
        ImageSize { width, height }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ImageType {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
    Palette,
}

impl ImageType {
    pub fn channels(self) -> usize {
        match self {
            ImageType::Gray => 1,
            ImageType::GrayAlpha => 2,
            ImageType::Rgb => 3,
            ImageType::Rgba => 4,
            ImageType::Palette => 1,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, ImageType::GrayAlpha | ImageType::Rgba)
    }

    pub fn is_gray(self) -> bool {
        matches!(self, ImageType::Gray | ImageType::GrayAlpha)
    }

    /// The image type obtained by bolting a virtual alpha channel onto `self`,
    /// per the TRANSPARENT edge policy promotion rule (spec §4.6).
    pub fn with_alpha(self) -> ImageType {
        match self {
            ImageType::Gray => ImageType::GrayAlpha,
            ImageType::Rgb => ImageType::Rgba,
            other => other,
        }
    }

    pub fn without_alpha(self) -> ImageType {
        match self {
            ImageType::GrayAlpha => ImageType::Gray,
            ImageType::Rgba => ImageType::Rgb,
            other => other,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SampleType {
    UInt,
    Float32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    Identity,
    FlipH,
    FlipV,
    Rotate180,
    Transpose,
    Rotate90,
    Rotate270,
    Transverse,
}

impl Orientation {
    /// Maps a logical coordinate (as seen by the resize pipeline) to the
    /// physical coordinate stored in the raster.
    pub fn map(self, logical_x: usize, logical_y: usize, w: usize, h: usize) -> (usize, usize) {
        match self {
            Orientation::Identity => (logical_x, logical_y),
            Orientation::FlipH => (w - 1 - logical_x, logical_y),
            Orientation::FlipV => (logical_x, h - 1 - logical_y),
            Orientation::Rotate180 => (w - 1 - logical_x, h - 1 - logical_y),
            Orientation::Transpose => (logical_y, logical_x),
            Orientation::Rotate90 => (logical_y, w - 1 - logical_x),
            Orientation::Rotate270 => (h - 1 - logical_y, logical_x),
            Orientation::Transverse => (h - 1 - logical_y, w - 1 - logical_x),
        }
    }

    /// Logical (width, height) after this orientation's transform is applied
    /// to a physical raster of size `(w, h)`.
    pub fn logical_size(self, w: usize, h: usize) -> (usize, usize) {
        match self {
            Orientation::Identity
            | Orientation::FlipH
            | Orientation::FlipV
            | Orientation::Rotate180 => (w, h),
            Orientation::Transpose
            | Orientation::Rotate90
            | Orientation::Rotate270
            | Orientation::Transverse => (h, w),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageMetadata {
    pub density: Option<(f32, f32)>,
    pub rendering_intent: Option<String>,
    pub background_label: Option<[f32; 4]>,
    pub transparency_color_key: Option<[u16; 3]>,
}

/// An in-memory raster, the core's sole input/output currency.
///
/// Samples are interleaved in memory (R-G-B-A or G-A order); multi-byte
/// UINT samples are big-endian, FLOAT32 samples are host-endian, matching
/// the on-disk conventions of the codec collaborators this crate does not
/// implement.
#[derive(Debug, Clone)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub image_type: ImageType,
    pub sample_type: SampleType,
    pub bit_depth: u32,
    pub bytes_per_row: usize,
    pub data: Vec<u8>,
    pub metadata: ImageMetadata,
}

impl Image {
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    pub(crate) fn bytes_per_sample(&self) -> usize {
        match self.sample_type {
            SampleType::Float32 => 4,
            SampleType::UInt => {
                if self.bit_depth <= 8 {
                    1
                } else {
                    2
                }
            }
        }
    }

    /// Maximum integer code representable at this image's bit depth.
    pub fn max_code(&self) -> u32 {
        match self.sample_type {
            SampleType::Float32 => 1,
            SampleType::UInt => (1u32 << self.bit_depth) - 1,
        }
    }

    /// Reads one channel sample at `(x, y)` for channel index `ch`, returning
    /// it normalized to `[0, 1]` of the image's own max code (bit-depths < 8
    /// are read as packed sub-byte fields, matching how codecs emit 1/2/4 bpp
    /// rasters).
    pub fn read_sample(&self, x: usize, y: usize, ch: usize) -> f32 {
        let channels = self.image_type.channels();
        match self.sample_type {
            SampleType::Float32 => {
                let byte_off = y * self.bytes_per_row + (x * channels + ch) * 4;
                let bytes = [
                    self.data[byte_off],
                    self.data[byte_off + 1],
                    self.data[byte_off + 2],
                    self.data[byte_off + 3],
                ];
                f32::from_ne_bytes(bytes)
            }
            SampleType::UInt => {
                if self.bit_depth >= 8 {
                    let bps = self.bytes_per_sample();
                    let byte_off = y * self.bytes_per_row + (x * channels + ch) * bps;
                    let code = if bps == 1 {
                        self.data[byte_off] as u32
                    } else {
                        u16::from_be_bytes([self.data[byte_off], self.data[byte_off + 1]]) as u32
                    };
                    code as f32 / self.max_code() as f32
                } else {
                    let bit_index = (x * channels + ch) * self.bit_depth as usize;
                    let byte_off = y * self.bytes_per_row + bit_index / 8;
                    let shift = 8 - self.bit_depth as usize - (bit_index % 8);
                    let mask = (1u32 << self.bit_depth) - 1;
                    let code = (self.data[byte_off] as u32 >> shift) & mask;
                    code as f32 / self.max_code() as f32
                }
            }
        }
    }

    /// Writes a normalized `[0, 1]` value back as a raw code, inverse of
    /// [`Image::read_sample`].
    pub fn write_sample(&mut self, x: usize, y: usize, ch: usize, value: f32) {
        let channels = self.image_type.channels();
        match self.sample_type {
            SampleType::Float32 => {
                let byte_off = y * self.bytes_per_row + (x * channels + ch) * 4;
                let bytes = value.to_ne_bytes();
                self.data[byte_off..byte_off + 4].copy_from_slice(&bytes);
            }
            SampleType::UInt => {
                let code = (value * self.max_code() as f32).round() as u32;
                if self.bit_depth >= 8 {
                    let bps = self.bytes_per_sample();
                    let byte_off = y * self.bytes_per_row + (x * channels + ch) * bps;
                    if bps == 1 {
                        self.data[byte_off] = code as u8;
                    } else {
                        let bytes = (code as u16).to_be_bytes();
                        self.data[byte_off..byte_off + 2].copy_from_slice(&bytes);
                    }
                } else {
                    let bit_index = (x * channels + ch) * self.bit_depth as usize;
                    let byte_off = y * self.bytes_per_row + bit_index / 8;
                    let shift = 8 - self.bit_depth as usize - (bit_index % 8);
                    let mask = ((1u32 << self.bit_depth) - 1) << shift;
                    self.data[byte_off] =
                        (self.data[byte_off] & !(mask as u8)) | ((code << shift) as u8);
                }
            }
        }
    }
}

pub(crate) fn checked_bytes_per_row(
    width: usize,
    channels: usize,
    bytes_per_sample: usize,
) -> ProcessResult<usize> {
    width
        .checked_mul(channels)
        .and_then(|v| v.checked_mul(bytes_per_sample))
        .ok_or_else(|| ProcessError::InvalidDimensions("row stride overflowed usize".to_string()))
}
