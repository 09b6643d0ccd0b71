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
//! Two-pass separable image resizing and colorspace-aware recoloring engine.
//!
//! Reads an in-memory [`Image`] plus its [`ColorSpace`], runs a vertical
//! pass then a horizontal pass of a user-selected reconstruction filter in
//! linear light, applies grayscale conversion, alpha compositing and output
//! quantization/dithering, and returns the resized [`Image`]. Decoders,
//! encoders, a CLI, and palette post-optimization are out of scope; see
//! `ResizeContext` for the entry point a codec collaborator is expected to
//! drive.

#![forbid(unsafe_code)]
#![allow(clippy::manual_clamp)]

mod accel;
mod alpha;
mod channel;
mod color;
mod colorspace;
mod context;
mod dither;
mod error;
mod image;
mod orchestrator;
mod palette;
mod quantize;
mod row_resize;
mod sampler;
mod settings;
mod strategy;
mod weights;

pub use channel::{ChannelInfo, ChannelSelector, ChannelType};
pub use color::ColorGroup;
pub use colorspace::ColorSpace;
pub use context::{ResizeContext, WarnSink, DEFAULT_MAX_MALLOC};
pub use dither::{DitherFamily, DitherSubtype};
pub use error::{ProcessError, ProcessResult, Warning};
pub use image::{Image, ImageMetadata, ImageSize, ImageType, Orientation, SampleType};
pub use palette::{Palette, Rgba8};
pub use sampler::{CubicParams, ResamplingFunction};
pub use settings::{BackgroundColor, BackgroundStrategy, CheckerboardBackground, GrayscaleFormula, ResizeSettings};
pub use weights::EdgePolicy;
