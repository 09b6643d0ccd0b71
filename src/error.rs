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
use thiserror::Error;

/// Error taxonomy for a single [`crate::ResizeContext::process`] call.
///
/// The pipeline follows a first-error-wins policy: once a `ProcessError` has
/// been recorded internally, later failures are discarded and the first one
/// is what `process` returns.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProcessError {
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("allocation of {requested} bytes exceeds the {cap} byte cap")]
    OutOfMemory { requested: usize, cap: usize },

    #[error("image of {requested} bytes exceeds the {cap} byte size cap")]
    ImageTooLarge { requested: usize, cap: usize },

    #[error("internal error: {0}")]
    Internal(String),

    #[error("unsupported input image type: {0}")]
    UnsupportedInputType(String),
}

/// A non-fatal diagnostic surfaced during processing.
///
/// Delivered both as a `log::warn!` record and, if the caller installed one,
/// through a [`crate::WarnSink`] callback.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning(pub String);

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type ProcessResult<T> = Result<T, ProcessError>;

/// Checks a requested allocation against `max_malloc`, returning
/// [`ProcessError::OutOfMemory`] rather than letting the allocator abort the
/// process. `count` and `size_of_elem` are multiplied with overflow checking
/// so a pathological `width`/`height` cannot wrap `usize` and sneak past the
/// cap.
pub(crate) fn alloc_checked(count: usize, size_of_elem: usize, max_malloc: usize) -> ProcessResult<usize> {
    let requested = count
        .checked_mul(size_of_elem)
        .ok_or_else(|| ProcessError::Internal("allocation size overflowed usize".to_string()))?;
    if requested > max_malloc {
        return Err(ProcessError::OutOfMemory {
            requested,
            cap: max_malloc,
        });
    }
    Ok(requested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_over_cap() {
        assert_eq!(
            alloc_checked(1024, 1024, 1_000_000),
            Err(ProcessError::OutOfMemory {
                requested: 1024 * 1024,
                cap: 1_000_000
            })
        );
    }

    #[test]
    fn rejects_overflow() {
        assert!(alloc_checked(usize::MAX, 2, usize::MAX).is_err());
    }

    #[test]
    fn allows_under_cap() {
        assert_eq!(alloc_checked(10, 10, 1_000), Ok(100));
    }
}
