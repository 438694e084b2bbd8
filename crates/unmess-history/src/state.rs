//! Immutable image states.
//!
//! An [`ImageState`] pairs the image as loaded (`original`) with the image
//! after every logged edit (`current`). States are never mutated: each edit
//! derives a new state, and the old one stays valid for undo.
//!
//! Buffers are reference-counted with copy-on-write, so deriving a state or
//! handing out [`ImageState::original`] costs a pointer copy, never a pixel
//! copy, and no holder can observe another holder's writes.
//!
//! # Example
//!
//! ```rust
//! use unmess_core::{NoopObserver, PixelBuffer, RgbaBuffer};
//! use unmess_history::ImageState;
//! use unmess_ops::Edit;
//!
//! let buf = RgbaBuffer::filled(4, 2, [0.2, 0.4, 0.6, 1.0]);
//! let loaded = ImageState::from_image(&buf, "photo.png").unwrap();
//!
//! let rotated = loaded.apply(&Edit::Rotate90 { clockwise: true }, &NoopObserver).unwrap();
//! assert_eq!(rotated.current().dimensions(), (2, 4));
//! assert_eq!(rotated.operations().len(), 1);
//! assert_eq!(loaded.operations().len(), 0);
//! ```

use crate::metadata::ImageMetadata;
use crate::operation::Operation;
use std::fmt;
use tracing::{debug, info};
use unmess_core::validate::{require_non_empty, validate_buffer_dimensions};
use unmess_core::{Limits, Observer, PixelBuffer, Result, RgbaBuffer};
use unmess_ops::Edit;

/// Original image, current image, metadata and the edits between them.
#[derive(Debug, Clone)]
pub struct ImageState {
    original: RgbaBuffer,
    current: RgbaBuffer,
    metadata: ImageMetadata,
    operations: Vec<Operation>,
}

impl ImageState {
    /// Loads a buffer under the default [`Limits`].
    ///
    /// # Errors
    ///
    /// [`unmess_core::Error::InvalidDimensions`] for an empty buffer,
    /// [`unmess_core::Error::DimensionsTooLarge`] past 8192 on either axis.
    pub fn from_image<B: PixelBuffer + ?Sized>(buffer: &B, source_path: &str) -> Result<Self> {
        Self::from_image_with_limits(buffer, source_path, &Limits::default())
    }

    /// Loads a buffer under explicit limits.
    pub fn from_image_with_limits<B: PixelBuffer + ?Sized>(
        buffer: &B,
        source_path: &str,
        limits: &Limits,
    ) -> Result<Self> {
        validate_buffer_dimensions(buffer, limits)?;
        info!(
            width = buffer.width(),
            height = buffer.height(),
            source_path,
            "Creating image state"
        );

        let original = RgbaBuffer::from_buffer(buffer);
        Ok(Self {
            current: original.clone(),
            metadata: ImageMetadata::new(buffer.width(), buffer.height(), source_path),
            original,
            operations: Vec::new(),
        })
    }

    /// Derives the state that results from `operation` producing `new_buffer`.
    ///
    /// The receiver is unchanged. Metadata keeps describing the image as
    /// loaded; only its modification stamp moves.
    ///
    /// # Errors
    ///
    /// [`unmess_core::Error::InvalidDimensions`] if `new_buffer` is empty.
    pub fn with_image(&self, new_buffer: RgbaBuffer, operation: Operation) -> Result<Self> {
        require_non_empty(&new_buffer)?;
        debug!(kind = %operation.kind(), "Deriving image state");

        let mut operations = self.operations.clone();
        operations.push(operation);

        Ok(Self {
            original: self.original.clone(),
            current: new_buffer,
            metadata: self.metadata.with_modification(),
            operations,
        })
    }

    /// Runs `edit` on the current image and derives the next state.
    pub fn apply(&self, edit: &Edit, observer: &dyn Observer) -> Result<Self> {
        let (out, elapsed) = edit.apply_timed(&self.current, observer)?;
        self.with_image(out, Operation::from_edit(edit, elapsed))
    }

    /// Back to the loaded image with an empty log. Metadata is kept.
    pub fn reset_to_original(&self) -> Self {
        info!("Resetting image state to original");
        Self {
            original: self.original.clone(),
            current: self.original.clone(),
            metadata: self.metadata.clone(),
            operations: Vec::new(),
        }
    }

    /// Rebuilds the current image by re-running the log on the original.
    pub fn replay(&self, observer: &dyn Observer) -> Result<RgbaBuffer> {
        let mut buf = self.original.clone();
        for op in &self.operations {
            buf = op.to_edit()?.apply(&buf, observer)?;
        }
        Ok(buf)
    }

    /// The edited image.
    pub fn current(&self) -> &RgbaBuffer {
        &self.current
    }

    /// The image as loaded.
    pub fn original(&self) -> RgbaBuffer {
        self.original.clone()
    }

    /// Metadata.
    pub fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    /// Edits applied since loading (or since the last reset), oldest first.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Bytes this state is accounted for in history.
    pub fn size_bytes(&self) -> u64 {
        self.metadata.size_bytes()
    }
}

impl fmt::Display for ImageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ImageState[{}, operations={}]",
            self.metadata,
            self.operations.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use unmess_core::{Error, NoopObserver, PixelBufferMut};

    fn sample() -> RgbaBuffer {
        RgbaBuffer::from_fn(6, 4, |x, y| [x as f32 / 6.0, y as f32 / 4.0, 0.5, 1.0])
    }

    #[test]
    fn test_from_image() {
        let state = ImageState::from_image(&sample(), "in.png").unwrap();
        assert_eq!(state.current(), &sample());
        assert_eq!(state.original(), sample());
        assert_eq!(state.size_bytes(), 6 * 4 * 4);
        assert!(state.operations().is_empty());
        assert_eq!(state.metadata().format(), "png");
    }

    #[test]
    fn test_from_image_limits() {
        let err = ImageState::from_image(&RgbaBuffer::new(0, 4), "x.png").unwrap_err();
        assert!(err.is_dimension_error());

        let err = ImageState::from_image_with_limits(&sample(), "x.png", &Limits::square(5))
            .unwrap_err();
        assert_eq!(err, Error::dimensions_too_large(6, 4, 5, 5));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut buf = sample();
        let state = ImageState::from_image(&buf, "in.png").unwrap();
        buf.set_pixel(0, 0, [1.0; 4]);
        assert_eq!(state.original().pixel(0, 0), sample().pixel(0, 0));

        let mut copy = state.original();
        copy.set_pixel(1, 1, [0.0; 4]);
        assert_eq!(state.original(), sample());
    }

    #[test]
    fn test_with_image_leaves_receiver() {
        let state = ImageState::from_image(&sample(), "in.png").unwrap();
        let op = Operation::from_edit(&Edit::Invert, Duration::ZERO);
        let next = state
            .with_image(RgbaBuffer::filled(6, 4, [0.0; 4]), op)
            .unwrap();

        assert_eq!(next.operations().len(), 1);
        assert_eq!(next.metadata().modification_count(), 1);
        assert_eq!(next.original(), sample());
        assert_eq!(state.operations().len(), 0);
        assert_eq!(state.current(), &sample());
    }

    #[test]
    fn test_rotation_keeps_loaded_metadata() {
        let state = ImageState::from_image(&sample(), "in.png").unwrap();
        let next = state
            .apply(&Edit::Rotate90 { clockwise: false }, &NoopObserver)
            .unwrap();
        assert_eq!(next.current().dimensions(), (4, 6));
        assert_eq!((next.metadata().width(), next.metadata().height()), (6, 4));
        assert_eq!(next.metadata(), state.metadata());
        assert_eq!(next.size_bytes(), state.size_bytes());
    }

    #[test]
    fn test_reset_after_rotation_matches_buffer() {
        let state = ImageState::from_image(&sample(), "in.png").unwrap();
        let reset = state
            .apply(&Edit::Rotate90 { clockwise: true }, &NoopObserver)
            .unwrap()
            .reset_to_original();
        let meta = reset.metadata();
        assert_eq!(reset.current().dimensions(), (meta.width(), meta.height()));
        assert_eq!(meta, state.metadata());
    }

    #[test]
    fn test_reset_to_original() {
        let state = ImageState::from_image(&sample(), "in.png").unwrap();
        let edited = state.apply(&Edit::Sepia, &NoopObserver).unwrap();
        let reset = edited.reset_to_original();
        assert_eq!(reset.current(), &sample());
        assert!(reset.operations().is_empty());
        assert_eq!(reset.metadata().modification_count(), 1);
    }

    #[test]
    fn test_failed_apply() {
        let state = ImageState::from_image(&sample(), "in.png").unwrap();
        let err = state.apply(&Edit::GaussianBlur(11), &NoopObserver).unwrap_err();
        assert!(err.is_range_error());
        assert!(state.operations().is_empty());
    }

    #[test]
    fn test_replay() {
        let mut state = ImageState::from_image(&sample(), "in.png").unwrap();
        for edit in [
            Edit::Brightness(0.1),
            Edit::GaussianBlur(2),
            Edit::Rotate90 { clockwise: true },
            Edit::Sharpen(0.8),
            Edit::Flip { horizontal: true },
        ] {
            state = state.apply(&edit, &NoopObserver).unwrap();
        }
        assert_eq!(&state.replay(&NoopObserver).unwrap(), state.current());
    }

    #[test]
    fn test_display() {
        let state = ImageState::from_image(&RgbaBuffer::new(2, 2), "a.gif").unwrap();
        let state = state.apply(&Edit::Invert, &NoopObserver).unwrap();
        assert_eq!(
            state.to_string(),
            "ImageState[ImageMetadata[2x2, gif, 16 bytes, mods=1], operations=1]"
        );
    }
}
