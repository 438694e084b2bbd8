//! Combined slider-style adjustments.
//!
//! [`Adjustments`] holds the five continuous controls of an editing panel
//! and applies them in a fixed order:
//!
//! brightness -> contrast -> saturation -> blur -> sharpen
//!
//! Stages at their neutral value are skipped. All five values are checked
//! before any pixel work starts, so a bad slider never yields a partially
//! adjusted image.

use crate::edit::Edit;
use unmess_core::{Observer, PixelBuffer, Result, RgbaBuffer};

/// Five continuous adjustments, neutral at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Adjustments {
    /// Additive offset in `[-1, 1]`.
    pub brightness: f32,
    /// Contrast factor in `[-1, 1]`.
    pub contrast: f32,
    /// Saturation factor in `[-1, 1]`.
    pub saturation: f32,
    /// Gaussian blur radius in `[0, 10]`.
    pub blur: u32,
    /// Sharpen intensity in `[0, 3]`.
    pub sharpen: f32,
}

impl Adjustments {
    /// All stages neutral.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets brightness.
    pub fn brightness(mut self, v: f32) -> Self {
        self.brightness = v;
        self
    }

    /// Sets contrast.
    pub fn contrast(mut self, v: f32) -> Self {
        self.contrast = v;
        self
    }

    /// Sets saturation.
    pub fn saturation(mut self, v: f32) -> Self {
        self.saturation = v;
        self
    }

    /// Sets blur radius.
    pub fn blur(mut self, radius: u32) -> Self {
        self.blur = radius;
        self
    }

    /// Sets sharpen intensity.
    pub fn sharpen(mut self, v: f32) -> Self {
        self.sharpen = v;
        self
    }

    /// Returns `true` when every stage is neutral.
    pub fn is_identity(&self) -> bool {
        self.to_edits().is_empty()
    }

    /// The non-neutral stages as edits, in application order.
    pub fn to_edits(&self) -> Vec<Edit> {
        let stages = [
            (self.brightness != 0.0, Edit::Brightness(self.brightness)),
            (self.contrast != 0.0, Edit::Contrast(self.contrast)),
            (self.saturation != 0.0, Edit::Saturation(self.saturation)),
            (self.blur != 0, Edit::GaussianBlur(self.blur)),
            (self.sharpen != 0.0, Edit::Sharpen(self.sharpen)),
        ];
        stages
            .into_iter()
            .filter_map(|(active, edit)| active.then_some(edit))
            .collect()
    }

    /// Checks all five values.
    pub fn validate(&self) -> Result<()> {
        Edit::Brightness(self.brightness).validate()?;
        Edit::Contrast(self.contrast).validate()?;
        Edit::Saturation(self.saturation).validate()?;
        Edit::GaussianBlur(self.blur).validate()?;
        Edit::Sharpen(self.sharpen).validate()
    }

    /// Runs the pipeline on `src`. The input is never modified.
    pub fn apply<B: PixelBuffer + ?Sized>(
        &self,
        src: &B,
        observer: &dyn Observer,
    ) -> Result<RgbaBuffer> {
        self.validate()?;
        let mut out = RgbaBuffer::from_buffer(src);
        for edit in self.to_edits() {
            out = edit.apply(&out, observer)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adjust, filter};
    use unmess_core::observer::MemoryObserver;
    use unmess_core::{Error, EventKind, NoopObserver};

    fn sample() -> RgbaBuffer {
        RgbaBuffer::from_fn(9, 7, |x, y| {
            [x as f32 / 9.0, y as f32 / 7.0, 0.25, 1.0]
        })
    }

    #[test]
    fn test_neutral_is_identity() {
        let adj = Adjustments::new();
        assert!(adj.is_identity());
        let src = sample();
        assert_eq!(adj.apply(&src, &NoopObserver).unwrap(), src);
    }

    #[test]
    fn test_order_matches_manual_chain() {
        let adj = Adjustments::new()
            .brightness(0.1)
            .contrast(0.3)
            .saturation(-0.2)
            .blur(2)
            .sharpen(0.5);
        let src = sample();

        let b = adjust::brightness(&src, 0.1).unwrap();
        let c = adjust::contrast(&b, 0.3).unwrap();
        let s = adjust::saturation(&c, -0.2).unwrap();
        let bl = filter::gaussian_blur(&s, 2).unwrap();
        let expected = filter::sharpen(&bl, 0.5).unwrap();

        assert_eq!(adj.apply(&src, &NoopObserver).unwrap(), expected);
    }

    #[test]
    fn test_skips_neutral_stages() {
        let adj = Adjustments::new().contrast(0.5).sharpen(1.0);
        assert_eq!(adj.to_edits(), vec![Edit::Contrast(0.5), Edit::Sharpen(1.0)]);

        let obs = MemoryObserver::default();
        adj.apply(&sample(), &obs).unwrap();
        assert_eq!(obs.count(EventKind::OperationCompleted), 2);
    }

    #[test]
    fn test_validates_before_work() {
        // Bad sharpen at the end must stop the brightness stage from running
        let adj = Adjustments::new().brightness(0.2).sharpen(5.0);
        let obs = MemoryObserver::default();
        let err = adj.apply(&sample(), &obs).unwrap_err();
        assert_eq!(err, Error::out_of_range("sharpen intensity", 0.0, 3.0, 5.0));
        assert!(obs.events().is_empty());
    }

    #[test]
    fn test_blur_out_of_range() {
        let adj = Adjustments::new().blur(11);
        assert!(adj.validate().unwrap_err().is_range_error());
    }
}
