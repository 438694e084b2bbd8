//! Editing session: one loaded image, its current state, and its history.
//!
//! [`EditSession`] is the control flow an editor front-end runs: load an
//! image, apply edits, preview slider adjustments, undo and redo.
//!
//! Every committed state is recorded in the history, the freshly loaded one
//! included. With that convention [`HistoryManager::undo`] hands back the
//! state that preceded the undone edit, and the loaded state is the floor
//! that undo never goes below.
//!
//! ```rust
//! use std::sync::Arc;
//! use unmess_core::{EngineConfig, NoopObserver, RgbaBuffer};
//! use unmess_history::EditSession;
//! use unmess_ops::Edit;
//!
//! let mut session = EditSession::new(EngineConfig::default(), Arc::new(NoopObserver)).unwrap();
//! session.load(&RgbaBuffer::filled(4, 4, [0.5; 4]), "in.png").unwrap();
//! session.apply(&Edit::Invert).unwrap();
//! session.apply(&Edit::Sepia).unwrap();
//!
//! let back = session.undo().unwrap();
//! assert_eq!(back.operations().len(), 1);
//! ```

use crate::history::HistoryManager;
use crate::state::ImageState;
use std::sync::Arc;
use tracing::debug;
use unmess_core::validate::require_non_null;
use unmess_core::{EngineConfig, EventKind, Observer, PixelBuffer, Result, RgbaBuffer};
use unmess_ops::{Adjustments, Edit};

/// A single-image editing session.
pub struct EditSession {
    config: EngineConfig,
    observer: Arc<dyn Observer>,
    history: HistoryManager,
    current: Option<Arc<ImageState>>,
}

impl EditSession {
    /// Creates a session with nothing loaded.
    ///
    /// # Errors
    ///
    /// [`unmess_core::Error::OutOfRange`] if the history capacity is zero.
    pub fn new(config: EngineConfig, observer: Arc<dyn Observer>) -> Result<Self> {
        let history = HistoryManager::with_observer(config.history_capacity, Arc::clone(&observer))?;
        Ok(Self {
            config,
            observer,
            history,
            current: None,
        })
    }

    /// Loads `buffer`, discarding any previous image and its history.
    pub fn load<B: PixelBuffer + ?Sized>(
        &mut self,
        buffer: &B,
        source_path: &str,
    ) -> Result<&ImageState> {
        let state = ImageState::from_image_with_limits(buffer, source_path, &self.config.limits)?;
        self.history.clear();
        self.observer.on_event(EventKind::StateLoaded, &state.to_string());
        Ok(self.commit(state))
    }

    /// Applies `edit` to the current image and records the result.
    ///
    /// On error the current state is unchanged.
    ///
    /// # Errors
    ///
    /// [`unmess_core::Error::NullArgument`] if no image is loaded, or any
    /// error from the edit itself.
    pub fn apply(&mut self, edit: &Edit) -> Result<&ImageState> {
        let next = self.loaded()?.apply(edit, self.observer.as_ref())?;
        Ok(self.commit(next))
    }

    /// Runs `adjustments` on the original image without touching state.
    pub fn preview(&self, adjustments: &Adjustments) -> Result<RgbaBuffer> {
        let original = self.loaded()?.original();
        adjustments.apply(&original, self.observer.as_ref())
    }

    /// Commits each non-neutral stage of `adjustments` as its own edit.
    ///
    /// All values are validated first, so a bad slider leaves the session
    /// untouched.
    pub fn commit_adjustments(&mut self, adjustments: &Adjustments) -> Result<&ImageState> {
        self.loaded()?;
        adjustments.validate()?;
        for edit in adjustments.to_edits() {
            self.apply(&edit)?;
        }
        self.loaded()
    }

    /// Steps back to the state before the last edit.
    ///
    /// Returns `None`, leaving the current state alone, when only the
    /// loaded state remains.
    pub fn undo(&mut self) -> Option<&ImageState> {
        if !self.can_undo() {
            debug!("Nothing to undo");
            return None;
        }
        let prev = self.history.undo()?;
        self.current = Some(prev);
        self.current.as_deref()
    }

    /// Re-applies the last undone edit.
    pub fn redo(&mut self) -> Option<&ImageState> {
        let next = self.history.redo()?;
        self.current = Some(next);
        self.current.as_deref()
    }

    /// Returns `true` if an edit can be undone.
    pub fn can_undo(&self) -> bool {
        self.history.undo_count() > 1
    }

    /// Returns `true` if an undone edit can be re-applied.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Returns to the loaded image. The reset is itself undoable.
    pub fn reset(&mut self) -> Result<&ImageState> {
        let next = self.loaded()?.reset_to_original();
        self.observer.on_event(EventKind::StateReset, &next.to_string());
        Ok(self.commit(next))
    }

    /// The current state, if an image is loaded.
    pub fn current(&self) -> Option<&ImageState> {
        self.current.as_deref()
    }

    /// The session's history.
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// The session's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn loaded(&self) -> Result<&ImageState> {
        require_non_null(self.current.as_deref(), "image")
    }

    fn commit(&mut self, state: ImageState) -> &ImageState {
        let state = Arc::new(state);
        self.history.save_state(Arc::clone(&state));
        &**self.current.insert(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unmess_core::observer::MemoryObserver;
    use unmess_core::{Error, Limits, NoopObserver};

    fn session() -> EditSession {
        EditSession::new(EngineConfig::default(), Arc::new(NoopObserver)).unwrap()
    }

    fn sample() -> RgbaBuffer {
        RgbaBuffer::from_fn(5, 3, |x, y| [x as f32 / 5.0, y as f32 / 3.0, 0.25, 1.0])
    }

    #[test]
    fn test_requires_image() {
        let mut s = session();
        assert!(s.current().is_none());
        assert_eq!(s.apply(&Edit::Invert).unwrap_err(), Error::null_argument("image"));
        assert!(s.preview(&Adjustments::new()).is_err());
        assert!(s.reset().is_err());
        assert!(s.undo().is_none());
    }

    #[test]
    fn test_load_returns_committed_state() {
        let mut s = session();
        let loaded = s.load(&sample(), "in.png").unwrap().to_string();
        assert_eq!(s.current().unwrap().to_string(), loaded);
        let applied = s.apply(&Edit::Invert).unwrap().operations().len();
        assert_eq!(applied, 1);
        assert_eq!(s.history().undo_count(), 2);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = EngineConfig {
            history_capacity: 0,
            ..EngineConfig::default()
        };
        assert!(EditSession::new(config, Arc::new(NoopObserver)).is_err());
    }

    #[test]
    fn test_load_respects_limits() {
        let config = EngineConfig {
            limits: Limits::square(4),
            ..EngineConfig::default()
        };
        let mut s = EditSession::new(config, Arc::new(NoopObserver)).unwrap();
        let err = s.load(&sample(), "x.png").unwrap_err();
        assert!(err.is_dimension_error());
        assert!(s.current().is_none());
    }

    #[test]
    fn test_failed_edit_keeps_state() {
        let mut s = session();
        s.load(&sample(), "in.png").unwrap();
        s.apply(&Edit::Grayscale).unwrap();
        assert!(s.apply(&Edit::Brightness(2.0)).is_err());
        assert_eq!(s.current().unwrap().operations().len(), 1);
        assert_eq!(s.history().undo_count(), 2);
    }

    #[test]
    fn test_undo_floor_is_loaded_state() {
        let mut s = session();
        s.load(&sample(), "in.png").unwrap();
        assert!(!s.can_undo());
        assert!(s.undo().is_none());
        assert_eq!(s.current().unwrap().current(), &sample());

        s.apply(&Edit::Invert).unwrap();
        let back = s.undo().unwrap();
        assert_eq!(back.current(), &sample());
        assert!(s.undo().is_none());
        assert!(s.can_redo());

        let again = s.redo().unwrap();
        assert_eq!(again.operations().len(), 1);
    }

    #[test]
    fn test_reload_clears_history() {
        let mut s = session();
        s.load(&sample(), "a.png").unwrap();
        s.apply(&Edit::Sepia).unwrap();
        s.load(&RgbaBuffer::new(2, 2), "b.png").unwrap();
        assert_eq!(s.history().undo_count(), 1);
        assert_eq!(s.history().total_memory_used(), 16);
    }

    #[test]
    fn test_preview_uses_original() {
        let mut s = session();
        s.load(&sample(), "in.png").unwrap();
        s.apply(&Edit::Invert).unwrap();

        let adj = Adjustments::new().brightness(0.2);
        let preview = s.preview(&adj).unwrap();
        assert_eq!(preview, adj.apply(&sample(), &NoopObserver).unwrap());
        assert_eq!(s.history().undo_count(), 2);
    }

    #[test]
    fn test_commit_adjustments() {
        let mut s = session();
        s.load(&sample(), "in.png").unwrap();
        let adj = Adjustments::new().contrast(0.5).blur(1).sharpen(0.5);
        let state = s.commit_adjustments(&adj).unwrap();
        assert_eq!(state.operations().len(), 3);
        assert_eq!(s.history().undo_count(), 4);
    }

    #[test]
    fn test_commit_adjustments_validates_first() {
        let mut s = session();
        s.load(&sample(), "in.png").unwrap();
        let adj = Adjustments::new().brightness(0.5).saturation(-3.0);
        assert!(s.commit_adjustments(&adj).is_err());
        assert_eq!(s.history().undo_count(), 1);
    }

    #[test]
    fn test_reset_is_recorded() {
        let obs = Arc::new(MemoryObserver::default());
        let mut s = EditSession::new(EngineConfig::default(), obs.clone()).unwrap();
        s.load(&sample(), "in.png").unwrap();
        s.apply(&Edit::Flip { horizontal: true }).unwrap();
        let reset = s.reset().unwrap();
        assert!(reset.operations().is_empty());
        assert_eq!(s.history().undo_count(), 3);
        assert_eq!(obs.count(EventKind::StateLoaded), 1);
        assert_eq!(obs.count(EventKind::StateReset), 1);

        let undone = s.undo().unwrap();
        assert_eq!(undone.operations().len(), 1);
    }
}
