//! View controller: the tab state machine over an immutable snapshot
//!
//! Holds the active `ViewKind` and re-windows the current snapshot on every
//! selection, emitting exactly one `render` per transition. It never fetches,
//! never mutates the snapshot, and leaves error display to the caller.

use tracing::debug;

use crate::error::SkycastError;
use crate::models::{ForecastSnapshot, ViewKind, ViewModel};
use crate::window;
use crate::Result;

/// Capability the controller renders through; implemented by the terminal
/// renderer and by recording sinks in tests
pub trait RenderSink {
    /// Paint a fully built view model
    fn render(&mut self, view: &ViewModel);
    /// Show a loading marker while a fetch is in flight
    fn show_loading(&mut self);
    /// Show a user-facing error message
    fn show_error(&mut self, message: &str);
}

/// Finite state machine over the three views
#[derive(Debug, Default)]
pub struct ViewController {
    snapshot: Option<ForecastSnapshot>,
    active: ViewKind,
}

impl ViewController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active view
    #[must_use]
    pub fn active_view(&self) -> ViewKind {
        self.active
    }

    /// The snapshot currently backing the views, if any
    #[must_use]
    pub fn snapshot(&self) -> Option<&ForecastSnapshot> {
        self.snapshot.as_ref()
    }

    /// Install a freshly fetched snapshot, reset to the today view, and render.
    ///
    /// The previous snapshot is discarded wholesale.
    pub fn present(
        &mut self,
        snapshot: ForecastSnapshot,
        current_hour: u32,
        sink: &mut dyn RenderSink,
    ) -> Result<()> {
        debug!("Presenting new snapshot for {}", snapshot.location.name);
        let view = window::build_view(&snapshot, ViewKind::Today, current_hour)?;
        self.snapshot = Some(snapshot);
        self.active = ViewKind::Today;
        sink.render(&view);
        Ok(())
    }

    /// Move to `view` and re-render from the current snapshot.
    ///
    /// Selecting the already-active view re-renders identically. The active
    /// view only changes once the new view model builds, so a failed
    /// transition (e.g. `InsufficientData`) leaves the machine where it was.
    pub fn select_view(
        &mut self,
        view: ViewKind,
        current_hour: u32,
        sink: &mut dyn RenderSink,
    ) -> Result<()> {
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or_else(|| SkycastError::insufficient_data("no forecast loaded yet"))?;

        debug!("Selecting view {:?}", view);
        let model = window::build_view(snapshot, view, current_hour)?;
        self.active = view;
        sink.render(&model);
        Ok(())
    }
}
