use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gesture::{Decision, GestureSample, GestureSettings, GestureTracker};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SheetId(String);

impl SheetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SheetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetPhase {
    Closed,
    Opening,
    Open,
    Dragging,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    GestureDismiss,
    ExplicitClose,
    ConfirmClose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub id: SheetId,
    pub reason: CloseReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetState {
    pub id: Option<SheetId>,
    pub phase: SheetPhase,
    pub vertical_offset: f32,
    pub panel_height: f32,
}

impl SheetState {
    fn closed(panel_height: f32) -> Self {
        Self {
            id: None,
            phase: SheetPhase::Closed,
            vertical_offset: 0.0,
            panel_height,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase != SheetPhase::Closed
    }
}

/// Receives every phase/offset change and the single completion of each open/close cycle.
#[cfg_attr(test, mockall::automock)]
pub trait SheetObserver {
    fn phase_changed(&mut self, state: &SheetState);
    fn completed(&mut self, completion: &Completion);
}

pub struct SheetController {
    state: SheetState,
    tracker: GestureTracker,
    observer: Option<Box<dyn SheetObserver>>,
}

impl SheetController {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            state: SheetState::closed(0.0),
            tracker: GestureTracker::new(settings),
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn SheetObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_panel_height(mut self, panel_height: f32) -> Self {
        self.set_panel_height(panel_height);
        self
    }

    pub fn state(&self) -> &SheetState {
        &self.state
    }

    pub fn phase(&self) -> SheetPhase {
        self.state.phase
    }

    pub fn vertical_offset(&self) -> f32 {
        self.state.vertical_offset
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state.phase, SheetPhase::Open | SheetPhase::Dragging)
    }

    pub fn set_panel_height(&mut self, panel_height: f32) {
        self.state.panel_height = panel_height.max(0.0);
    }

    pub fn open(&mut self, id: SheetId) -> bool {
        if self.state.phase != SheetPhase::Closed {
            tracing::debug!(%id, phase = ?self.state.phase, "open ignored");
            return false;
        }
        self.state.id = Some(id);
        self.state.vertical_offset = 0.0;
        self.transition(SheetPhase::Opening);
        true
    }

    /// Completes the opening transition.
    pub fn settle(&mut self) -> bool {
        if self.state.phase != SheetPhase::Opening {
            return false;
        }
        self.transition(SheetPhase::Open);
        true
    }

    pub fn begin_drag(&mut self) -> bool {
        if self.state.phase != SheetPhase::Open {
            return false;
        }
        self.transition(SheetPhase::Dragging);
        true
    }

    pub fn update_drag(&mut self, displacement: f32) -> bool {
        if self.state.phase != SheetPhase::Dragging {
            return false;
        }
        self.state.vertical_offset = displacement.max(0.0);
        self.notify();
        true
    }

    pub fn end_drag(&mut self, decision: Decision) -> Option<Completion> {
        if self.state.phase != SheetPhase::Dragging {
            return None;
        }
        match decision {
            Decision::Dismiss => self.close(CloseReason::GestureDismiss),
            Decision::SnapOpen | Decision::None => {
                self.state.vertical_offset = 0.0;
                self.transition(SheetPhase::Open);
                None
            }
        }
    }

    pub fn close_explicit(&mut self, reason: CloseReason) -> Option<Completion> {
        self.close(reason)
    }

    pub fn touch_start(&mut self, sample: GestureSample) -> bool {
        if self.tracker.is_active() || !self.begin_drag() {
            return false;
        }
        self.tracker.on_start(sample);
        true
    }

    pub fn touch_move(&mut self, sample: GestureSample) -> Option<f32> {
        if self.state.phase != SheetPhase::Dragging || !self.tracker.is_active() {
            return None;
        }
        let travelled = self.tracker.on_move(sample);
        self.update_drag(travelled);
        Some(travelled)
    }

    pub fn touch_end(&mut self, sample: GestureSample) -> Decision {
        if self.state.phase != SheetPhase::Dragging || !self.tracker.is_active() {
            return Decision::None;
        }
        let decision = self.tracker.on_end(sample, self.state.panel_height);
        self.end_drag(decision);
        decision
    }

    fn close(&mut self, reason: CloseReason) -> Option<Completion> {
        if matches!(self.state.phase, SheetPhase::Closed | SheetPhase::Closing) {
            return None;
        }
        if self.tracker.is_active() {
            self.tracker = GestureTracker::new(*self.tracker.settings());
        }
        self.transition(SheetPhase::Closing);

        let id = self.state.id.take();
        self.state = SheetState::closed(self.state.panel_height);
        self.notify();
        let id = id?;

        let completion = Completion { id, reason };
        tracing::info!(id = %completion.id, reason = ?completion.reason, "sheet closed");
        if let Some(observer) = self.observer.as_mut() {
            observer.completed(&completion);
        }
        Some(completion)
    }

    fn transition(&mut self, phase: SheetPhase) {
        tracing::debug!(from = ?self.state.phase, to = ?phase, "sheet phase");
        self.state.phase = phase;
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.phase_changed(&self.state);
        }
    }
}

impl Default for SheetController {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}
