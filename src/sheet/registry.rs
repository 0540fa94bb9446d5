use std::collections::HashMap;

use crate::gesture::{Decision, GestureSample};
use crate::sheet::controller::{CloseReason, Completion, SheetController, SheetId, SheetPhase};

/// Owns one controller per sheet and the order in which open sheets were stacked.
#[derive(Default)]
pub struct SheetRegistry {
    sheets: HashMap<SheetId, SheetController>,
    stack: Vec<SheetId>,
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: SheetId, controller: SheetController) {
        if self.sheets.insert(id.clone(), controller).is_some() {
            tracing::warn!(%id, "sheet re-registered, previous controller dropped");
            self.stack.retain(|open| open != &id);
        }
    }

    pub fn get(&self, id: &SheetId) -> Option<&SheetController> {
        self.sheets.get(id)
    }

    pub fn get_mut(&mut self, id: &SheetId) -> Option<&mut SheetController> {
        self.sheets.get_mut(id)
    }

    pub fn open(&mut self, id: &SheetId) -> bool {
        let Some(sheet) = self.sheets.get_mut(id) else {
            tracing::warn!(%id, "open requested for unknown sheet");
            return false;
        };
        if !sheet.open(id.clone()) {
            return false;
        }
        self.stack.push(id.clone());
        true
    }

    pub fn settle_all(&mut self) {
        for id in &self.stack {
            if let Some(sheet) = self.sheets.get_mut(id) {
                sheet.settle();
            }
        }
    }

    pub fn close(&mut self, id: &SheetId, reason: CloseReason) -> Option<Completion> {
        let completion = self.sheets.get_mut(id)?.close_explicit(reason);
        self.prune();
        completion
    }

    pub fn close_topmost(&mut self, reason: CloseReason) -> Option<Completion> {
        let id = self.topmost()?.clone();
        self.close(&id, reason)
    }

    pub fn topmost(&self) -> Option<&SheetId> {
        self.stack.last()
    }

    pub fn topmost_phase(&self) -> Option<SheetPhase> {
        self.topmost().and_then(|id| self.sheets.get(id)).map(SheetController::phase)
    }

    /// Open sheets from bottom to top of the stack.
    pub fn open_sheets(&self) -> impl Iterator<Item = &SheetId> {
        self.stack.iter()
    }

    pub fn open_count(&self) -> usize {
        self.stack.len()
    }

    /// Open sheets covered by a sheet stacked above them.
    pub fn is_hidden(&self, id: &SheetId) -> bool {
        self.stack.iter().any(|open| open == id) && self.topmost() != Some(id)
    }

    pub fn touch_start(&mut self, sample: GestureSample) -> bool {
        self.topmost_controller().is_some_and(|sheet| sheet.touch_start(sample))
    }

    pub fn touch_move(&mut self, sample: GestureSample) -> Option<f32> {
        self.topmost_controller()?.touch_move(sample)
    }

    pub fn touch_end(&mut self, sample: GestureSample) -> Decision {
        let decision = self
            .topmost_controller()
            .map_or(Decision::None, |sheet| sheet.touch_end(sample));
        self.prune();
        decision
    }

    fn topmost_controller(&mut self) -> Option<&mut SheetController> {
        let id = self.stack.last()?;
        self.sheets.get_mut(id)
    }

    fn prune(&mut self) {
        let sheets = &self.sheets;
        self.stack
            .retain(|id| sheets.get(id).is_some_and(|sheet| sheet.phase() != SheetPhase::Closed));
    }
}
