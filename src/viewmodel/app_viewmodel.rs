use crate::config::Config;
use crate::input::Intent;
use crate::model::LineEdit;
use super::{FilesViewModel, NarrativeViewModel, TimelineViewModel};
use super::selection::Selectable;

/// Current view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Timeline,
    Narrative,
    Files,
}

/// Action to take after handling an intent
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Redraw,
    Quit,
}

/// Main application ViewModel coordinating the timeline, narrative and file views
pub struct AppViewModel {
    view_mode: ViewMode,
    pub timeline_vm: TimelineViewModel,
    pub narrative_vm: NarrativeViewModel,
}

impl AppViewModel {
    pub fn new(edits: &[LineEdit], config: &Config) -> Self {
        let timeline_vm = TimelineViewModel::new(edits, config);
        let narrative_vm = NarrativeViewModel::new(timeline_vm.commits());

        Self {
            view_mode: ViewMode::Timeline,
            timeline_vm,
            narrative_vm,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn files_vm(&self) -> &FilesViewModel {
        self.timeline_vm.files()
    }

    /// Feed the step in view into the time cutoff
    fn enter_current_step(&mut self) {
        if let Some(cutoff) = self.narrative_vm.current_cutoff() {
            self.timeline_vm.set_max_time(cutoff);
        }
    }

    fn move_current(&mut self, mv: impl Fn(&mut dyn Selectable) -> bool) {
        match self.view_mode {
            ViewMode::Narrative => {
                if mv(&mut self.narrative_vm) {
                    self.enter_current_step();
                }
            }
            ViewMode::Files => {
                mv(self.timeline_vm.files_mut());
            }
            ViewMode::Timeline => {}
        }
    }

    /// Handle a user intent and return the action to take
    pub fn handle_intent(&mut self, intent: Intent) -> Action {
        match intent {
            Intent::Quit => Action::Quit,

            Intent::ShowTimeline => {
                self.view_mode = ViewMode::Timeline;
                Action::Redraw
            }

            Intent::ShowNarrative => {
                if self.view_mode != ViewMode::Narrative {
                    self.view_mode = ViewMode::Narrative;
                    self.enter_current_step();
                }
                Action::Redraw
            }

            Intent::ShowFiles => {
                self.view_mode = ViewMode::Files;
                Action::Redraw
            }

            Intent::MoveUp => {
                self.move_current(|list| list.move_up());
                Action::Redraw
            }

            Intent::MoveDown => {
                self.move_current(|list| list.move_down());
                Action::Redraw
            }

            Intent::MoveFirst => {
                self.move_current(|list| list.select(0));
                Action::Redraw
            }

            Intent::MoveLast => {
                self.move_current(|list| list.select(usize::MAX));
                Action::Redraw
            }

            Intent::ProgressBy(delta) => {
                if self.view_mode == ViewMode::Timeline {
                    self.timeline_vm.nudge_progress(delta);
                }
                Action::Redraw
            }

            Intent::ProgressTo(progress) => {
                if self.view_mode == ViewMode::Timeline {
                    self.timeline_vm.set_progress(progress);
                }
                Action::Redraw
            }

            Intent::Brush { phase, x, y } => {
                if self.view_mode == ViewMode::Timeline {
                    self.timeline_vm.brush(phase, x, y);
                }
                Action::Redraw
            }

            Intent::ClearBrush => {
                self.timeline_vm.clear_brush();
                Action::Redraw
            }

            Intent::Hover { x, y, column, row } => {
                if self.view_mode == ViewMode::Timeline {
                    self.timeline_vm.hover(x, y, column, row);
                }
                Action::Redraw
            }

            Intent::Leave => {
                self.timeline_vm.leave();
                Action::Redraw
            }
        }
    }
}
