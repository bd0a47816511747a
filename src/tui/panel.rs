//! Panel visibility state machine.
//!
//! Exactly one of the input, loading and results panels is visible. Every
//! submission that enters `Loading` leaves it through either
//! `show_results` or `revert_to_input`.

/// Which panel is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelMode {
    #[default]
    Input,
    Loading,
    Results,
}

/// Holder for the current panel mode with guarded transitions.
#[derive(Debug, Default)]
pub struct PanelState {
    mode: PanelMode,
}

impl PanelState {
    #[must_use]
    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.mode == PanelMode::Loading
    }

    /// Input -> Loading. Returns false (and changes nothing) from any other mode.
    pub fn begin_submission(&mut self) -> bool {
        self.transition(PanelMode::Input, PanelMode::Loading)
    }

    /// Loading -> Results.
    pub fn show_results(&mut self) -> bool {
        self.transition(PanelMode::Loading, PanelMode::Results)
    }

    /// Loading -> Input, after a failed submission.
    pub fn revert_to_input(&mut self) -> bool {
        self.transition(PanelMode::Loading, PanelMode::Input)
    }

    /// Results -> Input, to edit and resubmit.
    pub fn edit_input(&mut self) -> bool {
        self.transition(PanelMode::Results, PanelMode::Input)
    }

    /// Back to the initial mode regardless of the current one.
    pub fn reset(&mut self) {
        self.mode = PanelMode::Input;
    }

    fn transition(&mut self, from: PanelMode, to: PanelMode) -> bool {
        if self.mode != from {
            tracing::debug!(current = ?self.mode, ?from, ?to, "Ignored panel transition");
            return false;
        }
        self.mode = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_cycle() {
        let mut panel = PanelState::default();
        assert_eq!(panel.mode(), PanelMode::Input);

        assert!(panel.begin_submission());
        assert!(panel.is_loading());
        assert!(panel.show_results());
        assert_eq!(panel.mode(), PanelMode::Results);

        assert!(panel.edit_input());
        assert_eq!(panel.mode(), PanelMode::Input);
    }

    #[test]
    fn test_failure_reverts_to_input() {
        let mut panel = PanelState::default();
        panel.begin_submission();
        assert!(panel.revert_to_input());
        assert_eq!(panel.mode(), PanelMode::Input);
    }

    #[test]
    fn test_invalid_transitions_are_ignored() {
        let mut panel = PanelState::default();
        assert!(!panel.show_results());
        assert!(!panel.revert_to_input());
        assert_eq!(panel.mode(), PanelMode::Input);

        panel.begin_submission();
        assert!(!panel.begin_submission());
        assert!(!panel.edit_input());
        assert!(panel.is_loading());
    }

    #[test]
    fn test_reset_from_any_mode() {
        let mut panel = PanelState::default();
        panel.begin_submission();
        panel.show_results();
        panel.reset();
        assert_eq!(panel.mode(), PanelMode::Input);
    }
}
