//! Control panel state: per-shape visibility and speed, the speed text
//! fields, and the one error banner they all share.

use crate::error::SpeedError;
use crate::shape::ShapeKind;
use crate::speed::{self, SPEED_RANGE};

/// Speed every shape starts with.
pub const DEFAULT_SPEED: f64 = 0.01;

/// Visibility and rotation speed of one shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeState {
    pub visible: bool,
    /// Radians per second on each axis. Never negative.
    pub speed: f64,
}

impl Default for ShapeState {
    fn default() -> Self {
        Self {
            visible: true,
            speed: DEFAULT_SPEED,
        }
    }
}

/// The shared error banner. Empty means no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMessage {
    text: String,
}

impl ErrorMessage {
    pub fn set(&mut self, error: SpeedError) {
        self.text = error.to_string();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The banner text, if it should be shown.
    pub fn get(&self) -> Option<&str> {
        (!self.text.is_empty()).then_some(self.text.as_str())
    }
}

#[derive(Debug, Clone)]
struct ControlGroup {
    state: ShapeState,
    /// Raw text field contents; may hold a value that was never applied.
    field: String,
}

impl ControlGroup {
    fn new() -> Self {
        let state = ShapeState::default();
        Self {
            field: speed::format_speed(state.speed),
            state,
        }
    }
}

/// Owns the UI state for all three shapes.
#[derive(Debug, Clone)]
pub struct ControlPanel {
    groups: [ControlGroup; 3],
    error: ErrorMessage,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            groups: [ControlGroup::new(), ControlGroup::new(), ControlGroup::new()],
            error: ErrorMessage::default(),
        }
    }

    pub fn state(&self, kind: ShapeKind) -> &ShapeState {
        &self.groups[kind.index()].state
    }

    /// Current text of the shape's speed field.
    pub fn field(&self, kind: ShapeKind) -> &str {
        &self.groups[kind.index()].field
    }

    /// Slider thumb position for the shape's speed.
    pub fn slider(&self, kind: ShapeKind) -> f64 {
        SPEED_RANGE.clamp(self.state(kind).speed)
    }

    pub fn error(&self) -> &ErrorMessage {
        &self.error
    }

    /// Flip visibility. Never fails.
    pub fn toggle(&mut self, kind: ShapeKind) {
        let state = &mut self.groups[kind.index()].state;
        state.visible = !state.visible;
        log::debug!("{} visible = {}", kind, state.visible);
    }

    /// Shared speed handler for the slider and the text field.
    ///
    /// Non-numeric input is ignored outright; a negative number sets the
    /// error banner and leaves the speed alone; anything else is applied and
    /// clears the banner.
    pub fn change_speed(&mut self, kind: ShapeKind, raw: &str) {
        match speed::check_change(raw) {
            Ok(None) => log::debug!("{}: ignoring non-numeric speed {:?}", kind, raw),
            Err(err) => {
                log::debug!("{}: rejected speed {:?}: {}", kind, raw, err);
                self.error.set(err);
            }
            Ok(Some(value)) => {
                self.error.clear();
                self.groups[kind.index()].state.speed = value;
            }
        }
    }

    /// The text field changed to `raw`.
    pub fn edit_field(&mut self, kind: ShapeKind, raw: &str) {
        self.groups[kind.index()].field = raw.to_string();
        self.change_speed(kind, raw);
    }

    /// The slider moved to `value`.
    pub fn slide(&mut self, kind: ShapeKind, value: f64) {
        let snapped = speed::format_speed(SPEED_RANGE.snap(value));
        self.change_speed(kind, &snapped);
        let group = &mut self.groups[kind.index()];
        group.field = speed::format_speed(group.state.speed);
    }

    /// Move the slider by whole steps from where its thumb sits. A thumb
    /// already pinned at the bound it is pushed against does not move and
    /// fires nothing.
    pub fn nudge(&mut self, kind: ShapeKind, steps: i32) {
        let target = self.slider(kind) + steps as f64 * SPEED_RANGE.step;
        if SPEED_RANGE.snap(target) == self.slider(kind) {
            return;
        }
        self.slide(kind, target);
    }

    /// The text field lost focus. Checks the field text, not the applied
    /// speed, and does not rewrite the field.
    pub fn blur_field(&mut self, kind: ShapeKind) {
        match speed::check_blur(&self.groups[kind.index()].field) {
            Ok(()) => self.error.clear(),
            Err(err) => self.error.set(err),
        }
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEGATIVE: &str = "Speed value cannot be negative.";
    const OUT_OF_RANGE: &str = "Please enter a valid speed value within the range.";

    #[test]
    fn test_defaults() {
        let panel = ControlPanel::new();
        for kind in ShapeKind::ALL {
            assert_eq!(*panel.state(kind), ShapeState { visible: true, speed: 0.01 });
            assert_eq!(panel.field(kind), "0.01");
        }
        assert!(panel.error().is_empty());
        assert_eq!(panel.error().get(), None);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut panel = ControlPanel::new();
        panel.toggle(ShapeKind::Cube);
        assert!(!panel.state(ShapeKind::Cube).visible);
        assert!(panel.state(ShapeKind::Torus).visible);
        panel.toggle(ShapeKind::Cube);
        assert!(panel.state(ShapeKind::Cube).visible);
    }

    #[test]
    fn test_negative_entry_is_rejected() {
        let mut panel = ControlPanel::new();
        panel.edit_field(ShapeKind::Octahedron, "-1");
        assert_eq!(panel.state(ShapeKind::Octahedron).speed, 0.01);
        assert_eq!(panel.error().text(), NEGATIVE);
        // The typed text stays in the field.
        assert_eq!(panel.field(ShapeKind::Octahedron), "-1");
    }

    #[test]
    fn test_non_numeric_entry_is_a_no_op() {
        let mut panel = ControlPanel::new();
        panel.edit_field(ShapeKind::Torus, "-1");
        panel.edit_field(ShapeKind::Torus, "abc");
        assert_eq!(panel.state(ShapeKind::Torus).speed, 0.01);
        assert_eq!(panel.error().text(), NEGATIVE);

        let mut clean = ControlPanel::new();
        clean.edit_field(ShapeKind::Torus, "abc");
        assert_eq!(clean.state(ShapeKind::Torus).speed, 0.01);
        assert!(clean.error().is_empty());
    }

    #[test]
    fn test_valid_entry_applies_and_clears() {
        let mut panel = ControlPanel::new();
        panel.edit_field(ShapeKind::Cube, "-2");
        panel.edit_field(ShapeKind::Cube, "12.5");
        assert_eq!(panel.state(ShapeKind::Cube).speed, 12.5);
        assert!(panel.error().is_empty());
        // Text entry is not bounded by the slider; the thumb pins at the max.
        assert_eq!(panel.slider(ShapeKind::Cube), 5.0);
    }

    #[test]
    fn test_error_slot_is_shared() {
        let mut panel = ControlPanel::new();
        panel.edit_field(ShapeKind::Octahedron, "-1");
        assert_eq!(panel.error().text(), NEGATIVE);
        panel.edit_field(ShapeKind::Cube, "2");
        assert!(panel.error().is_empty());
        assert_eq!(panel.state(ShapeKind::Octahedron).speed, 0.01);
    }

    #[test]
    fn test_blur_validation() {
        let mut panel = ControlPanel::new();
        panel.edit_field(ShapeKind::Torus, "");
        assert!(panel.error().is_empty());
        panel.blur_field(ShapeKind::Torus);
        assert_eq!(panel.error().text(), OUT_OF_RANGE);

        panel.edit_field(ShapeKind::Torus, "2.5");
        panel.blur_field(ShapeKind::Torus);
        assert!(panel.error().is_empty());

        panel.edit_field(ShapeKind::Torus, "-4");
        assert_eq!(panel.error().text(), NEGATIVE);
        panel.blur_field(ShapeKind::Torus);
        assert_eq!(panel.error().text(), OUT_OF_RANGE);
        assert_eq!(panel.field(ShapeKind::Torus), "-4");
        assert_eq!(panel.state(ShapeKind::Torus).speed, 2.5);
    }

    #[test]
    fn test_blur_with_valid_text_clears_other_errors() {
        let mut panel = ControlPanel::new();
        panel.edit_field(ShapeKind::Octahedron, "-1");
        panel.blur_field(ShapeKind::Cube);
        assert!(panel.error().is_empty());
    }

    #[test]
    fn test_slider_snaps_and_syncs_field() {
        let mut panel = ControlPanel::new();
        panel.slide(ShapeKind::Octahedron, 2.26);
        assert_eq!(panel.state(ShapeKind::Octahedron).speed, 2.3);
        assert_eq!(panel.field(ShapeKind::Octahedron), "2.3");

        panel.nudge(ShapeKind::Octahedron, -1);
        assert_eq!(panel.field(ShapeKind::Octahedron), "2.2");

        panel.slide(ShapeKind::Octahedron, 9.0);
        assert_eq!(panel.state(ShapeKind::Octahedron).speed, 5.0);
    }

    #[test]
    fn test_nudge_from_default_speed() {
        let mut panel = ControlPanel::new();
        panel.nudge(ShapeKind::Torus, 1);
        assert_eq!(panel.state(ShapeKind::Torus).speed, 0.1);
        panel.nudge(ShapeKind::Torus, -5);
        assert_eq!(panel.state(ShapeKind::Torus).speed, 0.0);
        assert!(panel.error().is_empty());
    }

    #[test]
    fn test_nudge_against_bound_keeps_error() {
        let mut panel = ControlPanel::new();
        panel.slide(ShapeKind::Cube, 0.0);
        panel.edit_field(ShapeKind::Torus, "-5");
        assert_eq!(panel.error().text(), NEGATIVE);

        panel.nudge(ShapeKind::Cube, -1);
        assert_eq!(panel.state(ShapeKind::Cube).speed, 0.0);
        assert_eq!(panel.error().text(), NEGATIVE);

        panel.slide(ShapeKind::Octahedron, 5.0);
        panel.edit_field(ShapeKind::Torus, "-5");
        panel.nudge(ShapeKind::Octahedron, 1);
        assert_eq!(panel.state(ShapeKind::Octahedron).speed, 5.0);
        assert_eq!(panel.error().text(), NEGATIVE);
    }

    #[test]
    fn test_huge_entry_keeps_finite_speed() {
        let mut panel = ControlPanel::new();
        panel.edit_field(ShapeKind::Cube, "1e39");
        let speed = panel.state(ShapeKind::Cube).speed;
        assert!(speed.is_finite());
        assert_eq!(speed, 1e39);
        assert_eq!(panel.slider(ShapeKind::Cube), 5.0);
    }
}
