/// Keyboard-driven control panel overlay
use crossterm::{
    cursor,
    event::{KeyCode, KeyEvent, KeyModifiers},
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use spin3d_core::{ControlPanel, ShapeKind, SPEED_RANGE};

/// Rows the overlay occupies above the scene.
pub const PANEL_ROWS: u16 = 5;

const SLIDER_CELLS: usize = 20;

/// What the app loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Continue,
    Quit,
}

/// Focus and edit state of the overlay. The values themselves live in
/// [`ControlPanel`].
#[derive(Debug, Clone)]
pub struct PanelView {
    focus: ShapeKind,
    editing: bool,
}

impl PanelView {
    pub fn new() -> Self {
        Self {
            focus: ShapeKind::Octahedron,
            editing: false,
        }
    }

    pub fn focus(&self) -> ShapeKind {
        self.focus
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    fn move_focus(&mut self, offset: usize) {
        let next = (self.focus.index() + offset) % ShapeKind::ALL.len();
        self.focus = ShapeKind::ALL[next];
    }

    pub fn handle_key(&mut self, key: KeyEvent, panel: &mut ControlPanel) -> PanelAction {
        // Raw mode swallows SIGINT
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return PanelAction::Quit;
        }
        if self.editing {
            self.handle_edit_key(key, panel);
            return PanelAction::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return PanelAction::Quit,
            KeyCode::Char(c @ '1'..='3') => {
                self.focus = ShapeKind::ALL[c as usize - '1' as usize];
            }
            KeyCode::Tab | KeyCode::Down => self.move_focus(1),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(ShapeKind::ALL.len() - 1),
            KeyCode::Char(' ') | KeyCode::Char('t') => panel.toggle(self.focus),
            KeyCode::Left | KeyCode::Char('-') => panel.nudge(self.focus, -1),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => panel.nudge(self.focus, 1),
            KeyCode::Enter | KeyCode::Char('e') => self.editing = true,
            _ => {}
        }
        PanelAction::Continue
    }

    fn handle_edit_key(&mut self, key: KeyEvent, panel: &mut ControlPanel) {
        let kind = self.focus;
        let plain = key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT;
        match key.code {
            KeyCode::Char(c) if plain => {
                let mut text = panel.field(kind).to_string();
                text.push(c);
                panel.edit_field(kind, &text);
            }
            KeyCode::Backspace => {
                let mut text = panel.field(kind).to_string();
                text.pop();
                panel.edit_field(kind, &text);
            }
            KeyCode::Enter | KeyCode::Esc => {
                self.editing = false;
                panel.blur_field(kind);
            }
            KeyCode::Tab => {
                self.editing = false;
                panel.blur_field(kind);
                self.move_focus(1);
            }
            _ => {}
        }
    }

    /// Text of one control group row.
    pub fn group_line(&self, panel: &ControlPanel, kind: ShapeKind) -> String {
        let state = panel.state(kind);
        let focused = kind == self.focus;
        let filled = (panel.slider(kind) / SPEED_RANGE.max * SLIDER_CELLS as f64).round() as usize;
        let filled = filled.min(SLIDER_CELLS);
        let cursor = if focused && self.editing { "_" } else { "" };

        format!(
            "{} [{}] {:<18} {:<4} speed [{}{}] [{}{}]",
            if focused { '>' } else { ' ' },
            kind.index() + 1,
            kind.toggle_label(),
            if state.visible { "on" } else { "off" },
            "#".repeat(filled),
            "-".repeat(SLIDER_CELLS - filled),
            panel.field(kind),
            cursor,
        )
    }

    pub fn draw<W: Write>(&self, writer: &mut W, panel: &ControlPanel, width: usize, fps: f32) -> std::io::Result<()> {
        let fit = |text: String| -> String {
            let mut line: String = text.chars().take(width).collect();
            let len = line.chars().count();
            line.extend(std::iter::repeat(' ').take(width - len));
            line
        };

        let header = format!(
            "spin3d | FPS: {:.1} | 1-3/Tab=Select Space=Toggle \u{2190}\u{2192}=Slider Enter=Edit Q=Quit",
            fps
        );
        writer
            .queue(cursor::MoveTo(0, 0))?
            .queue(SetForegroundColor(Color::Yellow))?
            .queue(Print(fit(header)))?;

        for (row, kind) in ShapeKind::ALL.into_iter().enumerate() {
            let color = if kind == self.focus { Color::White } else { Color::Grey };
            writer
                .queue(cursor::MoveTo(0, 1 + row as u16))?
                .queue(SetForegroundColor(color))?
                .queue(Print(fit(self.group_line(panel, kind))))?;
        }

        writer
            .queue(cursor::MoveTo(0, PANEL_ROWS - 1))?
            .queue(SetForegroundColor(Color::Red))?
            .queue(Print(fit(panel.error().text().to_string())))?
            .queue(ResetColor)?;
        Ok(())
    }
}

impl Default for PanelView {
    fn default() -> Self {
        Self::new()
    }
}
