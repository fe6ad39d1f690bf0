//! Element ids, attributes and inline styles for the DOM control panel.
//!
//! Kept free of `web-sys` so it builds and tests on the host.

use spin3d_core::{RangeSpec, ShapeKind, SPEED_RANGE};

pub const CONTROLS_STYLE: &str = "position:absolute;top:8px;left:8px;z-index:1;\
    font-family:sans-serif;font-size:14px;color:#eee;";
pub const GROUP_STYLE: &str = "margin:4px 0;display:flex;gap:8px;align-items:center;";
pub const TEXT_STYLE: &str = "width:5em;";
pub const CANVAS_STYLE: &str = "position:fixed;top:0;left:0;width:100vw;height:100vh;display:block;";

/// Which widget of a control group an id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Toggle,
    Slider,
    Field,
}

impl Part {
    fn suffix(self) -> &'static str {
        match self {
            Part::Toggle => "toggle",
            Part::Slider => "slider",
            Part::Field => "speed",
        }
    }
}

pub const CANVAS_ID: &str = "spin3d-canvas";
pub const BANNER_ID: &str = "spin3d-error";

pub fn element_id(kind: ShapeKind, part: Part) -> String {
    format!("spin3d-{}-{}", kind.name(), part.suffix())
}

/// `min`, `max` and `step` attributes of a range input.
pub fn range_attributes(range: &RangeSpec) -> [(&'static str, String); 3] {
    [
        ("min", range.min.to_string()),
        ("max", range.max.to_string()),
        ("step", range.step.to_string()),
    ]
}

pub fn speed_range_attributes() -> [(&'static str, String); 3] {
    range_attributes(&SPEED_RANGE)
}

/// Inline style of the error banner; hidden while there is no error.
pub fn banner_style(has_error: bool) -> &'static str {
    if has_error {
        "display:block;color:#ff6b6b;margin-bottom:6px;"
    } else {
        "display:none;"
    }
}
