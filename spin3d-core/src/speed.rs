/// Speed field parsing, validation and the slider range
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{map, opt, recognize},
    sequence::{pair, tuple},
    IResult,
};

use crate::error::SpeedError;

/// Bounds and step of a range slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

/// The speed slider: `[0, 5]` in steps of `0.1`.
pub const SPEED_RANGE: RangeSpec = RangeSpec {
    min: 0.0,
    max: 5.0,
    step: 0.1,
};

impl RangeSpec {
    /// Where the slider thumb sits for `value`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Snap `value` to the nearest step, then clamp it to the bounds.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = self.clamp(value);
        let steps = ((clamped - self.min) / self.step).round();
        // Round away float noise so 3 * 0.1 reads back as "0.3"
        let snapped = ((self.min + steps * self.step) * 1e6).round() / 1e6;
        snapped.min(self.max)
    }
}

fn sign(input: &str) -> IResult<&str, char> {
    one_of("+-")(input)
}

fn decimal_literal(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(sign),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(sign), digit1))),
    )))(input)
}

fn infinity_literal(input: &str) -> IResult<&str, f64> {
    map(pair(opt(sign), tag("Infinity")), |(s, _)| match s {
        Some('-') => f64::NEG_INFINITY,
        _ => f64::INFINITY,
    })(input)
}

/// Parse the longest numeric prefix of `raw`, the way a browser's
/// `parseFloat` does: leading whitespace is skipped and trailing garbage is
/// ignored. Returns `None` when no number starts the string.
pub fn parse_float(raw: &str) -> Option<f64> {
    let input = raw.trim_start();
    if let Ok((_, value)) = infinity_literal(input) {
        return Some(value);
    }
    let (_, literal) = decimal_literal(input).ok()?;
    literal.parse::<f64>().ok()
}

/// Validate a speed edit from either the slider or the text field.
///
/// `Ok(None)` means the input was not numeric and must be ignored without
/// any feedback.
pub fn check_change(raw: &str) -> Result<Option<f64>, SpeedError> {
    match parse_float(raw) {
        None => Ok(None),
        Some(value) if value < 0.0 => Err(SpeedError::Negative),
        Some(value) => Ok(Some(value)),
    }
}

/// Validate the text field when it loses focus.
///
/// Only an empty field or a negative number fails; non-numeric text passes.
pub fn check_blur(raw: &str) -> Result<(), SpeedError> {
    if raw.is_empty() {
        return Err(SpeedError::OutOfRange);
    }
    match parse_float(raw) {
        Some(value) if value < 0.0 => Err(SpeedError::OutOfRange),
        _ => Ok(()),
    }
}

/// Text shown in the speed field after a value is applied.
pub fn format_speed(speed: f64) -> String {
    if speed == f64::INFINITY {
        "Infinity".to_string()
    } else if speed == 0.0 {
        // no "-0"
        "0".to_string()
    } else {
        speed.to_string()
    }
}
