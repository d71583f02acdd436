use serde::{Deserialize, Serialize};
use std::fmt;

use super::FetchOutcome;

/// Fill colors a shape can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Green,
    Blue,
    Red,
}

impl Color {
    /// CSS named color used when the shape is rendered.
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Red => "red",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// The value a fetch outcome reduces to before it is given a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultValue {
    /// Body was `1` or `true`.
    One,
    /// Body was `0` or `false`.
    Zero,
    /// Any other body, a non-success status, or a transport failure.
    Error,
}

impl ResultValue {
    /// Interpret a response body. Surrounding whitespace is ignored.
    pub fn from_body(body: &str) -> Self {
        match body.trim() {
            "1" | "true" => ResultValue::One,
            "0" | "false" => ResultValue::Zero,
            _ => ResultValue::Error,
        }
    }
}

/// Mapping from [`ResultValue`] to the color applied to the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub on_true: Color,
    pub on_false: Color,
    pub on_error: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            on_true: Color::Green,
            on_false: Color::Blue,
            on_error: Color::Red,
        }
    }
}

impl Palette {
    pub fn color_for(&self, value: ResultValue) -> Color {
        match value {
            ResultValue::One => self.on_true,
            ResultValue::Zero => self.on_false,
            ResultValue::Error => self.on_error,
        }
    }

    pub fn classify(&self, outcome: &FetchOutcome) -> Color {
        self.color_for(outcome.value())
    }
}

/// Classify an outcome with the default palette.
pub fn classify(outcome: &FetchOutcome) -> Color {
    Palette::default().classify(outcome)
}
