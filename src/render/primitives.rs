//! Draw primitives and the fixed palette

use serde::{Deserialize, Serialize};

use crate::input::Point;

/// RGB color with channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: f32) -> Self {
        Self::new(level, level, level)
    }
}

pub mod palette {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const YELLOW: Rgb = Rgb::new(1.0, 0.9, 0.2);
    pub const ORANGE: Rgb = Rgb::new(1.0, 0.6, 0.1);
    pub const RED: Rgb = Rgb::new(1.0, 0.2, 0.2);

    pub const DOT_INACTIVE: Rgb = Rgb::gray(0.2);
    pub const DIAL_LIGHT: Rgb = Rgb::gray(0.2);
    pub const DIAL_DARK: Rgb = Rgb::gray(0.05);
    pub const DIAL_BORDER: Rgb = Rgb::gray(0.6);
    pub const LABEL: Rgb = Rgb::gray(0.7);
    pub const BUTTON_PLATE: Rgb = Rgb::gray(0.15);
    pub const BUTTON_RING: Rgb = Rgb::gray(0.3);
    pub const ICON: Rgb = Rgb::gray(0.9);
}

/// Fill source for closed shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    Solid { color: Rgb },
    LinearGradient {
        from: Point,
        to: Point,
        start: Rgb,
        end: Rgb,
    },
}

impl From<Rgb> for Fill {
    fn from(color: Rgb) -> Self {
        Fill::Solid { color }
    }
}

/// One drawing instruction; angles are in radians, text origins are top-left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    FillCircle {
        center: Point,
        radius: f64,
        fill: Fill,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        width: f64,
        color: Rgb,
    },
    StrokeArc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        width: f64,
        color: Rgb,
    },
    FillRect {
        origin: Point,
        width: f64,
        height: f64,
        color: Rgb,
    },
    FillPolygon {
        points: Vec<Point>,
        color: Rgb,
    },
    Text {
        text: String,
        origin: Point,
        size: f64,
        bold: bool,
        color: Rgb,
    },
}

impl DrawOp {
    pub fn fill_circle(center: Point, radius: f64, fill: impl Into<Fill>) -> Self {
        DrawOp::FillCircle {
            center,
            radius,
            fill: fill.into(),
        }
    }

    pub fn text(text: impl Into<String>, origin: Point, size: f64, color: Rgb) -> Self {
        DrawOp::Text {
            text: text.into(),
            origin,
            size,
            bold: true,
            color,
        }
    }
}
