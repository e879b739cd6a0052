//! Dial face and the 60 position dot ring

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use super::primitives::{palette, DrawOp, Fill, Rgb};
use crate::input::{Geometry, Point};

pub const DOT_COUNT: u32 = 60;
/// Inset of the dot ring from the dial edge
const DOT_RING_INSET: f64 = 30.0;
const DOT_RADIUS: f64 = 4.0;
const BORDER_WIDTH: f64 = 8.0;

/// Dot ring state derived from the remaining time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotRing {
    pub active: u32,
    pub color: Rgb,
}

impl DotRing {
    pub fn new(remaining_seconds: u32, is_running: bool) -> Self {
        Self {
            active: active_dot_count(remaining_seconds, is_running),
            color: color_for_hours(remaining_seconds / 3600),
        }
    }
}

/// Number of lit dots for a remaining time.
///
/// Dots count minutes within the current hour. A whole nonzero hour lights
/// the full ring, and while running the minute currently draining stays lit.
pub fn active_dot_count(remaining_seconds: u32, is_running: bool) -> u32 {
    let minutes = remaining_seconds / 60;
    let seconds = remaining_seconds % 60;

    if remaining_seconds > 0 && remaining_seconds % 3600 == 0 {
        return DOT_COUNT;
    }
    if is_running && seconds > 0 {
        return minutes % 60 + 1;
    }
    (remaining_seconds % 3600).div_ceil(60)
}

/// White, yellow, orange, then red from three hours up
pub fn color_for_hours(hours: u32) -> Rgb {
    match hours {
        0 => palette::WHITE,
        1 => palette::YELLOW,
        2 => palette::ORANGE,
        _ => palette::RED,
    }
}

/// Center of dot `index`, starting at twelve o'clock and going clockwise
pub fn dot_position(geometry: &Geometry, index: u32) -> Point {
    let angle = -FRAC_PI_2 + index as f64 * TAU / DOT_COUNT as f64;
    let ring = geometry.radius - DOT_RING_INSET;
    Point::new(
        geometry.center.x + angle.cos() * ring,
        geometry.center.y + angle.sin() * ring,
    )
}

/// Background disk, border and inner face
pub fn dial_face(geometry: &Geometry) -> Vec<DrawOp> {
    let Geometry { center, radius, .. } = *geometry;

    vec![
        DrawOp::fill_circle(
            center,
            radius,
            Fill::LinearGradient {
                from: Point::new(center.x - radius, center.y - radius),
                to: Point::new(center.x + radius, center.y + radius),
                start: palette::DIAL_LIGHT,
                end: palette::DIAL_DARK,
            },
        ),
        DrawOp::StrokeCircle {
            center,
            radius,
            width: BORDER_WIDTH,
            color: palette::DIAL_BORDER,
        },
        DrawOp::fill_circle(center, (radius - BORDER_WIDTH).max(0.0), palette::DIAL_DARK),
    ]
}

pub fn dot_ring(geometry: &Geometry, ring: &DotRing) -> Vec<DrawOp> {
    (0..DOT_COUNT)
        .map(|i| {
            let color = if i < ring.active {
                ring.color
            } else {
                palette::DOT_INACTIVE
            };
            DrawOp::fill_circle(dot_position(geometry, i), DOT_RADIUS, color)
        })
        .collect()
}
