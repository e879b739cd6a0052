//! Control icons drawn on the lower part of the dial

use std::f64::consts::{FRAC_PI_2, PI};

use super::{
    primitives::{palette, DrawOp},
    text::TextMetrics,
};
use crate::input::{Geometry, Point};

const PLAY_PLATE_RADIUS: f64 = 18.0;
const PLAY_RING_RADIUS: f64 = 12.0;
const SIDE_PLATE_RADIUS: f64 = 14.0;
const ICON_LINE_WIDTH: f64 = 2.0;
const ZERO_GLYPH_SIZE: f64 = 12.0;

/// Play triangle when idle, pause bars when running
pub fn play_pause(geometry: &Geometry, is_running: bool) -> Vec<DrawOp> {
    let Point { x: cx, y: py } = geometry.play_center();
    let mut ops = vec![DrawOp::fill_circle(
        geometry.play_center(),
        PLAY_PLATE_RADIUS,
        palette::BUTTON_PLATE,
    )];

    if is_running {
        for x in [cx - 5.0, cx + 2.0] {
            ops.push(DrawOp::FillRect {
                origin: Point::new(x, py - 6.0),
                width: 3.0,
                height: 12.0,
                color: palette::WHITE,
            });
        }
    } else {
        ops.push(DrawOp::FillPolygon {
            points: vec![
                Point::new(cx - 4.0, py - 6.0),
                Point::new(cx + 6.0, py),
                Point::new(cx - 4.0, py + 6.0),
            ],
            color: palette::WHITE,
        });
    }

    ops.push(DrawOp::StrokeCircle {
        center: geometry.play_center(),
        radius: PLAY_RING_RADIUS,
        width: ICON_LINE_WIDTH,
        color: palette::BUTTON_RING,
    });
    ops
}

/// Circular arrow on the left of the play button
pub fn reset(geometry: &Geometry) -> Vec<DrawOp> {
    let center = geometry.reset_center();
    let Point { x, y } = center;

    vec![
        DrawOp::fill_circle(center, SIDE_PLATE_RADIUS, palette::BUTTON_PLATE),
        DrawOp::StrokeArc {
            center,
            radius: 6.0,
            start_angle: -PI,
            end_angle: FRAC_PI_2,
            width: ICON_LINE_WIDTH,
            color: palette::ICON,
        },
        DrawOp::FillPolygon {
            points: vec![
                Point::new(x - 6.0, y),
                Point::new(x - 2.0, y - 4.0),
                Point::new(x - 10.0, y - 4.0),
            ],
            color: palette::ICON,
        },
    ]
}

/// "0" glyph on the right of the play button
pub fn zero(geometry: &Geometry, metrics: &dyn TextMetrics) -> Vec<DrawOp> {
    let center = geometry.zero_center();
    let (w, h) = metrics.measure("0", ZERO_GLYPH_SIZE);

    vec![
        DrawOp::fill_circle(center, SIDE_PLATE_RADIUS, palette::BUTTON_PLATE),
        DrawOp::text(
            "0",
            Point::new(center.x - w / 2.0, center.y - h / 2.0),
            ZERO_GLYPH_SIZE,
            palette::ICON,
        ),
    ]
}
