//! Time text layout
//!
//! Below one hour the dial shows `MM SS` with M/S column labels. From one
//! hour up it shows `HH:MM` with a small trailing `:SS` and H/M labels.

use serde::{Deserialize, Serialize};

use super::primitives::{palette, DrawOp};
use crate::input::{Geometry, Point};

const HOURS_MAIN_SIZE: f64 = 70.0;
const HOURS_SECONDS_SIZE: f64 = 15.0;
const HOURS_LABEL_SIZE: f64 = 14.0;
const MINUTES_MAIN_SIZE: f64 = 80.0;
const MINUTES_WIDE_SIZE: f64 = 60.0;
const MINUTES_LABEL_SIZE: f64 = 16.0;

/// Measures laid out text in pixels
pub trait TextMetrics {
    /// Width and height of `text` at `size`
    fn measure(&self, text: &str, size: f64) -> (f64, f64);
}

/// Width estimate for a bold sans face with tabular digits
#[derive(Debug, Default, Clone, Copy)]
pub struct ApproxMetrics;

impl TextMetrics for ApproxMetrics {
    fn measure(&self, text: &str, size: f64) -> (f64, f64) {
        let em: f64 = text
            .chars()
            .map(|c| match c {
                '0'..='9' => 0.62,
                ':' | ' ' => 0.32,
                _ => 0.72,
            })
            .sum();
        (em * size, size * 1.2)
    }
}

/// Which text layout the dial shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextView {
    /// `MM SS`
    Minutes,
    /// `HH:MM` plus `:SS`
    Hours,
}

impl TextView {
    pub fn for_seconds(remaining_seconds: u32) -> Self {
        if remaining_seconds >= 3600 {
            TextView::Hours
        } else {
            TextView::Minutes
        }
    }
}

/// Strings shown for a remaining time: main text and optional small suffix
pub fn time_strings(remaining_seconds: u32) -> (String, Option<String>) {
    let minutes = remaining_seconds / 60;
    let seconds = remaining_seconds % 60;

    match TextView::for_seconds(remaining_seconds) {
        TextView::Hours => (
            format!("{:02}:{:02}", remaining_seconds / 3600, minutes % 60),
            Some(format!(":{:02}", seconds)),
        ),
        // Unreachable while the minutes view stops at 3599s; three-digit minutes get a narrower font
        TextView::Minutes if minutes > 99 => (format!("{:03} {:02}", minutes, seconds), None),
        TextView::Minutes => (format!("{:02} {:02}", minutes, seconds), None),
    }
}

pub fn layout_time_text(
    remaining_seconds: u32,
    geometry: &Geometry,
    metrics: &dyn TextMetrics,
) -> Vec<DrawOp> {
    match TextView::for_seconds(remaining_seconds) {
        TextView::Hours => hours_view(remaining_seconds, geometry, metrics),
        TextView::Minutes => minutes_view(remaining_seconds, geometry, metrics),
    }
}

fn hours_view(remaining_seconds: u32, geometry: &Geometry, metrics: &dyn TextMetrics) -> Vec<DrawOp> {
    let Point { x: cx, y: cy } = geometry.center;
    let (main, suffix) = time_strings(remaining_seconds);
    let suffix = suffix.unwrap_or_default();

    let (text_w, text_h) = metrics.measure(&main, HOURS_MAIN_SIZE);
    let (sec_w, sec_h) = metrics.measure(&suffix, HOURS_SECONDS_SIZE);
    let start_x = cx - (text_w + sec_w) / 2.0;

    // Small seconds sit near the baseline of the large digits
    let main_y = cy - text_h / 2.0 + 10.0;
    let sec_y = cy - sec_h / 2.0 + 10.0 + (text_h / 2.0 - sec_h / 2.0);

    let col_w = text_w / 2.0;
    let label_y = cy - text_h / 2.0 - 25.0;
    let (h_w, _) = metrics.measure("H", HOURS_LABEL_SIZE);
    let (m_w, _) = metrics.measure("M", HOURS_LABEL_SIZE);

    vec![
        DrawOp::text(main, Point::new(start_x, main_y), HOURS_MAIN_SIZE, palette::WHITE),
        DrawOp::text(
            suffix,
            Point::new(start_x + text_w, sec_y),
            HOURS_SECONDS_SIZE,
            palette::WHITE,
        ),
        DrawOp::text(
            "H",
            Point::new(start_x + col_w / 2.0 - h_w / 2.0, label_y),
            HOURS_LABEL_SIZE,
            palette::LABEL,
        ),
        DrawOp::text(
            "M",
            Point::new(start_x + col_w + col_w / 2.0 - m_w / 2.0, label_y),
            HOURS_LABEL_SIZE,
            palette::LABEL,
        ),
    ]
}

fn minutes_view(remaining_seconds: u32, geometry: &Geometry, metrics: &dyn TextMetrics) -> Vec<DrawOp> {
    let Point { x: cx, y: cy } = geometry.center;
    let (main, _) = time_strings(remaining_seconds);
    // Same three-digit rule as `time_strings`, unreachable below an hour
    let size = if remaining_seconds / 60 > 99 {
        MINUTES_WIDE_SIZE
    } else {
        MINUTES_MAIN_SIZE
    };

    let (text_w, text_h) = metrics.measure(&main, size);
    let col_w = text_w / 2.0;
    let label_y = cy - text_h / 2.0 - 30.0;
    let (m_w, _) = metrics.measure("M", MINUTES_LABEL_SIZE);
    let (s_w, _) = metrics.measure("S", MINUTES_LABEL_SIZE);

    vec![
        DrawOp::text(
            main,
            Point::new(cx - text_w / 2.0, cy - text_h / 2.0 + 10.0),
            size,
            palette::WHITE,
        ),
        DrawOp::text(
            "M",
            Point::new(cx - col_w / 2.0 - m_w / 2.0, label_y),
            MINUTES_LABEL_SIZE,
            palette::LABEL,
        ),
        DrawOp::text(
            "S",
            Point::new(cx + col_w / 2.0 - s_w / 2.0, label_y),
            MINUTES_LABEL_SIZE,
            palette::LABEL,
        ),
    ]
}
