//! Renderer module
//!
//! Turns the timer state and the widget size into a list of draw
//! primitives. Rendering keeps no state between frames, so any frame can be
//! rebuilt from the current state alone.

pub mod dial;
pub mod icons;
pub mod primitives;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::{
    engine::{TimerSnapshot, TimerState},
    input::Geometry,
};
pub use dial::DotRing;
pub use primitives::{palette, DrawOp, Fill, Rgb};
pub use text::{ApproxMetrics, TextMetrics, TextView};

/// The part of the timer state the renderer reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderInput {
    pub remaining_seconds: u32,
    pub is_running: bool,
}

impl From<&TimerState> for RenderInput {
    fn from(state: &TimerState) -> Self {
        Self {
            remaining_seconds: state.remaining_seconds,
            is_running: state.is_running,
        }
    }
}

impl From<&TimerSnapshot> for RenderInput {
    fn from(snapshot: &TimerSnapshot) -> Self {
        Self {
            remaining_seconds: snapshot.remaining_seconds,
            is_running: snapshot.is_running,
        }
    }
}

/// One rendered frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub view: TextView,
    pub dots: DotRing,
    pub ops: Vec<DrawOp>,
}

/// Render a frame: dial, dot ring, time text, then the control icons
pub fn render_frame(input: RenderInput, geometry: &Geometry, metrics: &dyn TextMetrics) -> Frame {
    let dots = DotRing::new(input.remaining_seconds, input.is_running);

    let mut ops = dial::dial_face(geometry);
    ops.extend(dial::dot_ring(geometry, &dots));
    ops.extend(text::layout_time_text(input.remaining_seconds, geometry, metrics));
    ops.extend(icons::play_pause(geometry, input.is_running));

    // Reset and zero are only offered while idle
    if !input.is_running {
        ops.extend(icons::reset(geometry));
        ops.extend(icons::zero(geometry, metrics));
    }

    Frame {
        width: geometry.width,
        height: geometry.height,
        view: TextView::for_seconds(input.remaining_seconds),
        dots,
        ops,
    }
}
