//! Drag gesture events delivered by the platform shell
//!
//! The shell reports a three-phase event stream per gesture. Every event
//! carries the cumulative pointer translation since `Began`, not a
//! frame-to-frame delta.

use glam::Vec2;

/// Phase of a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
}

/// A single drag event
#[derive(Debug, Clone, Copy)]
pub struct DragInput {
    pub phase: GesturePhase,
    /// Cumulative pointer translation since the gesture began
    pub translation: Vec2,
}

impl DragInput {
    pub fn new(phase: GesturePhase, translation: Vec2) -> Self {
        Self { phase, translation }
    }
}
