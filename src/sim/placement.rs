//! Placement state for the draggable ball
//!
//! Placement works like layout-constraint activation: exactly one anchor may
//! be active at a time, and every transition deactivates the previous anchor
//! before activating the next. Holding the anchor in a single
//! `Option<Placement>` makes a double activation unrepresentable.

use glam::Vec2;

use super::geometry::Rect;
use crate::consts::*;

/// The active placement anchor for the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Anchored at the fixed start position near the bottom-left
    Start,
    /// Anchored to live pointer-relative coordinates
    Dragging { x: f32, y: f32 },
    /// Anchored back at the outset position after a near miss
    Settled,
    /// Anchored at ground level at horizontal coordinate `x`
    Falling { x: f32 },
}

/// The ball's placement intent, with at most one anchor active
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionState {
    active: Option<Placement>,
}

impl PositionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently active placement, if any
    pub fn active(&self) -> Option<Placement> {
        self.active
    }

    /// Deactivate every anchor without activating a new one. Idempotent;
    /// runs before each activation.
    pub fn reset_all(&mut self) {
        self.active = None;
    }

    /// Anchor at the start position
    pub fn start(&mut self) {
        self.reset_all();
        self.active = Some(Placement::Start);
    }

    /// Anchor at absolute parent-relative coordinates while dragging
    pub fn update_position(&mut self, x: f32, y: f32) {
        self.reset_all();
        self.active = Some(Placement::Dragging { x, y });
    }

    /// Anchor back at the outset position (the near-miss snap back)
    pub fn settle(&mut self) {
        self.reset_all();
        self.active = Some(Placement::Settled);
    }

    /// Anchor at ground level below the release point. Only the horizontal
    /// coordinate of `from` survives; the vertical anchor is always a fixed
    /// distance above the parent's bottom edge.
    pub fn free_fall(&mut self, from: Vec2) {
        self.reset_all();
        self.active = Some(Placement::Falling { x: from.x });
    }

    /// Resolve the active anchor to a ball center within `bounds`
    pub fn resolve(&self, bounds: &Rect) -> Option<Vec2> {
        self.active.map(|placement| match placement {
            Placement::Start | Placement::Settled => Vec2::new(
                bounds.min_x() + START_X,
                bounds.max_y() - START_BOTTOM_INSET,
            ),
            Placement::Dragging { x, y } => Vec2::new(x, y),
            Placement::Falling { x } => Vec2::new(x, bounds.max_y() - GROUND_BOTTOM_INSET),
        })
    }

    /// Resolve the active anchor to a full ball frame
    pub fn resolve_frame(&self, bounds: &Rect) -> Option<Rect> {
        self.resolve(bounds)
            .map(|center| Rect::from_center(center, Vec2::splat(BALL_SIZE)))
    }

    /// Short placement label for the HUD
    pub fn mode_label(&self) -> &'static str {
        match self.active {
            None => "idle",
            Some(Placement::Start) => "start",
            Some(Placement::Dragging { .. }) => "dragging",
            Some(Placement::Settled) => "settled",
            Some(Placement::Falling { .. }) => "falling",
        }
    }
}
