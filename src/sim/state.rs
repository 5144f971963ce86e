//! Scene state and the draggable ball
//!
//! All mutable demo state lives here. Deterministic: colors come from a
//! seeded RNG, never from ambient entropy.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geometry::Rect;
use super::placement::PositionState;
use super::tick::SettleAnimation;
use crate::consts::*;

/// Fill color for a spawned ball, each channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl BallColor {
    /// Deterministic random color for a ball id
    pub fn random(seed: u64, id: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed.wrapping_add(id as u64));
        Self {
            r: rng.random_range(0.0..=1.0),
            g: rng.random_range(0.0..=1.0),
            b: rng.random_range(0.0..=1.0),
        }
    }
}

/// The single draggable ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: u32,
    /// Visual center, parent-relative (what the renderer draws)
    pub center: Vec2,
    pub color: BallColor,
    /// Placement intent; the visual center chases whatever this resolves to
    pub position: PositionState,
}

impl Ball {
    /// Fresh ball with a color drawn from the scene seed. The caller places
    /// it by activating an anchor and resolving the center.
    pub fn spawn(seed: u64, id: u32) -> Self {
        Self {
            id,
            center: Vec2::ZERO,
            color: BallColor::random(seed, id),
            position: PositionState::new(),
        }
    }

    /// Current bounding frame (fixed 50x50 around the visual center)
    pub fn frame(&self) -> Rect {
        Rect::from_center(self.center, Vec2::splat(BALL_SIZE))
    }
}

/// Gesture phase the drag controller is in
#[derive(Debug, Clone)]
pub enum DragPhase {
    /// No gesture in flight
    Idle,
    /// Pointer is down; `grab_center` is the ball center when the gesture began
    Dragging { grab_center: Vec2 },
    /// Released; the settle animation runs, then the drop outcome is decided
    Resolving { settle: SettleAnimation },
}

/// Complete demo state
#[derive(Debug, Clone)]
pub struct SceneState {
    /// Seed for color draws
    pub seed: u64,
    /// Parent bounds (the whole canvas)
    pub bounds: Rect,
    /// The trash can target zone (static for the scene's lifetime)
    pub trash_can: Rect,
    /// The one ball on screen
    pub ball: Ball,
    /// Drag gesture state machine
    pub drag: DragPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Balls dropped into the can so far
    pub trashed: u32,
    /// Next ball ID
    next_id: u32,
}

impl SceneState {
    /// Create a scene filling `width` x `height`, with the can on its
    /// default ground-line frame and a ball waiting at the start anchor
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let bounds = Rect::new(0.0, 0.0, width, height);
        let trash_can = default_can_frame(&bounds);

        let mut state = Self {
            seed,
            bounds,
            trash_can,
            ball: Ball::spawn(seed, 0),
            drag: DragPhase::Idle,
            time_ticks: 0,
            trashed: 0,
            next_id: 1,
        };
        state.spawn_ball();
        state
    }

    /// Allocate a new ball ID
    pub fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the current ball with a fresh one parked at the start anchor.
    /// Spawns are not animated; the visual center snaps to the anchor.
    pub fn spawn_ball(&mut self) {
        let id = self.next_ball_id();
        let mut ball = Ball::spawn(self.seed, id);
        ball.position.start();
        if let Some(center) = ball.position.resolve(&self.bounds) {
            ball.center = center;
        }
        self.ball = ball;
    }
}

/// Default trash can frame, parked on the ground line so a fallen ball can
/// land inside it.
///
/// The drop test scales the can's origin by 1.05, which closes the accept
/// window once the origin grows past a few hundred units; cap the horizontal
/// position so wide viewports keep a usable target.
pub fn default_can_frame(bounds: &Rect) -> Rect {
    let x = (bounds.width() - CAN_WIDTH - 60.0).min(360.0);
    let y = bounds.height() - CAN_HEIGHT - 10.0;
    Rect::new(x, y, CAN_WIDTH, CAN_HEIGHT)
}
