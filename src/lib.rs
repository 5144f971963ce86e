//! Trash Toss - drag the ball into the trash can
//!
//! A single colored disc can be picked up with a pointer or touch drag.
//! Dropping it over the trash can removes it and spawns a fresh disc at the
//! start position; a near miss snaps it back to the start; anything else
//! lets it fall to the bottom of the screen with a spring settle.
//!
//! Core modules:
//! - `sim`: Deterministic demo core (geometry, placement state, drag logic)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: User preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Demo configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// The ball's frame is a fixed square
    pub const BALL_SIZE: f32 = 50.0;
    /// Corner radius of half the frame renders the ball as a full disc
    pub const BALL_CORNER_RADIUS: f32 = 25.0;
    pub const BALL_BORDER_WIDTH: f32 = 3.0;

    /// Start anchor: ball center sits this far in from the leading edge
    pub const START_X: f32 = 75.0;
    /// Start anchor: ball center sits this far above the bottom edge
    pub const START_BOTTOM_INSET: f32 = 50.0;
    /// Ground anchor: a fallen ball's center sits this far above the bottom edge
    pub const GROUND_BOTTOM_INSET: f32 = 50.0;

    /// The settle animation runs this long before the drop outcome is decided
    pub const SETTLE_DURATION: f32 = 0.75;
    /// Spring stiffness for the settle animation
    pub const SETTLE_SPRING_K: f32 = 150.0;
    /// Spring damping, slightly past critical (ratio ~1.1) so the ball lands
    /// without bouncing
    pub const SETTLE_DAMPING: f32 = 27.0;

    /// The near-miss band extends this fraction of the can's width on each
    /// side of the can's center
    pub const NEAR_MISS_FACTOR: f32 = 0.75;

    /// Trash can frame size
    pub const CAN_WIDTH: f32 = 90.0;
    pub const CAN_HEIGHT: f32 = 130.0;
}
