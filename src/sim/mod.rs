//! Deterministic demo core
//!
//! All drag/drop logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod geometry;
pub mod gesture;
pub mod placement;
pub mod state;
pub mod tick;

pub use geometry::{Rect, in_near_miss_band};
pub use gesture::{DragInput, GesturePhase};
pub use placement::{Placement, PositionState};
pub use state::{Ball, BallColor, DragPhase, SceneState};
pub use tick::{SettleAnimation, apply_drag, tick};
