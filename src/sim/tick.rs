//! Drag handling, the settle animation, and the drop decision
//!
//! `apply_drag` runs synchronously in the event callback; `tick` advances on
//! a fixed timestep. The drop outcome is decided exactly once, on the first
//! tick at which the settle animation has run its full duration, and it only
//! ever observes the settled frame.

use glam::Vec2;

use super::geometry::in_near_miss_band;
use super::gesture::{DragInput, GesturePhase};
use super::state::{DragPhase, SceneState};
use crate::consts::*;

/// Spring-damper interpolation of the ball's visual center toward the fall
/// anchor. Slightly overdamped so the ball lands without bouncing; runs for
/// `SETTLE_DURATION`, then snaps to the target.
#[derive(Debug, Clone)]
pub struct SettleAnimation {
    pub target: Vec2,
    vel: Vec2,
    elapsed: f32,
}

impl SettleAnimation {
    pub fn new(target: Vec2) -> Self {
        Self {
            target,
            vel: Vec2::ZERO,
            elapsed: 0.0,
        }
    }

    /// Advance the spring by `dt`, moving `pos`. Returns true once the full
    /// duration has elapsed, with `pos` snapped onto the target.
    pub fn step(&mut self, pos: &mut Vec2, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= SETTLE_DURATION {
            *pos = self.target;
            return true;
        }

        // F = -kx - cv
        let accel = (self.target - *pos) * SETTLE_SPRING_K - self.vel * SETTLE_DAMPING;
        self.vel += accel * dt;
        *pos += self.vel * dt;
        false
    }
}

/// Apply one drag event to the scene. Events are handled to completion on
/// the event turn; only the post-release settle is deferred to `tick`.
pub fn apply_drag(state: &mut SceneState, input: &DragInput) {
    // no cancellation: events aimed at a ball mid-settle are dropped, a
    // fresh ball only appears at decision time
    if matches!(state.drag, DragPhase::Resolving { .. }) {
        return;
    }

    if matches!(state.drag, DragPhase::Idle) {
        if input.phase != GesturePhase::Began {
            return;
        }
        log::info!("begin dragging");
        state.drag = DragPhase::Dragging {
            grab_center: state.ball.center,
        };
    }

    drag_to(state, input.translation);

    if input.phase == GesturePhase::Ended {
        release(state);
    }
}

/// Move the drag anchor to the grab point plus the cumulative translation
fn drag_to(state: &mut SceneState, translation: Vec2) {
    let DragPhase::Dragging { grab_center } = &state.drag else {
        return;
    };
    let current = *grab_center + translation;

    state.ball.position.update_position(current.x, current.y);
    if let Some(center) = state.ball.position.resolve(&state.bounds) {
        state.ball.center = center;
    }
}

/// Release the ball: anchor it at ground level below the release point and
/// start the settle animation toward that anchor
fn release(state: &mut SceneState) {
    log::info!("dragging ended");
    state.ball.position.free_fall(state.ball.center);
    if let Some(target) = state.ball.position.resolve(&state.bounds) {
        state.drag = DragPhase::Resolving {
            settle: SettleAnimation::new(target),
        };
    }
}

/// Advance the scene by one fixed timestep
pub fn tick(state: &mut SceneState, dt: f32) {
    state.time_ticks += 1;

    let mut settled = false;
    if let DragPhase::Resolving { settle } = &mut state.drag {
        settled = settle.step(&mut state.ball.center, dt);
    }
    if settled {
        resolve_drop(state);
    }
}

/// Decide the drop outcome against the settled frame
fn resolve_drop(state: &mut SceneState) {
    let frame = state.ball.frame();

    if frame.inside(&state.trash_can) {
        // in the can: this ball is done, a fresh one takes its place
        state.trashed += 1;
        log::info!("ball {} trashed ({} total)", state.ball.id, state.trashed);
        state.spawn_ball();
    } else if in_near_miss_band(state.ball.center.x, &state.trash_can) {
        // grazed the can: snap back to the outset position
        state.ball.position.settle();
        if let Some(center) = state.ball.position.resolve(&state.bounds) {
            state.ball.center = center;
        }
    }
    // clear miss: the ball stays where it fell

    state.drag = DragPhase::Idle;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::default_can_frame;

    /// 390x844 scene: can at (240, 704, 90, 130), ground center y = 794,
    /// accept window for the drop center x = (277, 300.5),
    /// near-miss band = (217.5, 352.5)
    fn scene() -> SceneState {
        SceneState::new(1234, 390.0, 844.0)
    }

    fn drag_and_release(state: &mut SceneState, to: Vec2) {
        let translation = to - state.ball.center;
        apply_drag(state, &DragInput::new(GesturePhase::Began, Vec2::ZERO));
        apply_drag(state, &DragInput::new(GesturePhase::Changed, translation * 0.5));
        apply_drag(state, &DragInput::new(GesturePhase::Changed, translation));
        apply_drag(state, &DragInput::new(GesturePhase::Ended, translation));
    }

    fn run_settle(state: &mut SceneState) {
        // 0.75 s at 120 Hz
        for _ in 0..90 {
            tick(state, SIM_DT);
        }
    }

    #[test]
    fn test_can_frame_expected_by_tests() {
        let can = default_can_frame(&crate::sim::Rect::new(0.0, 0.0, 390.0, 844.0));
        assert_eq!(can.origin, Vec2::new(240.0, 704.0));
        assert_eq!(can.size, Vec2::new(90.0, 130.0));
    }

    #[test]
    fn test_translation_is_cumulative_not_incremental() {
        let mut state = scene();
        let grab = state.ball.center;
        apply_drag(&mut state, &DragInput::new(GesturePhase::Began, Vec2::ZERO));
        apply_drag(
            &mut state,
            &DragInput::new(GesturePhase::Changed, Vec2::new(10.0, 0.0)),
        );
        apply_drag(
            &mut state,
            &DragInput::new(GesturePhase::Changed, Vec2::new(15.0, 5.0)),
        );
        assert_eq!(state.ball.center, grab + Vec2::new(15.0, 5.0));
        assert_eq!(state.ball.position.mode_label(), "dragging");
    }

    #[test]
    fn test_moves_before_begin_are_ignored() {
        let mut state = scene();
        let parked = state.ball.center;
        apply_drag(
            &mut state,
            &DragInput::new(GesturePhase::Changed, Vec2::new(40.0, 40.0)),
        );
        apply_drag(
            &mut state,
            &DragInput::new(GesturePhase::Ended, Vec2::new(40.0, 40.0)),
        );
        assert_eq!(state.ball.center, parked);
        assert!(matches!(state.drag, DragPhase::Idle));
    }

    #[test]
    fn test_release_anchors_at_ground_level() {
        let mut state = scene();
        drag_and_release(&mut state, Vec2::new(150.0, 300.0));
        assert_eq!(state.ball.position.mode_label(), "falling");
        let DragPhase::Resolving { settle } = &state.drag else {
            panic!("expected settle in flight");
        };
        assert_eq!(settle.target, Vec2::new(150.0, 794.0));
    }

    #[test]
    fn test_decision_waits_for_full_settle_duration() {
        let mut state = scene();
        let held_id = state.ball.id;
        drag_and_release(&mut state, Vec2::new(290.0, 740.0));

        for _ in 0..89 {
            tick(&mut state, SIM_DT);
        }
        assert!(matches!(state.drag, DragPhase::Resolving { .. }));
        assert_eq!(state.ball.id, held_id);

        tick(&mut state, SIM_DT);
        assert!(matches!(state.drag, DragPhase::Idle));
        assert_ne!(state.ball.id, held_id);
    }

    #[test]
    fn test_drop_in_can_respawns_fresh_ball() {
        let mut state = scene();
        let held_id = state.ball.id;
        let held_color = state.ball.color;

        drag_and_release(&mut state, Vec2::new(290.0, 740.0));
        run_settle(&mut state);

        assert_eq!(state.trashed, 1);
        assert_ne!(state.ball.id, held_id);
        assert_ne!(state.ball.color, held_color);
        assert_eq!(state.ball.center, Vec2::new(75.0, 794.0));
        assert_eq!(state.ball.position.mode_label(), "start");
    }

    #[test]
    fn test_near_miss_snaps_back_to_outset() {
        let mut state = scene();
        let held_id = state.ball.id;

        drag_and_release(&mut state, Vec2::new(340.0, 600.0));
        run_settle(&mut state);

        assert_eq!(state.trashed, 0);
        assert_eq!(state.ball.id, held_id);
        assert_eq!(state.ball.center, Vec2::new(75.0, 794.0));
        assert_eq!(state.ball.position.mode_label(), "settled");
    }

    #[test]
    fn test_clear_miss_stays_fallen() {
        let mut state = scene();
        let held_id = state.ball.id;

        drag_and_release(&mut state, Vec2::new(100.0, 400.0));
        run_settle(&mut state);

        assert_eq!(state.trashed, 0);
        assert_eq!(state.ball.id, held_id);
        assert_eq!(state.ball.center, Vec2::new(100.0, 794.0));
        assert_eq!(state.ball.position.mode_label(), "falling");
    }

    #[test]
    fn test_fallen_ball_can_be_picked_up_again() {
        let mut state = scene();
        drag_and_release(&mut state, Vec2::new(100.0, 400.0));
        run_settle(&mut state);

        drag_and_release(&mut state, Vec2::new(290.0, 740.0));
        run_settle(&mut state);
        assert_eq!(state.trashed, 1);
    }

    #[test]
    fn test_events_during_settle_are_dropped() {
        let mut state = scene();
        drag_and_release(&mut state, Vec2::new(290.0, 740.0));
        tick(&mut state, SIM_DT);
        let mid_settle = state.ball.center;

        apply_drag(&mut state, &DragInput::new(GesturePhase::Began, Vec2::ZERO));
        apply_drag(
            &mut state,
            &DragInput::new(GesturePhase::Changed, Vec2::new(200.0, 200.0)),
        );
        assert!(matches!(state.drag, DragPhase::Resolving { .. }));
        assert_eq!(state.ball.center, mid_settle);
    }

    #[test]
    fn test_settle_spring_approaches_then_snaps() {
        let target = Vec2::new(290.0, 794.0);
        let mut settle = SettleAnimation::new(target);
        let mut pos = Vec2::new(290.0, 300.0);
        let start_dist = (target - pos).length();

        for _ in 0..45 {
            assert!(!settle.step(&mut pos, SIM_DT));
        }
        assert!((target - pos).length() < start_dist / 2.0);

        for _ in 0..44 {
            assert!(!settle.step(&mut pos, SIM_DT));
        }
        assert!(settle.step(&mut pos, SIM_DT));
        assert_eq!(pos, target);
    }

    #[test]
    fn test_same_seed_same_respawn_colors() {
        let mut a = scene();
        let mut b = scene();
        for state in [&mut a, &mut b] {
            drag_and_release(state, Vec2::new(290.0, 740.0));
            run_settle(state);
        }
        assert_eq!(a.ball.id, b.ball.id);
        assert_eq!(a.ball.color, b.ball.color);
    }
}
