use engine::{Vec2, ViewportProjection};
use tracing::debug;

use crate::app::config::{CameraTuning, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraPhase {
    Idle,
    Transitioning {
        from: Vec2,
        elapsed_seconds: f32,
        duration_seconds: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraEvent {
    TransitionStarted {
        from: Vec2,
        to: Vec2,
        duration_seconds: f32,
    },
    TransitionFinished {
        position: Vec2,
    },
}

/// Snaps the camera one room at a time when the target crosses a viewport
/// threshold. While a transition is in flight the committed target position
/// is fixed and no thresholds are checked.
#[derive(Debug, Clone)]
pub struct CameraBoundsController {
    position: Vec2,
    target_position: Vec2,
    phase: CameraPhase,
    left_threshold: f32,
    right_threshold: f32,
    bottom_threshold: f32,
    top_threshold: f32,
    move_speed: f32,
    min_transition_seconds: f32,
}

impl CameraBoundsController {
    pub fn new(tuning: &CameraTuning, start_position: Vec2) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            position: start_position,
            target_position: start_position,
            phase: CameraPhase::Idle,
            left_threshold: tuning.left_threshold,
            right_threshold: tuning.right_threshold,
            bottom_threshold: tuning.bottom_threshold,
            top_threshold: tuning.top_threshold,
            move_speed: tuning.move_speed,
            min_transition_seconds: tuning.min_transition_seconds,
        })
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn target_position(&self) -> Vec2 {
        self.target_position
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, CameraPhase::Transitioning { .. })
    }

    /// Drops any transition in flight and parks the camera at `position`.
    pub fn reset(&mut self, position: Vec2) {
        self.position = position;
        self.target_position = position;
        self.phase = CameraPhase::Idle;
    }

    pub fn tick(
        &mut self,
        dt_seconds: f32,
        target: Option<Vec2>,
        projection: &dyn ViewportProjection,
    ) -> Option<CameraEvent> {
        match self.phase {
            CameraPhase::Transitioning {
                from,
                elapsed_seconds,
                duration_seconds,
            } => self.advance_transition(
                from,
                elapsed_seconds + dt_seconds.max(0.0),
                duration_seconds,
            ),
            CameraPhase::Idle => {
                let target = target?;
                self.try_start_transition(target, projection)
            }
        }
    }

    fn advance_transition(
        &mut self,
        from: Vec2,
        elapsed_seconds: f32,
        duration_seconds: f32,
    ) -> Option<CameraEvent> {
        if elapsed_seconds >= duration_seconds {
            self.position = self.target_position;
            self.phase = CameraPhase::Idle;
            debug!(
                x = self.position.x,
                y = self.position.y,
                "camera_transition_finished"
            );
            return Some(CameraEvent::TransitionFinished {
                position: self.position,
            });
        }

        let t = elapsed_seconds / duration_seconds;
        self.position = from.lerp(self.target_position, smoothstep(t));
        self.phase = CameraPhase::Transitioning {
            from,
            elapsed_seconds,
            duration_seconds,
        };
        None
    }

    fn try_start_transition(
        &mut self,
        target: Vec2,
        projection: &dyn ViewportProjection,
    ) -> Option<CameraEvent> {
        let viewport = projection.world_to_viewport(self.position, target);
        if !viewport.is_finite() {
            return None;
        }

        let step_x = threshold_step(viewport.x, self.left_threshold, self.right_threshold);
        let step_y = threshold_step(viewport.y, self.bottom_threshold, self.top_threshold);
        if step_x == 0.0 && step_y == 0.0 {
            return None;
        }

        let extent = projection.visible_extent();
        let delta = Vec2::new(step_x * extent.x, step_y * extent.y);
        let from = self.position;
        self.target_position = from + delta;

        let rooms = (delta.x / extent.x).abs().max((delta.y / extent.y).abs());
        let duration_seconds = (rooms / self.move_speed).max(self.min_transition_seconds);
        self.phase = CameraPhase::Transitioning {
            from,
            elapsed_seconds: 0.0,
            duration_seconds,
        };
        debug!(
            step_x,
            step_y,
            to_x = self.target_position.x,
            to_y = self.target_position.y,
            duration_seconds,
            "camera_transition_started"
        );
        Some(CameraEvent::TransitionStarted {
            from,
            to: self.target_position,
            duration_seconds,
        })
    }
}

fn threshold_step(coordinate: f32, low: f32, high: f32) -> f32 {
    if coordinate > high {
        1.0
    } else if coordinate < low {
        -1.0
    } else {
        0.0
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use engine::OrthographicViewport;

    use super::*;

    fn viewport() -> OrthographicViewport {
        OrthographicViewport {
            width: 10.0,
            height: 6.0,
        }
    }

    fn controller() -> CameraBoundsController {
        CameraBoundsController::new(&CameraTuning::default(), Vec2::ZERO).expect("valid camera")
    }

    #[test]
    fn rejects_invalid_thresholds() {
        let tuning = CameraTuning {
            bottom_threshold: 0.8,
            ..CameraTuning::default()
        };
        assert!(CameraBoundsController::new(&tuning, Vec2::ZERO).is_err());
    }

    #[test]
    fn threshold_comparison_is_strict() {
        let mut camera = CameraBoundsController::new(
            &CameraTuning {
                right_threshold: 0.75,
                ..CameraTuning::default()
            },
            Vec2::ZERO,
        )
        .expect("valid camera");

        // Viewport x = 0.75 exactly.
        assert!(camera
            .tick(0.1, Some(Vec2::new(2.5, 0.0)), &viewport())
            .is_none());
        assert!(!camera.is_transitioning());

        assert!(camera
            .tick(0.1, Some(Vec2::new(2.6, 0.0)), &viewport())
            .is_some());
        assert!(camera.is_transitioning());
    }

    #[test]
    fn diagonal_exit_moves_both_axes_in_one_transition() {
        let mut camera = controller();
        let event = camera.tick(0.1, Some(Vec2::new(-4.0, 2.5)), &viewport());

        assert_eq!(
            event,
            Some(CameraEvent::TransitionStarted {
                from: Vec2::ZERO,
                to: Vec2::new(-10.0, 6.0),
                duration_seconds: 0.2,
            })
        );
    }

    #[test]
    fn duration_is_floored_at_minimum() {
        let mut camera = CameraBoundsController::new(
            &CameraTuning {
                move_speed: 50.0,
                ..CameraTuning::default()
            },
            Vec2::ZERO,
        )
        .expect("valid camera");

        match camera.tick(0.0, Some(Vec2::new(4.0, 0.0)), &viewport()) {
            Some(CameraEvent::TransitionStarted {
                duration_seconds, ..
            }) => assert_eq!(duration_seconds, 0.1),
            other => panic!("expected a transition, got {other:?}"),
        }
    }

    #[test]
    fn no_new_shift_while_transitioning_or_on_completion_tick() {
        let mut camera = CameraBoundsController::new(
            &CameraTuning {
                move_speed: 4.0,
                ..CameraTuning::default()
            },
            Vec2::ZERO,
        )
        .expect("valid camera");
        let far_right = Some(Vec2::new(100.0, 0.0));
        assert!(camera.tick(0.0, far_right, &viewport()).is_some());
        let committed = camera.target_position();

        // Target keeps running right: the committed target never moves.
        for _ in 0..3 {
            assert!(camera.tick(0.0625, far_right, &viewport()).is_none());
            assert_eq!(camera.target_position(), committed);
            assert!(camera.is_transitioning());
        }
        assert_eq!(
            camera.tick(0.0625, far_right, &viewport()),
            Some(CameraEvent::TransitionFinished {
                position: committed
            })
        );
        assert_eq!(camera.position(), committed);
        assert!(!camera.is_transitioning());

        // The next idle tick is free to start another room step.
        assert!(matches!(
            camera.tick(0.0625, far_right, &viewport()),
            Some(CameraEvent::TransitionStarted { .. })
        ));
    }

    #[test]
    fn interpolation_is_smooth_and_monotonic() {
        let mut camera = controller();
        camera.tick(0.0, Some(Vec2::new(4.0, 0.0)), &viewport());

        let mut last_x = 0.0;
        camera.tick(0.05, None, &viewport());
        let quarter = camera.position().x;
        assert!(quarter > 0.0 && quarter < 2.5, "smoothstep eases in: {quarter}");
        while camera.is_transitioning() {
            assert!(camera.position().x >= last_x);
            last_x = camera.position().x;
            camera.tick(0.05, None, &viewport());
        }
        assert_eq!(camera.position(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn missing_target_keeps_idle_camera_still() {
        let mut camera = controller();
        assert!(camera.tick(1.0, None, &viewport()).is_none());
        assert_eq!(camera.position(), Vec2::ZERO);
    }
}
