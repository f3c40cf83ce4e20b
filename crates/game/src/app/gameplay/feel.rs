use engine::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::app::config::FeelTuning;

/// Short random camera jitter layered over the controller's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenShake {
    duration_seconds: f32,
    magnitude: f32,
    remaining_seconds: f32,
    offset: Vec2,
}

impl ScreenShake {
    pub fn new(duration_seconds: f32, magnitude: f32) -> Self {
        Self {
            duration_seconds,
            magnitude,
            remaining_seconds: 0.0,
            offset: Vec2::ZERO,
        }
    }

    /// Starts a shake, restarting any shake already running.
    pub fn shake(&mut self) {
        self.remaining_seconds = self.duration_seconds;
    }

    pub fn stop(&mut self) {
        if self.is_active() {
            debug!("screen_shake_stopped");
        }
        self.remaining_seconds = 0.0;
        self.offset = Vec2::ZERO;
    }

    pub fn is_active(&self) -> bool {
        self.remaining_seconds > 0.0
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn tick(&mut self, dt_seconds: f32, rng: &mut StdRng) {
        if !self.is_active() {
            self.offset = Vec2::ZERO;
            return;
        }
        self.remaining_seconds = (self.remaining_seconds - dt_seconds).max(0.0);
        self.offset = random_in_disk(rng) * self.magnitude;
    }
}

fn random_in_disk(rng: &mut StdRng) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let radius = rng.gen::<f32>().sqrt();
    Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Freezes simulation time for a short real-time window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitStop {
    remaining_seconds: f32,
}

impl HitStop {
    /// Overlapping freezes extend to whichever ends later.
    pub fn freeze(&mut self, duration_seconds: f32) {
        if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
            debug!(duration_seconds, "hit_stop_ignored_non_positive_duration");
            return;
        }
        self.remaining_seconds = self.remaining_seconds.max(duration_seconds);
    }

    pub fn is_frozen(&self) -> bool {
        self.remaining_seconds > 0.0
    }

    /// Simulation dt for one real tick. Consumes freeze time.
    pub fn scaled_dt(&mut self, real_dt_seconds: f32) -> f32 {
        if self.is_frozen() {
            self.remaining_seconds = (self.remaining_seconds - real_dt_seconds).max(0.0);
            0.0
        } else {
            real_dt_seconds
        }
    }
}

/// Game-feel services handed to whoever resolves hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeelServices {
    pub shake: ScreenShake,
    pub hit_stop: HitStop,
    hit_stop_seconds: f32,
}

impl FeelServices {
    pub fn new(tuning: &FeelTuning) -> Self {
        Self {
            shake: ScreenShake::new(tuning.shake_seconds, tuning.shake_magnitude),
            hit_stop: HitStop::default(),
            hit_stop_seconds: tuning.hit_stop_seconds,
        }
    }

    /// Kill feedback: freeze plus shake.
    pub fn impact(&mut self) {
        self.hit_stop.freeze(self.hit_stop_seconds);
        self.shake.shake();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn shake_offset_stays_inside_magnitude_and_stops_cleanly() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut shake = ScreenShake::new(0.5, 0.05);
        shake.shake();

        shake.tick(0.125, &mut rng);
        assert!(shake.is_active());
        assert!(shake.offset().length() <= 0.05 + 1e-6);

        shake.stop();
        assert!(!shake.is_active());
        assert_eq!(shake.offset(), Vec2::ZERO);
    }

    #[test]
    fn shake_runs_out_and_offset_returns_to_zero() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut shake = ScreenShake::new(0.25, 0.05);
        shake.shake();
        shake.tick(0.25, &mut rng);
        assert!(!shake.is_active());
        shake.tick(0.25, &mut rng);
        assert_eq!(shake.offset(), Vec2::ZERO);
    }

    #[test]
    fn hit_stop_zeroes_dt_until_freeze_consumed() {
        let mut hit_stop = HitStop::default();
        hit_stop.freeze(0.5);
        hit_stop.freeze(0.25);
        assert!(hit_stop.is_frozen());

        assert_eq!(hit_stop.scaled_dt(0.25), 0.0);
        assert_eq!(hit_stop.scaled_dt(0.25), 0.0);
        assert_eq!(hit_stop.scaled_dt(0.25), 0.25);
        assert!(!hit_stop.is_frozen());
    }

    #[test]
    fn hit_stop_ignores_non_positive_duration() {
        let mut hit_stop = HitStop::default();
        hit_stop.freeze(0.0);
        hit_stop.freeze(f32::NAN);
        assert!(!hit_stop.is_frozen());
    }

    #[test]
    fn impact_freezes_and_shakes() {
        let mut feel = FeelServices::new(&FeelTuning::default());
        feel.impact();
        assert!(feel.hit_stop.is_frozen());
        assert!(feel.shake.is_active());
    }
}
