use engine::{EntityId, Vec2};

use crate::app::config::LootTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootStep {
    Resting,
    Drifting,
    Collected,
}

/// A fragment left behind by a broken prop. Inside the attraction range it
/// accelerates toward the target, and touching the target collects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootFragment {
    id: EntityId,
    position: Vec2,
    speed: f32,
}

impl LootFragment {
    pub fn new(id: EntityId, position: Vec2) -> Self {
        Self {
            id,
            position,
            speed: 0.0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// `target` is the collector's position and body radius.
    pub fn tick(
        &mut self,
        dt_seconds: f32,
        target: Option<(Vec2, f32)>,
        tuning: &LootTuning,
    ) -> LootStep {
        let Some((target, target_radius)) = target else {
            self.speed = 0.0;
            return LootStep::Resting;
        };
        let distance = self.position.distance(target);
        if distance > tuning.attraction_range {
            self.speed = 0.0;
            return LootStep::Resting;
        }

        self.speed = (self.speed + tuning.acceleration * dt_seconds).min(tuning.attraction_speed);
        let travel = (self.speed * dt_seconds).min(distance);
        self.position += (target - self.position).normalize_or_zero() * travel;

        if self.position.distance(target) <= target_radius + tuning.pickup_radius {
            LootStep::Collected
        } else {
            LootStep::Drifting
        }
    }
}
