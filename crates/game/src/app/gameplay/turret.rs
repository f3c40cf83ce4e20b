use engine::{EntityId, Vec2};

use super::damage::{DamageOutcome, Damageable, Health, HitFlash};
use super::species::OrbiterBehavior;
use crate::app::config::RingTuning;

/// Static core that owns rings of orbiting balls. Killing the core takes
/// its balls with it.
#[derive(Debug)]
pub struct Turret {
    id: EntityId,
    position: Vec2,
    health: Health,
    flash: HitFlash,
    balls: Vec<EntityId>,
}

impl Turret {
    pub fn new(id: EntityId, position: Vec2, core_health: f32, hit_flash_seconds: f32) -> Self {
        Self {
            id,
            position,
            health: Health::new(core_health),
            flash: HitFlash::new(hit_flash_seconds),
            balls: Vec::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn balls(&self) -> &[EntityId] {
        &self.balls
    }

    pub fn attach_ball(&mut self, id: EntityId) {
        self.balls.push(id);
    }

    pub fn detach_ball(&mut self, id: EntityId) {
        self.balls.retain(|ball| *ball != id);
    }

    pub fn tick(&mut self, dt_seconds: f32) {
        self.flash.tick(dt_seconds);
    }
}

/// Evenly spaced orbit for every ball of every ring around `pivot`.
pub fn ring_layout(pivot: Vec2, rings: &[RingTuning]) -> Vec<OrbiterBehavior> {
    rings
        .iter()
        .filter(|ring| ring.ball_count > 0)
        .flat_map(|ring| {
            let spacing = 360.0 / ring.ball_count as f32;
            (0..ring.ball_count).map(move |index| {
                OrbiterBehavior::new(
                    pivot,
                    ring.radius,
                    index as f32 * spacing,
                    ring.angular_speed_deg,
                )
            })
        })
        .collect()
}

impl Damageable for Turret {
    fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        let outcome = self.health.apply(amount);
        if outcome != DamageOutcome::Ignored {
            self.flash.trigger();
        }
        outcome
    }

    fn is_dead(&self) -> bool {
        self.health.is_dead()
    }
}
