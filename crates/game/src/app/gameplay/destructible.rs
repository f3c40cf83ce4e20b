use engine::{EntityId, Vec2};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use super::damage::{DamageOutcome, Damageable, Health, HitFlash};
use crate::app::config::DestructibleTuning;

/// Breakable scenery. It dies once and bursts into loot fragments.
#[derive(Debug)]
pub struct Destructible {
    id: EntityId,
    position: Vec2,
    health: Health,
    flash: HitFlash,
    fragment_count: u32,
    fragment_spread: f32,
}

impl Destructible {
    pub fn new(
        id: EntityId,
        position: Vec2,
        tuning: &DestructibleTuning,
        hit_flash_seconds: f32,
    ) -> Self {
        Self {
            id,
            position,
            health: Health::new(tuning.max_health),
            flash: HitFlash::new(hit_flash_seconds),
            fragment_count: tuning.fragment_count,
            fragment_spread: tuning.fragment_spread,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn tick(&mut self, dt_seconds: f32) {
        self.flash.tick(dt_seconds);
    }

    /// Where the fragments land: uniform points in the square of half size
    /// `fragment_spread` around the prop.
    pub fn fragment_positions(&self, rng: &mut StdRng) -> Vec<Vec2> {
        let spread = self.fragment_spread;
        (0..self.fragment_count)
            .map(|_| {
                self.position
                    + Vec2::new(
                        rng.gen_range(-spread..=spread),
                        rng.gen_range(-spread..=spread),
                    )
            })
            .collect()
    }
}

impl Damageable for Destructible {
    fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.health.is_dead() {
            debug!(entity_id = self.id.0, amount, "damage_ignored_dying");
            return DamageOutcome::Ignored;
        }
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

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn breaks_once_and_ignores_later_hits() {
        let mut prop = Destructible::new(
            EntityId(3),
            Vec2::ZERO,
            &DestructibleTuning::default(),
            0.15,
        );

        assert_eq!(prop.take_damage(20.0), DamageOutcome::Damaged);
        assert_eq!(prop.take_damage(20.0), DamageOutcome::Killed);
        assert_eq!(prop.take_damage(20.0), DamageOutcome::Ignored);
        assert!(prop.is_dead());
    }

    #[test]
    fn fragments_scatter_inside_the_spread_and_repeat_per_seed() {
        let tuning = DestructibleTuning {
            fragment_count: 6,
            fragment_spread: 0.5,
            ..DestructibleTuning::default()
        };
        let prop = Destructible::new(EntityId(3), Vec2::new(4.0, 2.0), &tuning, 0.15);

        let first = prop.fragment_positions(&mut StdRng::seed_from_u64(5));
        let second = prop.fragment_positions(&mut StdRng::seed_from_u64(5));

        assert_eq!(first.len(), 6);
        assert_eq!(first, second);
        for position in first {
            assert!((position.x - 4.0).abs() <= 0.5);
            assert!((position.y - 2.0).abs() <= 0.5);
        }
    }
}
