use engine::{EntityId, Vec2};
use rand::rngs::StdRng;
use rand::Rng;

use super::damage::{DamageOutcome, Damageable, Health, HitFlash};
use super::detection::in_range;
use crate::app::config::{SpawnableSpecies, SpawnerTuning};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub species: SpawnableSpecies,
    pub position: Vec2,
}

/// Periodically drops enemies into a rectangle around itself while the
/// target is close, up to a cap of live spawns.
#[derive(Debug)]
pub struct Spawner {
    id: EntityId,
    position: Vec2,
    health: Health,
    flash: HitFlash,
    timer_seconds: f32,
    spawned: Vec<EntityId>,
    tuning: SpawnerTuning,
}

impl Spawner {
    pub fn new(
        id: EntityId,
        position: Vec2,
        tuning: &SpawnerTuning,
        hit_flash_seconds: f32,
    ) -> Self {
        Self {
            id,
            position,
            health: Health::new(tuning.max_health),
            flash: HitFlash::new(hit_flash_seconds),
            timer_seconds: 0.0,
            spawned: Vec::new(),
            tuning: tuning.clone(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn live_spawn_count(&self) -> usize {
        self.spawned.len()
    }

    /// Advances the spawn timer. `is_alive` lets the spawner forget enemies
    /// that have since been despawned.
    pub fn tick(
        &mut self,
        dt_seconds: f32,
        target: Option<Vec2>,
        is_alive: impl Fn(EntityId) -> bool,
        rng: &mut StdRng,
    ) -> Option<SpawnRequest> {
        self.flash.tick(dt_seconds);
        if self.health.is_dead() {
            return None;
        }
        let target = target?;

        self.spawned.retain(|id| is_alive(*id));
        self.timer_seconds += dt_seconds;

        let ready = self.timer_seconds >= self.tuning.interval_seconds
            && self.spawned.len() < self.tuning.max_alive
            && in_range(self.position, target, self.tuning.detection_radius);
        if !ready {
            return None;
        }
        self.timer_seconds = 0.0;

        if self.tuning.species.is_empty() {
            return None;
        }
        let species = self.tuning.species[rng.gen_range(0..self.tuning.species.len())];
        let half = self.tuning.area_size * 0.5;
        let offset = Vec2::new(
            rng.gen_range(-half.x..=half.x),
            rng.gen_range(-half.y..=half.y),
        );
        Some(SpawnRequest {
            species,
            position: self.position + self.tuning.area_offset + offset,
        })
    }

    pub fn record_spawn(&mut self, id: EntityId) {
        self.spawned.push(id);
    }
}

impl Damageable for Spawner {
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
