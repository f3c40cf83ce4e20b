//! Concrete enemy behaviors plugged into the shared actor state machine.

mod charger;
mod orbiter;
mod shooter;

use engine::{EntityId, Vec2};

pub use charger::ChargerBehavior;
pub use orbiter::OrbiterBehavior;
pub use shooter::ShooterBehavior;

use super::actor::Actor;
use crate::app::config::{SpawnableSpecies, Tuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeciesKind {
    Charger,
    Shooter,
    Orbiter,
}

impl SpeciesKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Charger => "charger",
            Self::Shooter => "shooter",
            Self::Orbiter => "orbiter",
        }
    }
}

impl From<SpawnableSpecies> for SpeciesKind {
    fn from(value: SpawnableSpecies) -> Self {
        match value {
            SpawnableSpecies::Charger => Self::Charger,
            SpawnableSpecies::Shooter => Self::Shooter,
        }
    }
}

pub fn charger(id: EntityId, position: Vec2, tuning: &Tuning) -> Actor {
    Actor::new(
        id,
        position,
        tuning.charger.max_health,
        charger::policy(&tuning.charger),
        tuning.feel.hit_flash_seconds,
        Box::new(ChargerBehavior::new(&tuning.charger)),
    )
}

pub fn shooter(id: EntityId, position: Vec2, tuning: &Tuning) -> Actor {
    Actor::new(
        id,
        position,
        tuning.shooter.max_health,
        shooter::policy(&tuning.shooter),
        tuning.feel.hit_flash_seconds,
        Box::new(ShooterBehavior::new(&tuning.shooter)),
    )
}

/// A turret ball circling `pivot`. Its starting position is derived from
/// `start_angle_deg`, so callers should spawn the entity at
/// [`OrbiterBehavior::position`].
pub fn orbiter(id: EntityId, behavior: OrbiterBehavior, tuning: &Tuning) -> Actor {
    Actor::new(
        id,
        behavior.position(),
        tuning.orbiter.max_health,
        orbiter::policy(&tuning.orbiter),
        tuning.feel.hit_flash_seconds,
        Box::new(behavior),
    )
}

pub fn spawnable(kind: SpawnableSpecies, id: EntityId, position: Vec2, tuning: &Tuning) -> Actor {
    match kind {
        SpawnableSpecies::Charger => charger(id, position, tuning),
        SpawnableSpecies::Shooter => shooter(id, position, tuning),
    }
}
