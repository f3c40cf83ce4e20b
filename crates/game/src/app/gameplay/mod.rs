mod actor;
mod arena;
mod camera_bounds;
mod damage;
mod destructible;
mod detection;
mod feel;
mod loot;
mod melee;
mod projectile;
mod spawner;
pub mod species;
mod stun;
mod turret;


pub use actor::{
    ActiveStep, Actor, ActorEvent, ActorPolicy, ActorState, Behavior, BehaviorContext,
    ContactDamage, CoolingParams, Kinematics, PendingWait, RemainsKind, WaitResume,
};
pub use arena::{Arena, ArenaLayout, ArenaStats, PlayerVitals, StrikeReport};
pub use camera_bounds::{CameraBoundsController, CameraEvent, CameraPhase};
pub use damage::{DamageOutcome, Damageable, Health, HitFlash};
pub use destructible::Destructible;
pub use detection::{in_box, in_range, within_horizontal_span, DetectionShape};
pub use feel::{FeelServices, HitStop, ScreenShake};
pub use loot::{LootFragment, LootStep};
pub use melee::{AttackInput, Facing, HitWindow, MeleeWeapon, SwingPhase, SwingRequest};
pub use projectile::{Projectile, ProjectileStep};
pub use spawner::{SpawnRequest, Spawner};
pub use species::SpeciesKind;
pub use stun::Stunnable;
pub use turret::{ring_layout, Turret};
