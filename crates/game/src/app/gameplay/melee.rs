use std::collections::HashSet;

use engine::{EntityId, Vec2};
use tracing::debug;

use super::actor::PendingWait;
use crate::app::config::MeleeTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwingRequest {
    pub facing: Facing,
    pub stuns: bool,
}

/// What happened to an attack press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackInput {
    Started,
    /// A swing was in flight; this press runs right after it.
    Queued,
    /// A swing was in flight and one was already queued.
    Dropped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingPhase {
    Windup,
    Thrust,
    Recovery,
}

impl SwingPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windup => "windup",
            Self::Thrust => "thrust",
            Self::Recovery => "recovery",
        }
    }
}

/// Hitbox of a thrust tick, relative to the attacker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindow {
    pub offset: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub stuns: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwingNext {
    Thrust,
    Recovery,
    End,
}

#[derive(Debug, Clone, Copy)]
struct Swing {
    request: SwingRequest,
    wait: PendingWait<SwingNext>,
}

/// One swing at a time with room for a single follow-up. Each swing hits a
/// given entity at most once, however many thrust ticks it overlaps.
#[derive(Debug)]
pub struct MeleeWeapon {
    tuning: MeleeTuning,
    swing: Option<Swing>,
    queued: Option<SwingRequest>,
    already_hit: HashSet<EntityId>,
}

impl MeleeWeapon {
    pub fn new(tuning: &MeleeTuning) -> Self {
        Self {
            tuning: tuning.clone(),
            swing: None,
            queued: None,
            already_hit: HashSet::new(),
        }
    }

    pub fn is_swinging(&self) -> bool {
        self.swing.is_some()
    }

    pub fn phase(&self) -> Option<SwingPhase> {
        self.swing.map(|swing| match swing.wait.resume {
            SwingNext::Thrust => SwingPhase::Windup,
            SwingNext::Recovery => SwingPhase::Thrust,
            SwingNext::End => SwingPhase::Recovery,
        })
    }

    pub fn attack(&mut self, request: SwingRequest) -> AttackInput {
        if self.swing.is_none() {
            self.begin(request);
            AttackInput::Started
        } else if self.queued.is_none() {
            self.queued = Some(request);
            debug!(stuns = request.stuns, "melee_attack_queued");
            AttackInput::Queued
        } else {
            debug!(stuns = request.stuns, "melee_attack_dropped");
            AttackInput::Dropped
        }
    }

    /// Advances the current swing. Returns the hitbox while the swing was
    /// thrusting at the start of this tick.
    pub fn tick(&mut self, dt_seconds: f32) -> Option<HitWindow> {
        let swing = self.swing.as_mut()?;
        let window = (swing.wait.resume == SwingNext::Recovery)
            .then(|| hit_window(&self.tuning, swing.request));

        if swing.wait.advance(dt_seconds) {
            let next = swing.wait.resume;
            match next {
                SwingNext::Thrust => {
                    swing.wait =
                        PendingWait::new(thrust_seconds(&self.tuning), SwingNext::Recovery);
                }
                SwingNext::Recovery => {
                    swing.wait = PendingWait::new(recoil_seconds(&self.tuning), SwingNext::End);
                }
                SwingNext::End => self.finish(),
            }
        }
        window
    }

    /// Records a hit for the current swing. `false` means this swing has
    /// already hit `id`.
    pub fn register_hit(&mut self, id: EntityId) -> bool {
        self.already_hit.insert(id)
    }

    fn begin(&mut self, request: SwingRequest) {
        self.already_hit.clear();
        self.swing = Some(Swing {
            request,
            wait: PendingWait::new(recoil_seconds(&self.tuning), SwingNext::Thrust),
        });
        debug!(
            facing_right = request.facing == Facing::Right,
            stuns = request.stuns,
            "melee_swing_started"
        );
    }

    fn finish(&mut self) {
        match self.queued.take() {
            Some(next) => self.begin(next),
            None => {
                self.swing = None;
                self.already_hit.clear();
            }
        }
    }
}

/// Windup and recovery each take half of the recoil share.
fn recoil_seconds(tuning: &MeleeTuning) -> f32 {
    tuning.duration_seconds * tuning.recoil_fraction * 0.5
}

fn thrust_seconds(tuning: &MeleeTuning) -> f32 {
    tuning.duration_seconds * (1.0 - tuning.recoil_fraction)
}

fn hit_window(tuning: &MeleeTuning, request: SwingRequest) -> HitWindow {
    HitWindow {
        offset: Vec2::new(request.facing.sign() * tuning.reach, 0.0),
        radius: tuning.hit_radius,
        damage: tuning.damage,
        stuns: request.stuns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0.25 s windup, 0.5 s thrust, 0.25 s recovery: four 0.25 s ticks.
    fn tuning() -> MeleeTuning {
        MeleeTuning {
            duration_seconds: 1.0,
            recoil_fraction: 0.5,
            reach: 1.5,
            hit_radius: 0.5,
            damage: 10.0,
        }
    }

    const RIGHT: SwingRequest = SwingRequest {
        facing: Facing::Right,
        stuns: false,
    };

    #[test]
    fn second_press_queues_once_and_third_is_dropped() {
        let mut weapon = MeleeWeapon::new(&tuning());

        assert_eq!(weapon.attack(RIGHT), AttackInput::Started);
        assert_eq!(weapon.attack(RIGHT), AttackInput::Queued);
        assert_eq!(weapon.attack(RIGHT), AttackInput::Dropped);

        for _ in 0..4 {
            weapon.tick(0.25);
        }
        assert_eq!(weapon.phase(), Some(SwingPhase::Windup));

        for _ in 0..4 {
            weapon.tick(0.25);
        }
        assert!(!weapon.is_swinging());
        assert_eq!(weapon.attack(RIGHT), AttackInput::Started);
    }

    #[test]
    fn hitbox_is_open_only_on_thrust_ticks() {
        let mut weapon = MeleeWeapon::new(&tuning());
        weapon.attack(SwingRequest {
            facing: Facing::Left,
            stuns: true,
        });

        let windows = (0..4).map(|_| weapon.tick(0.25)).collect::<Vec<_>>();

        let open = HitWindow {
            offset: Vec2::new(-1.5, 0.0),
            radius: 0.5,
            damage: 10.0,
            stuns: true,
        };
        assert_eq!(windows, vec![None, Some(open), Some(open), None]);
        assert!(!weapon.is_swinging());
    }

    #[test]
    fn each_swing_hits_an_entity_once() {
        let mut weapon = MeleeWeapon::new(&tuning());
        weapon.attack(RIGHT);
        weapon.attack(RIGHT);

        assert!(weapon.register_hit(EntityId(4)));
        assert!(!weapon.register_hit(EntityId(4)));
        assert!(weapon.register_hit(EntityId(5)));

        for _ in 0..4 {
            weapon.tick(0.25);
        }
        assert!(weapon.is_swinging());
        assert!(weapon.register_hit(EntityId(4)));
    }
}
