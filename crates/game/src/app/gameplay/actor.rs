use std::fmt;

use engine::{EntityId, Vec2};
use rand::rngs::StdRng;
use tracing::{debug, warn};

use super::damage::{DamageOutcome, Damageable, Health, HitFlash};
use super::detection::DetectionShape;
use super::species::SpeciesKind;
use super::stun::Stunnable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorState {
    Idle,
    Preparing,
    Active,
    Cooling,
    Stunned,
    Destroyed,
}

impl ActorState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::Active => "active",
            Self::Cooling => "cooling",
            Self::Stunned => "stunned",
            Self::Destroyed => "destroyed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitResume {
    CommitDecision,
    EndStun,
}

/// A timed wait advanced once per tick. `resume` says what happens when it
/// runs out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingWait<R = WaitResume> {
    pub remaining_seconds: f32,
    pub resume: R,
}

impl<R: Copy> PendingWait<R> {
    pub fn new(seconds: f32, resume: R) -> Self {
        let remaining_seconds = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        Self {
            remaining_seconds,
            resume,
        }
    }

    /// Returns `true` once the wait has run out.
    pub fn advance(&mut self, dt_seconds: f32) -> bool {
        self.remaining_seconds -= dt_seconds;
        self.remaining_seconds <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingParams {
    pub friction: f32,
    pub min_slide_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactDamage {
    pub damage: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemainsKind {
    Carcass,
    Wreckage,
}

impl RemainsKind {
    pub fn debug_name(self) -> &'static str {
        match self {
            Self::Carcass => "remains_carcass",
            Self::Wreckage => "remains_wreckage",
        }
    }
}

/// Per-species knobs the shared state machine reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorPolicy {
    pub detection: DetectionShape,
    pub dwell_seconds: f32,
    pub damage_while_idle: bool,
    /// `None` means the species cannot be stunned.
    pub stun_seconds: Option<f32>,
    /// `None` settles on the first cooling tick.
    pub cooling: Option<CoolingParams>,
    pub contact: Option<ContactDamage>,
    pub remains: Option<RemainsKind>,
    pub body_radius: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kinematics {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorEvent {
    StateChanged {
        id: EntityId,
        from: ActorState,
        to: ActorState,
    },
    Fire {
        id: EntityId,
        origin: Vec2,
        direction: Vec2,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveStep {
    Continue,
    Exit,
}

pub struct BehaviorContext<'a> {
    pub id: EntityId,
    pub target: Vec2,
    pub dt_seconds: f32,
    pub rng: &'a mut StdRng,
    pub events: &'a mut Vec<ActorEvent>,
}

/// Species strategy plugged into the shared state machine.
pub trait Behavior: fmt::Debug {
    fn kind(&self) -> SpeciesKind;

    /// Runs every Preparing tick once the dwell has elapsed; the actor
    /// commits as soon as this reports ready.
    fn prepare(&mut self, _body: &mut Kinematics, _ctx: &mut BehaviorContext<'_>) -> bool {
        true
    }

    /// Captures the attack decision. Called exactly once per Active entry.
    fn commit(&mut self, body: &mut Kinematics, ctx: &mut BehaviorContext<'_>);

    fn act(&mut self, body: &mut Kinematics, ctx: &mut BehaviorContext<'_>) -> ActiveStep;
}

#[derive(Debug)]
pub struct Actor {
    id: EntityId,
    policy: ActorPolicy,
    state: ActorState,
    health: Health,
    body: Kinematics,
    wait: Option<PendingWait>,
    flash: HitFlash,
    behavior: Box<dyn Behavior>,
    target_warned: bool,
}

impl Actor {
    pub fn new(
        id: EntityId,
        position: Vec2,
        max_health: f32,
        policy: ActorPolicy,
        hit_flash_seconds: f32,
        behavior: Box<dyn Behavior>,
    ) -> Self {
        Self {
            id,
            policy,
            state: ActorState::Idle,
            health: Health::new(max_health),
            body: Kinematics {
                position,
                velocity: Vec2::ZERO,
            },
            wait: None,
            flash: HitFlash::new(hit_flash_seconds),
            behavior,
            target_warned: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn species(&self) -> SpeciesKind {
        self.behavior.kind()
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn policy(&self) -> &ActorPolicy {
        &self.policy
    }

    pub fn pending_wait(&self) -> Option<PendingWait> {
        self.wait
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_active()
    }

    /// Advances the state machine by one fixed step. At most one state
    /// transition happens per call.
    pub fn tick(
        &mut self,
        dt_seconds: f32,
        target: Option<Vec2>,
        rng: &mut StdRng,
        events: &mut Vec<ActorEvent>,
    ) {
        if self.state == ActorState::Destroyed || !dt_seconds.is_finite() || dt_seconds < 0.0 {
            return;
        }
        self.flash.tick(dt_seconds);

        // Always-on species never wait for a target; they run anchored to
        // their own position instead.
        let target = match target {
            Some(target) => target,
            None if self.policy.detection == DetectionShape::Always => self.body.position,
            None => {
                self.warn_target_unresolved();
                return;
            }
        };

        if let Some(wait) = self.wait.as_mut() {
            if !wait.advance(dt_seconds) {
                return;
            }
            let resume = wait.resume;
            self.wait = None;
            if resume == WaitResume::EndStun {
                self.enter_from_tick(ActorState::Preparing, events);
                return;
            }
        }

        match self.state {
            ActorState::Idle => {
                if self.policy.detection.detects(self.body.position, target) {
                    self.enter_from_tick(ActorState::Preparing, events);
                }
            }
            ActorState::Preparing => {
                let mut ctx = BehaviorContext {
                    id: self.id,
                    target,
                    dt_seconds,
                    rng: &mut *rng,
                    events: &mut *events,
                };
                if self.behavior.prepare(&mut self.body, &mut ctx) {
                    self.behavior.commit(&mut self.body, &mut ctx);
                    self.enter_from_tick(ActorState::Active, events);
                }
            }
            ActorState::Active => {
                let mut ctx = BehaviorContext {
                    id: self.id,
                    target,
                    dt_seconds,
                    rng: &mut *rng,
                    events: &mut *events,
                };
                if self.behavior.act(&mut self.body, &mut ctx) == ActiveStep::Exit {
                    self.enter_from_tick(ActorState::Cooling, events);
                }
            }
            ActorState::Cooling => self.tick_cooling(dt_seconds, events),
            ActorState::Stunned | ActorState::Destroyed => {}
        }
    }

    fn warn_target_unresolved(&mut self) {
        if self.target_warned {
            return;
        }
        warn!(
            entity_id = self.id.0,
            species = self.species().as_str(),
            state = self.state.as_str(),
            "actor_target_unresolved"
        );
        self.target_warned = true;
    }

    fn tick_cooling(&mut self, dt_seconds: f32, events: &mut Vec<ActorEvent>) {
        let Some(cooling) = self.policy.cooling else {
            self.enter_from_tick(ActorState::Preparing, events);
            return;
        };

        let decay = (1.0 - cooling.friction * dt_seconds).max(0.0);
        self.body.velocity = self.body.velocity * decay;
        self.body.position += self.body.velocity * dt_seconds;

        if self.body.velocity.length() < cooling.min_slide_speed {
            self.enter_from_tick(ActorState::Preparing, events);
        }
    }

    fn enter_from_tick(&mut self, next: ActorState, events: &mut Vec<ActorEvent>) {
        let from = self.enter(next);
        events.push(ActorEvent::StateChanged {
            id: self.id,
            from,
            to: next,
        });
    }

    /// Switches state and resets every state-local timer.
    fn enter(&mut self, next: ActorState) -> ActorState {
        let from = self.state;
        self.state = next;
        self.wait = match next {
            ActorState::Preparing => Some(PendingWait::new(
                self.policy.dwell_seconds,
                WaitResume::CommitDecision,
            )),
            ActorState::Stunned => Some(PendingWait::new(
                self.policy.stun_seconds.unwrap_or(0.0),
                WaitResume::EndStun,
            )),
            _ => None,
        };
        if matches!(
            next,
            ActorState::Preparing | ActorState::Stunned | ActorState::Destroyed
        ) {
            self.body.velocity = Vec2::ZERO;
        }
        debug!(
            entity_id = self.id.0,
            species = self.species().as_str(),
            from = from.as_str(),
            to = next.as_str(),
            "actor_state_changed"
        );
        from
    }
}

impl Damageable for Actor {
    fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        match self.state {
            ActorState::Destroyed => {
                debug!(entity_id = self.id.0, amount, "damage_ignored_destroyed");
                DamageOutcome::Ignored
            }
            ActorState::Idle if !self.policy.damage_while_idle => {
                debug!(entity_id = self.id.0, amount, "damage_ignored_while_idle");
                DamageOutcome::Ignored
            }
            _ => {
                let outcome = self.health.apply(amount);
                match outcome {
                    DamageOutcome::Ignored => {}
                    DamageOutcome::Damaged => self.flash.trigger(),
                    DamageOutcome::Killed => {
                        self.flash.trigger();
                        self.enter(ActorState::Destroyed);
                    }
                }
                outcome
            }
        }
    }

    fn is_dead(&self) -> bool {
        self.state == ActorState::Destroyed
    }
}

impl Stunnable for Actor {
    fn apply_stun(&mut self) -> bool {
        if self.policy.stun_seconds.is_none() {
            debug!(entity_id = self.id.0, "stun_ignored_not_stunnable");
            return false;
        }
        match self.state {
            ActorState::Idle | ActorState::Stunned | ActorState::Destroyed => {
                debug!(
                    entity_id = self.id.0,
                    state = self.state.as_str(),
                    "stun_ignored"
                );
                false
            }
            ActorState::Preparing | ActorState::Active | ActorState::Cooling => {
                self.enter(ActorState::Stunned);
                true
            }
        }
    }

    fn is_stunned(&self) -> bool {
        self.state == ActorState::Stunned
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    /// Walks right at 1 unit/s once committed and exits after a fixed
    /// number of active ticks.
    #[derive(Debug)]
    struct ScriptedBehavior {
        ready_after: u32,
        prepare_calls: u32,
        commits: u32,
        active_ticks: u32,
        exit_after: u32,
    }

    impl ScriptedBehavior {
        fn new(ready_after: u32, exit_after: u32) -> Self {
            Self {
                ready_after,
                prepare_calls: 0,
                commits: 0,
                active_ticks: 0,
                exit_after,
            }
        }
    }

    impl Behavior for ScriptedBehavior {
        fn kind(&self) -> SpeciesKind {
            SpeciesKind::Charger
        }

        fn prepare(&mut self, _body: &mut Kinematics, _ctx: &mut BehaviorContext<'_>) -> bool {
            self.prepare_calls += 1;
            self.prepare_calls > self.ready_after
        }

        fn commit(&mut self, body: &mut Kinematics, _ctx: &mut BehaviorContext<'_>) {
            self.commits += 1;
            self.active_ticks = 0;
            body.velocity = Vec2::new(1.0, 0.0);
        }

        fn act(&mut self, body: &mut Kinematics, ctx: &mut BehaviorContext<'_>) -> ActiveStep {
            body.position += body.velocity * ctx.dt_seconds;
            self.active_ticks += 1;
            if self.active_ticks >= self.exit_after {
                ActiveStep::Exit
            } else {
                ActiveStep::Continue
            }
        }
    }

    fn policy() -> ActorPolicy {
        ActorPolicy {
            detection: DetectionShape::Radius(5.0),
            dwell_seconds: 0.5,
            damage_while_idle: false,
            stun_seconds: Some(0.5),
            cooling: Some(CoolingParams {
                friction: 1.0,
                min_slide_speed: 0.6,
            }),
            contact: None,
            remains: Some(RemainsKind::Carcass),
            body_radius: 0.5,
        }
    }

    fn actor_with(policy: ActorPolicy, behavior: ScriptedBehavior) -> Actor {
        Actor::new(
            EntityId(7),
            Vec2::ZERO,
            40.0,
            policy,
            0.5,
            Box::new(behavior),
        )
    }

    fn step(actor: &mut Actor, target: Option<Vec2>, rng: &mut StdRng) -> Vec<ActorEvent> {
        let mut events = Vec::new();
        actor.tick(0.25, target, rng, &mut events);
        events
    }

    const NEAR: Option<Vec2> = Some(Vec2 { x: 2.0, y: 0.0 });

    #[test]
    fn pending_wait_elapses_on_exact_boundary() {
        let mut wait = PendingWait::new(0.5, WaitResume::CommitDecision);
        assert!(!wait.advance(0.25));
        assert!(wait.advance(0.25));

        let mut zero = PendingWait::new(f32::NAN, WaitResume::EndStun);
        assert_eq!(zero.remaining_seconds, 0.0);
        assert!(zero.advance(0.25));
    }

    #[test]
    fn full_cycle_takes_one_transition_per_tick() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut actor = actor_with(policy(), ScriptedBehavior::new(1, 1));

        let events = step(&mut actor, NEAR, &mut rng);
        assert_eq!(actor.state(), ActorState::Preparing);
        assert_eq!(
            events,
            vec![ActorEvent::StateChanged {
                id: EntityId(7),
                from: ActorState::Idle,
                to: ActorState::Preparing,
            }]
        );

        step(&mut actor, NEAR, &mut rng);
        assert_eq!(actor.state(), ActorState::Preparing);
        // Dwell done, but the behavior asks for one more prepare tick.
        step(&mut actor, NEAR, &mut rng);
        assert_eq!(actor.state(), ActorState::Preparing);
        step(&mut actor, NEAR, &mut rng);
        assert_eq!(actor.state(), ActorState::Active);
        step(&mut actor, NEAR, &mut rng);
        assert_eq!(actor.state(), ActorState::Cooling);
        assert_eq!(actor.velocity(), Vec2::new(1.0, 0.0));

        // 1.0 -> 0.75 stays above 0.6, 0.75 -> 0.5625 settles.
        step(&mut actor, NEAR, &mut rng);
        assert_eq!(actor.state(), ActorState::Cooling);
        step(&mut actor, NEAR, &mut rng);
        assert_eq!(actor.state(), ActorState::Preparing);
        assert_eq!(actor.velocity(), Vec2::ZERO);
        assert_eq!(
            actor.pending_wait().map(|wait| wait.resume),
            Some(WaitResume::CommitDecision)
        );
    }

    #[test]
    fn idle_actor_ignores_damage_and_stun_when_policy_says_so() {
        let mut actor = actor_with(policy(), ScriptedBehavior::new(0, 10));

        assert_eq!(actor.take_damage(10.0), DamageOutcome::Ignored);
        assert!(!actor.apply_stun());
        assert_eq!(actor.health().current(), 40.0);
        assert_eq!(actor.state(), ActorState::Idle);
    }

    #[test]
    fn stun_cancels_wait_and_resumes_in_preparing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut actor = actor_with(policy(), ScriptedBehavior::new(0, 100));
        step(&mut actor, NEAR, &mut rng);
        step(&mut actor, NEAR, &mut rng);
        step(&mut actor, NEAR, &mut rng);
        assert_eq!(actor.state(), ActorState::Active);

        assert!(actor.apply_stun());
        assert!(actor.is_stunned());
        assert_eq!(actor.velocity(), Vec2::ZERO);
        assert!(!actor.apply_stun());

        step(&mut actor, NEAR, &mut rng);
        assert_eq!(actor.state(), ActorState::Stunned);
        let events = step(&mut actor, NEAR, &mut rng);
        assert_eq!(actor.state(), ActorState::Preparing);
        assert_eq!(
            events,
            vec![ActorEvent::StateChanged {
                id: EntityId(7),
                from: ActorState::Stunned,
                to: ActorState::Preparing,
            }]
        );
    }

    #[test]
    fn stun_during_cooling_waits_out_a_full_dwell_before_acting() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut actor = actor_with(policy(), ScriptedBehavior::new(0, 1));
        for _ in 0..4 {
            step(&mut actor, NEAR, &mut rng);
        }
        assert_eq!(actor.state(), ActorState::Cooling);

        assert!(actor.apply_stun());
        assert_eq!(actor.velocity(), Vec2::ZERO);

        let mut seen = vec![actor.state()];
        for _ in 0..4 {
            step(&mut actor, NEAR, &mut rng);
            seen.push(actor.state());
        }
        assert_eq!(
            seen,
            vec![
                ActorState::Stunned,
                ActorState::Stunned,
                ActorState::Preparing,
                ActorState::Preparing,
                ActorState::Active,
            ]
        );
    }

    #[test]
    fn non_stunnable_policy_rejects_stun() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut actor = actor_with(
            ActorPolicy {
                stun_seconds: None,
                ..policy()
            },
            ScriptedBehavior::new(0, 100),
        );
        step(&mut actor, NEAR, &mut rng);

        assert!(!actor.apply_stun());
        assert_eq!(actor.state(), ActorState::Preparing);
    }

    #[test]
    fn killing_blow_is_reported_once_and_freezes_the_actor() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut actor = actor_with(policy(), ScriptedBehavior::new(0, 100));
        step(&mut actor, NEAR, &mut rng);

        assert_eq!(actor.take_damage(25.0), DamageOutcome::Damaged);
        assert!(actor.is_flashing());
        assert_eq!(actor.take_damage(25.0), DamageOutcome::Killed);
        assert!(actor.is_dead());
        assert_eq!(actor.take_damage(25.0), DamageOutcome::Ignored);
        assert!(!actor.apply_stun());

        let events = step(&mut actor, NEAR, &mut rng);
        assert!(events.is_empty());
        assert_eq!(actor.state(), ActorState::Destroyed);
    }

    #[test]
    fn missing_target_freezes_machine_but_flash_decays() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut actor = actor_with(policy(), ScriptedBehavior::new(0, 100));
        step(&mut actor, NEAR, &mut rng);
        actor.take_damage(1.0);
        let wait_before = actor.pending_wait();

        for _ in 0..4 {
            assert!(step(&mut actor, None, &mut rng).is_empty());
        }

        assert_eq!(actor.state(), ActorState::Preparing);
        assert_eq!(actor.pending_wait(), wait_before);
        assert!(!actor.is_flashing());
    }

    #[test]
    fn always_on_actor_keeps_running_without_a_target() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut actor = actor_with(
            ActorPolicy {
                detection: DetectionShape::Always,
                ..policy()
            },
            ScriptedBehavior::new(0, 100),
        );

        for _ in 0..4 {
            step(&mut actor, None, &mut rng);
        }

        assert_eq!(actor.state(), ActorState::Active);
        assert_eq!(actor.position(), Vec2::new(0.25, 0.0));
    }

    #[test]
    fn no_target_keeps_actor_idle_forever() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut actor = actor_with(policy(), ScriptedBehavior::new(0, 100));
        for _ in 0..20 {
            step(&mut actor, None, &mut rng);
        }
        assert_eq!(actor.state(), ActorState::Idle);
    }
}
