use engine::Vec2;
use rand::Rng;

use crate::app::config::ShooterTuning;
use crate::app::gameplay::actor::{
    ActiveStep, ActorEvent, ActorPolicy, Behavior, BehaviorContext, Kinematics, RemainsKind,
};
use crate::app::gameplay::detection::{in_box, DetectionShape};

use super::SpeciesKind;

pub(super) fn policy(tuning: &ShooterTuning) -> ActorPolicy {
    ActorPolicy {
        detection: DetectionShape::Radius(tuning.detection_radius),
        dwell_seconds: 0.0,
        damage_while_idle: true,
        stun_seconds: Some(tuning.stun_seconds),
        cooling: None,
        contact: None,
        remains: Some(RemainsKind::Wreckage),
        body_radius: tuning.body_radius,
    }
}

/// Flies into a box hovering over the target, then fires on a fixed cadence
/// while drifting between random points of that box. Leaving the box ends
/// the attack.
#[derive(Debug)]
pub struct ShooterBehavior {
    move_speed: f32,
    box_offset: Vec2,
    box_half_extents: Vec2,
    fire_interval_seconds: f32,
    reposition_interval_seconds: f32,
    fire_timer: f32,
    reposition_timer: f32,
    destination: Vec2,
}

impl ShooterBehavior {
    pub fn new(tuning: &ShooterTuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
            box_offset: tuning.close_box_offset,
            box_half_extents: tuning.close_box_size * 0.5,
            fire_interval_seconds: tuning.fire_interval_seconds,
            reposition_interval_seconds: tuning.reposition_interval_seconds,
            fire_timer: 0.0,
            reposition_timer: 0.0,
            destination: Vec2::ZERO,
        }
    }

    pub fn destination(&self) -> Vec2 {
        self.destination
    }

    fn box_center(&self, target: Vec2) -> Vec2 {
        target + self.box_offset
    }

    fn inside_box(&self, position: Vec2, target: Vec2) -> bool {
        in_box(position, self.box_center(target), self.box_half_extents)
    }

    fn pick_destination(&mut self, ctx: &mut BehaviorContext<'_>) {
        let half = self.box_half_extents;
        let offset = Vec2::new(
            ctx.rng.gen_range(-half.x..=half.x),
            ctx.rng.gen_range(-half.y..=half.y),
        );
        self.destination = self.box_center(ctx.target) + offset;
    }
}

fn move_towards(body: &mut Kinematics, destination: Vec2, max_step: f32) {
    let delta = destination - body.position;
    if delta.length() <= max_step {
        body.position = destination;
    } else {
        body.position += delta.normalize_or_zero() * max_step;
    }
}

impl Behavior for ShooterBehavior {
    fn kind(&self) -> SpeciesKind {
        SpeciesKind::Shooter
    }

    fn prepare(&mut self, body: &mut Kinematics, ctx: &mut BehaviorContext<'_>) -> bool {
        move_towards(body, ctx.target, self.move_speed * ctx.dt_seconds);
        self.inside_box(body.position, ctx.target)
    }

    fn commit(&mut self, _body: &mut Kinematics, ctx: &mut BehaviorContext<'_>) {
        // Both timers start full: the first active tick fires and re-picks.
        self.fire_timer = self.fire_interval_seconds;
        self.reposition_timer = self.reposition_interval_seconds;
        self.pick_destination(ctx);
    }

    fn act(&mut self, body: &mut Kinematics, ctx: &mut BehaviorContext<'_>) -> ActiveStep {
        if !self.inside_box(body.position, ctx.target) {
            return ActiveStep::Exit;
        }

        self.fire_timer += ctx.dt_seconds;
        if self.fire_timer >= self.fire_interval_seconds {
            ctx.events.push(ActorEvent::Fire {
                id: ctx.id,
                origin: body.position,
                direction: (ctx.target - body.position).normalize_or_zero(),
            });
            self.fire_timer = 0.0;
        }

        self.reposition_timer += ctx.dt_seconds;
        if self.reposition_timer >= self.reposition_interval_seconds {
            self.pick_destination(ctx);
            self.reposition_timer = 0.0;
        }
        move_towards(body, self.destination, self.move_speed * ctx.dt_seconds);
        ActiveStep::Continue
    }
}

#[cfg(test)]
mod tests {
    use engine::EntityId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn fire_count(events: &[ActorEvent]) -> usize {
        events
            .iter()
            .filter(|event| matches!(event, ActorEvent::Fire { .. }))
            .count()
    }

    #[test]
    fn approach_stops_being_pending_once_inside_close_box() {
        let mut behavior = ShooterBehavior::new(&ShooterTuning::default());
        let mut body = Kinematics {
            position: Vec2::new(8.0, 0.0),
            velocity: Vec2::ZERO,
        };
        let mut rng = StdRng::seed_from_u64(11);
        let mut events = Vec::new();
        let mut ctx = BehaviorContext {
            id: EntityId(4),
            target: Vec2::ZERO,
            dt_seconds: 0.25,
            rng: &mut rng,
            events: &mut events,
        };

        // Box spans x in [-2, 2]; at 4 units/s each tick covers 1 unit.
        let mut ticks = 0;
        while !behavior.prepare(&mut body, &mut ctx) {
            ticks += 1;
            assert!(ticks < 20, "shooter never reached the close box");
        }
        assert_eq!(ticks, 5);
        assert!(body.position.x <= 2.0);
    }

    #[test]
    fn fires_immediately_then_on_interval_and_exits_outside_box() {
        let tuning = ShooterTuning::default();
        let mut behavior = ShooterBehavior::new(&tuning);
        let mut body = Kinematics {
            position: Vec2::new(0.0, 1.0),
            velocity: Vec2::ZERO,
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut events = Vec::new();
        {
            let mut ctx = BehaviorContext {
                id: EntityId(4),
                target: Vec2::ZERO,
                dt_seconds: 0.25,
                rng: &mut rng,
                events: &mut events,
            };
            behavior.commit(&mut body, &mut ctx);
            let destination = behavior.destination();
            assert!(in_box(destination, Vec2::new(0.0, 1.0), Vec2::new(2.0, 2.0)));

            for _ in 0..4 {
                assert_eq!(behavior.act(&mut body, &mut ctx), ActiveStep::Continue);
            }
        }
        assert_eq!(fire_count(&events), 1);

        {
            let mut ctx = BehaviorContext {
                id: EntityId(4),
                target: Vec2::ZERO,
                dt_seconds: 0.25,
                rng: &mut rng,
                events: &mut events,
            };
            behavior.act(&mut body, &mut ctx);
        }
        assert_eq!(fire_count(&events), 2);

        let mut ctx = BehaviorContext {
            id: EntityId(4),
            target: Vec2::new(30.0, 0.0),
            dt_seconds: 0.25,
            rng: &mut rng,
            events: &mut events,
        };
        assert_eq!(behavior.act(&mut body, &mut ctx), ActiveStep::Exit);
    }
}
