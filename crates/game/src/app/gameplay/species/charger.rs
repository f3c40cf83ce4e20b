use crate::app::config::ChargerTuning;
use crate::app::gameplay::actor::{
    ActiveStep, ActorPolicy, Behavior, BehaviorContext, ContactDamage, CoolingParams, Kinematics,
    RemainsKind,
};
use crate::app::gameplay::detection::DetectionShape;

use super::SpeciesKind;

pub(super) fn policy(tuning: &ChargerTuning) -> ActorPolicy {
    ActorPolicy {
        detection: DetectionShape::HorizontalSpan(tuning.detection_span),
        dwell_seconds: tuning.dwell_seconds,
        damage_while_idle: false,
        stun_seconds: Some(tuning.stun_seconds),
        cooling: Some(CoolingParams {
            friction: tuning.friction,
            min_slide_speed: tuning.min_slide_speed,
        }),
        contact: Some(ContactDamage {
            damage: tuning.contact_damage,
            radius: tuning.contact_radius,
        }),
        remains: Some(RemainsKind::Carcass),
        body_radius: tuning.contact_radius,
    }
}

/// Charges along X toward the side the target was on when the dwell ended.
/// Height never changes.
#[derive(Debug)]
pub struct ChargerBehavior {
    charge_speed: f32,
    stop_threshold: f32,
}

impl ChargerBehavior {
    pub fn new(tuning: &ChargerTuning) -> Self {
        Self {
            charge_speed: tuning.charge_speed,
            stop_threshold: tuning.stop_threshold,
        }
    }
}

impl Behavior for ChargerBehavior {
    fn kind(&self) -> SpeciesKind {
        SpeciesKind::Charger
    }

    fn commit(&mut self, body: &mut Kinematics, ctx: &mut BehaviorContext<'_>) {
        // signum(0.0) is 1.0, so a target straight above charges right.
        let direction = (ctx.target.x - body.position.x).signum();
        body.velocity.x = direction * self.charge_speed;
        body.velocity.y = 0.0;
    }

    fn act(&mut self, body: &mut Kinematics, ctx: &mut BehaviorContext<'_>) -> ActiveStep {
        body.position.x += body.velocity.x * ctx.dt_seconds;
        if (ctx.target.x - body.position.x).abs() <= self.stop_threshold {
            ActiveStep::Exit
        } else {
            ActiveStep::Continue
        }
    }
}
