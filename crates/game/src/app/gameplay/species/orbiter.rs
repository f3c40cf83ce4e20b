use engine::Vec2;

use crate::app::config::OrbiterTuning;
use crate::app::gameplay::actor::{
    ActiveStep, ActorPolicy, Behavior, BehaviorContext, ContactDamage, Kinematics,
};
use crate::app::gameplay::detection::DetectionShape;

use super::SpeciesKind;

pub(super) fn policy(tuning: &OrbiterTuning) -> ActorPolicy {
    ActorPolicy {
        detection: DetectionShape::Always,
        dwell_seconds: 0.0,
        damage_while_idle: true,
        stun_seconds: None,
        cooling: None,
        contact: Some(ContactDamage {
            damage: tuning.contact_damage,
            radius: tuning.contact_radius,
        }),
        remains: None,
        body_radius: tuning.contact_radius,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbiterBehavior {
    pivot: Vec2,
    radius: f32,
    angle_deg: f32,
    angular_speed_deg: f32,
}

impl OrbiterBehavior {
    pub fn new(pivot: Vec2, radius: f32, start_angle_deg: f32, angular_speed_deg: f32) -> Self {
        Self {
            pivot,
            radius,
            angle_deg: start_angle_deg.rem_euclid(360.0),
            angular_speed_deg,
        }
    }

    pub fn position(&self) -> Vec2 {
        let radians = self.angle_deg.to_radians();
        self.pivot + Vec2::new(radians.cos(), radians.sin()) * self.radius
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }
}

impl Behavior for OrbiterBehavior {
    fn kind(&self) -> SpeciesKind {
        SpeciesKind::Orbiter
    }

    fn commit(&mut self, body: &mut Kinematics, _ctx: &mut BehaviorContext<'_>) {
        body.position = self.position();
    }

    fn act(&mut self, body: &mut Kinematics, ctx: &mut BehaviorContext<'_>) -> ActiveStep {
        self.angle_deg = (self.angle_deg + self.angular_speed_deg * ctx.dt_seconds).rem_euclid(360.0);
        body.position = self.position();
        ActiveStep::Continue
    }
}
