use engine::{EntityId, Vec2};

use crate::app::config::ProjectileTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileStep {
    Flying,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub radius: f32,
    pub remaining_lifetime: f32,
}

impl Projectile {
    pub fn new(id: EntityId, origin: Vec2, direction: Vec2, tuning: &ProjectileTuning) -> Self {
        Self {
            id,
            position: origin,
            direction: direction.normalize_or_zero(),
            speed: tuning.speed,
            damage: tuning.damage,
            radius: tuning.radius,
            remaining_lifetime: tuning.lifetime_seconds,
        }
    }

    pub fn advance(&mut self, dt_seconds: f32) -> ProjectileStep {
        self.position += self.direction * (self.speed * dt_seconds);
        self.remaining_lifetime -= dt_seconds;
        if self.remaining_lifetime <= 0.0 {
            ProjectileStep::Expired
        } else {
            ProjectileStep::Flying
        }
    }

    pub fn touches(&self, center: Vec2, radius: f32) -> bool {
        let reach = self.radius + radius;
        (center - self.position).length_squared() <= reach * reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travels_along_unit_direction_and_expires() {
        let tuning = ProjectileTuning {
            lifetime_seconds: 0.5,
            ..ProjectileTuning::default()
        };
        let mut projectile =
            Projectile::new(EntityId(3), Vec2::ZERO, Vec2::new(0.0, -2.0), &tuning);

        assert_eq!(projectile.advance(0.25), ProjectileStep::Flying);
        assert_eq!(projectile.position, Vec2::new(0.0, -3.0));
        assert_eq!(projectile.advance(0.25), ProjectileStep::Expired);
    }

    #[test]
    fn touch_test_adds_both_radii() {
        let projectile = Projectile::new(
            EntityId(3),
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            &ProjectileTuning::default(),
        );
        assert!(projectile.touches(Vec2::new(0.3, 0.0), 0.25));
        assert!(!projectile.touches(Vec2::new(0.4, 0.0), 0.25));
    }
}
