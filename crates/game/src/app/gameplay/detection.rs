//! Stateless targeting predicates. All comparisons are inclusive.

use engine::Vec2;

pub fn in_range(actor: Vec2, target: Vec2, radius: f32) -> bool {
    radius >= 0.0 && (target - actor).length_squared() <= radius * radius
}

pub fn in_box(point: Vec2, center: Vec2, half_extents: Vec2) -> bool {
    (point.x - center.x).abs() <= half_extents.x && (point.y - center.y).abs() <= half_extents.y
}

pub fn within_horizontal_span(actor: Vec2, target: Vec2, span: f32) -> bool {
    (target.x - actor.x).abs() <= span
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectionShape {
    Radius(f32),
    HorizontalSpan(f32),
    /// Detects from the first tick and keeps running without a target.
    Always,
}

impl DetectionShape {
    pub fn detects(&self, actor: Vec2, target: Vec2) -> bool {
        match *self {
            Self::Radius(radius) => in_range(actor, target, radius),
            Self::HorizontalSpan(span) => within_horizontal_span(actor, target, span),
            Self::Always => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_is_inclusive() {
        assert!(in_range(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.0));
        assert!(!in_range(Vec2::ZERO, Vec2::new(3.0, 4.01), 5.0));
        assert!(!in_range(Vec2::ZERO, Vec2::ZERO, -1.0));
    }

    #[test]
    fn in_box_uses_independent_extents() {
        let center = Vec2::new(0.0, 1.0);
        let half = Vec2::new(2.0, 0.5);
        assert!(in_box(Vec2::new(2.0, 1.5), center, half));
        assert!(!in_box(Vec2::new(0.0, 2.0), center, half));
        assert!(!in_box(Vec2::new(2.1, 1.0), center, half));
    }

    #[test]
    fn horizontal_span_ignores_height() {
        assert!(within_horizontal_span(
            Vec2::ZERO,
            Vec2::new(-5.0, 40.0),
            5.0
        ));
        assert!(!within_horizontal_span(Vec2::ZERO, Vec2::new(5.5, 0.0), 5.0));
    }

    #[test]
    fn shapes_dispatch_to_predicates() {
        let actor = Vec2::new(1.0, 1.0);
        assert!(DetectionShape::Always.detects(actor, Vec2::new(1e6, 1e6)));
        assert!(DetectionShape::Radius(2.0).detects(actor, Vec2::new(3.0, 1.0)));
        assert!(!DetectionShape::Radius(2.0).detects(actor, Vec2::new(3.5, 1.0)));
        assert!(DetectionShape::HorizontalSpan(1.0).detects(actor, Vec2::new(2.0, -9.0)));
    }
}
