use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored,
    Damaged,
    /// Health crossed zero on this hit. Reported at most once per target.
    Killed,
}

/// Anything that can receive damage and report its own death.
pub trait Damageable {
    fn take_damage(&mut self, amount: f32) -> DamageOutcome;
    fn is_dead(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    current: f32,
    max: f32,
    dead: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            dead: false,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn apply(&mut self, amount: f32) -> DamageOutcome {
        if self.dead {
            debug!(amount, "damage_ignored_after_death");
            return DamageOutcome::Ignored;
        }
        if !amount.is_finite() || amount <= 0.0 {
            debug!(amount, "damage_ignored_non_positive_amount");
            return DamageOutcome::Ignored;
        }

        self.current -= amount;
        if self.current <= 0.0 {
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Damaged
        }
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
        self.dead = false;
    }
}

/// Fixed-length damage highlight. Purely cosmetic: it never gates state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitFlash {
    duration_seconds: f32,
    remaining_seconds: f32,
}

impl HitFlash {
    pub fn new(duration_seconds: f32) -> Self {
        Self {
            duration_seconds: duration_seconds.max(0.0),
            remaining_seconds: 0.0,
        }
    }

    pub fn trigger(&mut self) {
        self.remaining_seconds = self.duration_seconds;
    }

    pub fn tick(&mut self, dt_seconds: f32) {
        self.remaining_seconds = (self.remaining_seconds - dt_seconds).max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.remaining_seconds > 0.0
    }
}
