//! Health ledger: clamped hit points with damaged/healed/changed/died notifications.
//!
//! [`Health`] holds the numbers and enforces the clamp; the free functions
//! ([`deal_damage`], [`restore_health`], [`resize_health`]) mutate it and
//! trigger the matching events so any number of observers (animation, audio,
//! UI, the agent state machine) can react. The ledger never looks at who listens.

use bevy::prelude::*;

// === Components ===

/// Current and maximum hit points of a combatant.
///
/// `0 <= current <= max` holds after every mutation. Once `current` reaches 0
/// the ledger is dead and ignores further damage and healing.
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    current: u32,
    max: u32,
    dead: bool,
}

/// What a successful `apply_damage` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageReport {
    pub amount: u32,
    pub current: u32,
    /// True only on the call that brought `current` to 0.
    pub died: bool,
}

impl Health {
    /// Full health. A zero `max` is raised to 1.
    #[must_use]
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            dead: false,
        }
    }

    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    /// `current / max` in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    /// Subtracts `amount`, clamping at 0. Returns `None` when already dead.
    pub fn apply_damage(&mut self, amount: u32) -> Option<DamageReport> {
        if self.dead {
            return None;
        }
        self.current = self.current.saturating_sub(amount);
        let died = self.current == 0;
        if died {
            self.dead = true;
        }
        Some(DamageReport {
            amount,
            current: self.current,
            died,
        })
    }

    /// Adds `amount`, clamping at `max`. Returns the new current value, or
    /// `None` when dead.
    pub fn heal(&mut self, amount: u32) -> Option<u32> {
        if self.dead {
            return None;
        }
        self.current = self.current.saturating_add(amount).min(self.max);
        Some(self.current)
    }

    /// Replaces `max` (raised to at least 1) and clamps `current` down to it.
    pub fn set_max(&mut self, max: u32) {
        self.max = max.max(1);
        self.current = self.current.min(self.max);
    }
}

// === Events ===

/// Raised after every damage application on a living ledger.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct Damaged {
    pub entity: Entity,
    pub amount: u32,
}

/// Raised after every heal on a living ledger.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct Healed {
    pub entity: Entity,
    pub amount: u32,
}

/// Raised after damage, healing or a max change.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: u32,
    pub max: u32,
}

/// Raised exactly once, on the damage that brings the ledger to 0.
#[derive(EntityEvent, Debug, Clone, Copy)]
pub struct Died {
    pub entity: Entity,
}

// === Operations ===

/// Damages `entity` and notifies: `Damaged`, then `HealthChanged`, then `Died`
/// if this hit was lethal. No-op on a dead ledger. Returns true on the lethal hit.
pub fn deal_damage(commands: &mut Commands, entity: Entity, health: &mut Health, amount: u32) -> bool {
    let Some(report) = health.apply_damage(amount) else {
        return false;
    };
    debug!(
        "{entity} took {amount} damage ({}/{})",
        report.current,
        health.max()
    );
    commands.trigger(Damaged { entity, amount });
    commands.trigger(HealthChanged {
        entity,
        current: report.current,
        max: health.max(),
    });
    if report.died {
        commands.trigger(Died { entity });
    }
    report.died
}

/// Heals `entity` and notifies: `Healed`, then `HealthChanged`. No-op on a dead ledger.
pub fn restore_health(commands: &mut Commands, entity: Entity, health: &mut Health, amount: u32) {
    let Some(current) = health.heal(amount) else {
        return;
    };
    commands.trigger(Healed { entity, amount });
    commands.trigger(HealthChanged {
        entity,
        current,
        max: health.max(),
    });
}

/// Changes the maximum and notifies `HealthChanged`.
pub fn resize_health(commands: &mut Commands, entity: Entity, health: &mut Health, max: u32) {
    health.set_max(max);
    commands.trigger(HealthChanged {
        entity,
        current: health.current(),
        max: health.max(),
    });
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Health>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_sets_current_to_max() {
        let health = Health::new(100);
        assert_eq!(health.current(), 100);
        assert_eq!(health.max(), 100);
        assert!(!health.is_dead());
    }

    #[test]
    fn zero_max_is_raised_to_one() {
        assert_eq!(Health::new(0).max(), 1);
    }

    #[test]
    fn damage_clamps_at_zero_and_dies_once() {
        let mut health = Health::new(30);
        let first = health.apply_damage(20).unwrap();
        assert!(!first.died);
        assert_eq!(first.current, 10);

        let lethal = health.apply_damage(50).unwrap();
        assert!(lethal.died);
        assert_eq!(health.current(), 0);
        assert!(health.is_dead());

        assert_eq!(health.apply_damage(5), None);
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn exact_lethal_damage_dies() {
        let mut health = Health::new(15);
        assert!(health.apply_damage(15).unwrap().died);
    }

    #[test]
    fn heal_clamps_at_max() {
        let mut health = Health::new(50);
        health.apply_damage(30);
        assert_eq!(health.heal(10), Some(30));
        assert_eq!(health.heal(1000), Some(50));
    }

    #[test]
    fn heal_on_dead_is_noop() {
        let mut health = Health::new(10);
        health.apply_damage(10);
        assert_eq!(health.heal(5), None);
        assert_eq!(health.current(), 0);
    }

    #[test]
    fn set_max_reclamps_current() {
        let mut health = Health::new(100);
        health.set_max(40);
        assert_eq!(health.current(), 40);
        health.set_max(80);
        assert_eq!(health.current(), 40);
        assert_eq!(health.max(), 80);
    }

    #[test]
    fn invariant_holds_over_mixed_sequence() {
        let mut health = Health::new(25);
        let mut deaths = 0;
        for step in 0..40u32 {
            if step % 3 == 0 {
                health.heal(step);
            } else if health.apply_damage(step).is_some_and(|r| r.died) {
                deaths += 1;
            }
            assert!(health.current() <= health.max());
        }
        assert_eq!(deaths, 1);
    }

    #[test]
    fn fraction_reports_ratio() {
        let mut health = Health::new(40);
        health.apply_damage(10);
        assert!((health.fraction() - 0.75).abs() < f32::EPSILON);
    }
}
