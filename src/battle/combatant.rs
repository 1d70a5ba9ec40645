//! Hit points for players and enemies

use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{HIT_DAMAGE, PLAYER_MAX_HP};

/// Mini-boss sprite sheets shipped with the game
pub const MINI_BOSS_VARIANTS: RangeInclusive<u8> = 1..=19;

/// Anything with a health bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub hp: u32,
    pub max_hp: u32,
    /// Damage dealt to the other side on a miss
    pub damage: u32,
}

impl Combatant {
    pub fn new(max_hp: u32, damage: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            damage,
        }
    }

    /// Player side: fixed health pool, one damage per hit
    pub fn player() -> Self {
        Self::new(PLAYER_MAX_HP, HIT_DAMAGE)
    }

    /// Lose `amount` hp, never dropping below zero. Returns true when defeated.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.is_defeated()
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Regular level enemy; `variant` picks the sprite
    MiniBoss { variant: u8 },
    Boss,
}

impl EnemyKind {
    /// Mini-boss with a random sprite from `range`; an empty range or one
    /// outside the shipped sprites falls back to the first sprite
    pub fn mini_boss(range: RangeInclusive<u8>, rng: &mut impl Rng) -> Self {
        let variant = if range.is_empty() {
            1
        } else {
            rng.random_range(range)
        };
        let variant = if MINI_BOSS_VARIANTS.contains(&variant) {
            variant
        } else {
            1
        };
        EnemyKind::MiniBoss { variant }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub stats: Combatant,
}

impl Enemy {
    pub fn new(kind: EnemyKind, hp: u32, damage: u32) -> Self {
        Self {
            kind,
            stats: Combatant::new(hp, damage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut c = Combatant::new(3, 1);
        assert!(!c.take_damage(2));
        assert!(c.take_damage(5));
        assert_eq!(c.hp, 0);
        assert_eq!(c.max_hp, 3);
    }

    #[test]
    fn test_mini_boss_variant_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let EnemyKind::MiniBoss { variant } = EnemyKind::mini_boss(MINI_BOSS_VARIANTS, &mut rng)
            else {
                panic!("expected mini boss");
            };
            assert!(MINI_BOSS_VARIANTS.contains(&variant));
        }
        assert_eq!(
            EnemyKind::mini_boss(40..=50, &mut rng),
            EnemyKind::MiniBoss { variant: 1 }
        );
    }
}
