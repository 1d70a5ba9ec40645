//! Campaign level table

use rand::Rng;

use super::combatant::{Enemy, EnemyKind, MINI_BOSS_VARIANTS};

/// Tuning for one campaign battle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    pub id: u32,
    pub enemy_hp: u32,
    pub enemy_damage: u32,
    pub difficulty: u32,
    pub timer_seconds: f64,
}

/// (id, enemy hp, enemy damage, difficulty, timer seconds)
const LEVELS: [(u32, u32, u32, u32, f64); 5] = [
    (1, 5, 1, 1, 10.0),
    (2, 6, 1, 1, 10.0),
    (3, 7, 1, 1, 10.0),
    (4, 8, 1, 1, 10.0),
    (5, 9, 1, 1, 10.0),
];

impl LevelConfig {
    /// Settings for `id`; levels without an entry play like level 1
    pub fn for_level(id: u32) -> Self {
        let (_, enemy_hp, enemy_damage, difficulty, timer_seconds) = LEVELS
            .iter()
            .copied()
            .find(|l| l.0 == id)
            .unwrap_or(LEVELS[0]);
        Self {
            id,
            enemy_hp,
            enemy_damage,
            difficulty,
            timer_seconds,
        }
    }

    pub fn name(&self) -> String {
        format!("Level {}", self.id)
    }

    pub fn create_enemy(&self, rng: &mut impl Rng) -> Enemy {
        Enemy::new(
            EnemyKind::mini_boss(MINI_BOSS_VARIANTS, rng),
            self.enemy_hp,
            self.enemy_damage,
        )
    }
}
