//! Playable heroes and their walk cycles

use serde::{Deserialize, Serialize};

/// Which way the hero sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Front,
    Back,
    Left,
    Right,
}

impl Facing {
    pub fn is_sideways(&self) -> bool {
        matches!(self, Facing::Left | Facing::Right)
    }
}

/// One frame of the hero sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Stand,
    WalkLeft,
    WalkRight,
}

/// Hero selection, stored with saved progress as "boy" / "girl"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hero {
    #[default]
    Boy,
    Girl,
}

impl Hero {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hero::Boy => "boy",
            Hero::Girl => "girl",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "boy" => Some(Hero::Boy),
            "girl" => Some(Hero::Girl),
            _ => None,
        }
    }

    /// Four-step walk cycle for the given facing.
    ///
    /// The girl's sideways sheet has no separate right-step frame, so her
    /// sideways cycle lingers on the left step and reuses the standing frame.
    pub fn walk_cycle(&self, facing: Facing) -> [Pose; 4] {
        match (self, facing.is_sideways()) {
            (Hero::Girl, true) => [Pose::WalkLeft, Pose::WalkLeft, Pose::Stand, Pose::Stand],
            _ => [Pose::WalkLeft, Pose::Stand, Pose::WalkRight, Pose::Stand],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_parse_roundtrip() {
        assert_eq!(Hero::parse(" Girl "), Some(Hero::Girl));
        assert_eq!(Hero::parse(Hero::Boy.as_str()), Some(Hero::Boy));
        assert_eq!(Hero::parse("wizard"), None);
    }

    #[test]
    fn test_girl_sideways_cycle_skips_right_step() {
        let cycle = Hero::Girl.walk_cycle(Facing::Left);
        assert!(!cycle.contains(&Pose::WalkRight));
        assert!(Hero::Girl.walk_cycle(Facing::Front).contains(&Pose::WalkRight));
        assert!(Hero::Boy.walk_cycle(Facing::Right).contains(&Pose::WalkRight));
    }

    #[test]
    fn test_hero_serializes_lowercase() {
        let json = serde_json::to_string(&Hero::Girl).unwrap();
        assert_eq!(json, "\"girl\"");
    }
}
