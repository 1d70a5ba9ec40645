//! Level zones and the proximity trigger

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LEVEL, SPAWN_ZONE_ID, ZONE_INTERACTION_RADIUS, ZONE_SIZE};
use crate::renderer::{Canvas, Sprite};

/// An interactable spot on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: u32,
    /// Top-left corner in world coordinates
    pub position: IVec2,
    pub size: IVec2,
    pub interaction_radius: f32,
    pub unlocked: bool,
}

impl Zone {
    pub fn new(id: u32, x: i32, y: i32, interaction_radius: f32) -> Self {
        Self {
            id,
            position: IVec2::new(x, y),
            size: IVec2::splat(ZONE_SIZE),
            interaction_radius,
            unlocked: id == 1,
        }
    }

    pub fn center(&self) -> IVec2 {
        self.position + self.size / 2
    }

    /// Euclidean distance from a world position to the zone center
    pub fn distance_to(&self, world: IVec2) -> f32 {
        world.as_vec2().distance(self.center().as_vec2())
    }
}

/// Campus zone layout: (id, x, y); id 0 is the spawn point
const CAMPUS_ZONES: [(u32, i32, i32); 21] = [
    (0, 1930, 1830),
    (1, 3000, 1830),
    (2, 4190, 1450),
    (3, 3375, 550),
    (4, 4715, 2575),
    (5, 5400, 1775),
    (6, 6350, 1225),
    (7, 6350, 2700),
    (8, 6300, 4500),
    (9, 6300, 6400),
    (10, 7880, 6150),
    (11, 9700, 4700),
    (12, 9600, 3050),
    (13, 7550, 4700),
    (14, 6830, 3550),
    (15, 7160, 1735),
    (16, 7975, 1835),
    (17, 8465, 1000),
    (18, 9050, 1835),
    (19, 9825, 1600),
    (20, 9700, 600),
];

/// All zones of one map, kept sorted by id
#[derive(Debug, Clone, Default)]
pub struct ZoneSet {
    zones: Vec<Zone>,
}

impl ZoneSet {
    pub fn new(mut zones: Vec<Zone>) -> Self {
        zones.sort_by_key(|z| z.id);
        Self { zones }
    }

    /// The campus layout with only level 1 unlocked
    pub fn campus() -> Self {
        let zones = CAMPUS_ZONES
            .iter()
            .map(|&(id, x, y)| {
                let radius = if id == SPAWN_ZONE_ID {
                    0.0
                } else {
                    ZONE_INTERACTION_RADIUS
                };
                Zone::new(id, x, y, radius)
            })
            .collect();
        Self::new(zones)
    }

    pub fn get(&self, id: u32) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn is_unlocked(&self, id: u32) -> bool {
        self.get(id).is_some_and(|z| z.unlocked)
    }

    /// First unlocked zone (lowest id) whose radius covers `world`.
    ///
    /// Zones are not expected to overlap; if they do, the lowest id wins.
    /// The spawn zone never triggers.
    pub fn nearest_zone(&self, world: IVec2) -> Option<u32> {
        self.zones
            .iter()
            .filter(|z| z.unlocked && z.id != SPAWN_ZONE_ID)
            .find(|z| z.distance_to(world) <= z.interaction_radius)
            .map(|z| z.id)
    }

    /// Unlock one level. Ids past the last level or unknown ids are ignored.
    pub fn unlock(&mut self, id: u32) -> bool {
        if id > MAX_LEVEL {
            return false;
        }
        match self.zones.iter_mut().find(|z| z.id == id) {
            Some(zone) => {
                zone.unlocked = true;
                true
            }
            None => false,
        }
    }

    /// Unlock levels 1..=level (restoring saved progress)
    pub fn unlock_through(&mut self, level: u32) {
        for id in 1..=level.min(MAX_LEVEL) {
            self.unlock(id);
        }
    }

    /// Back to a fresh game: only level 1 open
    pub fn reset(&mut self) {
        for zone in &mut self.zones {
            zone.unlocked = zone.id == 1;
        }
    }

    /// Highest unlocked level id
    pub fn highest_unlocked(&self) -> u32 {
        self.zones
            .iter()
            .filter(|z| z.unlocked)
            .map(|z| z.id)
            .max()
            .unwrap_or(0)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, map_offset: IVec2) {
        for zone in &self.zones {
            canvas.sprite(
                Sprite::Zone {
                    id: zone.id,
                    locked: !zone.unlocked,
                },
                zone.position + map_offset,
            );
        }
    }
}
