//! Map screen state: camera, character, zones and obstacles

use glam::IVec2;

use super::barriers::campus_barriers;
use super::collision::CollisionHandler;
use super::movement::{CameraMovementController, MapBounds};
use super::zones::ZoneSet;
use crate::consts::{MAP_HEIGHT, MAP_WIDTH, SPAWN_SCREEN_OFFSET_Y, SPAWN_ZONE_ID};
use crate::hero::Hero;
use crate::platform::MovementKeys;
use crate::renderer::shapes::banner;
use crate::renderer::{Canvas, Sprite, BLACK, WHITE};
use crate::{screen_center, screen_size};

/// The enter button floats this far below the character
const ENTER_BUTTON_DROP: i32 = 125;

/// Something the map wants the game to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    /// Player pressed enter next to an unlocked level
    EnterZone(u32),
}

#[derive(Debug, Clone)]
pub struct MapState {
    screen: IVec2,
    bounds: MapBounds,
    map_offset: IVec2,
    controller: CameraMovementController,
    zones: ZoneSet,
    obstacles: CollisionHandler,
    active_zone: Option<u32>,
    paused: bool,
}

impl MapState {
    pub fn new(
        hero: Hero,
        zones: ZoneSet,
        obstacles: CollisionHandler,
        map_size: IVec2,
        screen: IVec2,
        now: f64,
    ) -> Self {
        let bounds = MapBounds::new(map_size, screen);
        Self {
            screen,
            bounds,
            map_offset: bounds.clamp_offset((screen - map_size) / 2),
            controller: CameraMovementController::new(hero, screen / 2, now),
            zones,
            obstacles,
            active_zone: None,
            paused: false,
        }
    }

    /// Campus map, character standing on the spawn point
    pub fn campus(hero: Hero, now: f64) -> Self {
        let mut map = Self::new(
            hero,
            ZoneSet::campus(),
            campus_barriers(),
            IVec2::new(MAP_WIDTH, MAP_HEIGHT),
            screen_size(),
            now,
        );
        map.spawn_at_zone(SPAWN_ZONE_ID);
        map
    }

    /// Put the character just below screen center and scroll the map so it
    /// stands on the zone. Unknown zones leave everything as is.
    pub fn spawn_at_zone(&mut self, id: u32) -> bool {
        let Some(zone) = self.zones.get(id) else {
            return false;
        };
        let character = self.screen / 2 + IVec2::new(0, SPAWN_SCREEN_OFFSET_Y);
        self.map_offset = self.bounds.clamp_offset(character - zone.center());
        self.controller.set_character(character);
        self.active_zone = None;
        true
    }

    pub fn hero(&self) -> Hero {
        self.controller.hero()
    }

    pub fn map_offset(&self) -> IVec2 {
        self.map_offset
    }

    pub fn bounds(&self) -> &MapBounds {
        &self.bounds
    }

    pub fn controller(&self) -> &CameraMovementController {
        &self.controller
    }

    /// Character position in world coordinates
    pub fn character_world(&self) -> IVec2 {
        self.controller.character() - self.map_offset
    }

    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }

    pub fn zones_mut(&mut self) -> &mut ZoneSet {
        &mut self.zones
    }

    pub fn obstacles_mut(&mut self) -> &mut CollisionHandler {
        &mut self.obstacles
    }

    /// Level whose enter prompt is showing
    pub fn active_zone(&self) -> Option<u32> {
        self.active_zone
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("Map {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    /// Move, re-check zone proximity and report an enter request.
    /// Nothing moves or triggers while paused.
    pub fn tick(&mut self, movement: MovementKeys, enter: bool, now: f64) -> Option<MapEvent> {
        if self.paused {
            return None;
        }
        self.map_offset = self.controller.handle_movement(
            movement,
            self.map_offset,
            &self.bounds,
            self.screen,
            Some(&self.obstacles),
            now,
        );

        let nearby = self.zones.nearest_zone(self.character_world());
        if nearby != self.active_zone {
            match nearby {
                Some(id) => log::debug!("Level {id} in range"),
                None => log::debug!("Left level range"),
            }
            self.active_zone = nearby;
        }

        match (enter, self.active_zone) {
            (true, Some(id)) => Some(MapEvent::EnterZone(id)),
            _ => None,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(BLACK);
        canvas.sprite(Sprite::CampusMap, self.map_offset);
        self.zones.draw(canvas, self.map_offset);
        self.obstacles.draw(canvas, self.map_offset);
        self.controller.draw(canvas);
        if self.active_zone.is_some() {
            let at = self.controller.character() + IVec2::new(0, ENTER_BUTTON_DROP);
            canvas.sprite(Sprite::EnterButton, at);
        }
        if self.paused {
            banner(canvas, "PAUSED", screen_center(), WHITE);
        }
    }
}

impl Default for MapState {
    fn default() -> Self {
        Self::campus(Hero::default(), 0.0)
    }
}

/// Where the map screen starts the character, for callers that need it
pub fn spawn_screen_position() -> IVec2 {
    screen_center() + IVec2::new(0, SPAWN_SCREEN_OFFSET_Y)
}
