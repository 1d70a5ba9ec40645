//! Obstacle layout for the campus map (world coordinates, scaled map)

use super::collision::CollisionHandler;

/// Character collision radius used on the campus map
pub const CAMPUS_CHARACTER_RADIUS: f32 = 50.0;

/// Build the campus obstacle set: highway edges, the entrance and the gate
pub fn campus_barriers() -> CollisionHandler {
    let mut handler = CollisionHandler::new();
    handler.set_character_radius(CAMPUS_CHARACTER_RADIUS);

    // Highway. The right edge is cut open between y=1020 and y=1940 where the
    // entrance road joins.
    handler.add_line((1760.0, 300.0), (1760.0, 7500.0));
    handler.add_line((2210.0, 300.0), (2210.0, 1020.0));
    handler.add_line((2210.0, 1940.0), (2210.0, 7500.0));
    handler.add_line((1760.0, 300.0), (2210.0, 300.0));
    handler.add_line((1760.0, 7500.0), (2210.0, 7500.0));

    // Entrance: garden strip, car park edge up to the gate, lower gate wall
    handler.add_rectangle((2345.0, 1586.3), 750.0, 10.0);
    handler.add_polyline(&[
        (2210.0, 1020.0),
        (2430.0, 1020.0),
        (2430.0, 1200.0),
        (2345.0, 1200.0),
        (2345.0, 1360.0),
        (3250.0, 1360.0),
    ]);
    handler.add_line((2210.0, 1940.0), (3250.0, 1940.0));
    // Middle gate post
    handler.add_line((3120.0, 1545.0), (3120.0, 1735.0));

    handler
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_campus_barrier_count() {
        let handler = campus_barriers();
        // 5 highway + 4 garden + 5 entrance chain + gate wall + gate post
        assert_eq!(handler.len(), 16);
        assert_eq!(handler.character_radius(), CAMPUS_CHARACTER_RADIUS);
    }

    #[test]
    fn test_entrance_road_is_open() {
        let handler = campus_barriers();
        // Walking east from the spawn point along y=1875 stays clear
        for x in (1975..=3100).step_by(9) {
            assert!(
                !handler.any_collision(Vec2::new(x as f32, 1875.0)),
                "blocked at x={x}"
            );
        }
        // The highway's left edge is solid
        assert!(handler.any_collision(Vec2::new(1790.0, 1875.0)));
    }
}
