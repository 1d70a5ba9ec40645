//! Line-segment collision for map obstacles
//!
//! Obstacles are thick line segments in world coordinates. The character is a
//! circle; it collides with a segment when the distance from its center to the
//! segment is less than its radius plus half the segment thickness. The
//! obstacle set is small (tens to low hundreds of segments), so queries are a
//! plain linear scan.

use glam::{IVec2, Vec2};

use crate::consts::{DEFAULT_CHARACTER_RADIUS, DEFAULT_LINE_WIDTH};
use crate::renderer::{Canvas, RED};

/// An immutable thick line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub thickness: f32,
    /// Unit direction from start to end, zero for degenerate segments
    direction: Vec2,
    length: f32,
}

impl CollisionSegment {
    pub fn new(start: Vec2, end: Vec2, thickness: f32) -> Self {
        let delta = end - start;
        let length = delta.length();
        let direction = if length > 0.0 { delta / length } else { Vec2::ZERO };
        Self {
            start,
            end,
            thickness,
            direction,
            length,
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Closest point on the segment to `point`.
    ///
    /// Projects onto the direction vector and clamps the scalar projection to
    /// `[0, length]`. Degenerate segments always answer `start`.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let along = (point - self.start).dot(self.direction).clamp(0.0, self.length);
        self.start + self.direction * along
    }

    /// Minimum distance from `point` to the segment
    #[inline]
    pub fn distance(&self, point: Vec2) -> f32 {
        point.distance(self.closest_point(point))
    }

    /// Whether a circle of `radius` at `point` touches the thick segment
    #[inline]
    pub fn collides(&self, point: Vec2, radius: f32) -> bool {
        self.distance(point) < radius + self.thickness / 2.0
    }
}

/// Free-function form of [`CollisionSegment::distance`]
#[inline]
pub fn point_segment_distance(point: Vec2, segment: &CollisionSegment) -> f32 {
    segment.distance(point)
}

/// The static obstacle set of one map
#[derive(Debug, Clone)]
pub struct CollisionHandler {
    segments: Vec<CollisionSegment>,
    character_radius: f32,
    /// Draw segments over the map (for laying out barriers)
    pub debug: bool,
}

impl Default for CollisionHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionHandler {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            character_radius: DEFAULT_CHARACTER_RADIUS,
            debug: false,
        }
    }

    pub fn segments(&self) -> &[CollisionSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn character_radius(&self) -> f32 {
        self.character_radius
    }

    pub fn set_character_radius(&mut self, radius: f32) {
        self.character_radius = radius;
    }

    pub fn add_line(&mut self, start: (f32, f32), end: (f32, f32)) {
        self.add_line_with_width(start, end, DEFAULT_LINE_WIDTH);
    }

    pub fn add_line_with_width(&mut self, start: (f32, f32), end: (f32, f32), width: f32) {
        self.segments.push(CollisionSegment::new(
            Vec2::from(start),
            Vec2::from(end),
            width,
        ));
    }

    /// Four sides: top, right, bottom, left
    pub fn add_rectangle(&mut self, top_left: (f32, f32), width: f32, height: f32) {
        let (x, y) = top_left;
        self.add_line((x, y), (x + width, y));
        self.add_line((x + width, y), (x + width, y + height));
        self.add_line((x, y + height), (x + width, y + height));
        self.add_line((x, y), (x, y + height));
    }

    /// Closed polygon; fewer than three vertices adds nothing
    pub fn add_polygon(&mut self, points: &[(f32, f32)]) {
        if points.len() < 3 {
            return;
        }
        for (i, &start) in points.iter().enumerate() {
            let end = points[(i + 1) % points.len()];
            self.add_line(start, end);
        }
    }

    /// Open chain of segments through consecutive points
    pub fn add_polyline(&mut self, points: &[(f32, f32)]) {
        for pair in points.windows(2) {
            self.add_line(pair[0], pair[1]);
        }
    }

    /// Whether the character centered at `point` touches any obstacle
    pub fn any_collision(&self, point: Vec2) -> bool {
        self.any_collision_with_radius(point, self.character_radius)
    }

    pub fn any_collision_with_radius(&self, point: Vec2, radius: f32) -> bool {
        self.segments.iter().any(|s| s.collides(point, radius))
    }

    /// Draw obstacle lines shifted by the map offset (debug overlay only)
    pub fn draw(&self, canvas: &mut dyn Canvas, map_offset: IVec2) {
        if !self.debug {
            return;
        }
        let offset = map_offset.as_vec2();
        for segment in &self.segments {
            canvas.line(
                segment.start + offset,
                segment.end + offset,
                segment.thickness,
                RED,
            );
        }
    }
}
