//! Collision shapes derived from body bounding boxes
//!
//! All shapes live in world space with y pointing up:
//! - `Circle`: centre + radius (the ball)
//! - `Rect`: axis-aligned box anchored at its bottom-left corner
//! - `Polygon`: convex vertex list for precise overlap with push-out

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rotate_about;

/// Number of vertices used to approximate an ellipse boundary
pub const ELLIPSE_VERTICES: usize = 12;

/// A circle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Topmost point of the circle
    #[inline]
    pub fn top(&self) -> Vec2 {
        Vec2::new(self.center.x, self.center.y + self.radius)
    }

    /// Bottommost point of the circle
    #[inline]
    pub fn bottom(&self) -> Vec2 {
        Vec2::new(self.center.x, self.center.y - self.radius)
    }

    /// Leftmost point of the circle
    #[inline]
    pub fn left(&self) -> Vec2 {
        Vec2::new(self.center.x - self.radius, self.center.y)
    }

    /// Rightmost point of the circle
    #[inline]
    pub fn right(&self) -> Vec2 {
        Vec2::new(self.center.x + self.radius, self.center.y)
    }

    /// Circle vs axis-aligned rectangle overlap (closest point test, touching is not overlap)
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let closest = self.center.clamp(rect.min(), rect.max());
        closest.distance_squared(self.center) < self.radius * self.radius
    }
}

/// An axis-aligned rectangle (x, y is the bottom-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.height)
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y)
    }

    /// Strict AABB overlap (shared edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Check whether segment p1-p2 intersects segment p3-p4 (endpoints inclusive)
///
/// Parallel segments never intersect, even when collinear.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let d = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if d == 0.0 {
        return false;
    }

    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / d;
    if !(0.0..=1.0).contains(&ua) {
        return false;
    }

    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / d;
    (0.0..=1.0).contains(&ub)
}

/// Minimum translation vector separating two convex polygons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mtv {
    /// Unit separation axis, pointing from the other polygon toward this one
    pub normal: Vec2,
    /// Penetration depth along `normal`
    pub depth: f32,
}

/// A convex polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Box boundary with corners at (0,0) and (w,h)
    pub fn rectangle(width: f32, height: f32) -> Self {
        Self::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(width, 0.0),
            Vec2::new(width, height),
            Vec2::new(0.0, height),
        ])
    }

    /// Ellipse inscribed in the (w,h) box, approximated with 12 vertices
    pub fn ellipse(width: f32, height: f32) -> Self {
        let n = ELLIPSE_VERTICES;
        let vertices = (0..n)
            .map(|i| {
                let t = i as f32 * 6.28 / n as f32;
                Vec2::new(
                    width / 2.0 * t.cos() + width / 2.0,
                    height / 2.0 * t.sin() + height / 2.0,
                )
            })
            .collect();
        Self::new(vertices)
    }

    /// Place local vertices in the world: rotate around `origin`, then translate by `pos`
    pub fn transformed(&self, pos: Vec2, origin: Vec2, rotation_deg: f32) -> Self {
        let vertices = self
            .vertices
            .iter()
            .map(|v| rotate_about(*v, origin, rotation_deg) + pos)
            .collect();
        Self::new(vertices)
    }

    /// Axis-aligned bounds of the vertices
    pub fn bounding_rect(&self) -> Rect {
        let Some(first) = self.vertices.first() else {
            return Rect::new(0.0, 0.0, 0.0, 0.0);
        };
        let (min, max) = self
            .vertices
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)));
        Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Vertex average
    pub fn centroid(&self) -> Vec2 {
        if self.vertices.is_empty() {
            return Vec2::ZERO;
        }
        self.vertices.iter().copied().sum::<Vec2>() / self.vertices.len() as f32
    }

    /// Separating axis test against another convex polygon
    ///
    /// Returns `None` if a separating axis exists. Otherwise returns the axis of
    /// least penetration, oriented so that moving `self` by `normal * depth`
    /// pushes it out of `other`.
    pub fn mtv(&self, other: &Polygon) -> Option<Mtv> {
        if self.vertices.len() < 3 || other.vertices.len() < 3 {
            return None;
        }

        let mut best = Mtv {
            normal: Vec2::ZERO,
            depth: f32::MAX,
        };

        for poly in [self, other] {
            let n = poly.vertices.len();
            for i in 0..n {
                let edge = poly.vertices[(i + 1) % n] - poly.vertices[i];
                let axis = edge.perp().normalize_or_zero();
                if axis == Vec2::ZERO {
                    continue; // Repeated vertex
                }

                let (min_a, max_a) = project(&self.vertices, axis);
                let (min_b, max_b) = project(&other.vertices, axis);
                if max_a < min_b || max_b < min_a {
                    return None; // Separating axis found
                }

                let depth = (max_a - min_b).min(max_b - min_a);
                if depth < best.depth {
                    best = Mtv {
                        normal: axis,
                        depth,
                    };
                }
            }
        }

        // Orient the push-out from `other` toward `self`
        if (self.centroid() - other.centroid()).dot(best.normal) < 0.0 {
            best.normal = -best.normal;
        }

        Some(best)
    }
}

/// Project vertices onto an axis, returning (min, max)
fn project(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    vertices
        .iter()
        .map(|v| v.dot(axis))
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p), hi.max(p)))
}
