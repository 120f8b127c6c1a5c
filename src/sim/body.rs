//! Moving bodies and the Euler physics integrator
//!
//! A `Body` is the transform + physics state shared by every game entity.
//! Shapes (`Circle`, `Rect`, `Polygon`) are derived from it on demand.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shapes::{Circle, Polygon, Rect};
use crate::consts::UNBOUNDED_SPEED;
use crate::{degrees_of, dir_from_degrees};

/// Acceleration magnitude below which a body is coasting
pub const COASTING_THRESHOLD: f32 = 0.01;
/// Minimum speed for auto-angle to follow the motion direction
pub const AUTO_ANGLE_MIN_SPEED: f32 = 0.1;

/// Transform and physics state of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Bottom-left corner of the bounding box
    pub pos: Vec2,
    pub size: Vec2,
    /// Rotation pivot, relative to `pos`
    pub origin: Vec2,
    /// Facing angle in degrees
    pub rotation: f32,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub max_speed: f32,
    /// Speed lost per second while coasting
    pub deceleration: f32,
    /// Rotate to face the direction of motion
    pub auto_angle: bool,
    /// Local-space collision polygon (for precise overlap)
    #[serde(default)]
    pub boundary: Option<Polygon>,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::ZERO,
            origin: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            max_speed: UNBOUNDED_SPEED,
            deceleration: 0.0,
            auto_angle: false,
            boundary: None,
        }
    }
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            ..Default::default()
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Centre of the bounding box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Inscribed circle (radius = width / 2)
    pub fn circle(&self) -> Circle {
        Circle::new(self.center(), self.size.x / 2.0)
    }

    // === Transform ===

    pub fn move_by(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    pub fn set_origin_center(&mut self) {
        if self.size.x == 0.0 {
            log::warn!("set_origin_center on a body with zero width");
        }
        self.origin = self.size / 2.0;
    }

    /// Place this body so its origin sits on `target`'s origin
    pub fn move_to_origin(&mut self, target: &Body) {
        self.pos = target.pos + target.origin - self.origin;
    }

    /// Attach a box boundary matching the current size
    pub fn set_rectangle_boundary(&mut self) {
        self.boundary = Some(Polygon::rectangle(self.size.x, self.size.y));
    }

    /// Attach an ellipse boundary inscribed in the current size
    pub fn set_ellipse_boundary(&mut self) {
        self.boundary = Some(Polygon::ellipse(self.size.x, self.size.y));
    }

    /// Boundary polygon placed in world space (position + rotation about origin)
    pub fn bounding_polygon(&self) -> Option<Polygon> {
        self.boundary
            .as_ref()
            .map(|poly| poly.transformed(self.pos, self.origin, self.rotation))
    }

    // === Velocity ===

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Rescale velocity to `speed`, keeping direction (no-op when stopped)
    pub fn set_speed(&mut self, speed: f32) {
        self.velocity = self.velocity.normalize_or_zero() * speed;
    }

    /// Direction of motion in degrees, in (-180, 180]
    #[inline]
    pub fn motion_angle(&self) -> f32 {
        degrees_of(self.velocity)
    }

    pub fn set_velocity_xy(&mut self, vx: f32, vy: f32) {
        self.velocity = Vec2::new(vx, vy);
    }

    pub fn add_velocity_xy(&mut self, vx: f32, vy: f32) {
        self.velocity += Vec2::new(vx, vy);
    }

    /// Set velocity from angle (degrees) and speed
    pub fn set_velocity_as(&mut self, angle_deg: f32, speed: f32) {
        self.velocity = dir_from_degrees(angle_deg) * speed;
    }

    pub fn mult_velocity_x(&mut self, m: f32) {
        self.velocity.x *= m;
    }

    pub fn mult_velocity_y(&mut self, m: f32) {
        self.velocity.y *= m;
    }

    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed;
    }

    pub fn set_deceleration(&mut self, deceleration: f32) {
        self.deceleration = deceleration.max(0.0);
    }

    pub fn set_auto_angle(&mut self, auto_angle: bool) {
        self.auto_angle = auto_angle;
    }

    // === Acceleration ===

    pub fn set_acceleration_xy(&mut self, ax: f32, ay: f32) {
        self.acceleration = Vec2::new(ax, ay);
    }

    pub fn add_acceleration_xy(&mut self, ax: f32, ay: f32) {
        self.acceleration += Vec2::new(ax, ay);
    }

    /// Set acceleration from angle (degrees) and magnitude
    pub fn set_acceleration_as(&mut self, angle_deg: f32, amount: f32) {
        self.acceleration = dir_from_degrees(angle_deg) * amount;
    }

    pub fn add_acceleration_as(&mut self, angle_deg: f32, amount: f32) {
        self.acceleration += dir_from_degrees(angle_deg) * amount;
    }

    /// Accelerate along the current facing angle
    pub fn accelerate_forward(&mut self, amount: f32) {
        self.set_acceleration_as(self.rotation, amount);
    }

    /// Advance one Euler step of `dt` seconds
    ///
    /// Order: apply acceleration, decelerate while coasting, cap speed,
    /// move, then face the direction of motion if `auto_angle` is set.
    pub fn integrate(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;

        let slowdown = self.deceleration * dt;
        if self.acceleration.length() < COASTING_THRESHOLD && slowdown > 0.0 {
            let speed = self.speed();
            if speed < slowdown {
                self.velocity = Vec2::ZERO;
            } else {
                self.set_speed(speed - slowdown);
            }
        }

        if self.speed() > self.max_speed {
            self.set_speed(self.max_speed);
        }

        self.pos += self.velocity * dt;

        if self.auto_angle && self.speed() > AUTO_ANGLE_MIN_SPEED {
            self.rotation = self.motion_angle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn moving(vx: f32, vy: f32) -> Body {
        let mut body = Body::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        body.set_velocity_xy(vx, vy);
        body
    }

    #[test]
    fn test_defaults() {
        let body = Body::default();
        assert_eq!(body.max_speed, UNBOUNDED_SPEED);
        assert_eq!(body.deceleration, 0.0);
        assert!(!body.auto_angle);
        assert!(body.boundary.is_none());
    }

    #[test]
    fn test_velocity_from_angle() {
        let mut body = Body::default();
        body.set_velocity_as(90.0, 50.0);
        assert!(body.velocity.x.abs() < 1e-4);
        assert!((body.velocity.y - 50.0).abs() < 1e-4);
        assert!((body.motion_angle() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_integrate_moves_by_velocity() {
        let mut body = moving(60.0, -30.0);
        body.integrate(0.5);
        assert_eq!(body.pos, Vec2::new(30.0, -15.0));
        assert_eq!(body.velocity, Vec2::new(60.0, -30.0));
    }

    #[test]
    fn test_acceleration_applied_before_move() {
        let mut body = moving(0.0, 0.0);
        body.set_acceleration_xy(10.0, 0.0);
        body.integrate(1.0);
        assert_eq!(body.velocity, Vec2::new(10.0, 0.0));
        assert_eq!(body.pos, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_coasting_decelerates_to_exactly_zero() {
        let mut body = moving(3.0, 4.0); // speed 5
        body.set_deceleration(2.0);

        body.integrate(1.0);
        assert!((body.speed() - 3.0).abs() < 1e-5);
        // Direction preserved
        assert!((body.velocity.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-5);

        body.integrate(1.0);
        assert!((body.speed() - 1.0).abs() < 1e-5);

        // Would overshoot below zero: clamps instead of reversing
        body.integrate(1.0);
        assert_eq!(body.speed(), 0.0);
        assert_eq!(body.velocity, Vec2::ZERO);

        body.integrate(1.0);
        assert_eq!(body.speed(), 0.0);
    }

    #[test]
    fn test_no_deceleration_while_accelerating() {
        let mut body = moving(10.0, 0.0);
        body.set_deceleration(100.0);
        body.set_acceleration_xy(1.0, 0.0);
        body.integrate(1.0);
        assert!((body.speed() - 11.0).abs() < 1e-5);
    }

    #[test]
    fn test_max_speed_clamp_keeps_direction() {
        let mut body = moving(300.0, 400.0);
        body.set_max_speed(100.0);
        body.integrate(0.1);
        assert!((body.speed() - 100.0).abs() < 1e-3);
        assert!((body.velocity.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_auto_angle() {
        let mut body = moving(0.0, -20.0);
        body.set_auto_angle(true);
        body.integrate(0.1);
        assert!((body.rotation + 90.0).abs() < 1e-4);

        // Too slow to re-aim
        body.set_velocity_xy(0.05, 0.0);
        body.integrate(0.1);
        assert!((body.rotation + 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_accelerate_forward_uses_rotation() {
        let mut body = Body {
            rotation: 180.0,
            ..Default::default()
        };
        body.accelerate_forward(5.0);
        assert!((body.acceleration - Vec2::new(-5.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_move_to_origin_centres_on_target() {
        let mut brick = Body::new(Vec2::new(100.0, 200.0), Vec2::new(64.0, 24.0));
        brick.set_origin_center();
        let mut pickup = Body::new(Vec2::ZERO, Vec2::new(32.0, 16.0));
        pickup.set_origin_center();

        pickup.move_to_origin(&brick);
        assert_eq!(pickup.center(), brick.center());
    }

    proptest! {
        #[test]
        fn prop_integrate_is_deterministic(
            vx in -500.0f32..500.0, vy in -500.0f32..500.0,
            ax in -50.0f32..50.0, ay in -50.0f32..50.0,
            dt in 0.0f32..0.1,
        ) {
            let mut a = moving(vx, vy);
            a.set_acceleration_xy(ax, ay);
            a.set_deceleration(5.0);
            let mut b = a.clone();
            a.integrate(dt);
            b.integrate(dt);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_speed_never_exceeds_max(
            vx in -2000.0f32..2000.0, vy in -2000.0f32..2000.0,
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            max_speed in 1.0f32..800.0,
            decel in 0.0f32..100.0,
            dt in 0.0f32..0.1,
            ticks in 1usize..120,
        ) {
            let mut body = moving(vx, vy);
            body.set_acceleration_xy(ax, ay);
            body.set_max_speed(max_speed);
            body.set_deceleration(decel);
            for _ in 0..ticks {
                body.integrate(dt);
                prop_assert!(body.speed() <= max_speed * (1.0 + 1e-5));
                prop_assert!(body.speed() >= 0.0);
            }
        }
    }
}
