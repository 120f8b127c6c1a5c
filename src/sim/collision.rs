//! Collision detection and bounce response
//!
//! The tricky part of the game: a fast ball can cross a whole brick edge in one
//! tick, so side detection sweeps the ball's extreme points from the previous
//! tick to the current one and tests them against the brick's edges.

use glam::Vec2;

use super::body::Body;
use super::shapes::{Circle, Polygon, Rect, segments_intersect};

/// Polygon penetration at or below this depth is not reported as a hit
pub const SIGNIFICANT_DEPTH: f32 = 0.5;

/// Bounce angle at the paddle's left edge (degrees)
pub const PADDLE_BOUNCE_LEFT: f32 = 150.0;
/// Angular range of the bounce cone, left to right (degrees)
pub const PADDLE_BOUNCE_SPAN: f32 = 120.0;

/// Swept circle vs rectangle with side-aware bounce
///
/// `prev` and `curr` are the circle before and after this tick's integration.
/// Returns `true` if `curr` overlaps `rect`. With `bounce_off`, the velocity
/// component for each crossed side is negated; if overlap happened but no side
/// sweep crossed an edge (fast corner clip), both components are negated.
pub fn resolve_circle_rect(
    prev: &Circle,
    curr: &Circle,
    rect: &Rect,
    velocity: &mut Vec2,
    bounce_off: bool,
) -> bool {
    if !curr.overlaps_rect(rect) {
        return false;
    }

    if !bounce_off {
        return true;
    }

    let mut side_hit = false;

    if velocity.x > 0.0
        && segments_intersect(prev.right(), curr.right(), rect.top_left(), rect.bottom_left())
    {
        velocity.x = -velocity.x;
        side_hit = true;
    } else if velocity.x < 0.0
        && segments_intersect(prev.left(), curr.left(), rect.top_right(), rect.bottom_right())
    {
        velocity.x = -velocity.x;
        side_hit = true;
    }

    if velocity.y > 0.0
        && segments_intersect(prev.top(), curr.top(), rect.bottom_left(), rect.bottom_right())
    {
        velocity.y = -velocity.y;
        side_hit = true;
    } else if velocity.y < 0.0
        && segments_intersect(prev.bottom(), curr.bottom(), rect.top_left(), rect.top_right())
    {
        velocity.y = -velocity.y;
        side_hit = true;
    }

    if !side_hit {
        // Corner clip: reverse both
        *velocity = -*velocity;
    }

    true
}

/// Axis-aligned rectangle overlap
#[inline]
pub fn overlaps_rect(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Bounce direction (degrees) for a contact `fraction` of the way across the paddle
///
/// 0.0 (left edge) → 150°, 0.5 → 90° (straight up), 1.0 (right edge) → 30°.
#[inline]
pub fn paddle_bounce_angle(fraction: f32) -> f32 {
    PADDLE_BOUNCE_LEFT - fraction * PADDLE_BOUNCE_SPAN
}

/// Ball vs paddle: circle-rect overlap, optionally redirecting into the bounce cone
///
/// The ball keeps its speed; only the direction changes. Panics on a
/// zero-width paddle.
pub fn bounce_off_paddle(ball: &mut Body, paddle: &Rect, bounce_off: bool) -> bool {
    if !ball.circle().overlaps_rect(paddle) {
        return false;
    }

    if bounce_off {
        assert!(paddle.width > 0.0, "paddle width must be positive");
        let fraction = (ball.center().x - paddle.x) / paddle.width;
        let speed = ball.speed();
        ball.set_velocity_as(paddle_bounce_angle(fraction), speed);
    }

    true
}

/// Precise overlap between two bodies' boundary polygons
///
/// Bodies without a boundary fall back to their bounding box. With `resolve`,
/// `body` is pushed out of `other` along the minimum translation vector;
/// `other` is never moved. Only penetration deeper than `SIGNIFICANT_DEPTH`
/// counts as a hit.
pub fn overlaps_poly(body: &mut Body, other: &Body, resolve: bool) -> bool {
    let poly_a = world_polygon(body);
    let poly_b = world_polygon(other);

    if !poly_a.bounding_rect().overlaps(&poly_b.bounding_rect()) {
        return false;
    }

    let Some(mtv) = poly_a.mtv(&poly_b) else {
        return false;
    };

    if resolve {
        body.move_by(mtv.normal * mtv.depth);
    }

    mtv.depth > SIGNIFICANT_DEPTH
}

fn world_polygon(body: &Body) -> Polygon {
    body.bounding_polygon().unwrap_or_else(|| {
        Polygon::rectangle(body.width(), body.height()).transformed(
            body.pos,
            body.origin,
            body.rotation,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brick() -> Rect {
        Rect::new(100.0, 100.0, 64.0, 24.0)
    }

    fn circle(x: f32, y: f32) -> Circle {
        Circle::new(Vec2::new(x, y), 8.0)
    }

    #[test]
    fn test_no_overlap_no_mutation() {
        let mut vel = Vec2::new(200.0, 50.0);
        let hit = resolve_circle_rect(
            &circle(70.0, 112.0),
            &circle(80.0, 112.0),
            &brick(),
            &mut vel,
            true,
        );
        assert!(!hit);
        assert_eq!(vel, Vec2::new(200.0, 50.0));
    }

    #[test]
    fn test_detection_only_keeps_velocity() {
        let mut vel = Vec2::new(300.0, 0.0);
        let hit = resolve_circle_rect(
            &circle(88.0, 112.0),
            &circle(95.0, 112.0),
            &brick(),
            &mut vel,
            false,
        );
        assert!(hit);
        assert_eq!(vel, Vec2::new(300.0, 0.0));
    }

    #[test]
    fn test_moving_right_hits_left_edge() {
        let mut vel = Vec2::new(300.0, 0.0);
        let hit = resolve_circle_rect(
            &circle(88.0, 112.0),
            &circle(95.0, 112.0),
            &brick(),
            &mut vel,
            true,
        );
        assert!(hit);
        assert_eq!(vel, Vec2::new(-300.0, 0.0));
    }

    #[test]
    fn test_moving_left_hits_right_edge() {
        let mut vel = Vec2::new(-300.0, 10.0);
        let hit = resolve_circle_rect(
            &circle(176.0, 112.0),
            &circle(169.0, 112.2),
            &brick(),
            &mut vel,
            true,
        );
        assert!(hit);
        assert_eq!(vel, Vec2::new(300.0, 10.0));
    }

    #[test]
    fn test_moving_down_hits_top_edge() {
        let mut vel = Vec2::new(0.0, -200.0);
        let hit = resolve_circle_rect(
            &circle(130.0, 135.0),
            &circle(130.0, 129.0),
            &brick(),
            &mut vel,
            true,
        );
        assert!(hit);
        assert_eq!(vel, Vec2::new(0.0, 200.0));
    }

    #[test]
    fn test_moving_up_hits_bottom_edge() {
        let mut vel = Vec2::new(40.0, 200.0);
        let hit = resolve_circle_rect(
            &circle(130.0, 89.0),
            &circle(131.0, 95.0),
            &brick(),
            &mut vel,
            true,
        );
        assert!(hit);
        assert_eq!(vel, Vec2::new(40.0, -200.0));
    }

    #[test]
    fn test_corner_clip_reverses_both() {
        // Diagonal approach to the bottom-left corner: neither sweep reaches an edge
        let mut vel = Vec2::new(150.0, 150.0);
        let hit = resolve_circle_rect(
            &circle(90.0, 90.0),
            &circle(95.0, 95.0),
            &brick(),
            &mut vel,
            true,
        );
        assert!(hit);
        assert_eq!(vel, Vec2::new(-150.0, -150.0));
    }

    #[test]
    fn test_paddle_bounce_angles() {
        assert_eq!(paddle_bounce_angle(0.0), 150.0);
        assert_eq!(paddle_bounce_angle(0.5), 90.0);
        assert_eq!(paddle_bounce_angle(1.0), 30.0);
    }

    #[test]
    fn test_bounce_off_paddle_center_goes_straight_up() {
        let paddle = Rect::new(100.0, 32.0, 96.0, 16.0);
        let mut ball = Body::new(Vec2::new(140.0, 42.0), Vec2::new(16.0, 16.0));
        ball.set_velocity_xy(120.0, -160.0); // speed 200

        assert!(bounce_off_paddle(&mut ball, &paddle, true));
        assert!(ball.velocity.x.abs() < 1e-3);
        assert!((ball.velocity.y - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_bounce_off_paddle_miss() {
        let paddle = Rect::new(100.0, 32.0, 96.0, 16.0);
        let mut ball = Body::new(Vec2::new(140.0, 100.0), Vec2::new(16.0, 16.0));
        ball.set_velocity_xy(0.0, -100.0);

        assert!(!bounce_off_paddle(&mut ball, &paddle, true));
        assert_eq!(ball.velocity, Vec2::new(0.0, -100.0));
    }

    #[test]
    #[should_panic(expected = "paddle width must be positive")]
    fn test_zero_width_paddle_panics() {
        let paddle = Rect::new(140.0, 32.0, 0.0, 16.0);
        let mut ball = Body::new(Vec2::new(132.0, 42.0), Vec2::new(16.0, 16.0));
        ball.set_velocity_xy(0.0, -100.0);
        bounce_off_paddle(&mut ball, &paddle, true);
    }

    #[test]
    fn test_overlaps_rect() {
        let paddle = Rect::new(20.0, 10.0, 96.0, 16.0);
        assert!(overlaps_rect(&Rect::new(0.0, 0.0, 32.0, 16.0), &paddle));
        assert!(!overlaps_rect(&Rect::new(0.0, 40.0, 32.0, 16.0), &paddle));
    }

    fn boxed(x: f32, y: f32) -> Body {
        let mut body = Body::new(Vec2::new(x, y), Vec2::new(10.0, 10.0));
        body.set_rectangle_boundary();
        body
    }

    #[test]
    fn test_poly_push_out_removes_penetration() {
        let mut body = boxed(0.0, 0.0);
        let wall = boxed(8.0, 1.0);

        assert!(overlaps_poly(&mut body, &wall, true));
        assert!((body.pos - Vec2::new(-2.0, 0.0)).length() < 1e-4);
        assert_eq!(wall.pos, Vec2::new(8.0, 1.0));

        // Re-check without moving: at most touching
        let poly_a = body.bounding_polygon().unwrap();
        let poly_b = wall.bounding_polygon().unwrap();
        if let Some(mtv) = poly_a.mtv(&poly_b) {
            assert!(mtv.depth <= SIGNIFICANT_DEPTH);
        }
        assert!(!overlaps_poly(&mut body, &wall, false));
    }

    #[test]
    fn test_poly_shallow_overlap_not_significant() {
        let mut body = boxed(0.0, 0.0);
        let wall = boxed(9.7, 0.0);

        let mtv = body
            .bounding_polygon()
            .unwrap()
            .mtv(&wall.bounding_polygon().unwrap());
        assert!(mtv.is_some());
        assert!(!overlaps_poly(&mut body, &wall, false));
        assert_eq!(body.pos, Vec2::ZERO);
    }

    #[test]
    fn test_poly_separated() {
        let mut body = boxed(0.0, 0.0);
        let wall = boxed(50.0, 0.0);
        assert!(!overlaps_poly(&mut body, &wall, true));
        assert_eq!(body.pos, Vec2::ZERO);
    }

    #[test]
    fn test_poly_without_boundary_uses_box() {
        let mut body = Body::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let wall = boxed(5.0, 0.0);
        assert!(overlaps_poly(&mut body, &wall, false));
    }

    #[test]
    fn test_ellipse_ball_against_brick() {
        let mut ball = Body::new(Vec2::new(95.0, 104.0), Vec2::new(16.0, 16.0));
        ball.set_ellipse_boundary();
        let mut brick_body = Body::new(Vec2::new(100.0, 100.0), Vec2::new(64.0, 24.0));
        brick_body.set_rectangle_boundary();

        assert!(overlaps_poly(&mut ball, &brick_body, true));
        assert!(ball.pos.x < 95.0);
        assert_eq!(brick_body.pos, Vec2::new(100.0, 100.0));
    }
}
