//! Boundary reflection
//!
//! Each axis is handled on its own: if the body's edge is at or past a wall
//! and it is still moving outward, that velocity component flips sign. The
//! position then advances by the (possibly flipped) velocity in the same step,
//! so a body sitting on the wall moves straight back in rather than stalling.

use super::body::{Anchor, Body, Container};

/// Velocity on one axis after checking both walls of that axis
///
/// `lower_margin` is the distance from the anchor to the body's low edge and
/// `upper_extent` the distance to its high edge. When the container is smaller
/// than the body both conditions can hold and the sign flips every call.
#[inline]
pub fn reflect_velocity(
    position: f32,
    velocity: f32,
    lower_margin: f32,
    upper_extent: f32,
    border: f32,
) -> f32 {
    let moving_outside_lower = position <= lower_margin && velocity < 0.0;
    let moving_outside_upper = position + upper_extent >= border && velocity > 0.0;

    if moving_outside_lower || moving_outside_upper {
        -velocity
    } else {
        velocity
    }
}

/// Advance one body by a single frame
pub fn step_body(body: &mut Body, container: Container, anchor: Anchor) {
    let lower = anchor.lower_margin(body.radius);
    let upper = anchor.upper_extent(body.radius);

    body.vel.x = reflect_velocity(body.pos.x, body.vel.x, lower, upper, container.width);
    body.vel.y = reflect_velocity(body.pos.y, body.vel.y, lower, upper, container.height);
    body.pos += body.vel;
}

/// Advance every body by a single frame against the same container
pub fn step_all(bodies: &mut [Body], container: Container, anchor: Anchor) {
    for body in bodies.iter_mut() {
        step_body(body, container, anchor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn body_at(x: f32, y: f32, dx: f32, dy: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(dx, dy)).with_radius(25.0)
    }

    #[test]
    fn test_top_left_lower_wall() {
        let mut body = body_at(0.0, 100.0, -3.0, 0.0);
        step_body(&mut body, Container::new(200.0, 400.0), Anchor::TopLeft);
        assert_eq!(body.vel.x, 3.0);
        assert_eq!(body.pos.x, 3.0);
    }

    #[test]
    fn test_top_left_upper_wall() {
        // 150 + 50 = 200 touches the right wall
        let mut body = body_at(150.0, 100.0, 4.0, 0.0);
        step_body(&mut body, Container::new(200.0, 400.0), Anchor::TopLeft);
        assert_eq!(body.vel.x, -4.0);
        assert_eq!(body.pos.x, 146.0);
    }

    #[test]
    fn test_center_walls() {
        let container = Container::new(200.0, 200.0);

        let mut body = body_at(25.0, 100.0, -2.0, 0.0);
        step_body(&mut body, container, Anchor::Center);
        assert_eq!(body.vel.x, 2.0);
        assert_eq!(body.pos.x, 27.0);

        let mut body = body_at(100.0, 175.0, 0.0, 5.0);
        step_body(&mut body, container, Anchor::Center);
        assert_eq!(body.vel.y, -5.0);
        assert_eq!(body.pos.y, 170.0);

        // Inside the margin but already heading in: untouched
        let mut body = body_at(10.0, 100.0, 1.0, 0.0);
        step_body(&mut body, container, Anchor::Center);
        assert_eq!(body.vel.x, 1.0);
        assert_eq!(body.pos.x, 11.0);
    }

    #[test]
    fn test_free_flight() {
        let mut body = body_at(80.0, 60.0, 3.0, -2.0);
        step_body(&mut body, Container::new(400.0, 300.0), Anchor::Center);
        assert_eq!(body.vel, Vec2::new(3.0, -2.0));
        assert_eq!(body.pos, Vec2::new(83.0, 58.0));
    }

    #[test]
    fn test_axes_reflect_independently() {
        // Corner hit: both axes flip, no coupling between them
        let mut body = body_at(0.0, 0.0, -1.0, -5.0);
        step_body(&mut body, Container::new(200.0, 200.0), Anchor::TopLeft);
        assert_eq!(body.vel, Vec2::new(1.0, 5.0));
        assert_eq!(body.pos, Vec2::new(1.0, 5.0));

        // Only x at the wall
        let mut body = body_at(0.0, 80.0, -1.0, -5.0);
        step_body(&mut body, Container::new(200.0, 200.0), Anchor::TopLeft);
        assert_eq!(body.vel, Vec2::new(1.0, -5.0));
    }

    #[test]
    fn test_shrunken_container_oscillates() {
        // Diameter 50 in a 30px box: both walls claim the body every tick
        let mut body = body_at(10.0, 10.0, 2.0, 0.0);
        let tiny = Container::new(30.0, 30.0);

        let mut signs = Vec::new();
        for _ in 0..8 {
            step_body(&mut body, tiny, Anchor::Center);
            signs.push(body.vel.x.signum());
            assert_eq!(body.vel.x.abs(), 2.0);
            assert!(body.pos.is_finite());
        }
        for pair in signs.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_zero_container_does_not_panic() {
        let mut bodies = vec![body_at(0.0, 0.0, 3.0, -3.0), body_at(5.0, 5.0, -1.0, 1.0)];
        for _ in 0..100 {
            step_all(&mut bodies, Container::default(), Anchor::Center);
        }
        assert!(bodies.iter().all(|b| b.pos.is_finite()));
    }

    proptest! {
        #[test]
        fn prop_step_preserves_speed(
            x in -100.0f32..1000.0,
            y in -100.0f32..1000.0,
            dx in -5i32..=5,
            dy in -5i32..=5,
            w in 0.0f32..1000.0,
            h in 0.0f32..1000.0,
            top_left in any::<bool>(),
        ) {
            let anchor = if top_left { Anchor::TopLeft } else { Anchor::Center };
            let mut body = body_at(x, y, dx as f32, dy as f32);
            let before = body.vel;

            step_body(&mut body, Container::new(w, h), anchor);

            prop_assert_eq!(body.vel.x.abs(), before.x.abs());
            prop_assert_eq!(body.vel.y.abs(), before.y.abs());
        }

        #[test]
        fn prop_bodies_stay_near_bounds(
            seed_x in 0.0f32..1.0,
            seed_y in 0.0f32..1.0,
            dx in 1i32..=5,
            dy in 1i32..=5,
            steps in 1usize..500,
        ) {
            let container = Container::new(640.0, 480.0);
            let mut body = body_at(
                25.0 + seed_x * 590.0,
                25.0 + seed_y * 430.0,
                dx as f32,
                -(dy as f32),
            );

            for _ in 0..steps {
                step_body(&mut body, container, Anchor::Center);
                // At most one step of overshoot past either wall
                prop_assert!(body.pos.x - body.radius >= -5.0);
                prop_assert!(body.pos.x + body.radius <= container.width + 5.0);
                prop_assert!(body.pos.y - body.radius >= -5.0);
                prop_assert!(body.pos.y + body.radius <= container.height + 5.0);
            }
        }
    }
}
