/*
 * Particle Module
 *
 * This module defines the Particle struct and its per-frame steps.
 * Each particle follows a fixed recipe every frame:
 * 1. Drift: move along its constant velocity
 * 2. Wander: add a small oscillation driven by an ever-increasing phase
 * 3. Wrap: teleport to the opposite edge once it leaves the padded viewport
 * 4. Parallax: derive the render position from the smoothed pointer
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::FieldParams;
use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub parallax: f32,
    pub drift: f32,
    // Transient, rebuilt on every update before anything is drawn
    pub render_position: Vec2,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, parallax: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            parallax,
            drift: 0.0,
            render_position: position,
        }
    }

    // Spawn a particle somewhere inside the viewport with a random heading
    pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport, params: &FieldParams) -> Self {
        let speed = sample(rng, params.min_speed, params.max_speed);
        let direction = rng.gen_range(0.0..TAU);
        let x = sample(rng, 0.0, viewport.width);
        let y = sample(rng, 0.0, viewport.height);

        Self::new(
            vec2(x, y),
            vec2(direction.cos(), direction.sin()) * speed,
            sample(rng, params.min_radius, params.max_radius),
            sample(rng, params.min_parallax, params.max_parallax),
        )
    }

    // Move along the constant velocity
    #[inline]
    pub fn integrate(&mut self, delta_frames: f32) {
        self.position += self.velocity * delta_frames;
    }

    // Advance the drift phase and layer the oscillation on top of the drift.
    // The amplitude is applied once per update, independent of delta.
    #[inline]
    pub fn wander(&mut self, delta_frames: f32, drift_rate: f32, amplitude: f32) {
        self.drift += drift_rate * delta_frames;
        self.position += vec2(self.drift.cos(), self.drift.sin()) * amplitude;
    }

    // Teleport to the opposite side once past the padded bounds; velocity is untouched
    pub fn wrap_edges(&mut self, viewport: &Viewport, margin: f32) {
        let right = viewport.width + margin;
        let bottom = viewport.height + margin;

        if self.position.x < -margin {
            self.position.x = right;
        } else if self.position.x > right {
            self.position.x = -margin;
        }

        if self.position.y < -margin {
            self.position.y = bottom;
        } else if self.position.y > bottom {
            self.position.y = -margin;
        }
    }

    /// Offset of this particle's rendered position for the given pointer.
    #[inline]
    pub fn parallax_offset(&self, pointer: Vec2, viewport: &Viewport) -> Vec2 {
        (pointer - viewport.center()) * self.parallax
    }

    // Rebuild the render position; the offset never feeds back into `position`
    #[inline]
    pub fn update_render_position(&mut self, pointer: Vec2, viewport: &Viewport) {
        self.render_position = self.position + self.parallax_offset(pointer, viewport);
    }
}

// Uniform sample in [low, high), tolerating a collapsed range
fn sample<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(vec2(x, y), Vec2::ZERO, 2.0, 0.02)
    }

    #[test]
    fn random_particles_respect_parameter_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let viewport = Viewport::new(640.0, 480.0, 1.0);
        let params = FieldParams::default();

        for _ in 0..500 {
            let p = Particle::random(&mut rng, &viewport, &params);
            let speed = p.velocity.length();
            assert!(speed >= params.min_speed - 1e-4 && speed <= params.max_speed + 1e-4);
            assert!(p.radius > 0.0);
            assert!(p.radius >= params.min_radius && p.radius < params.max_radius);
            assert!(p.parallax >= 0.015 && p.parallax < 0.05);
            assert!(p.position.x >= 0.0 && p.position.x < viewport.width);
            assert!(p.position.y >= 0.0 && p.position.y < viewport.height);
            assert_eq!(p.drift, 0.0);
        }
    }

    #[test]
    fn integrate_scales_with_delta() {
        let mut p = Particle::new(vec2(10.0, 10.0), vec2(0.5, -0.25), 1.0, 0.02);
        p.integrate(2.0);
        assert_eq!(p.position, vec2(11.0, 9.5));
    }

    #[test]
    fn wander_advances_phase_and_offsets_position() {
        let mut p = still(100.0, 100.0);
        p.wander(2.0, 0.0015, 0.12);
        assert!((p.drift - 0.003).abs() < 1e-7);
        let expected = vec2(100.0 + 0.003f32.cos() * 0.12, 100.0 + 0.003f32.sin() * 0.12);
        assert!((p.position - expected).length() < 1e-5);
    }

    #[test]
    fn wraps_each_edge_to_the_opposite_side() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);

        let mut right = still(851.0, 300.0);
        right.wrap_edges(&viewport, 50.0);
        assert_eq!(right.position.x, -50.0);

        let mut left = still(-51.0, 300.0);
        left.wrap_edges(&viewport, 50.0);
        assert_eq!(left.position.x, 850.0);

        let mut bottom = still(400.0, 651.0);
        bottom.wrap_edges(&viewport, 50.0);
        assert_eq!(bottom.position.y, -50.0);

        let mut top = still(400.0, -51.0);
        top.wrap_edges(&viewport, 50.0);
        assert_eq!(top.position.y, 650.0);
    }

    #[test]
    fn positions_inside_the_margin_are_left_alone() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut p = still(-50.0, 650.0);
        p.wrap_edges(&viewport, 50.0);
        assert_eq!(p.position, vec2(-50.0, 650.0));
    }

    #[test]
    fn wrapping_keeps_velocity() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut p = Particle::new(vec2(900.0, 700.0), vec2(0.3, 0.2), 1.0, 0.02);
        p.wrap_edges(&viewport, 50.0);
        assert_eq!(p.velocity, vec2(0.3, 0.2));
        assert_eq!(p.position, vec2(-50.0, -50.0));
    }

    #[test]
    fn pointer_at_center_produces_no_offset() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut p = still(10.0, 20.0);
        p.update_render_position(viewport.center(), &viewport);
        assert_eq!(p.render_position, p.position);
    }

    #[test]
    fn render_position_does_not_accumulate() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut p = still(10.0, 20.0);
        let pointer = vec2(600.0, 300.0);

        p.update_render_position(pointer, &viewport);
        p.update_render_position(pointer, &viewport);

        assert_eq!(p.position, vec2(10.0, 20.0));
        assert!((p.render_position - vec2(14.0, 20.0)).length() < 1e-5);
    }
}
