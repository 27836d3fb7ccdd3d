/*
 * Simulation Module
 *
 * This module advances the particle field. FieldSimulator owns the fixed
 * particle population; ParticleField bundles it with the pointer tracker and
 * viewport so every piece of mutable state lives in one context object that
 * the frame loop, the input handlers and the tests pass around explicitly.
 *
 * Per particle and per frame, in order:
 * - Integrate the linear drift
 * - Advance the drift phase and add the oscillation
 * - Wrap around the padded viewport
 * - Derive the render position from the smoothed pointer
 *
 * Wrapping happens before the render position is derived, so the render
 * position always equals the stored position plus this frame's parallax
 * offset.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::FieldParams;
use crate::particle::Particle;
use crate::pointer::PointerTracker;
use crate::viewport::Viewport;

pub struct FieldSimulator {
    pub particles: Vec<Particle>,
    pub params: FieldParams,
}

impl FieldSimulator {
    // Spawn the whole population once; it is never resized afterwards
    pub fn new<R: Rng + ?Sized>(params: FieldParams, viewport: &Viewport, rng: &mut R) -> Self {
        let particles = (0..params.particle_count)
            .map(|_| Particle::random(rng, viewport, &params))
            .collect();

        Self { particles, params }
    }

    pub fn from_particles(particles: Vec<Particle>, params: FieldParams) -> Self {
        Self { particles, params }
    }

    /// Advance every particle by `delta_frames` (frame-normalised, already
    /// clamped by the scheduler) and rebuild render positions for `pointer`.
    pub fn update(&mut self, delta_frames: f32, pointer: &PointerTracker, viewport: &Viewport) {
        let FieldParams {
            drift_rate,
            drift_amplitude,
            wrap_margin,
            ..
        } = self.params;
        let pointer = pointer.current();

        for particle in &mut self.particles {
            particle.integrate(delta_frames);
            particle.wander(delta_frames, drift_rate, drift_amplitude);
            particle.wrap_edges(viewport, wrap_margin);
            particle.update_render_position(pointer, viewport);
        }
    }

    pub fn render_positions(&self) -> Vec<Vec2> {
        self.particles.iter().map(|p| p.render_position).collect()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Simulation context: everything one background instance mutates.
pub struct ParticleField {
    pub simulator: FieldSimulator,
    pub pointer: PointerTracker,
    pub viewport: Viewport,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(params: FieldParams, viewport: Viewport, rng: &mut R) -> Self {
        let pointer = PointerTracker::new(&viewport, params.pointer_smoothing);
        let simulator = FieldSimulator::new(params, &viewport, rng);

        log::info!(
            "Spawned {} particles in a {:.0}x{:.0} viewport",
            simulator.len(),
            viewport.width,
            viewport.height
        );

        let mut field = Self {
            simulator,
            pointer,
            viewport,
        };
        // Render positions are valid before the first frame is drawn
        field.refresh_render_positions();
        field
    }

    pub fn params(&self) -> &FieldParams {
        &self.simulator.params
    }

    pub fn params_mut(&mut self) -> &mut FieldParams {
        &mut self.simulator.params
    }

    // One simulation tick: smooth the pointer, then move every particle
    pub fn advance(&mut self, delta_frames: f32) {
        self.pointer.set_smoothing(self.simulator.params.pointer_smoothing);
        self.pointer.tick();
        self.simulator.update(delta_frames, &self.pointer, &self.viewport);
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer.move_to(position);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.leave(&self.viewport);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn refresh_render_positions(&mut self) {
        let pointer = self.pointer.current();
        for particle in &mut self.simulator.particles {
            particle.update_render_position(pointer, &self.viewport);
        }
    }
}
