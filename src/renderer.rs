/*
 * Renderer Module
 *
 * This module draws the particle field onto a Surface.
 * Every frame it:
 * - Clears the surface
 * - Paints each particle as a glowing dot at its render position
 * - Links every pair of particles closer than the connection distance with a
 *   line that fades out as the pair separates
 *
 * Pair search is brute force by default: n(n-1)/2 distance tests, about 2,415
 * at 70 particles. That is the scalability ceiling of this renderer. Larger
 * populations should switch to `ConnectionStrategy::SpatialGrid`, which keeps
 * the number of tests close to linear.
 */

use nannou::prelude::*;

use crate::params::{ConnectionStrategy, FieldParams};
use crate::particle::Particle;
use crate::spatial_grid::SpatialGrid;
use crate::viewport::Viewport;

/// Soft halo painted around a filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Rgba,
}

/// A 2D drawing target addressed in viewport coordinates.
pub trait Surface {
    /// Rescale the backing store to `logical size * scale factor` and reset the
    /// transform so drawing stays in logical units. Called on every resize.
    fn resize(&mut self, viewport: &Viewport);
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: Glow);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// A pair of particles close enough to be linked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub particles: usize,
    pub pair_tests: usize,
    pub links: usize,
}

/// Line opacity for two particles `distance` apart, or `None` when they are
/// too far apart to be linked.
#[inline]
pub fn connection_alpha(distance: f32, max_distance: f32, max_alpha: f32) -> Option<f32> {
    if distance < max_distance {
        Some((1.0 - distance / max_distance) * max_alpha)
    } else {
        None
    }
}

// Test every unordered pair (i < j)
pub fn find_links_brute_force(positions: &[Vec2], params: &FieldParams, links: &mut Vec<Link>) -> usize {
    let mut tests = 0;
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            tests += 1;
            push_if_linked(positions, i, j, params, links);
        }
    }
    tests
}

// Only test pairs whose grid cells touch
pub fn find_links_with_grid(
    positions: &[Vec2],
    params: &FieldParams,
    grid: &mut SpatialGrid,
    links: &mut Vec<Link>,
) -> usize {
    grid.rebuild(positions);

    let mut tests = 0;
    grid.for_each_candidate_pair(positions, |i, j| {
        tests += 1;
        push_if_linked(positions, i, j, params, links);
    });
    tests
}

#[inline]
fn push_if_linked(positions: &[Vec2], i: usize, j: usize, params: &FieldParams, links: &mut Vec<Link>) {
    let distance = positions[i].distance(positions[j]);
    if let Some(alpha) = connection_alpha(distance, params.connection_distance, params.max_line_alpha) {
        links.push(Link {
            a: i,
            b: j,
            distance,
            alpha,
        });
    }
}

pub struct FieldRenderer {
    positions: Vec<Vec2>,
    links: Vec<Link>,
    grid: Option<SpatialGrid>,
}

impl FieldRenderer {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            links: Vec::new(),
            grid: None,
        }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn resize<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: &Viewport) {
        surface.resize(viewport);
        // The grid covers the padded viewport, so a new size needs a new grid
        self.grid = None;
        let (w, h) = viewport.backing_size();
        log::debug!(
            "Surface resized to {:.0}x{:.0} logical, {}x{} backing",
            viewport.width,
            viewport.height,
            w,
            h
        );
    }

    pub fn draw<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        particles: &[Particle],
        params: &FieldParams,
        viewport: &Viewport,
    ) -> RenderStats {
        surface.clear();

        let fill = params.particle_rgba();
        let glow = Glow {
            blur: params.glow_blur,
            color: params.glow_rgba(),
        };
        for particle in particles {
            surface.fill_circle(particle.render_position, particle.radius, fill, glow);
        }

        let Self { positions, links, grid } = self;
        positions.clear();
        positions.extend(particles.iter().map(|p| p.render_position));
        links.clear();

        let pair_tests = match params.connection_strategy {
            ConnectionStrategy::BruteForce => find_links_brute_force(positions, params, links),
            ConnectionStrategy::SpatialGrid => {
                let grid = grid_for(grid, params, viewport);
                find_links_with_grid(positions, params, grid, links)
            }
        };

        for link in links.iter() {
            surface.stroke_line(
                positions[link.a],
                positions[link.b],
                params.line_width,
                params.line_rgba(link.alpha),
            );
        }

        RenderStats {
            particles: particles.len(),
            pair_tests,
            links: links.len(),
        }
    }

    /// Whether a spatial grid is currently cached.
    pub fn has_grid(&self) -> bool {
        self.grid.is_some()
    }
}

// Reuse the grid while the viewport and link distance stay the same
fn grid_for<'a>(slot: &'a mut Option<SpatialGrid>, params: &FieldParams, viewport: &Viewport) -> &'a mut SpatialGrid {
    let pad = params.wrap_margin + params.connection_distance;
    let origin = vec2(-pad, -pad);
    let extent = vec2(viewport.width, viewport.height) + Vec2::splat(2.0 * pad);

    let stale = slot
        .as_ref()
        .map_or(true, |grid| !grid.matches(params.connection_distance, origin, extent));
    if stale {
        *slot = None;
    }

    slot.get_or_insert_with(|| SpatialGrid::new(params.connection_distance, origin, extent))
}

impl Default for FieldRenderer {
    fn default() -> Self {
        Self::new()
    }
}
