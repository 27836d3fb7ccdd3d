/*
 * Surface Module
 *
 * nannou-backed implementation of the renderer's Surface trait.
 *
 * The surface keeps its own Draw so a frame can be fully built during the
 * update tick and presented later from the view callback. Coordinates arrive
 * in viewport space (top-left origin, y down) and are mapped to nannou's
 * centered, y-up space with the transform recomputed on each resize. winit
 * owns the swapchain, so the physical backing size is tracked here for
 * reporting while nannou scales logical points by the window's scale factor.
 */

use nannou::prelude::*;

use crate::renderer::{Glow, Surface};
use crate::viewport::Viewport;

// Concentric translucent rings that stand in for a blurred shadow
const GLOW_LAYERS: usize = 4;

pub struct NannouSurface {
    draw: Draw,
    viewport: Viewport,
    backing: (u32, u32),
    background: Rgba,
}

impl NannouSurface {
    pub fn new(viewport: &Viewport, background: Rgba) -> Self {
        let mut surface = Self {
            draw: Draw::new(),
            viewport: *viewport,
            backing: (0, 0),
            background,
        };
        surface.resize(viewport);
        surface
    }

    pub fn draw(&self) -> &Draw {
        &self.draw
    }

    pub fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    #[inline]
    fn to_window(&self, point: Vec2) -> Vec2 {
        self.viewport.to_window(point)
    }
}

impl Surface for NannouSurface {
    fn resize(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
        self.backing = viewport.backing_size();
        // A fresh Draw starts from the identity transform
        self.draw = Draw::new();
    }

    fn clear(&mut self) {
        self.draw.reset();
        self.draw.background().color(self.background);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow: Glow) {
        let center = self.to_window(center);

        if glow.blur > 0.0 {
            // Outermost ring first so the brighter inner rings land on top
            for layer in (1..=GLOW_LAYERS).rev() {
                let t = layer as f32 / GLOW_LAYERS as f32;
                let mut ring = glow.color;
                ring.alpha *= (1.0 - t * t) / GLOW_LAYERS as f32 + 0.05;
                self.draw.ellipse().xy(center).radius(radius + glow.blur * t).color(ring);
            }
        }

        self.draw.ellipse().xy(center).radius(radius).color(color);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.draw
            .line()
            .start(self.to_window(from))
            .end(self.to_window(to))
            .weight(width)
            .caps_round()
            .color(color);
    }
}
