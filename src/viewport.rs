/*
 * Viewport Module
 *
 * This module defines the Viewport struct that tracks the logical size of the
 * window and its device pixel ratio. The simulation works in viewport space:
 * origin at the top-left corner, x to the right, y downwards, one unit per
 * logical pixel. nannou reports positions centered on the window with y up,
 * so conversions between the two live here.
 */

use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, scale_factor: f32) -> Self {
        Self {
            width,
            height,
            // A missing or bogus ratio falls back to 1
            scale_factor: if scale_factor > 0.0 { scale_factor } else { 1.0 },
        }
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width / 2.0, self.height / 2.0)
    }

    // Apply a resize event, keeping the latest size and pixel ratio
    pub fn resize(&mut self, width: f32, height: f32, scale_factor: f32) {
        *self = Viewport::new(width, height, scale_factor);
    }

    /// Size of the backing surface in physical pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.scale_factor).round() as u32,
            (self.height * self.scale_factor).round() as u32,
        )
    }

    // Convert a nannou window position (centered, y up) to viewport space
    pub fn from_window(&self, point: Vec2) -> Vec2 {
        vec2(point.x + self.width / 2.0, self.height / 2.0 - point.y)
    }

    // Convert a viewport position back to nannou window space
    pub fn to_window(&self, point: Vec2) -> Vec2 {
        vec2(point.x - self.width / 2.0, self.height / 2.0 - point.y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_half_extent() {
        let viewport = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(viewport.center(), vec2(400.0, 300.0));
    }

    #[test]
    fn backing_size_scales_by_pixel_ratio() {
        let viewport = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(viewport.backing_size(), (1600, 1200));

        let fractional = Viewport::new(1000.0, 500.0, 1.5);
        assert_eq!(fractional.backing_size(), (1500, 750));
    }

    #[test]
    fn invalid_pixel_ratio_falls_back_to_one() {
        assert_eq!(Viewport::new(10.0, 10.0, 0.0).scale_factor, 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, -3.0).scale_factor, 1.0);
    }

    #[test]
    fn window_coordinates_round_trip_through_origin_shift() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);

        // Window center is the viewport center
        assert_eq!(viewport.from_window(Vec2::ZERO), vec2(400.0, 300.0));
        // Top-left corner of the window in nannou space
        assert_eq!(viewport.from_window(vec2(-400.0, 300.0)), Vec2::ZERO);
        assert_eq!(viewport.to_window(vec2(800.0, 600.0)), vec2(400.0, -300.0));
    }

    #[test]
    fn resize_replaces_every_dimension() {
        let mut viewport = Viewport::default();
        viewport.resize(320.0, 240.0, 3.0);
        assert_eq!(viewport, Viewport::new(320.0, 240.0, 3.0));
    }
}
