/*
 * Pointer Module
 *
 * This module defines the PointerTracker that turns raw pointer and touch
 * events into a smoothed position used for parallax.
 *
 * Input handlers only move the target. The smoothed position follows the
 * target once per simulation tick with an exponential low-pass filter, no
 * matter how many events arrived in between, so input frequency never changes
 * how fast the field reacts.
 */

use nannou::prelude::*;

use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTracker {
    current: Vec2,
    target: Vec2,
    smoothing: f32,
}

impl PointerTracker {
    // Start at rest in the middle of the viewport
    pub fn new(viewport: &Viewport, smoothing: f32) -> Self {
        let center = viewport.center();
        Self {
            current: center,
            target: center,
            smoothing: smoothing.clamp(0.0, 1.0),
        }
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(0.0, 1.0);
    }

    /// Record an absolute pointer position in viewport space.
    pub fn move_to(&mut self, position: Vec2) {
        self.target = position;
    }

    /// Pointer left the window or the touch was cancelled: drift back to center.
    pub fn leave(&mut self, viewport: &Viewport) {
        self.target = viewport.center();
    }

    // Once per frame: current += (target - current) * smoothing
    pub fn tick(&mut self) {
        self.current += (self.target - self.current) * self.smoothing;
    }
}
