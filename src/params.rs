/*
 * Field Parameters Module
 *
 * This module defines the FieldParams struct that holds every tunable value of
 * the particle field: population, motion, pointer smoothing, frame pacing and
 * the visual style of particles and links. The values load from the `[field]`
 * section of the configuration and some can be adjusted live from the debug
 * overlay.
 *
 * The smoothing factor and drift rate are visual tuning knobs; changing them
 * alters the look, not any behavioral contract.
 */

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{CONNECTION_DISTANCE, PARTICLE_COUNT};

/// How the renderer finds particle pairs that are close enough to link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStrategy {
    /// Test every unordered pair, O(n²). Fine at the default population.
    BruteForce,
    /// Bucket particles into cells of `connection_distance` and only test
    /// neighbouring cells.
    SpatialGrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub particle_count: usize,

    // Motion
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_parallax: f32,
    pub max_parallax: f32,
    pub drift_rate: f32,
    pub drift_amplitude: f32,
    pub wrap_margin: f32,

    // Pointer
    pub pointer_smoothing: f32,

    // Frame pacing
    pub target_frame_ms: f64,
    pub max_delta_frames: f32,

    // Links
    pub connection_distance: f32,
    pub max_line_alpha: f32,
    pub line_width: f32,
    pub connection_strategy: ConnectionStrategy,

    // Style, all [r, g, b, a] in 0..=1
    pub particle_color: [f32; 4],
    pub glow_color: [f32; 4],
    pub glow_blur: f32,
    pub line_color: [f32; 3],
    pub background_color: [f32; 4],
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            min_speed: 0.15,
            max_speed: 0.40,
            min_radius: 1.2,
            max_radius: 3.0,
            min_parallax: 0.015,
            max_parallax: 0.05,
            drift_rate: 0.0015,
            drift_amplitude: 0.12,
            wrap_margin: 50.0,
            pointer_smoothing: 0.08,
            target_frame_ms: 1000.0 / 60.0,
            max_delta_frames: 3.0,
            connection_distance: CONNECTION_DISTANCE,
            max_line_alpha: 0.35,
            line_width: 1.0,
            connection_strategy: ConnectionStrategy::BruteForce,
            particle_color: [1.0, 1.0, 1.0, 0.78],
            glow_color: [0.4, 0.667, 1.0, 0.4],
            glow_blur: 12.0,
            line_color: [1.0, 1.0, 1.0],
            background_color: [0.02, 0.02, 0.06, 1.0],
        }
    }
}

impl FieldParams {
    pub fn particle_rgba(&self) -> Rgba {
        to_rgba(self.particle_color)
    }

    pub fn glow_rgba(&self) -> Rgba {
        to_rgba(self.glow_color)
    }

    pub fn background_rgba(&self) -> Rgba {
        to_rgba(self.background_color)
    }

    // Line color carries the per-link alpha
    pub fn line_rgba(&self, alpha: f32) -> Rgba {
        let [r, g, b] = self.line_color;
        rgba(r, g, b, alpha)
    }

    // Get parameter ranges for UI sliders
    pub fn get_connection_distance_range() -> std::ops::RangeInclusive<f32> {
        40.0..=400.0
    }

    pub fn get_line_alpha_range() -> std::ops::RangeInclusive<f32> {
        0.0..=1.0
    }

    pub fn get_smoothing_range() -> std::ops::RangeInclusive<f32> {
        0.01..=1.0
    }

    /// Reset every out-of-range or non-finite value to its default and log a
    /// warning for it. Returns the names of the values that were reset.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let d = FieldParams::default();
        let mut reset = Vec::new();

        // Ranges are reset as a pair so min <= max keeps holding
        if !valid_range(self.min_speed, self.max_speed, 0.0, f32::MAX) {
            self.min_speed = d.min_speed;
            self.max_speed = d.max_speed;
            reset.push("min_speed/max_speed");
        }
        if !valid_range(self.min_radius, self.max_radius, f32::MIN_POSITIVE, f32::MAX) {
            self.min_radius = d.min_radius;
            self.max_radius = d.max_radius;
            reset.push("min_radius/max_radius");
        }
        if !valid_range(self.min_parallax, self.max_parallax, d.min_parallax, d.max_parallax) {
            self.min_parallax = d.min_parallax;
            self.max_parallax = d.max_parallax;
            reset.push("min_parallax/max_parallax");
        }

        check(&mut reset, "drift_rate", positive(self.drift_rate), &mut self.drift_rate, d.drift_rate);
        check(&mut reset, "drift_amplitude", non_negative(self.drift_amplitude), &mut self.drift_amplitude, d.drift_amplitude);
        check(&mut reset, "wrap_margin", non_negative(self.wrap_margin), &mut self.wrap_margin, d.wrap_margin);
        check(
            &mut reset,
            "pointer_smoothing",
            positive(self.pointer_smoothing) && self.pointer_smoothing <= 1.0,
            &mut self.pointer_smoothing,
            d.pointer_smoothing,
        );
        check(
            &mut reset,
            "target_frame_ms",
            self.target_frame_ms.is_finite() && self.target_frame_ms > 0.0,
            &mut self.target_frame_ms,
            d.target_frame_ms,
        );
        check(&mut reset, "max_delta_frames", positive(self.max_delta_frames), &mut self.max_delta_frames, d.max_delta_frames);
        check(&mut reset, "connection_distance", positive(self.connection_distance), &mut self.connection_distance, d.connection_distance);
        check(
            &mut reset,
            "max_line_alpha",
            unit(&[self.max_line_alpha]),
            &mut self.max_line_alpha,
            d.max_line_alpha,
        );
        check(&mut reset, "line_width", positive(self.line_width), &mut self.line_width, d.line_width);
        check(&mut reset, "glow_blur", non_negative(self.glow_blur), &mut self.glow_blur, d.glow_blur);
        check(&mut reset, "particle_color", unit(&self.particle_color), &mut self.particle_color, d.particle_color);
        check(&mut reset, "glow_color", unit(&self.glow_color), &mut self.glow_color, d.glow_color);
        check(&mut reset, "line_color", unit(&self.line_color), &mut self.line_color, d.line_color);
        check(&mut reset, "background_color", unit(&self.background_color), &mut self.background_color, d.background_color);

        for name in &reset {
            log::warn!("Invalid [field] {}, using the default", name);
        }
        reset
    }
}

fn to_rgba([r, g, b, a]: [f32; 4]) -> Rgba {
    rgba(r, g, b, a)
}

fn check<T>(reset: &mut Vec<&'static str>, name: &'static str, valid: bool, value: &mut T, default: T) {
    if !valid {
        *value = default;
        reset.push(name);
    }
}

fn valid_range(min: f32, max: f32, low: f32, high: f32) -> bool {
    min.is_finite() && max.is_finite() && low <= min && min <= max && max <= high
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

// Every component finite and within 0..=1
fn unit(values: &[f32]) -> bool {
    values.iter().all(|v| (0.0..=1.0).contains(v))
}
