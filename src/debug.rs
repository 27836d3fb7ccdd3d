/*
 * Debug Information Module
 *
 * Per-frame figures shown in the debug overlay:
 * - FPS and frame time
 * - Delta frames handed to the simulation
 * - Links drawn and pair tests spent finding them
 */

use std::time::Duration;

use crate::renderer::RenderStats;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub delta_frames: f32,
    pub render: RenderStats,
    pub ticks: u64,
}

impl DebugInfo {
    pub fn record_frame(&mut self, delta_frames: f32, render: RenderStats) {
        self.delta_frames = delta_frames;
        self.render = render;
        self.ticks += 1;
    }

    pub fn lines(&self) -> [String; 5] {
        [
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Delta frames: {:.2}", self.delta_frames),
            format!("Particles: {}  Links: {}", self.render.particles, self.render.links),
            format!("Pair tests: {}", self.render.pair_tests),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_latest_frame() {
        let mut info = DebugInfo::default();
        info.record_frame(
            1.5,
            RenderStats {
                particles: 70,
                pair_tests: 2415,
                links: 31,
            },
        );
        assert_eq!(info.ticks, 1);
        let lines = info.lines();
        assert_eq!(lines[2], "Delta frames: 1.50");
        assert_eq!(lines[3], "Particles: 70  Links: 31");
        assert_eq!(lines[4], "Pair tests: 2415");
    }
}
