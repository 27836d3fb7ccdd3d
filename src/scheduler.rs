/*
 * Frame Scheduler Module
 *
 * This module drives the update -> render cycle. Each tick turns the time
 * since the previous tick into "delta frames" (elapsed / 16.67ms), clamps it
 * and hands it to the frame callback, then asks the tick source for the next
 * tick. Stopping the scheduler cancels the pending tick; nothing re-arms it.
 *
 * The clamp bounds the simulation step after a stall (minimised window, slow
 * frame), trading temporal accuracy for a field that never visibly jumps.
 *
 * Tick sources are injectable: the app arms one tick per display refresh,
 * tests fire ticks by hand with fake timestamps.
 */

/// Handle for a requested tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(pub u64);

/// Something that can deliver one future tick on request.
pub trait TickSource {
    fn request_tick(&mut self) -> TickId;
    fn cancel(&mut self, id: TickId);
}

/// A tick source with at most one armed tick, fired by the host loop.
///
/// The nannou app arms it from the scheduler and fires it once per
/// display-synchronised update.
#[derive(Debug, Default)]
pub struct ArmedTick {
    next_id: u64,
    armed: Option<TickId>,
}

impl ArmedTick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Consume the armed tick, if any.
    pub fn fire(&mut self) -> Option<TickId> {
        self.armed.take()
    }
}

impl TickSource for ArmedTick {
    fn request_tick(&mut self) -> TickId {
        let id = TickId(self.next_id);
        self.next_id += 1;
        self.armed = Some(id);
        id
    }

    fn cancel(&mut self, id: TickId) {
        if self.armed == Some(id) {
            self.armed = None;
        }
    }
}

/// Frame-rate-normalised delta, clamped to `[0, max_delta]`.
#[inline]
pub fn delta_frames(elapsed_ms: f64, target_frame_ms: f64, max_delta: f32) -> f32 {
    if target_frame_ms <= 0.0 {
        return 0.0;
    }
    // NaN or negative ratios and a non-positive ceiling give 0
    ((elapsed_ms / target_frame_ms) as f32).max(0.0).min(max_delta).max(0.0)
}

pub struct FrameScheduler<S: TickSource> {
    source: S,
    pending: Option<TickId>,
    last_timestamp: f64,
    running: bool,
    target_frame_ms: f64,
    max_delta: f32,
}

impl<S: TickSource> FrameScheduler<S> {
    pub fn new(source: S, target_frame_ms: f64, max_delta: f32) -> Self {
        Self {
            source,
            pending: None,
            last_timestamp: 0.0,
            running: false,
            target_frame_ms,
            max_delta,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending(&self) -> Option<TickId> {
        self.pending
    }

    // Begin ticking; `now_ms` is the reference for the first delta
    pub fn start(&mut self, now_ms: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_timestamp = now_ms;
        self.pending = Some(self.source.request_tick());
        log::info!("Frame scheduler started");
    }

    // Cancel the pending tick and never request another
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(id) = self.pending.take() {
            self.source.cancel(id);
        }
        log::info!("Frame scheduler stopped");
    }

    /// Run one frame for tick `id` at `timestamp_ms`.
    ///
    /// Returns the delta handed to `frame`, or `None` if the tick was stale
    /// (cancelled, superseded or delivered after `stop`).
    pub fn tick<F: FnOnce(f32)>(&mut self, id: TickId, timestamp_ms: f64, frame: F) -> Option<f32> {
        if !self.running || self.pending != Some(id) {
            return None;
        }
        self.pending = None;

        let elapsed = timestamp_ms - self.last_timestamp;
        self.last_timestamp = timestamp_ms;

        let delta = delta_frames(elapsed, self.target_frame_ms, self.max_delta);
        if delta >= self.max_delta {
            log::debug!("Frame delta clamped to {} after {:.0}ms", self.max_delta, elapsed);
        }

        frame(delta);
        self.pending = Some(self.source.request_tick());

        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Tick source that records every request and cancellation.
    #[derive(Default)]
    struct FakeTicks {
        requested: Vec<TickId>,
        cancelled: Vec<TickId>,
    }

    impl TickSource for FakeTicks {
        fn request_tick(&mut self) -> TickId {
            let id = TickId(self.requested.len() as u64);
            self.requested.push(id);
            id
        }

        fn cancel(&mut self, id: TickId) {
            self.cancelled.push(id);
        }
    }

    fn scheduler() -> FrameScheduler<FakeTicks> {
        FrameScheduler::new(FakeTicks::default(), FRAME_MS, 3.0)
    }

    #[test]
    fn one_frame_at_sixty_hz_is_one_delta() {
        assert!((delta_frames(FRAME_MS, FRAME_MS, 3.0) - 1.0).abs() < 1e-6);
        assert!((delta_frames(FRAME_MS / 2.0, FRAME_MS, 3.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn long_stall_is_clamped() {
        assert_eq!(delta_frames(10_000.0, FRAME_MS, 3.0), 3.0);
    }

    #[test]
    fn backwards_clock_yields_zero() {
        assert_eq!(delta_frames(-5.0, FRAME_MS, 3.0), 0.0);
    }

    #[test]
    fn bad_inputs_never_panic_and_never_go_negative() {
        assert_eq!(delta_frames(16.0, 16.0, -1.0), 0.0);
        assert_eq!(delta_frames(f64::NAN, FRAME_MS, 3.0), 0.0);
        assert_eq!(delta_frames(FRAME_MS, f64::NAN, 3.0), 0.0);
        assert!((delta_frames(FRAME_MS, FRAME_MS, f32::NAN) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ticks_rearm_themselves() {
        let mut scheduler = scheduler();
        scheduler.start(0.0);

        let mut deltas = Vec::new();
        for frame in 1..=5 {
            let id = scheduler.pending().unwrap();
            scheduler.tick(id, frame as f64 * FRAME_MS, |d| deltas.push(d));
        }

        assert_eq!(deltas.len(), 5);
        assert!(deltas.iter().all(|d| (d - 1.0).abs() < 1e-4));
        assert_eq!(scheduler.source().requested.len(), 6);
    }

    #[test]
    fn ten_second_stall_is_clamped_by_the_scheduler() {
        let mut scheduler = scheduler();
        scheduler.start(1_000.0);

        let id = scheduler.pending().unwrap();
        let delta = scheduler.tick(id, 11_000.0, |_| {}).unwrap();
        assert_eq!(delta, 3.0);

        // The stall does not carry over into the next frame
        let id = scheduler.pending().unwrap();
        let delta = scheduler.tick(id, 11_000.0 + FRAME_MS, |_| {}).unwrap();
        assert!((delta - 1.0).abs() < 1e-4);
    }

    #[test]
    fn stop_cancels_pending_tick_and_ignores_late_delivery() {
        let mut scheduler = scheduler();
        scheduler.start(0.0);
        let id = scheduler.pending().unwrap();

        scheduler.stop();
        assert_eq!(scheduler.source().cancelled, vec![id]);
        assert!(!scheduler.is_running());

        let mut ran = false;
        assert_eq!(scheduler.tick(id, FRAME_MS, |_| ran = true), None);
        assert!(!ran);
        assert_eq!(scheduler.source().requested.len(), 1);
    }

    #[test]
    fn stale_tick_ids_are_ignored() {
        let mut scheduler = scheduler();
        scheduler.start(0.0);
        let id = scheduler.pending().unwrap();
        scheduler.tick(id, FRAME_MS, |_| {});

        // Replaying the consumed tick does nothing
        assert_eq!(scheduler.tick(id, 2.0 * FRAME_MS, |_| {}), None);
    }

    #[test]
    fn armed_tick_fires_once_and_can_be_cancelled() {
        let mut source = ArmedTick::new();
        let id = source.request_tick();
        assert!(source.is_armed());
        assert_eq!(source.fire(), Some(id));
        assert_eq!(source.fire(), None);

        let id = source.request_tick();
        source.cancel(id);
        assert_eq!(source.fire(), None);
    }

    #[test]
    fn scheduler_over_armed_tick_runs_frame_by_frame() {
        let mut scheduler = FrameScheduler::new(ArmedTick::new(), FRAME_MS, 3.0);
        scheduler.start(0.0);

        let mut frames = 0;
        for frame in 1..=3 {
            let id = scheduler.source_mut().fire().unwrap();
            scheduler.tick(id, frame as f64 * FRAME_MS, |_| frames += 1);
        }
        assert_eq!(frames, 3);

        scheduler.stop();
        assert_eq!(scheduler.source_mut().fire(), None);
    }
}
