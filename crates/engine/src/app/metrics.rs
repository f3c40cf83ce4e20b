use std::time::Duration;

/// Loop rates over one closed window of host time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetricsSnapshot {
    pub fps: f32,
    pub tps: f32,
    pub frame_time_ms: f32,
    /// Most fixed steps any single frame of the window ran.
    pub peak_ticks_per_frame: u32,
    pub entity_count: usize,
}

/// Counts frames and ticks until the window spans its length. Host time only
/// advances through [`MetricsWindow::record_frame`], so headless runs fed
/// synthetic deltas report the rates they simulated.
#[derive(Debug)]
pub(crate) struct MetricsWindow {
    length: Duration,
    elapsed: Duration,
    frames: u32,
    ticks: u32,
    peak_ticks_per_frame: u32,
}

impl MetricsWindow {
    pub(crate) fn new(length: Duration) -> Self {
        Self {
            length,
            elapsed: Duration::ZERO,
            frames: 0,
            ticks: 0,
            peak_ticks_per_frame: 0,
        }
    }

    pub(crate) fn record_frame(&mut self, frame_dt: Duration, ticks_run: u32) {
        self.elapsed = self.elapsed.saturating_add(frame_dt);
        self.frames = self.frames.saturating_add(1);
        self.ticks = self.ticks.saturating_add(ticks_run);
        self.peak_ticks_per_frame = self.peak_ticks_per_frame.max(ticks_run);
    }

    /// Closes the window once it is long enough and starts a fresh one.
    pub(crate) fn close_if_due(&mut self, entity_count: usize) -> Option<LoopMetricsSnapshot> {
        if self.elapsed < self.length {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32().max(f32::EPSILON);
        let frames = self.frames.max(1) as f32;
        let snapshot = LoopMetricsSnapshot {
            fps: self.frames as f32 / seconds,
            tps: self.ticks as f32 / seconds,
            frame_time_ms: seconds * 1000.0 / frames,
            peak_ticks_per_frame: self.peak_ticks_per_frame,
            entity_count,
        };
        *self = Self::new(self.length);
        Some(snapshot)
    }
}
