use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use super::metrics::MetricsWindow;
use super::{LoopMetricsSnapshot, Scene, SceneCommand, SceneWorld};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(1),
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.target_tps == 0 {
            return Err(AppError::InvalidLoopConfig {
                field: "target_tps",
                reason: "must be greater than zero",
            });
        }
        if self.max_ticks_per_frame == 0 {
            return Err(AppError::InvalidLoopConfig {
                field: "max_ticks_per_frame",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    pub fn fixed_dt(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_tps.max(1) as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("invalid loop config: {field} {reason}")]
    InvalidLoopConfig {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub ticks: u64,
    pub simulated_seconds: f32,
    pub dropped_backlog: Duration,
    pub quit_requested: bool,
    /// The most recent closed metrics window, if the run lasted that long.
    pub last_metrics: Option<LoopMetricsSnapshot>,
}

/// Drives `scene` with a fixed timestep over host frame deltas supplied by
/// the caller. The scene is loaded before the first frame and unloaded after
/// the last one (or after it asks to quit).
pub fn run_headless<I>(
    config: &LoopConfig,
    scene: &mut dyn Scene,
    world: &mut SceneWorld,
    frame_deltas: I,
) -> Result<RunSummary, AppError>
where
    I: IntoIterator<Item = Duration>,
{
    config.validate()?;

    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let fixed_dt = config.fixed_dt();
    let fixed_dt_seconds = fixed_dt.as_secs_f32();
    info!(
        target_tps = config.target_tps,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame = config.max_ticks_per_frame,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        "loop_config"
    );

    scene.load(world);
    world.apply_pending();
    info!(entity_count = world.entity_count(), "scene_loaded");

    let mut summary = RunSummary::default();
    let mut accumulator = Duration::ZERO;
    let mut metrics_window = MetricsWindow::new(metrics_log_interval);

    for raw_frame_dt in frame_deltas {
        let clamped_frame_dt = clamp_frame_delta(raw_frame_dt, max_frame_delta);
        accumulator = accumulator.saturating_add(clamped_frame_dt);

        let step_plan = plan_sim_steps(accumulator, fixed_dt, config.max_ticks_per_frame);
        let mut ticks_run = 0u32;
        for _ in 0..step_plan.ticks_to_run {
            let command = scene.update(fixed_dt_seconds, world);
            world.apply_pending();
            ticks_run += 1;
            summary.ticks = summary.ticks.saturating_add(1);
            if command == SceneCommand::Quit {
                summary.quit_requested = true;
                break;
            }
        }
        accumulator = step_plan.remaining_accumulator;

        if step_plan.dropped_backlog > Duration::ZERO {
            summary.dropped_backlog = summary
                .dropped_backlog
                .saturating_add(step_plan.dropped_backlog);
            warn!(
                dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                max_ticks_per_frame = config.max_ticks_per_frame,
                "sim_clamp_triggered"
            );
        }

        metrics_window.record_frame(raw_frame_dt, ticks_run);
        summary.frames = summary.frames.saturating_add(1);
        if let Some(snapshot) = metrics_window.close_if_due(world.entity_count()) {
            summary.last_metrics = Some(snapshot);
            info!(
                fps = snapshot.fps,
                tps = snapshot.tps,
                frame_time_ms = snapshot.frame_time_ms,
                peak_ticks_per_frame = snapshot.peak_ticks_per_frame,
                entity_count = snapshot.entity_count,
                title = scene.debug_title(world).as_deref().unwrap_or("-"),
                "loop_metrics"
            );
        }

        if summary.quit_requested {
            info!(reason = "scene_quit", "shutdown_requested");
            break;
        }
    }

    summary.simulated_seconds = summary.ticks as f32 * fixed_dt_seconds;
    scene.unload(world);
    info!(
        frames = summary.frames,
        ticks = summary.ticks,
        simulated_seconds = summary.simulated_seconds,
        "shutdown"
    );
    Ok(summary)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    if accumulator >= fixed_dt {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: Duration::ZERO,
            dropped_backlog: accumulator,
        }
    } else {
        StepPlan {
            ticks_to_run,
            remaining_accumulator: accumulator,
            dropped_backlog: Duration::ZERO,
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}
