use std::process::ExitCode;
use std::time::Duration;

use engine::{run_headless, Scene, SceneCommand, SceneWorld, Vec2};
use tracing::{error, info};

use super::bootstrap::AppWiring;
use super::gameplay::{Arena, ArenaStats, AttackInput, Facing};

const FRAME_DELTA: Duration = Duration::from_micros(16_667);
const WALK_SPEED_UNITS_PER_SECOND: f32 = 3.0;
const PRESS_INTERVAL_SECONDS: f32 = 0.25;
const SLAM_EVERY_PRESSES: u32 = 8;
const SLAM_RADIUS: f32 = 1.25;
const SLAM_DAMAGE: f32 = 25.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PressCounts {
    started: u32,
    queued: u32,
    dropped: u32,
    slams: u32,
}

/// Stands in for player input: walks the target right through the arena and
/// mashes attack on a fixed cadence. Every eighth press is a stunning slam
/// around the player instead of a swing.
struct ScriptedRun {
    arena: Arena,
    press_timer_seconds: f32,
    presses: u32,
    counts: PressCounts,
    final_stats: ArenaStats,
}

impl ScriptedRun {
    fn new(arena: Arena) -> Self {
        Self {
            arena,
            press_timer_seconds: 0.0,
            presses: 0,
            counts: PressCounts::default(),
            final_stats: ArenaStats::default(),
        }
    }

    fn press(&mut self, world: &mut SceneWorld) {
        self.presses += 1;
        if self.presses % SLAM_EVERY_PRESSES != 0 {
            match self.arena.melee_attack(Facing::Right, false) {
                AttackInput::Started => self.counts.started += 1,
                AttackInput::Queued => self.counts.queued += 1,
                AttackInput::Dropped => self.counts.dropped += 1,
            }
            return;
        }

        let center = self
            .arena
            .player()
            .and_then(|player| world.position_of(player.id()));
        if let Some(center) = center {
            self.arena
                .melee_strike(world, center, SLAM_RADIUS, SLAM_DAMAGE, true);
            self.counts.slams += 1;
        }
    }
}

impl Scene for ScriptedRun {
    fn load(&mut self, world: &mut SceneWorld) {
        self.arena.load(world);
        self.arena
            .set_target_velocity(Vec2::new(WALK_SPEED_UNITS_PER_SECOND, 0.0));
        self.press_timer_seconds = 0.0;
        self.presses = 0;
        self.counts = PressCounts::default();
    }

    fn update(&mut self, fixed_dt_seconds: f32, world: &mut SceneWorld) -> SceneCommand {
        let command = self.arena.update(fixed_dt_seconds, world);

        self.press_timer_seconds += fixed_dt_seconds;
        if self.press_timer_seconds >= PRESS_INTERVAL_SECONDS {
            self.press_timer_seconds = 0.0;
            self.press(world);
        }
        command
    }

    fn unload(&mut self, world: &mut SceneWorld) {
        self.final_stats = self.arena.stats();
        info!(
            presses = self.presses,
            swings_started = self.counts.started,
            swings_queued = self.counts.queued,
            swings_dropped = self.counts.dropped,
            slams = self.counts.slams,
            "scripted_run_finished"
        );
        self.arena.unload(world);
    }

    fn debug_title(&self, world: &SceneWorld) -> Option<String> {
        self.arena.debug_title(world)
    }
}

fn frame_count(run_seconds: f32) -> usize {
    (run_seconds / FRAME_DELTA.as_secs_f32()).ceil() as usize
}

pub fn run(app: AppWiring) -> ExitCode {
    let frames = frame_count(app.run_seconds);
    let mut scene = ScriptedRun::new(app.arena);
    let mut world = SceneWorld::default();

    match run_headless(
        &app.config,
        &mut scene,
        &mut world,
        std::iter::repeat(FRAME_DELTA).take(frames),
    ) {
        Ok(summary) => {
            let stats = scene.final_stats;
            if let Some(metrics) = summary.last_metrics {
                info!(
                    fps = metrics.fps,
                    tps = metrics.tps,
                    frame_time_ms = metrics.frame_time_ms,
                    peak_ticks_per_frame = metrics.peak_ticks_per_frame,
                    "run_last_metrics"
                );
            }
            info!(
                frames = summary.frames,
                ticks = summary.ticks,
                simulated_seconds = summary.simulated_seconds,
                kills = stats.kills,
                remains = stats.remains_spawned,
                enemies_spawned = stats.enemies_spawned,
                projectiles_fired = stats.projectiles_fired,
                player_hits = stats.player_hits,
                player_respawns = stats.player_respawns,
                camera_transitions = stats.camera_transitions,
                props_broken = stats.props_broken,
                loot_collected = stats.loot_collected,
                "run_summary"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "run_failed");
            ExitCode::FAILURE
        }
    }
}
