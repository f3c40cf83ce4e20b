use engine::LoopConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::config::{resolve_tuning_path, ConfigError, Tuning};
use super::gameplay::{Arena, ArenaLayout};

const RUN_SECONDS_ENV_VAR: &str = "ARENA_RUN_SECONDS";
const DEFAULT_RUN_SECONDS: f32 = 20.0;

pub struct AppWiring {
    pub config: LoopConfig,
    pub arena: Arena,
    pub run_seconds: f32,
}

pub fn build_app() -> Result<AppWiring, ConfigError> {
    init_tracing();
    info!("=== Arena Startup ===");

    let tuning = Tuning::load_or_default(&resolve_tuning_path())?;
    let arena = Arena::new(tuning, ArenaLayout::demo())?;
    let run_seconds = parse_run_seconds(std::env::var(RUN_SECONDS_ENV_VAR).ok().as_deref());

    Ok(AppWiring {
        config: LoopConfig::default(),
        arena,
        run_seconds,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn parse_run_seconds(raw: Option<&str>) -> f32 {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return DEFAULT_RUN_SECONDS;
    };
    match raw.parse::<f32>() {
        Ok(seconds) if seconds.is_finite() && seconds > 0.0 => seconds,
        _ => {
            warn!(
                value = raw,
                default_seconds = DEFAULT_RUN_SECONDS,
                "run_seconds_invalid_using_default"
            );
            DEFAULT_RUN_SECONDS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_seconds_falls_back_on_missing_or_bad_values() {
        assert_eq!(parse_run_seconds(None), DEFAULT_RUN_SECONDS);
        assert_eq!(parse_run_seconds(Some("  ")), DEFAULT_RUN_SECONDS);
        assert_eq!(parse_run_seconds(Some("soon")), DEFAULT_RUN_SECONDS);
        assert_eq!(parse_run_seconds(Some("-3")), DEFAULT_RUN_SECONDS);
        assert_eq!(parse_run_seconds(Some(" 7.5 ")), 7.5);
    }
}
