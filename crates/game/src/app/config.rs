use std::fs;
use std::path::{Path, PathBuf};

use engine::{OrthographicViewport, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub const TUNING_PATH_ENV_VAR: &str = "ARENA_TUNING_PATH";
pub const DEFAULT_TUNING_PATH: &str = "assets/tuning.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {origin} at {json_path}: {source}")]
    Parse {
        origin: String,
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid tuning value {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Every gameplay constant the arena reads. Each section defaults to the
/// values the enemies were balanced with, so a partial file only overrides
/// what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub rng_seed: u64,
    pub charger: ChargerTuning,
    pub shooter: ShooterTuning,
    pub orbiter: OrbiterTuning,
    pub turret: TurretTuning,
    pub projectile: ProjectileTuning,
    pub spawner: SpawnerTuning,
    pub camera: CameraTuning,
    pub feel: FeelTuning,
    pub player: PlayerTuning,
    pub melee: MeleeTuning,
    pub destructible: DestructibleTuning,
    pub loot: LootTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            rng_seed: 0x5eed_a7e4,
            charger: ChargerTuning::default(),
            shooter: ShooterTuning::default(),
            orbiter: OrbiterTuning::default(),
            turret: TurretTuning::default(),
            projectile: ProjectileTuning::default(),
            spawner: SpawnerTuning::default(),
            camera: CameraTuning::default(),
            feel: FeelTuning::default(),
            player: PlayerTuning::default(),
            melee: MeleeTuning::default(),
            destructible: DestructibleTuning::default(),
            loot: LootTuning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargerTuning {
    pub max_health: f32,
    pub detection_span: f32,
    pub dwell_seconds: f32,
    pub charge_speed: f32,
    pub stop_threshold: f32,
    pub friction: f32,
    pub min_slide_speed: f32,
    pub stun_seconds: f32,
    pub contact_damage: f32,
    pub contact_radius: f32,
}

impl Default for ChargerTuning {
    fn default() -> Self {
        Self {
            max_health: 50.0,
            detection_span: 5.0,
            dwell_seconds: 2.0,
            charge_speed: 12.0,
            stop_threshold: 0.5,
            friction: 0.5,
            min_slide_speed: 0.3,
            stun_seconds: 1.0,
            contact_damage: 20.0,
            contact_radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterTuning {
    pub max_health: f32,
    pub detection_radius: f32,
    pub move_speed: f32,
    /// Full size of the engagement box around the target.
    pub close_box_size: Vec2,
    pub close_box_offset: Vec2,
    pub fire_interval_seconds: f32,
    pub reposition_interval_seconds: f32,
    pub stun_seconds: f32,
    pub body_radius: f32,
}

impl Default for ShooterTuning {
    fn default() -> Self {
        Self {
            max_health: 30.0,
            detection_radius: 10.0,
            move_speed: 4.0,
            close_box_size: Vec2::new(4.0, 4.0),
            close_box_offset: Vec2::new(0.0, 1.0),
            fire_interval_seconds: 1.0,
            reposition_interval_seconds: 2.0,
            stun_seconds: 1.0,
            body_radius: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbiterTuning {
    pub max_health: f32,
    pub contact_damage: f32,
    pub contact_radius: f32,
}

impl Default for OrbiterTuning {
    fn default() -> Self {
        Self {
            max_health: 10.0,
            contact_damage: 10.0,
            contact_radius: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingTuning {
    pub ball_count: u32,
    pub radius: f32,
    /// Degrees per second; positive turns counter-clockwise.
    pub angular_speed_deg: f32,
}

impl Default for RingTuning {
    fn default() -> Self {
        Self {
            ball_count: 8,
            radius: 2.0,
            angular_speed_deg: 90.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretTuning {
    pub core_health: f32,
    pub core_radius: f32,
    pub rings: Vec<RingTuning>,
}

impl Default for TurretTuning {
    fn default() -> Self {
        Self {
            core_health: 30.0,
            core_radius: 0.75,
            rings: vec![
                RingTuning::default(),
                RingTuning {
                    ball_count: 12,
                    radius: 3.5,
                    angular_speed_deg: -60.0,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub lifetime_seconds: f32,
    pub damage: f32,
    pub radius: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 12.0,
            lifetime_seconds: 3.0,
            damage: 15.0,
            radius: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnableSpecies {
    Charger,
    Shooter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerTuning {
    pub interval_seconds: f32,
    pub max_alive: usize,
    pub area_size: Vec2,
    pub area_offset: Vec2,
    pub detection_radius: f32,
    pub max_health: f32,
    pub body_radius: f32,
    pub species: Vec<SpawnableSpecies>,
}

impl Default for SpawnerTuning {
    fn default() -> Self {
        Self {
            interval_seconds: 3.0,
            max_alive: 10,
            area_size: Vec2::new(8.0, 5.0),
            area_offset: Vec2::ZERO,
            detection_radius: 15.0,
            max_health: 100.0,
            body_radius: 0.75,
            species: vec![SpawnableSpecies::Charger, SpawnableSpecies::Shooter],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub left_threshold: f32,
    pub right_threshold: f32,
    pub bottom_threshold: f32,
    pub top_threshold: f32,
    /// Room steps per second.
    pub move_speed: f32,
    pub min_transition_seconds: f32,
    pub viewport: OrthographicViewport,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            left_threshold: 0.33,
            right_threshold: 0.66,
            bottom_threshold: 0.33,
            top_threshold: 0.66,
            move_speed: 5.0,
            min_transition_seconds: 0.1,
            viewport: OrthographicViewport::from_half_height(5.0, 16.0 / 9.0),
        }
    }
}

impl CameraTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("camera.left_threshold", self.left_threshold),
            ("camera.right_threshold", self.right_threshold),
            ("camera.bottom_threshold", self.bottom_threshold),
            ("camera.top_threshold", self.top_threshold),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(invalid(field, format!("{value} must lie strictly between 0 and 1")));
            }
        }
        if self.left_threshold >= self.right_threshold {
            return Err(invalid(
                "camera.left_threshold",
                format!(
                    "{} must be below right_threshold {}",
                    self.left_threshold, self.right_threshold
                ),
            ));
        }
        if self.bottom_threshold >= self.top_threshold {
            return Err(invalid(
                "camera.bottom_threshold",
                format!(
                    "{} must be below top_threshold {}",
                    self.bottom_threshold, self.top_threshold
                ),
            ));
        }
        require_positive("camera.move_speed", self.move_speed)?;
        require_positive("camera.min_transition_seconds", self.min_transition_seconds)?;
        require_positive("camera.viewport.width", self.viewport.width)?;
        require_positive("camera.viewport.height", self.viewport.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeelTuning {
    pub hit_flash_seconds: f32,
    pub shake_seconds: f32,
    pub shake_magnitude: f32,
    pub hit_stop_seconds: f32,
}

impl Default for FeelTuning {
    fn default() -> Self {
        Self {
            hit_flash_seconds: 0.15,
            shake_seconds: 0.05,
            shake_magnitude: 0.05,
            hit_stop_seconds: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    pub hit_radius: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            hit_radius: 0.25,
        }
    }
}

/// The target's thrust attack. A swing splits `duration_seconds` into a
/// windup, a thrust that can hit, and a return; the windup and the return
/// share `recoil_fraction` of the duration evenly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeTuning {
    pub duration_seconds: f32,
    pub recoil_fraction: f32,
    /// Distance from the target to the hitbox centre along the facing.
    pub reach: f32,
    pub hit_radius: f32,
    pub damage: f32,
}

impl Default for MeleeTuning {
    fn default() -> Self {
        Self {
            duration_seconds: 0.4,
            recoil_fraction: 0.3,
            reach: 1.0,
            hit_radius: 0.6,
            damage: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestructibleTuning {
    pub max_health: f32,
    pub body_radius: f32,
    pub fragment_count: u32,
    /// Half size of the square fragments scatter into.
    pub fragment_spread: f32,
}

impl Default for DestructibleTuning {
    fn default() -> Self {
        Self {
            max_health: 30.0,
            body_radius: 0.5,
            fragment_count: 10,
            fragment_spread: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootTuning {
    pub attraction_range: f32,
    pub attraction_speed: f32,
    pub acceleration: f32,
    pub pickup_radius: f32,
}

impl Default for LootTuning {
    fn default() -> Self {
        Self {
            attraction_range: 3.0,
            attraction_speed: 3.5,
            acceleration: 10.0,
            pickup_radius: 0.1,
        }
    }
}

impl Tuning {
    /// Reads and validates a tuning file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json_str(&raw, &path.display().to_string())?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Like [`Tuning::load_from_path`], but a missing file yields defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "tuning_file_missing_using_defaults");
            return Ok(Self::default());
        }
        let tuning = Self::load_from_path(path)?;
        info!(path = %path.display(), rng_seed = tuning.rng_seed, "tuning_loaded");
        Ok(tuning)
    }

    pub fn from_json_str(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        serde_path_to_error::deserialize::<_, Self>(&mut deserializer).map_err(|error| {
            let json_path = error.path().to_string();
            ConfigError::Parse {
                origin: origin.to_string(),
                json_path: if json_path.is_empty() {
                    ".".to_string()
                } else {
                    json_path
                },
                source: error.into_inner(),
            }
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let charger = &self.charger;
        require_positive("charger.max_health", charger.max_health)?;
        require_non_negative("charger.detection_span", charger.detection_span)?;
        require_non_negative("charger.dwell_seconds", charger.dwell_seconds)?;
        require_positive("charger.charge_speed", charger.charge_speed)?;
        require_non_negative("charger.stop_threshold", charger.stop_threshold)?;
        require_non_negative("charger.friction", charger.friction)?;
        require_positive("charger.min_slide_speed", charger.min_slide_speed)?;
        require_non_negative("charger.stun_seconds", charger.stun_seconds)?;
        require_non_negative("charger.contact_damage", charger.contact_damage)?;
        require_non_negative("charger.contact_radius", charger.contact_radius)?;

        let shooter = &self.shooter;
        require_positive("shooter.max_health", shooter.max_health)?;
        require_non_negative("shooter.detection_radius", shooter.detection_radius)?;
        require_positive("shooter.move_speed", shooter.move_speed)?;
        require_positive("shooter.close_box_size.x", shooter.close_box_size.x)?;
        require_positive("shooter.close_box_size.y", shooter.close_box_size.y)?;
        require_positive("shooter.fire_interval_seconds", shooter.fire_interval_seconds)?;
        require_positive(
            "shooter.reposition_interval_seconds",
            shooter.reposition_interval_seconds,
        )?;
        require_non_negative("shooter.stun_seconds", shooter.stun_seconds)?;
        require_non_negative("shooter.body_radius", shooter.body_radius)?;

        require_positive("orbiter.max_health", self.orbiter.max_health)?;
        require_non_negative("orbiter.contact_damage", self.orbiter.contact_damage)?;
        require_non_negative("orbiter.contact_radius", self.orbiter.contact_radius)?;
        require_positive("turret.core_health", self.turret.core_health)?;
        require_non_negative("turret.core_radius", self.turret.core_radius)?;
        for ring in &self.turret.rings {
            require_non_negative("turret.rings.radius", ring.radius)?;
            if !ring.angular_speed_deg.is_finite() {
                return Err(invalid("turret.rings.angular_speed_deg", "must be finite".into()));
            }
        }

        require_positive("projectile.speed", self.projectile.speed)?;
        require_positive("projectile.lifetime_seconds", self.projectile.lifetime_seconds)?;
        require_non_negative("projectile.damage", self.projectile.damage)?;
        require_non_negative("projectile.radius", self.projectile.radius)?;

        let spawner = &self.spawner;
        require_positive("spawner.interval_seconds", spawner.interval_seconds)?;
        require_positive("spawner.max_health", spawner.max_health)?;
        require_non_negative("spawner.detection_radius", spawner.detection_radius)?;
        require_non_negative("spawner.area_size.x", spawner.area_size.x)?;
        require_non_negative("spawner.area_size.y", spawner.area_size.y)?;
        require_non_negative("spawner.body_radius", spawner.body_radius)?;

        self.camera.validate()?;

        require_non_negative("feel.hit_flash_seconds", self.feel.hit_flash_seconds)?;
        require_non_negative("feel.shake_seconds", self.feel.shake_seconds)?;
        require_non_negative("feel.shake_magnitude", self.feel.shake_magnitude)?;
        require_non_negative("feel.hit_stop_seconds", self.feel.hit_stop_seconds)?;

        require_positive("player.max_health", self.player.max_health)?;
        require_non_negative("player.hit_radius", self.player.hit_radius)?;

        let melee = &self.melee;
        require_positive("melee.duration_seconds", melee.duration_seconds)?;
        if !(melee.recoil_fraction >= 0.0 && melee.recoil_fraction < 1.0) {
            return Err(invalid(
                "melee.recoil_fraction",
                format!("{} must lie in [0, 1)", melee.recoil_fraction),
            ));
        }
        require_non_negative("melee.reach", melee.reach)?;
        require_non_negative("melee.hit_radius", melee.hit_radius)?;
        require_non_negative("melee.damage", melee.damage)?;

        require_positive("destructible.max_health", self.destructible.max_health)?;
        require_non_negative("destructible.body_radius", self.destructible.body_radius)?;
        require_non_negative(
            "destructible.fragment_spread",
            self.destructible.fragment_spread,
        )?;

        let loot = &self.loot;
        require_non_negative("loot.attraction_range", loot.attraction_range)?;
        require_positive("loot.attraction_speed", loot.attraction_speed)?;
        require_positive("loot.acceleration", loot.acceleration)?;
        require_non_negative("loot.pickup_radius", loot.pickup_radius)
    }
}

pub fn resolve_tuning_path() -> PathBuf {
    std::env::var_os(TUNING_PATH_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TUNING_PATH))
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be a positive number")))
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be zero or positive")))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        Tuning::default().validate().expect("defaults validate");
    }

    #[test]
    fn shipped_tuning_file_parses_and_validates() {
        let raw = include_str!("../../../../assets/tuning.json");
        let tuning = Tuning::from_json_str(raw, "assets/tuning.json").expect("parse");
        tuning.validate().expect("validate");
        assert_eq!(tuning.rng_seed, Tuning::default().rng_seed);
        assert_eq!(tuning.turret.rings.len(), 2);
        assert_eq!(
            tuning.spawner.species,
            vec![SpawnableSpecies::Charger, SpawnableSpecies::Shooter]
        );
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let tuning = Tuning::from_json_str(r#"{"charger":{"charge_speed":20.0}}"#, "inline")
            .expect("parse");

        assert_eq!(tuning.charger.charge_speed, 20.0);
        assert_eq!(tuning.charger.dwell_seconds, 2.0);
        assert_eq!(tuning.shooter, ShooterTuning::default());
    }

    #[test]
    fn parse_error_reports_json_path() {
        let err = Tuning::from_json_str(r#"{"camera":{"move_speed":"fast"}}"#, "inline")
            .expect_err("type mismatch");

        let message = err.to_string();
        assert!(message.contains("camera.move_speed"), "{message}");
        assert!(message.starts_with("parse inline at"), "{message}");
    }

    #[test]
    fn unknown_species_name_is_rejected_with_path() {
        let err = Tuning::from_json_str(r#"{"spawner":{"species":["charger","dragon"]}}"#, "x")
            .expect_err("unknown variant");

        assert!(err.to_string().contains("spawner.species[1]"), "{err}");
    }

    #[test]
    fn camera_thresholds_must_be_ordered_and_inside_unit_range() {
        let mut camera = CameraTuning {
            left_threshold: 0.7,
            ..CameraTuning::default()
        };
        assert!(matches!(
            camera.validate(),
            Err(ConfigError::Invalid {
                field: "camera.left_threshold",
                ..
            })
        ));

        camera = CameraTuning {
            top_threshold: 1.0,
            ..CameraTuning::default()
        };
        assert!(matches!(
            camera.validate(),
            Err(ConfigError::Invalid {
                field: "camera.top_threshold",
                ..
            })
        ));
    }

    #[test]
    fn non_positive_speed_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.projectile.speed = 0.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid {
                field: "projectile.speed",
                ..
            })
        ));
    }

    #[test]
    fn negative_radii_are_rejected() {
        let cases: [(&str, fn(&mut Tuning)); 6] = [
            ("charger.contact_radius", |t| t.charger.contact_radius = -0.5),
            ("orbiter.contact_radius", |t| t.orbiter.contact_radius = -0.25),
            ("shooter.body_radius", |t| t.shooter.body_radius = -1.0),
            ("turret.core_radius", |t| t.turret.core_radius = f32::NAN),
            ("spawner.body_radius", |t| t.spawner.body_radius = -0.75),
            ("projectile.radius", |t| t.projectile.radius = -0.1),
        ];
        for (expected, corrupt) in cases {
            let mut tuning = Tuning::default();
            corrupt(&mut tuning);
            match tuning.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("{expected}: expected invalid radius, got {other:?}"),
            }
        }
    }

    #[test]
    fn melee_recoil_fraction_must_leave_room_for_the_thrust() {
        let mut tuning = Tuning::default();
        tuning.melee.recoil_fraction = 1.0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid {
                field: "melee.recoil_fraction",
                ..
            })
        ));
    }

    #[test]
    fn load_from_path_round_trips_written_file() {
        let mut tuning = Tuning::default();
        tuning.rng_seed = 42;
        tuning.spawner.max_alive = 3;
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let json = serde_json::to_string_pretty(&tuning).expect("serialize");
        file.write_all(json.as_bytes()).expect("write");

        let loaded = Tuning::load_from_path(file.path()).expect("load");
        assert_eq!(loaded, tuning);
    }

    #[test]
    fn load_or_default_falls_back_when_file_is_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loaded =
            Tuning::load_or_default(&dir.path().join("absent.json")).expect("defaults");
        assert_eq!(loaded, Tuning::default());
    }

    #[test]
    fn load_from_path_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(br#"{"camera":{"left_threshold":0.0}}"#)
            .expect("write");

        let err = Tuning::load_from_path(file.path()).expect_err("invalid threshold");
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
