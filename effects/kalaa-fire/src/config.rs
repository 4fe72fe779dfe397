//! Tunable constants of the fire effect
//!
//! Every field defaults to the value the site ships with, so a configuration
//! file only needs to name what it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FireError, Result};
use crate::palette::{BASE_PALETTE, Rgb};

/// Upper bound on embers seeded or topped up at once, and on `min_embers`
pub const MAX_EMBERS: usize = 50_000;

/// A uniform spawn distribution `from + r * (to - from)` for `r` in `[0, 1)`
///
/// `to` may be below `from`: samples then run from `from` down towards `to`.
/// The upward speed range is written that way, and validation accepts any
/// finite ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub from: f64,
    pub to: f64,
}

impl SpawnRange {
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    /// Map a unit sample onto the range
    #[inline]
    pub fn sample(&self, unit: f64) -> f64 {
        self.from + unit * (self.to - self.from)
    }

    pub fn lower(&self) -> f64 {
        self.from.min(self.to)
    }

    pub fn upper(&self) -> f64 {
        self.from.max(self.to)
    }

    fn is_finite(&self) -> bool {
        self.from.is_finite() && self.to.is_finite()
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Surface pixels per ember when seeding or topping up, at least 1
    pub density_divisor: f64,
    /// Pool floor that triggers a top-up, at most [`MAX_EMBERS`]
    pub min_embers: usize,
    /// Animation time added every frame
    pub time_step: f64,
    /// Amplitude of the palette channel oscillation
    pub palette_variation: f64,
    /// Divisor turning the remaining lifespan into a size/opacity factor
    pub life_divisor: f64,
    /// Embers above this y are respawned
    pub despawn_y: f64,
    /// Vertical spawn jitter below the surface for seeded embers
    pub seed_y_jitter: f64,
    /// Vertical spawn jitter below the surface for respawned embers
    pub respawn_y_jitter: f64,
    pub size: SpawnRange,
    pub opacity: SpawnRange,
    pub speed_x: SpawnRange,
    pub speed_y: SpawnRange,
    pub rotation_speed: SpawnRange,
    pub sway: SpawnRange,
    pub sway_speed: SpawnRange,
    pub lifespan: SpawnRange,
    pub base_palette: Vec<Rgb>,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            density_divisor: 3000.0,
            min_embers: 100,
            time_step: 0.01,
            palette_variation: 20.0,
            life_divisor: 300.0,
            despawn_y: -100.0,
            seed_y_jitter: 100.0,
            respawn_y_jitter: 50.0,
            size: SpawnRange::new(5.0, 30.0),
            opacity: SpawnRange::new(0.1, 0.6),
            speed_x: SpawnRange::new(-0.75, 0.75),
            speed_y: SpawnRange::new(-1.5, -4.5),
            rotation_speed: SpawnRange::new(-0.01, 0.01),
            sway: SpawnRange::new(0.3, 0.8),
            sway_speed: SpawnRange::new(0.005, 0.015),
            lifespan: SpawnRange::new(100.0, 300.0),
            base_palette: BASE_PALETTE.to_vec(),
        }
    }
}

impl FireConfig {
    /// Parse a JSON configuration
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML configuration
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, picking the parser from its extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let input = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&input),
            Some("yaml" | "yml") => Self::from_yaml_str(&input),
            other => Err(FireError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Number of embers seeded for a surface of `area` pixels, capped at
    /// [`MAX_EMBERS`]
    pub fn embers_for_area(&self, area: f64) -> usize {
        let count = (area / self.density_divisor).floor();
        if count.is_nan() || count <= 0.0 {
            0
        } else {
            count.min(MAX_EMBERS as f64) as usize
        }
    }

    /// Check the values the engine relies on
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("density_divisor", self.density_divisor),
            ("time_step", self.time_step),
            ("palette_variation", self.palette_variation),
            ("life_divisor", self.life_divisor),
            ("despawn_y", self.despawn_y),
            ("seed_y_jitter", self.seed_y_jitter),
            ("respawn_y_jitter", self.respawn_y_jitter),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(format!("{name} must be finite")));
        }
        if self.density_divisor < 1.0 {
            return Err(invalid("density_divisor must be at least 1"));
        }
        if self.min_embers > MAX_EMBERS {
            return Err(invalid(format!("min_embers must be at most {MAX_EMBERS}")));
        }
        if self.life_divisor <= 0.0 {
            return Err(invalid("life_divisor must be positive"));
        }

        let ranges = [
            ("size", self.size),
            ("opacity", self.opacity),
            ("speed_x", self.speed_x),
            ("speed_y", self.speed_y),
            ("rotation_speed", self.rotation_speed),
            ("sway", self.sway),
            ("sway_speed", self.sway_speed),
            ("lifespan", self.lifespan),
        ];
        if let Some((name, _)) = ranges.iter().find(|(_, range)| !range.is_finite()) {
            return Err(invalid(format!("{name} range must be finite")));
        }
        if self.size.lower() < 0.0 {
            return Err(invalid("size range must not be negative"));
        }
        if self.opacity.lower() < 0.0 || self.opacity.upper() > 1.0 {
            return Err(invalid("opacity range must lie within [0, 1]"));
        }
        if self.lifespan.lower() <= 0.0 {
            return Err(invalid("lifespan range must be positive"));
        }

        if self.base_palette.is_empty() {
            return Err(invalid("base_palette must contain at least one color"));
        }
        let out_of_gamut = |c: f64| !(0.0..=255.0).contains(&c);
        if let Some(index) = self
            .base_palette
            .iter()
            .position(|c| out_of_gamut(c.r) || out_of_gamut(c.g) || out_of_gamut(c.b))
        {
            return Err(invalid(format!(
                "base_palette[{index}] has a channel outside [0, 255]"
            )));
        }

        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> FireError {
    FireError::InvalidConfig(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_default_is_valid() {
        let config = FireConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_embers, 100);
        assert_eq!(config.base_palette.len(), 5);
    }

    #[test_case(300_000.0, 100 ; "reference viewport")]
    #[test_case(30_000.0, 10 ; "small viewport")]
    #[test_case(2_999.0, 0 ; "below one ember")]
    #[test_case(0.0, 0 ; "empty surface")]
    fn test_embers_for_area(area: f64, expected: usize) {
        assert_eq!(FireConfig::default().embers_for_area(area), expected);
    }

    #[test_case(1.0, 1e12 ; "dense huge surface")]
    #[test_case(1.0, f64::INFINITY ; "infinite area")]
    #[test_case(3000.0, f64::MAX ; "default divisor maximal area")]
    fn test_embers_for_area_is_capped(density_divisor: f64, area: f64) {
        let config = FireConfig {
            density_divisor,
            ..FireConfig::default()
        };
        assert_eq!(config.embers_for_area(area), MAX_EMBERS);
    }

    #[test]
    fn test_reversed_ranges_are_accepted() {
        let json = r#"{ "size": { "from": 30.0, "to": 5.0 }, "lifespan": { "from": 300.0, "to": 100.0 } }"#;
        let config = FireConfig::from_json_str(json).expect("reversed ranges are valid");
        assert_eq!(config.size.sample(0.0), 30.0);
        assert_eq!(config.size.sample(0.5), 17.5);
        assert_eq!(config.size.lower(), 5.0);
        assert_eq!(config.lifespan.upper(), 300.0);
    }

    #[test]
    fn test_limits_are_inclusive() {
        let json = format!(r#"{{ "density_divisor": 1.0, "min_embers": {MAX_EMBERS} }}"#);
        let config = FireConfig::from_json_str(&json).expect("limits are valid");
        assert_eq!(config.min_embers, MAX_EMBERS);
    }

    #[test]
    fn test_spawn_range_sample() {
        let speed_y = FireConfig::default().speed_y;
        assert_eq!(speed_y.sample(0.0), -1.5);
        assert_eq!(speed_y.sample(0.5), -3.0);
        assert_eq!(speed_y.lower(), -4.5);
        assert_eq!(speed_y.upper(), -1.5);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = FireConfig::from_json_str(r#"{ "min_embers": 40, "time_step": 0.02 }"#)
            .expect("valid partial config");
        assert_eq!(config.min_embers, 40);
        assert_eq!(config.time_step, 0.02);
        assert_eq!(config.life_divisor, 300.0);
    }

    #[test]
    fn test_yaml_palette_override() {
        let yaml = "base_palette:\n  - { r: 10.0, g: 20.0, b: 30.0 }\n";
        let config = FireConfig::from_yaml_str(yaml).expect("valid yaml");
        assert_eq!(config.base_palette, vec![Rgb::new(10.0, 20.0, 30.0)]);
    }

    #[test_case(r#"{ "density_divisor": 0.0 }"# ; "zero density divisor")]
    #[test_case(r#"{ "density_divisor": 1e-300 }"# ; "tiny density divisor")]
    #[test_case(r#"{ "density_divisor": 0.5 }"# ; "fractional density divisor")]
    #[test_case(r#"{ "min_embers": 50001 }"# ; "min embers above cap")]
    #[test_case(r#"{ "min_embers": 18446744073709551615 }"# ; "min embers at usize max")]
    #[test_case(r#"{ "life_divisor": -1.0 }"# ; "negative life divisor")]
    #[test_case(r#"{ "base_palette": [] }"# ; "empty palette")]
    #[test_case(r#"{ "opacity": { "from": 0.5, "to": 1.5 } }"# ; "opacity above one")]
    #[test_case(r#"{ "lifespan": { "from": 0.0, "to": 10.0 } }"# ; "zero lifespan")]
    #[test_case(r#"{ "base_palette": [{ "r": 300.0, "g": 0.0, "b": 0.0 }] }"# ; "channel out of gamut")]
    fn test_invalid_configs(json: &str) {
        assert!(matches!(
            FireConfig::from_json_str(json),
            Err(FireError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().expect("temp dir");
        let json = dir.path().join("fire.json");
        fs::write(&json, r#"{ "min_embers": 7 }"#).expect("write json");
        assert_eq!(FireConfig::load(&json).expect("load json").min_embers, 7);

        let toml = dir.path().join("fire.toml");
        fs::write(&toml, "min_embers = 7").expect("write toml");
        assert!(matches!(
            FireConfig::load(&toml),
            Err(FireError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }
}
