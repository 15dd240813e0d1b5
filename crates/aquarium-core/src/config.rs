//! Tank configuration - every tunable constant of the simulation in one place.
//!
//! Loaded from JSON (see `data/aquarium.json`) or built from defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full configuration for an aquarium session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AquariumConfig {
    pub canvas: CanvasConfig,
    pub economy: EconomyConfig,
    pub fish: FishConfig,
    pub food: FoodConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_money: u32,
    pub fish_price: u32,
    pub feed_price: u32,
    /// Pellets dropped per paid feeding
    pub feed_batch: u32,
    /// Free fish added when the tank opens
    pub initial_fish: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishConfig {
    pub width: f32,
    pub height: f32,
    /// New fish are kept this far from the right and bottom edges
    pub spawn_margin: f32,
    /// Hunger gained per millisecond
    pub hunger_rate: f32,
    pub max_hunger: f32,
    /// Fish above this hunger go looking for food
    pub seek_threshold: f32,
    pub seek_speed: f32,
    pub eat_radius: f32,
    pub hunger_relief: f32,
    pub growth_step: f32,
    pub max_size: f32,
    /// Milliseconds per animation frame
    pub frame_interval: f32,
    pub frame_count: u32,
    pub hunger_bar_offset: f32,
    pub hunger_bar_height: f32,
    /// Give fish a fresh random heading once they are no longer hungry
    pub idle_wander: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    pub radius: f32,
    pub fall_speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub background: String,
    pub sprite_sheet: String,
    /// Columns in the single-row sprite sheet
    pub sprite_columns: u32,
    /// Give up waiting for assets after this many milliseconds
    pub load_timeout_ms: Option<f64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_money: 100,
            fish_price: 20,
            feed_price: 5,
            feed_batch: 5,
            initial_fish: 2,
        }
    }
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 64.0,
            spawn_margin: 100.0,
            hunger_rate: 0.005,
            max_hunger: 100.0,
            seek_threshold: 30.0,
            seek_speed: 2.0,
            eat_radius: 30.0,
            hunger_relief: 30.0,
            growth_step: 0.1,
            max_size: 3.0,
            frame_interval: 200.0,
            frame_count: 4,
            hunger_bar_offset: 10.0,
            hunger_bar_height: 5.0,
            idle_wander: false,
        }
    }
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            fall_speed: 1.0,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            background: "aquarium1.png".to_string(),
            sprite_sheet: "spritesheet.png".to_string(),
            sprite_columns: 4,
            load_timeout_ms: Some(10_000.0),
        }
    }
}

impl Default for AquariumConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            economy: EconomyConfig::default(),
            fish: FishConfig::default(),
            food: FoodConfig::default(),
            assets: AssetConfig::default(),
        }
    }
}

impl AquariumConfig {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fish = &self.fish;

        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return Err(ConfigError::Invalid("canvas size must be positive".into()));
        }
        if fish.width <= 0.0 || fish.height <= 0.0 {
            return Err(ConfigError::Invalid("fish body size must be positive".into()));
        }
        if fish.width * fish.max_size > self.canvas.width
            || fish.height * fish.max_size > self.canvas.height
        {
            return Err(ConfigError::Invalid(
                "a fully grown fish must fit inside the canvas".into(),
            ));
        }
        if fish.spawn_margin < 0.0
            || fish.spawn_margin >= self.canvas.width
            || fish.spawn_margin >= self.canvas.height
        {
            return Err(ConfigError::Invalid(
                "spawn margin must lie within the canvas".into(),
            ));
        }
        if fish.max_size < 1.0 {
            return Err(ConfigError::Invalid("max size must be at least 1".into()));
        }
        if fish.max_hunger <= 0.0
            || fish.seek_threshold < 0.0
            || fish.seek_threshold > fish.max_hunger
        {
            return Err(ConfigError::Invalid(
                "seek threshold must lie within [0, max hunger]".into(),
            ));
        }
        if fish.hunger_rate < 0.0 || fish.hunger_relief < 0.0 || fish.growth_step < 0.0 {
            return Err(ConfigError::Invalid(
                "hunger and growth rates must not be negative".into(),
            ));
        }
        if fish.frame_count == 0 || fish.frame_interval <= 0.0 {
            return Err(ConfigError::Invalid(
                "animation needs at least one frame and a positive interval".into(),
            ));
        }
        if self.food.radius <= 0.0 || self.food.fall_speed < 0.0 {
            return Err(ConfigError::Invalid(
                "food needs a positive radius and a non-negative fall speed".into(),
            ));
        }
        if self.assets.sprite_columns == 0 {
            return Err(ConfigError::Invalid(
                "sprite sheet needs at least one column".into(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur while loading a configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(reason) => write!(f, "Invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AquariumConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AquariumConfig::from_json(r#"{ "economy": { "starting_money": 40 } }"#)
            .expect("partial config should parse");
        assert_eq!(config.economy.starting_money, 40);
        assert_eq!(config.economy.fish_price, 20);
        assert_eq!(config.canvas.width, 800.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AquariumConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(AquariumConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_oversized_fish() {
        let mut config = AquariumConfig::default();
        config.fish.width = 400.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            AquariumConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            AquariumConfig::load("/nonexistent/aquarium.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
