//! Scene and gate configuration
//!
//! Every field has a default matching the stock landing page. A page can
//! override any subset through an inline JSON block:
//!
//! ```html
//! <script id="app-config" type="application/json">
//!   { "gate": { "destination": "main/index.html" } }
//! </script>
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::renderer::Color;

/// Moon orbiting a planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonSpec {
    /// Orbit radius around the parent planet (px)
    pub distance: f32,
    pub radius: f32,
    pub color: Color,
    /// Radians per frame
    pub speed: f32,
}

/// Planet orbiting the sun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSpec {
    pub name: String,
    /// Orbit radius around the sun (px)
    pub distance: f32,
    pub radius: f32,
    pub color: Color,
    /// Radians per frame
    pub speed: f32,
    #[serde(default)]
    pub moons: Vec<MoonSpec>,
}

/// Scene population and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Canvas element id
    pub canvas_id: String,
    /// Minimum ms between executed frames
    pub frame_interval_ms: f64,
    pub star_count: usize,
    pub asteroid_count: usize,
    /// Probability of a new shooting star per executed frame
    pub shooting_star_chance: f64,
    pub trail_length: usize,
    pub sun_radius: f32,
    pub planets: Vec<PlanetSpec>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_id: "particleCanvas".to_string(),
            frame_interval_ms: FRAME_INTERVAL_MS,
            star_count: 50,
            asteroid_count: 20,
            shooting_star_chance: SHOOTING_STAR_CHANCE,
            trail_length: TRAIL_LENGTH,
            sun_radius: 50.0,
            planets: default_planets(),
        }
    }
}

fn default_planets() -> Vec<PlanetSpec> {
    vec![
        PlanetSpec {
            name: "Earth".to_string(),
            distance: 200.0,
            radius: 20.0,
            color: Color::BLUE,
            speed: 0.005,
            moons: vec![MoonSpec {
                distance: 40.0,
                radius: 5.0,
                color: Color::GRAY,
                speed: 0.02,
            }],
        },
        PlanetSpec {
            name: "Jupiter".to_string(),
            distance: 350.0,
            radius: 40.0,
            color: Color::ORANGE,
            speed: 0.002,
            moons: vec![MoonSpec {
                distance: 60.0,
                radius: 8.0,
                color: Color::LIGHT_GRAY,
                speed: 0.03,
            }],
        },
        PlanetSpec {
            name: "Mars".to_string(),
            distance: 150.0,
            radius: 15.0,
            color: Color::RED,
            speed: 0.008,
            moons: Vec::new(),
        },
    ]
}

/// Access gate wiring and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Where to send the visitor once the gate is passed
    pub destination: String,
    /// LocalStorage key of the completion flag
    pub storage_key: String,
    /// Countdown start (minutes)
    pub countdown_start: u32,
    /// Real-time ms per countdown step
    pub tick_interval_ms: u32,
    pub button_id: String,
    pub channel_ids: [String; 2],
    pub status_id: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            destination: "main/index.html".to_string(),
            storage_key: ACCESSED_KEY.to_string(),
            countdown_start: COUNTDOWN_START,
            tick_interval_ms: COUNTDOWN_TICK_MS,
            button_id: "accessBtn".to_string(),
            channel_ids: ["channel1".to_string(), "channel2".to_string()],
            status_id: "timerPopup".to_string(),
        }
    }
}

/// Whole-page configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scene: SceneConfig,
    pub gate: GateConfig,
}

impl AppConfig {
    /// Inline config element id
    const CONFIG_ELEMENT_ID: &'static str = "app-config";

    /// Parse a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load config from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded page config");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring page config: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default config");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No #{} on native, using defaults", Self::CONFIG_ELEMENT_ID);
        Self::default()
    }
}
