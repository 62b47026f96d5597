use dioxus::prelude::*;
use serde::Deserialize;
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
const CONFIG_ELEMENT_ID: &str = "page-config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config decode failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub rain: RainSettings,
}

/// Visual tuning for the falling-glyph background. None of these affect
/// correctness, only pacing and colour.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RainSettings {
    pub cell_size: u32,
    pub fade_alpha: f64,
    pub reset_probability: f64,
    pub glow_blur: f64,
    pub background_rgb: [u8; 3],
    pub accent_color: String,
    pub font_family: String,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            cell_size: 14,
            fade_alpha: 0.04,
            reset_probability: 0.025,
            glow_blur: 8.0,
            background_rgb: [10, 25, 47],
            accent_color: "#64ffda".to_string(),
            font_family: "'Fira Code', monospace".to_string(),
        }
    }
}

impl RainSettings {
    pub fn overlay_fill(&self) -> String {
        let [r, g, b] = self.background_rgb;
        format!("rgba({r}, {g}, {b}, {})", self.fade_alpha)
    }

    pub fn font(&self) -> String {
        format!("{}px {}", self.cell_size, self.font_family)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::Invalid("rain.cell_size must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.fade_alpha) {
            return Err(ConfigError::Invalid("rain.fade_alpha must be within [0, 1]".to_string()));
        }
        if !(0.0..=1.0).contains(&self.reset_probability) {
            return Err(ConfigError::Invalid(
                "rain.reset_probability must be within [0, 1]".to_string(),
            ));
        }
        if self.glow_blur.is_nan() || self.glow_blur < 0.0 {
            return Err(ConfigError::Invalid("rain.glow_blur must not be negative".to_string()));
        }
        Ok(())
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: PageConfig = serde_json::from_str(raw)?;
        config.rain.validate()?;
        Ok(config)
    }
}

pub fn use_page_config() -> PageConfig {
    use_hook(load_page_config)
}

#[cfg(target_arch = "wasm32")]
fn load_page_config() -> PageConfig {
    let raw = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());
    let Some(raw) = raw else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("page config rejected, using defaults: {err}");
            PageConfig::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_page_config() -> PageConfig {
    PageConfig::default()
}
