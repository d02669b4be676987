//! Site configuration.
//!
//! Every value has a default matching the published site, so an absent or
//! partial TOML file is fine. Example:
//!
//! ```toml
//! seed = 42
//!
//! [typing]
//! phrases = ["Rustacean", "Problem Solver"]
//!
//! [contact]
//! public_key = "abc123"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Fixed RNG seed for orbit generation (random when absent)
    pub seed: Option<u64>,
    pub viewport: ViewportConfig,
    pub typing: TypingConfig,
    pub orbit: OrbitConfig,
    pub nav: NavConfig,
    pub reveal: RevealConfig,
    pub notifications: NotificationConfig,
    pub contact: ContactConfig,
}

impl SiteConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub type_delay_ms: u64,
    pub delete_delay_ms: u64,
    /// Pause after a phrase is fully typed
    pub hold_delay_ms: u64,
    /// Pause after a phrase is fully deleted
    pub next_phrase_delay_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: [
                "Web Developer",
                "Front-End",
                "Problem Solver",
                "Code Explorer",
                "AI Explorer",
                "Innovator",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            type_delay_ms: 100,
            delete_delay_ms: 50,
            hold_delay_ms: 2000,
            next_phrase_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub base_radius_px: f32,
    pub radius_step_px: f32,
    pub min_period_sec: f32,
    pub period_spread_sec: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            base_radius_px: 120.0,
            radius_step_px: 40.0,
            min_period_sec: 15.0,
            period_spread_sec: 15.0,
        }
    }
}

/// Intersection observer options as written in CSS terms.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub threshold: f32,
    pub root_margin: String,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub scroll_spy: ObserverConfig,
    /// Fixed header height subtracted from anchor scroll targets
    pub header_offset_px: f32,
    /// Widest viewport that still uses the mobile menu
    pub mobile_breakpoint_px: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            scroll_spy: ObserverConfig {
                threshold: 0.3,
                root_margin: "-100px 0px -100px 0px".into(),
            },
            header_offset_px: 80.0,
            mobile_breakpoint_px: 768.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub observer: ObserverConfig,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            observer: ObserverConfig {
                threshold: 0.1,
                root_margin: "0px 0px -50px 0px".into(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Delay before the `show` class is added
    pub enter_delay_ms: u64,
    pub auto_dismiss_ms: u64,
    /// Exit transition length before the element is removed
    pub exit_delay_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enter_delay_ms: 10,
            auto_dismiss_ms: 5000,
            exit_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub service_id: String,
    pub template_id: String,
    /// EmailJS public key (sent as `user_id`)
    pub public_key: String,
    pub endpoint: String,
    pub fallback_email: String,
    pub sending_label: String,
    pub timeout_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            service_id: "service_aegwa4n".into(),
            template_id: "template_45o2ltu".into(),
            public_key: String::new(),
            endpoint: "https://api.emailjs.com/api/v1.0/email/send".into(),
            fallback_email: "ilyaaleksandrovich00@gmail.com".into(),
            sending_label: "Sending...".into(),
            timeout_secs: 15,
        }
    }
}
