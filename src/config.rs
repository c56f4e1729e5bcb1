// Flow configuration: which revision runs and its timings.
use std::time::Duration;

use bevy::prelude::*;

use crate::stages::Variant;

/// Environment variable selecting the flow revision.
pub const VARIANT_ENV: &str = "EXPOFLOW_VARIANT";

pub const LOGO_URL: &str = "https://i.ibb.co/5gdgZVxj/output-onlinepngtools.png";

#[derive(Resource, Debug, Clone)]
pub struct FlowConfig {
    pub variant: Variant,
    /// Delays from entering the intro until phases 1 to 4.
    pub intro_phases: [Duration; 4],
    /// Delay after phase 4 before the welcome screen takes over.
    pub intro_exit: Duration,
    /// How long the welcome screen holds its content back on first entry.
    pub welcome_settle: Duration,
    /// Decorative blobs behind the welcome screen; other screens use one fewer.
    pub backdrop_particles: usize,
    pub logo_url: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            intro_phases: [
                Duration::from_millis(300),
                Duration::from_millis(1200),
                Duration::from_millis(2200),
                Duration::from_millis(3500),
            ],
            intro_exit: Duration::from_millis(1000),
            welcome_settle: Duration::from_millis(2000),
            backdrop_particles: 3,
            logo_url: LOGO_URL.to_string(),
        }
    }
}

impl FlowConfig {
    pub fn with_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..default()
        }
    }

    /// Default configuration with the variant taken from `value`, when given.
    pub fn from_variant_name(value: Option<&str>) -> Result<Self, strum::ParseError> {
        match value {
            Some(name) => Ok(Self::with_variant(name.trim().parse()?)),
            None => Ok(Self::default()),
        }
    }

    /// Reads [`VARIANT_ENV`], falling back to the default revision on a bad value.
    pub fn from_env() -> Self {
        let value = std::env::var(VARIANT_ENV).ok();
        match Self::from_variant_name(value.as_deref()) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "{VARIANT_ENV}={:?} not understood ({err}), using {}",
                    value.unwrap_or_default(),
                    Variant::default()
                );
                Self::default()
            }
        }
    }

    /// Time from entering the intro until the welcome screen is requested.
    pub fn intro_duration(&self) -> Duration {
        self.intro_phases[3] + self.intro_exit
    }
}
