//! Host-side filter descriptions.
//!
//! The filter engines never allocate and never read files. Applications that
//! want to describe a filter in TOML or on the command line build a
//! [`FilterConfig`] here, allocate the buffers it needs, and lend them to
//! [`FirFilter`](crate::FirFilter) or [`IirCascade`](crate::IirCascade).
//!
//! ## File format
//!
//! ```toml
//! type = "fir"
//! taps = [0.1, 0.2, 0.4, 0.2, 0.1]
//! ```
//!
//! ```toml
//! type = "iir"
//!
//! [[sections]]
//! b0 = 0.5
//! b1 = 0.0
//! b2 = 0.0
//! a1 = -0.5
//! a2 = 0.0
//! ```
//!
//! A section may also be written as a flat array in `b0, b1, b2, a1, a2`
//! order, e.g. `sections = [[0.5, 0.0, 0.0, -0.5, 0.0]]`.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::error::DspError;
use crate::signal_processing::BiquadCoeffs;

/// Taps of the default 5-tap smoothing FIR
pub const DEFAULT_FIR_TAPS: [f32; 5] = [0.1, 0.2, 0.4, 0.2, 0.1];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse filter description: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid coefficients: {0}")]
    Coefficients(String),

    #[error(transparent)]
    Filter(#[from] DspError),
}

/// A filter described by its coefficients
///
/// Use `FilterConfig::default()` for a 5-tap smoothing FIR.
///
/// # Example
/// ```
/// use embeddsp::config::FilterConfig;
///
/// let config = FilterConfig::from_toml_str("type = \"fir\"\ntaps = [0.5, 0.5]").unwrap();
/// assert_eq!(config.len(), 2);
/// assert_eq!(config.dc_gain(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FilterConfig {
    /// Finite impulse response filter
    Fir { taps: Vec<f32> },
    /// Cascade of biquad sections
    Iir { sections: Vec<BiquadCoeffs> },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawFilterConfig {
    Fir { taps: Vec<f32> },
    Iir { sections: Vec<SectionConfig> },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SectionConfig {
    Named {
        b0: f32,
        b1: f32,
        b2: f32,
        a1: f32,
        a2: f32,
    },
    Flat([f32; 5]),
}

impl From<SectionConfig> for BiquadCoeffs {
    fn from(section: SectionConfig) -> Self {
        match section {
            SectionConfig::Named { b0, b1, b2, a1, a2 } => BiquadCoeffs::new(b0, b1, b2, a1, a2),
            SectionConfig::Flat(values) => values.into(),
        }
    }
}

impl FilterConfig {
    /// Build a validated FIR description
    pub fn fir(taps: Vec<f32>) -> Result<Self, ConfigError> {
        let config = Self::Fir { taps };
        config.validate()?;
        Ok(config)
    }

    /// Build a validated IIR cascade description
    pub fn iir(sections: Vec<BiquadCoeffs>) -> Result<Self, ConfigError> {
        let config = Self::Iir { sections };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML filter description
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawFilterConfig = toml::from_str(s)?;
        let config = match raw {
            RawFilterConfig::Fir { taps } => Self::Fir { taps },
            RawFilterConfig::Iir { sections } => Self::Iir {
                sections: sections.into_iter().map(BiquadCoeffs::from).collect(),
            },
        };
        config.validate()?;
        log::debug!("Loaded {} filter with {} stages", config, config.len());
        Ok(config)
    }

    /// Check the description can be bound to a filter engine
    ///
    /// Rejects empty tap/section lists (as the engines do) and non-finite
    /// coefficients.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Fir { taps } => {
                if taps.is_empty() {
                    return Err(DspError::InvalidArgument("FIR filter needs at least one tap").into());
                }
                if let Some((i, tap)) = taps.iter().enumerate().find(|(_, t)| !t.is_finite()) {
                    return Err(ConfigError::Coefficients(format!("tap {} is {}", i, tap)));
                }
            }
            Self::Iir { sections } => {
                if sections.is_empty() {
                    return Err(
                        DspError::InvalidArgument("IIR cascade needs at least one section").into(),
                    );
                }
                if let Some(i) = sections
                    .iter()
                    .position(|s| s.to_array().iter().any(|c| !c.is_finite()))
                {
                    return Err(ConfigError::Coefficients(format!(
                        "section {} has a non-finite coefficient: {}",
                        i, sections[i]
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of taps (FIR) or sections (IIR)
    pub fn len(&self) -> usize {
        match self {
            Self::Fir { taps } => taps.len(),
            Self::Iir { sections } => sections.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Steady-state gain for a constant input
    pub fn dc_gain(&self) -> f32 {
        match self {
            Self::Fir { taps } => taps.iter().sum(),
            Self::Iir { sections } => sections.iter().map(BiquadCoeffs::dc_gain).product(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::Fir {
            taps: DEFAULT_FIR_TAPS.to_vec(),
        }
    }
}

impl fmt::Display for FilterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fir { .. } => write!(f, "fir"),
            Self::Iir { .. } => write!(f, "iir"),
        }
    }
}
