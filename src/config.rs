//! TOML configuration. Every field has a default, so an empty file (or no
//! file at all) reproduces the stock 120×60 world map.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use url::Url;

use crate::error::{Error, Result};
use crate::models::BACKGROUND;
use crate::output::{OutputFormat, DEFAULT_NAME};
use crate::raster::{GridSpec, RasterOptions};
use crate::region::{RegionSet, RegionTable, DEFAULT_LABEL};

pub const DEFAULT_PRIMARY_URL: &str =
    "https://raw.githubusercontent.com/johan/world.geo.json/master/countries.geo.json";
pub const DEFAULT_FALLBACK_URL: &str =
    "https://raw.githubusercontent.com/datasets/geo-countries/master/data/countries.geojson";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub grid: GridConfig,
    pub input: InputConfig,
    /// Region table; the built-in table when omitted
    pub regions: Option<RegionsConfig>,
    pub output: OutputConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub background: char,
    pub subtract_holes: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        let spec = GridSpec::default();
        Self {
            width: spec.width,
            height: spec.height,
            background: BACKGROUND,
            subtract_holes: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Property keys holding the country code when a feature has no `id`
    pub id_properties: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            id_properties: vec![
                "adm0_a3".to_string(),
                "ISO_A3".to_string(),
                "ISO3166-1-Alpha-3".to_string(),
            ],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RegionsConfig {
    #[serde(default = "default_region_label")]
    pub default: char,
    #[serde(default)]
    pub sets: Vec<RegionSet>,
}

fn default_region_label() -> char {
    DEFAULT_LABEL
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            name: DEFAULT_NAME.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub primary_url: String,
    pub fallback_url: Option<String>,
    pub max_attempts: u32,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            fallback_url: Some(DEFAULT_FALLBACK_URL.to_string()),
            max_attempts: 2,
            timeout_secs: 120,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Check everything that can be checked without input data
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if self.grid.background.is_control() {
            return Err(Error::InvalidConfig(
                "background label must be printable".to_string(),
            ));
        }

        let table = self.region_table()?;
        for label in table.labels() {
            if label.is_control() || label.is_whitespace() {
                return Err(Error::InvalidConfig(format!(
                    "region label {:?} must be a visible character",
                    label
                )));
            }
            if label == self.grid.background {
                return Err(Error::InvalidConfig(format!(
                    "region label {:?} collides with the background label",
                    label
                )));
            }
        }

        let valid_name = match self.output.format {
            OutputFormat::Js => is_identifier(&self.output.name, true),
            OutputFormat::Rust => is_identifier(&self.output.name, false),
            OutputFormat::Json | OutputFormat::Plain => true,
        };
        if !valid_name {
            return Err(Error::InvalidConfig(format!(
                "output name {:?} is not a valid identifier",
                self.output.name
            )));
        }

        self.source.validate()
    }

    /// Region table from `[regions]`, or the built-in one
    pub fn region_table(&self) -> Result<RegionTable> {
        match &self.regions {
            Some(regions) => RegionTable::new(regions.sets.clone(), regions.default),
            None => Ok(RegionTable::builtin()),
        }
    }

    pub fn raster_options(&self) -> RasterOptions {
        RasterOptions {
            grid: GridSpec::new(self.grid.width, self.grid.height),
            background: self.grid.background,
            subtract_holes: self.grid.subtract_holes,
        }
    }
}

impl SourceConfig {
    pub fn validate(&self) -> Result<()> {
        let urls = std::iter::once(&self.primary_url).chain(self.fallback_url.as_ref());
        for url in urls {
            Url::parse(url)
                .map_err(|e| Error::InvalidConfig(format!("bad source url {:?}: {}", url, e)))?;
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// ASCII identifier check. `$` is a valid leading character in JavaScript
/// but not in Rust.
fn is_identifier(name: &str, allow_dollar: bool) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || (allow_dollar && c == '$') => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
