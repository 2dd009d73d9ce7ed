use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for the relief registry.
///
/// This currently carries the gender vocabulary: the flat list of accepted
/// gender strings, matched case-insensitively. The vocabulary is loaded once
/// at startup and handed to the registry, rather than being compiled into the
/// victim logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The accepted gender strings, stored lowercase.
    genders: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genders: default_genders(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the accepted gender strings.
    #[must_use]
    pub fn genders(&self) -> &[String] {
        &self.genders
    }

    /// Looks up a gender string in the vocabulary, case-insensitively.
    ///
    /// Returns the canonical lowercase form when the value is accepted.
    #[must_use]
    pub fn canonical_gender(&self, value: &str) -> Option<&str> {
        let lowered = value.to_lowercase();
        self.genders
            .iter()
            .find(|entry| **entry == lowered)
            .map(String::as_str)
    }
}

fn default_genders() -> Vec<String> {
    [
        "boy",
        "girl",
        "man",
        "woman",
        "non-binary person",
        "transgender person",
        "two-spirit person",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        /// Accepted gender strings. Matching is case-insensitive, so entries
        /// are normalised to lowercase on load.
        #[serde(default = "default_genders")]
        genders: Vec<String>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { genders } => Self {
                genders: genders.into_iter().map(|g| g.to_lowercase()).collect(),
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            genders: config.genders,
        }
    }
}
