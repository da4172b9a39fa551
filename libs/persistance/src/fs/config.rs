use std::{env, fs, io, path::PathBuf};

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use super::utils::{get_config_location, parse_location};

/// Overrides `general.wiki_location` when set.
pub const WIKI_DIR_ENV: &str = "TAGWIKI_DIR";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the config directory")]
    NoConfigDir,
    #[error("could not read config at {0:?}")]
    Read(PathBuf, #[source] io::Error),
    #[error("could not parse config")]
    Parse(#[from] toml::de::Error),
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct General {
    pub wiki_location: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Search {
    /// default cap on similar pages shown, unlimited when unset
    pub similar_limit: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub general: General,
    #[serde(default)]
    pub search: Search,
}

impl Config {
    pub fn wiki_location(&self) -> PathBuf {
        match env::var(WIKI_DIR_ENV) {
            Ok(val) if !val.is_empty() => parse_location(&val),
            _ => parse_location(&self.general.wiki_location),
        }
    }
}

pub fn parse_config(raw: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(raw)?)
}

pub fn read_config() -> Result<Config, ConfigError> {
    let (_, file) = get_config_location().ok_or(ConfigError::NoConfigDir)?;
    let raw = fs::read_to_string(&file).map_err(|e| ConfigError::Read(file.clone(), e))?;
    parse_config(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = parse_config(
            r#"
[general]
wiki_location = "~/wiki"

[search]
similar_limit = 5
"#,
        )
        .unwrap();
        assert_eq!(config.general.wiki_location, "~/wiki");
        assert_eq!(config.search.similar_limit, Some(5));
    }

    #[test]
    fn search_section_is_optional() {
        let config = parse_config("[general]\nwiki_location = \"./wiki\"\n").unwrap();
        assert_eq!(config.search, Search::default());
    }

    #[test]
    fn rejects_missing_general_section() {
        assert!(matches!(
            parse_config("[search]\nsimilar_limit = 2\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}
