//! Capture settings.
//!
//! All fields have defaults, so an empty TOML document is a valid config:
//!
//! ```toml
//! class_name = "RawInputWindowClass"
//! background = true   # keep receiving input while another window has focus
//! mouse = true
//! keyboard = true
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base name of the hidden window class. A per-process suffix is appended.
    pub class_name: String,
    /// Register with `RIDEV_INPUTSINK`.
    pub background: bool,
    /// Capture Generic Desktop mice (usage page 0x01, usage 0x02).
    pub mouse: bool,
    /// Capture Generic Desktop keyboards (usage page 0x01, usage 0x06).
    pub keyboard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            class_name: "RawInputWindowClass".to_string(),
            background: true,
            mouse: true,
            keyboard: true,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.class_name.is_empty() {
            return Err(Error::InvalidConfig("class_name is empty".into()));
        }
        if self.class_name.contains('\0') {
            return Err(Error::InvalidConfig("class_name contains NUL".into()));
        }
        if !self.mouse && !self.keyboard {
            return Err(Error::InvalidConfig(
                "neither mouse nor keyboard capture is enabled".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn partial_document() {
        let cfg = Config::from_toml_str("keyboard = false\nbackground = false").unwrap();
        assert!(cfg.mouse);
        assert!(!cfg.keyboard);
        assert!(!cfg.background);
        assert_eq!(cfg.class_name, "RawInputWindowClass");
    }

    #[test]
    fn rejects_capturing_nothing() {
        let err = Config::from_toml_str("mouse = false\nkeyboard = false").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn rejects_bad_class_names() {
        assert!(Config::from_toml_str("class_name = \"\"").is_err());
        let cfg = Config {
            class_name: "a\0b".into(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let err = Config::from_toml_str("mice = true").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load("definitely/not/here.toml").unwrap_err();
        match err {
            Error::ConfigIo { path, .. } => assert!(path.ends_with("here.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
