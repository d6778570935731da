use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::PickerError;
use crate::error::Result;

/// How the synthetic "create" row treats a query that already names an
/// existing candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExactMatchPolicy {
    /// Append the synthetic row regardless of existing names.
    #[default]
    AlwaysAppend,
    /// Leave the synthetic row out when a result's name equals the query.
    SkipExactMatch,
}

/// Case handling for the fuzzy matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMatching {
    /// Case-insensitive unless the query contains an uppercase character.
    #[default]
    Smart,
    Ignore,
    Respect,
}

/// Unicode normalization for the fuzzy matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Fold accents unless the query itself contains accented characters.
    #[default]
    Smart,
    Never,
}

/// Construction-time configuration supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Shown in the empty search field.
    #[serde(default)]
    pub placeholder: String,

    /// Heading text. Opaque to matching.
    #[serde(default)]
    pub label: String,

    /// Offer a synthetic "create" row built from the query.
    #[serde(default)]
    pub allow_new: bool,

    /// Hint attached to the synthetic row.
    #[serde(default)]
    pub new_hint: Option<String>,

    /// Host-trusted markup rendered verbatim below the results.
    #[serde(default)]
    pub help_text: Option<String>,

    /// Text substituted when space is pressed on an empty query.
    #[serde(default)]
    pub complete_prefix: Option<String>,

    /// Display token drawn before the search field.
    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub exact_match: ExactMatchPolicy,

    #[serde(default)]
    pub case_matching: CaseMatching,

    #[serde(default)]
    pub normalization: Normalization,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            placeholder: String::new(),
            label: String::new(),
            allow_new: false,
            new_hint: None,
            help_text: None,
            complete_prefix: None,
            icon: None,
            exact_match: ExactMatchPolicy::default(),
            case_matching: CaseMatching::default(),
            normalization: Normalization::default(),
        }
    }
}

impl PickerConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: PickerConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| PickerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(prefix) = &self.complete_prefix
            && prefix.is_empty()
        {
            return Err(PickerError::InvalidSetting(
                "complete_prefix must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
