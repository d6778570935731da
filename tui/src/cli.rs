use std::io::IsTerminal;
use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use color_eyre::eyre::Result;
use color_eyre::eyre::WrapErr;
use color_eyre::eyre::bail;
use quickpick_core::InputFormat;
use quickpick_core::PickerConfig;

/// Pick one line (or JSON record) from a list with fuzzy search.
#[derive(Debug, Parser)]
#[command(name = "quickpick", version)]
pub struct Cli {
    /// TOML file with picker settings; flags below override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read candidates from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// How candidates are encoded
    #[arg(short, long, value_enum, default_value_t = FormatArg::Lines)]
    pub format: FormatArg,

    /// Heading drawn above the search field
    #[arg(long, value_name = "TEXT")]
    pub label: Option<String>,

    /// Text shown in the empty search field
    #[arg(long, value_name = "TEXT")]
    pub placeholder: Option<String>,

    /// Offer the typed query as a new entry
    #[arg(long)]
    pub allow_new: bool,

    /// Hint shown beside the new entry
    #[arg(long, value_name = "TEXT")]
    pub new_hint: Option<String>,

    /// Text inserted when space is pressed on an empty query
    #[arg(long, value_name = "TEXT")]
    pub complete_prefix: Option<String>,

    /// Footer text shown below the results
    #[arg(long, value_name = "TEXT")]
    pub help_text: Option<String>,

    /// Print the selected candidate as JSON instead of its name
    #[arg(long)]
    pub print_json: bool,

    /// Append logs to FILE (falls back to $QUICKPICK_LOG)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Lines,
    Json,
    JsonLines,
}

impl From<FormatArg> for InputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Lines => InputFormat::Lines,
            FormatArg::Json => InputFormat::Json,
            FormatArg::JsonLines => InputFormat::JsonLines,
        }
    }
}

impl Cli {
    /// The config file (if any) with command-line overrides applied.
    pub fn picker_config(&self) -> Result<PickerConfig> {
        let mut config = match &self.config {
            Some(path) => PickerConfig::load(path)?,
            None => PickerConfig::default(),
        };

        if let Some(label) = &self.label {
            config.label = label.clone();
        }
        if let Some(placeholder) = &self.placeholder {
            config.placeholder = placeholder.clone();
        }
        if self.allow_new {
            config.allow_new = true;
        }
        if let Some(hint) = &self.new_hint {
            config.new_hint = Some(hint.clone());
        }
        if let Some(prefix) = &self.complete_prefix {
            config.complete_prefix = Some(prefix.clone());
        }
        if let Some(help) = &self.help_text {
            config.help_text = Some(help.clone());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn read_input(&self) -> Result<String> {
        if let Some(path) = &self.input {
            return std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read candidates from {}", path.display()));
        }

        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            bail!("no candidates: pipe them on stdin or pass --input FILE");
        }
        let mut input = String::new();
        stdin
            .read_to_string(&mut input)
            .wrap_err("failed to read candidates from stdin")?;
        Ok(input)
    }
}
