//! CLI argument definitions
//!
//! Global CLI options, config merging, and application of the form flags
//! onto the calculator state.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};
use crate::core::{FormState, UnitScale};
use crate::pricing::{BillingMode, Model, UnitKind};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

fn parse_model(s: &str) -> Result<Model, String> {
    s.parse().map_err(|e: crate::error::AppError| e.to_string())
}

fn parse_scale(s: &str) -> Result<UnitScale, String> {
    s.parse().map_err(|e: crate::error::AppError| e.to_string())
}

#[derive(Debug, Parser)]
#[command(name = "gemcost")]
#[command(about = "Vertex AI Gemini price calculator", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Model to price (gemini-2-flash, gemini-2-flash-lite, gemini-1-5-flash, gemini-1-5-pro)
    #[arg(short, long, global = true, value_parser = parse_model)]
    pub(crate) model: Option<Model>,

    /// Use Batch API pricing (Gemini 2.0 models only)
    #[arg(short, long, global = true, conflicts_with = "regular")]
    pub(crate) batch: bool,

    /// Use regular pricing even if the config enables batch
    #[arg(long, global = true)]
    pub(crate) regular: bool,

    /// Number of requests; the total is multiplied by it
    #[arg(short, long, global = true, value_name = "N", allow_hyphen_values = true)]
    pub(crate) requests: Option<String>,

    /// Input text, in --text-unit (default K characters)
    #[arg(long, global = true, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub(crate) text: Option<String>,

    /// Number of input images
    #[arg(long, global = true, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub(crate) image: Option<String>,

    /// Input video, in seconds
    #[arg(long, global = true, value_name = "SECONDS", allow_hyphen_values = true)]
    pub(crate) video: Option<String>,

    /// Input audio, in seconds
    #[arg(long, global = true, value_name = "SECONDS", allow_hyphen_values = true)]
    pub(crate) audio: Option<String>,

    /// Output text, in --output-unit (default K characters)
    #[arg(long, global = true, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub(crate) output: Option<String>,

    /// Training tokens, in --training-unit (default million)
    #[arg(long, global = true, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub(crate) training: Option<String>,

    /// Scale of --text: raw, k or m
    #[arg(long, global = true, value_name = "SCALE", value_parser = parse_scale)]
    pub(crate) text_unit: Option<UnitScale>,

    /// Scale of --output: raw, k or m
    #[arg(long, global = true, value_name = "SCALE", value_parser = parse_scale)]
    pub(crate) output_unit: Option<UnitScale>,

    /// Scale of --training: raw, k or m
    #[arg(long, global = true, value_name = "SCALE", value_parser = parse_scale)]
    pub(crate) training_unit: Option<UnitScale>,

    /// Start from the settings encoded in a share link
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) from_url: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Config file to use instead of the default locations
    #[arg(long, global = true, value_name = "PATH", env = "GEMCOST_CONFIG")]
    pub(crate) config: Option<PathBuf>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        if let Some(color) = config.color
            && matches!(self.color, ColorMode::Auto)
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    fn quantity_args(&self) -> [(UnitKind, Option<&str>); 6] {
        [
            (UnitKind::Text, self.text.as_deref()),
            (UnitKind::Image, self.image.as_deref()),
            (UnitKind::Video, self.video.as_deref()),
            (UnitKind::Audio, self.audio.as_deref()),
            (UnitKind::Output, self.output.as_deref()),
            (UnitKind::Training, self.training.as_deref()),
        ]
    }

    /// Apply the form flags on top of `state` (which already holds config or
    /// share-link values). The model goes first so billing is checked against it.
    pub(crate) fn apply_to(&self, state: &mut FormState) {
        if let Some(model) = self.model {
            state.select_model(model);
        }
        if self.batch && !state.set_billing(BillingMode::Batch) {
            tracing::warn!(
                "{} has no Batch API pricing, using regular billing",
                state.model().display_name()
            );
        }
        if self.regular {
            state.set_billing(BillingMode::Regular);
        }
        if let Some(requests) = self.requests.as_deref()
            && !state.set_requests_input(requests)
        {
            tracing::warn!(
                "ignoring non-integer request count \"{requests}\", keeping {}",
                state.requests()
            );
        }

        for (kind, value) in self.quantity_args() {
            if let Some(value) = value {
                state.set_quantity_input(kind, value);
            }
        }

        let scales = [
            (UnitKind::Text, self.text_unit),
            (UnitKind::Output, self.output_unit),
            (UnitKind::Training, self.training_unit),
        ];
        for (kind, scale) in scales {
            if let Some(scale) = scale {
                state.set_scale(kind, scale);
            }
        }
    }
}
