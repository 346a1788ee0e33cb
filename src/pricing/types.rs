//! Pricing keys: models, billing modes and meterable unit kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Supported Gemini model variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub(crate) enum Model {
    #[default]
    #[serde(rename = "gemini-2-flash")]
    Gemini20Flash,
    #[serde(rename = "gemini-2-flash-lite")]
    Gemini20FlashLite,
    #[serde(rename = "gemini-1-5-flash")]
    Gemini15Flash,
    #[serde(rename = "gemini-1-5-pro")]
    Gemini15Pro,
}

impl Model {
    pub(crate) const ALL: [Model; 4] = [
        Model::Gemini20Flash,
        Model::Gemini20FlashLite,
        Model::Gemini15Flash,
        Model::Gemini15Pro,
    ];

    /// Stable identifier used on the command line, in config files and share links
    pub(crate) fn id(self) -> &'static str {
        match self {
            Model::Gemini20Flash => "gemini-2-flash",
            Model::Gemini20FlashLite => "gemini-2-flash-lite",
            Model::Gemini15Flash => "gemini-1-5-flash",
            Model::Gemini15Pro => "gemini-1-5-pro",
        }
    }

    pub(crate) fn display_name(self) -> &'static str {
        match self {
            Model::Gemini20Flash => "Gemini 2.0 Flash",
            Model::Gemini20FlashLite => "Gemini 2.0 Flash Lite",
            Model::Gemini15Flash => "Gemini 1.5 Flash",
            Model::Gemini15Pro => "Gemini 1.5 Pro",
        }
    }

    /// Short aliases accepted when parsing (e.g., "2.0-flash" for "gemini-2-flash")
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Model::Gemini20Flash => &["gemini-2.0-flash", "2-flash", "2.0-flash"],
            Model::Gemini20FlashLite => &["gemini-2.0-flash-lite", "2-flash-lite", "2.0-flash-lite"],
            Model::Gemini15Flash => &["gemini-1.5-flash", "1-5-flash", "1.5-flash"],
            Model::Gemini15Pro => &["gemini-1.5-pro", "1-5-pro", "1.5-pro"],
        }
    }

    /// Only the 2.0 family has a discounted batch tier
    pub(crate) fn supports_batch(self) -> bool {
        matches!(self, Model::Gemini20Flash | Model::Gemini20FlashLite)
    }

    /// Billing mode that actually applies to this model
    pub(crate) fn effective_billing(self, requested: BillingMode) -> BillingMode {
        if self.supports_batch() {
            requested
        } else {
            BillingMode::Regular
        }
    }

    /// 2.0 models bill the audio track of a video as audio on top of the video seconds
    pub(crate) fn bills_video_audio_separately(self) -> bool {
        matches!(self, Model::Gemini20Flash | Model::Gemini20FlashLite)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Model {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Model::ALL
            .into_iter()
            .find(|m| m.id() == lower || m.aliases().contains(&lower.as_str()))
            .ok_or_else(|| AppError::UnknownModel {
                input: s.to_string(),
            })
    }
}

impl TryFrom<String> for Model {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Regular (synchronous) or batch (discounted, asynchronous) pricing tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BillingMode {
    #[default]
    Regular,
    Batch,
}

impl BillingMode {
    pub(crate) fn from_batch_flag(batch: bool) -> Self {
        if batch {
            BillingMode::Batch
        } else {
            BillingMode::Regular
        }
    }

    pub(crate) fn is_batch(self) -> bool {
        self == BillingMode::Batch
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            BillingMode::Regular => "Regular",
            BillingMode::Batch => "Batch",
        }
    }
}

/// How a unit kind is measured, which decides the direction of scale conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitFamily {
    /// Priced per million characters
    Characters,
    /// Priced per single item, second or token
    Count,
}

/// A category of meterable usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum UnitKind {
    Text,
    Image,
    Video,
    Audio,
    Output,
    Training,
}

impl UnitKind {
    pub(crate) const ALL: [UnitKind; 6] = [
        UnitKind::Text,
        UnitKind::Image,
        UnitKind::Video,
        UnitKind::Audio,
        UnitKind::Output,
        UnitKind::Training,
    ];

    pub(crate) fn id(self) -> &'static str {
        match self {
            UnitKind::Text => "text",
            UnitKind::Image => "image",
            UnitKind::Video => "video",
            UnitKind::Audio => "audio",
            UnitKind::Output => "output",
            UnitKind::Training => "training",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            UnitKind::Text => "Input Text",
            UnitKind::Image => "Input Images",
            UnitKind::Video => "Input Video (seconds)",
            UnitKind::Audio => "Input Audio (seconds)",
            UnitKind::Output => "Output Text",
            UnitKind::Training => "Training Tokens",
        }
    }

    pub(crate) fn family(self) -> UnitFamily {
        match self {
            UnitKind::Text | UnitKind::Output => UnitFamily::Characters,
            UnitKind::Image | UnitKind::Video | UnitKind::Audio | UnitKind::Training => {
                UnitFamily::Count
            }
        }
    }

    /// Image, video and audio are always entered in raw units
    pub(crate) fn has_scale_choice(self) -> bool {
        !matches!(self, UnitKind::Image | UnitKind::Video | UnitKind::Audio)
    }

    /// What a quoted price is per, for display next to the price
    pub(crate) fn price_unit(self) -> &'static str {
        match self {
            UnitKind::Text | UnitKind::Output => "1M characters",
            UnitKind::Training => "token",
            UnitKind::Video | UnitKind::Audio => "second",
            UnitKind::Image => "unit",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for UnitKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let kind = match lower.as_str() {
            "text" | "input" => UnitKind::Text,
            "image" | "images" => UnitKind::Image,
            "video" => UnitKind::Video,
            "audio" => UnitKind::Audio,
            "output" => UnitKind::Output,
            "training" | "train" => UnitKind::Training,
            _ => {
                return Err(AppError::UnknownUnitKind {
                    input: s.to_string(),
                });
            }
        };
        Ok(kind)
    }
}
