use super::types::{Model, UnitKind};

/// Per-kind prices for one billing tier. `None` means the kind is not metered.
#[derive(Debug, Clone, Copy)]
pub(super) struct TierPrices {
    pub(super) text: Option<f64>,
    pub(super) image: Option<f64>,
    pub(super) video: Option<f64>,
    pub(super) audio: Option<f64>,
    pub(super) output: Option<f64>,
    pub(super) training: Option<f64>,
}

impl TierPrices {
    pub(super) fn get(&self, kind: UnitKind) -> Option<f64> {
        match kind {
            UnitKind::Text => self.text,
            UnitKind::Image => self.image,
            UnitKind::Video => self.video,
            UnitKind::Audio => self.audio,
            UnitKind::Output => self.output,
            UnitKind::Training => self.training,
        }
    }
}

/// Prices for one model. Text/output are per million characters,
/// image per item, video/audio per second, training per token.
#[derive(Debug, Clone, Copy)]
pub(super) struct ModelPricing {
    pub(super) regular: TierPrices,
    pub(super) batch: Option<TierPrices>,
}

const GEMINI_2_FLASH: ModelPricing = ModelPricing {
    regular: TierPrices {
        text: Some(0.0375),
        image: Some(0.000_193_5),
        video: Some(0.000_038_7),
        audio: Some(0.000_025),
        output: Some(0.15),
        training: None,
    },
    batch: Some(TierPrices {
        text: Some(0.018_75),
        image: Some(0.000_096_8),
        video: Some(0.000_019_4),
        audio: Some(0.000_012_5),
        output: Some(0.075),
        training: None,
    }),
};

const GEMINI_2_FLASH_LITE: ModelPricing = ModelPricing {
    regular: TierPrices {
        text: Some(0.018_75),
        image: Some(0.000_096_8),
        video: Some(0.000_019_4),
        audio: Some(0.000_001_9),
        output: Some(0.075),
        training: None,
    },
    batch: Some(TierPrices {
        text: Some(0.009_375),
        image: Some(0.000_048_4),
        video: Some(0.000_009_7),
        audio: Some(0.000_000_9),
        output: Some(0.0375),
        training: None,
    }),
};

// 1.5 models have no batch tier
const GEMINI_1_5_FLASH: ModelPricing = ModelPricing {
    regular: TierPrices {
        text: Some(0.000_018_8),
        image: Some(0.000_02),
        video: Some(0.000_02),
        audio: Some(0.000_002),
        output: Some(0.000_075),
        training: Some(8.0),
    },
    batch: None,
};

const GEMINI_1_5_PRO: ModelPricing = ModelPricing {
    regular: TierPrices {
        text: Some(0.000_312_5),
        image: Some(0.000_328_75),
        video: Some(0.000_328_75),
        audio: Some(0.000_031_3),
        output: Some(0.001_25),
        training: Some(80.0),
    },
    batch: None,
};

pub(super) fn model_pricing(model: Model) -> &'static ModelPricing {
    match model {
        Model::Gemini20Flash => &GEMINI_2_FLASH,
        Model::Gemini20FlashLite => &GEMINI_2_FLASH_LITE,
        Model::Gemini15Flash => &GEMINI_1_5_FLASH,
        Model::Gemini15Pro => &GEMINI_1_5_PRO,
    }
}
