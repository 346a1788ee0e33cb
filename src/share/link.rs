use url::Url;

use crate::core::{FormState, UnitScale};
use crate::error::AppError;
use crate::pricing::{BillingMode, Model, UnitKind, offered_kinds};

const PARAM_MODEL: &str = "model";
const PARAM_BATCH: &str = "batch";
const PARAM_REQUESTS: &str = "requests";
const UNIT_SUFFIX: &str = "_unit";

fn parse_url(input: &str) -> Result<Url, AppError> {
    Url::parse(input.trim()).map_err(|source| AppError::InvalidShareUrl {
        input: input.to_string(),
        source,
    })
}

/// Build a link to `base` whose query string reproduces `state`.
///
/// Only values that differ from a fresh form are written: batch when on,
/// requests above 1, non-zero quantities of kinds the model offers, and
/// non-default scales.
pub(crate) fn share_url(state: &FormState, base: &str) -> Result<Url, AppError> {
    let mut url = parse_url(base)?;
    let defaults = FormState::default();
    let model = state.model();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.append_pair(PARAM_MODEL, model.id());
        if state.billing().is_batch() {
            pairs.append_pair(PARAM_BATCH, "1");
        }
        if state.requests() > 1 {
            pairs.append_pair(PARAM_REQUESTS, &state.requests().to_string());
        }
        for kind in offered_kinds(model) {
            let quantity = state.quantity(kind);
            if quantity > 0.0 {
                pairs.append_pair(kind.id(), &quantity.to_string());
            }
            let scale = state.scale(kind);
            if scale != defaults.scale(kind) {
                pairs.append_pair(&format!("{}{UNIT_SUFFIX}", kind.id()), scale.id());
            }
        }
    }

    Ok(url)
}

/// Rebuild form state from a share link.
///
/// The link describes the whole form, so everything it omits takes the
/// fresh-form default. Values go through the same coercion as typed input;
/// unknown parameters and unusable values are skipped.
pub(crate) fn from_share_url(input: &str) -> Result<FormState, AppError> {
    let url = parse_url(input)?;
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut state = FormState::default();

    // Model first so the billing check sees the right model
    if let Some((_, value)) = pairs.iter().find(|(k, _)| k == PARAM_MODEL) {
        match value.parse::<Model>() {
            Ok(model) => state.select_model(model),
            Err(e) => tracing::warn!("share link: {e}, keeping {}", state.model()),
        }
    }

    for (key, value) in &pairs {
        match key.as_str() {
            PARAM_MODEL => {}
            PARAM_BATCH => {
                let billing = BillingMode::from_batch_flag(is_truthy(value));
                state.set_billing(billing);
            }
            PARAM_REQUESTS => {
                state.set_requests_input(value);
            }
            other => apply_kind_param(&mut state, other, value),
        }
    }

    tracing::debug!(params = pairs.len(), "applied share link");
    Ok(state)
}

fn apply_kind_param(state: &mut FormState, key: &str, value: &str) {
    if let Some(kind_id) = key.strip_suffix(UNIT_SUFFIX) {
        if let (Ok(kind), Ok(scale)) = (kind_id.parse::<UnitKind>(), value.parse::<UnitScale>()) {
            state.set_scale(kind, scale);
            return;
        }
    } else if let Ok(kind) = key.parse::<UnitKind>() {
        state.set_quantity_input(kind, value);
        return;
    }
    tracing::debug!(key, value, "share link: ignoring parameter");
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::core::estimate;

    const BASE: &str = "http://localhost:8080/";

    #[test]
    fn default_state_encodes_model_only() {
        let url = share_url(&FormState::default(), BASE).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/?model=gemini-2-flash");
    }

    #[test]
    fn encodes_non_default_fields() {
        let mut state = FormState::default();
        state.set_billing(BillingMode::Batch);
        state.set_requests(3);
        state.set_quantity(UnitKind::Text, 1.5);
        state.set_scale(UnitKind::Text, UnitScale::Million);
        state.set_quantity(UnitKind::Video, 60.0);
        let url = share_url(&state, BASE).unwrap();
        assert_eq!(
            url.query(),
            Some("model=gemini-2-flash&batch=1&requests=3&text=1.5&text_unit=million&video=60")
        );
    }

    #[test]
    fn replaces_existing_query() {
        let url = share_url(&FormState::default(), "https://calc.example.com/app?x=1#top").unwrap();
        assert_eq!(url.query(), Some("model=gemini-2-flash"));
        assert_eq!(url.fragment(), Some("top"));
    }

    #[test]
    fn omits_kinds_the_model_does_not_offer() {
        let mut state = FormState::default();
        state.select_model(Model::Gemini15Pro);
        state.set_quantity(UnitKind::Training, 2.0);
        state.select_model(Model::Gemini20Flash);
        let url = share_url(&state, BASE).unwrap();
        assert!(!url.as_str().contains("training"));
    }

    #[test]
    fn roundtrip_reproduces_estimate() {
        let mut state = FormState::default();
        state.select_model(Model::Gemini15Flash);
        state.set_requests(7);
        state.set_quantity(UnitKind::Text, 0.1);
        state.set_quantity(UnitKind::Audio, 42.0);
        state.set_quantity(UnitKind::Training, 0.25);
        state.set_scale(UnitKind::Training, UnitScale::Thousand);

        let url = share_url(&state, BASE).unwrap();
        let restored = from_share_url(url.as_str()).unwrap();
        assert_eq!(restored, state);
        assert_eq!(estimate(&restored).total_cost, estimate(&state).total_cost);
    }

    #[test]
    fn coerces_bad_values() {
        let state = from_share_url(
            "http://x/?model=gemini-2-flash&requests=lots&text=abc&image=5&text_unit=giga&colour=red",
        )
        .unwrap();
        assert_eq!(state.requests(), 1);
        assert_eq!(state.quantity(UnitKind::Text), 0.0);
        assert_eq!(state.quantity(UnitKind::Image), 5.0);
        assert_eq!(state.scale(UnitKind::Text), UnitScale::Thousand);
    }

    #[test]
    fn batch_dropped_for_model_without_batch() {
        let state = from_share_url("http://x/?batch=1&model=gemini-1-5-pro").unwrap();
        assert_eq!(state.model(), Model::Gemini15Pro);
        assert_eq!(state.billing(), BillingMode::Regular);
    }

    #[test]
    fn unknown_model_keeps_default() {
        let state = from_share_url("http://x/?model=gemini-9&batch=true").unwrap();
        assert_eq!(state.model(), Model::Gemini20Flash);
        assert_eq!(state.billing(), BillingMode::Batch);
    }

    #[test]
    fn malformed_link_is_an_error() {
        assert!(matches!(
            from_share_url("not a link"),
            Err(AppError::InvalidShareUrl { .. })
        ));
        assert!(share_url(&FormState::default(), "::").is_err());
    }
}
