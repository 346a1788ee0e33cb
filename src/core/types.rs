//! Calculator form state
//!
//! `FormState` is the single record every front end edits. It is only
//! mutated through the setters below, which enforce the billing/model
//! invariant and coerce raw input; the estimator reads it and never
//! writes anything back.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pricing::{BillingMode, Model, UnitFamily, UnitKind};

use super::input::{clamp_quantity, parse_quantity, parse_request_count};

/// Display-unit scale applied to an entered quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub(crate) enum UnitScale {
    Raw,
    Thousand,
    Million,
}

impl UnitScale {
    pub(crate) fn id(self) -> &'static str {
        match self {
            UnitScale::Raw => "raw",
            UnitScale::Thousand => "thousand",
            UnitScale::Million => "million",
        }
    }

    /// Short label shown in tables
    pub(crate) fn short_label(self) -> &'static str {
        match self {
            UnitScale::Raw => "Units",
            UnitScale::Thousand => "K",
            UnitScale::Million => "M",
        }
    }

    /// Factor converting an entered quantity into the quantity a price applies to.
    ///
    /// Character prices are quoted per million characters, so the factor
    /// normalizes *down* into millions; count prices are quoted per single
    /// unit, so the factor scales *up* into raw units.
    pub(crate) fn multiplier(self, family: UnitFamily) -> f64 {
        match (family, self) {
            (UnitFamily::Characters, UnitScale::Raw) => 1e-6,
            (UnitFamily::Characters, UnitScale::Thousand) => 1e-3,
            (UnitFamily::Characters, UnitScale::Million) => 1.0,
            (UnitFamily::Count, UnitScale::Raw) => 1.0,
            (UnitFamily::Count, UnitScale::Thousand) => 1e3,
            (UnitFamily::Count, UnitScale::Million) => 1e6,
        }
    }

    /// Scale a kind starts out with
    pub(crate) fn default_for(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Text | UnitKind::Output => UnitScale::Thousand,
            UnitKind::Training => UnitScale::Million,
            UnitKind::Image | UnitKind::Video | UnitKind::Audio => UnitScale::Raw,
        }
    }
}

impl fmt::Display for UnitScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for UnitScale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" | "units" | "unit" | "u" => Ok(UnitScale::Raw),
            "thousand" | "k" => Ok(UnitScale::Thousand),
            "million" | "m" => Ok(UnitScale::Million),
            _ => Err(AppError::UnknownUnitScale {
                input: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for UnitScale {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One value per unit kind, indexed by `UnitKind`
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PerKind<T>([T; 6]);

impl<T: Copy> PerKind<T> {
    pub(crate) fn from_fn(f: impl Fn(UnitKind) -> T) -> Self {
        PerKind(UnitKind::ALL.map(f))
    }
}

impl<T> Index<UnitKind> for PerKind<T> {
    type Output = T;

    fn index(&self, kind: UnitKind) -> &T {
        &self.0[kind.index()]
    }
}

impl<T> IndexMut<UnitKind> for PerKind<T> {
    fn index_mut(&mut self, kind: UnitKind) -> &mut T {
        &mut self.0[kind.index()]
    }
}

/// Current calculator inputs
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FormState {
    model: Model,
    billing: BillingMode,
    requests: u32,
    quantities: PerKind<f64>,
    scales: PerKind<UnitScale>,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            model: Model::default(),
            billing: BillingMode::Regular,
            requests: 1,
            quantities: PerKind::from_fn(|_| 0.0),
            scales: PerKind::from_fn(UnitScale::default_for),
        }
    }
}

impl FormState {
    pub(crate) fn model(&self) -> Model {
        self.model
    }

    pub(crate) fn billing(&self) -> BillingMode {
        self.billing
    }

    pub(crate) fn requests(&self) -> u32 {
        self.requests
    }

    pub(crate) fn quantity(&self, kind: UnitKind) -> f64 {
        self.quantities[kind]
    }

    pub(crate) fn scale(&self, kind: UnitKind) -> UnitScale {
        self.scales[kind]
    }

    /// Select a model. Models without a batch tier force billing back to
    /// regular; picking a batch-capable model later does not restore it.
    pub(crate) fn select_model(&mut self, model: Model) {
        self.model = model;
        if !model.supports_batch() && self.billing.is_batch() {
            tracing::debug!(model = model.id(), "batch billing unavailable, switching to regular");
            self.billing = BillingMode::Regular;
        }
    }

    /// Set the billing mode. Returns `false` (and changes nothing) when batch
    /// is requested for a model that has no batch tier.
    pub(crate) fn set_billing(&mut self, billing: BillingMode) -> bool {
        if billing.is_batch() && !self.model.supports_batch() {
            tracing::debug!(model = self.model.id(), "ignoring batch billing request");
            return false;
        }
        self.billing = billing;
        true
    }

    pub(crate) fn set_quantity(&mut self, kind: UnitKind, value: f64) {
        self.quantities[kind] = clamp_quantity(value);
    }

    /// Set a quantity from raw text; malformed input becomes 0.
    pub(crate) fn set_quantity_input(&mut self, kind: UnitKind, input: &str) {
        self.set_quantity(kind, parse_quantity(input));
    }

    /// Change the display scale of a kind. Kinds without a scale choice keep
    /// their fixed scale and `false` is returned.
    pub(crate) fn set_scale(&mut self, kind: UnitKind, scale: UnitScale) -> bool {
        if !kind.has_scale_choice() {
            tracing::debug!(kind = kind.id(), "unit scale is fixed for this kind");
            return false;
        }
        self.scales[kind] = scale;
        true
    }

    pub(crate) fn set_requests(&mut self, requests: u32) {
        self.requests = requests.max(1);
    }

    /// Set the request count from raw text; non-integer input keeps the
    /// previous value. Returns whether the input was accepted.
    pub(crate) fn set_requests_input(&mut self, input: &str) -> bool {
        match parse_request_count(input) {
            Some(requests) => {
                self.requests = requests;
                true
            }
            None => false,
        }
    }

    /// Zero every quantity; model, billing, scales and requests stay.
    pub(crate) fn clear_quantities(&mut self) {
        self.quantities = PerKind::from_fn(|_| 0.0);
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let state = FormState::default();
        assert_eq!(state.model(), Model::Gemini20Flash);
        assert_eq!(state.billing(), BillingMode::Regular);
        assert_eq!(state.requests(), 1);
        assert_eq!(state.scale(UnitKind::Text), UnitScale::Thousand);
        assert_eq!(state.scale(UnitKind::Output), UnitScale::Thousand);
        assert_eq!(state.scale(UnitKind::Training), UnitScale::Million);
        assert_eq!(state.scale(UnitKind::Image), UnitScale::Raw);
        for kind in UnitKind::ALL {
            assert_eq!(state.quantity(kind), 0.0);
        }
    }

    #[test]
    fn selecting_model_without_batch_forces_regular() {
        let mut state = FormState::default();
        assert!(state.set_billing(BillingMode::Batch));
        state.select_model(Model::Gemini15Pro);
        assert_eq!(state.billing(), BillingMode::Regular);

        // One-way: going back does not restore batch
        state.select_model(Model::Gemini20Flash);
        assert_eq!(state.billing(), BillingMode::Regular);
    }

    #[test]
    fn selecting_batch_capable_model_keeps_batch() {
        let mut state = FormState::default();
        state.set_billing(BillingMode::Batch);
        state.select_model(Model::Gemini20FlashLite);
        assert_eq!(state.billing(), BillingMode::Batch);
    }

    #[test]
    fn batch_rejected_for_model_without_batch() {
        let mut state = FormState::default();
        state.select_model(Model::Gemini15Flash);
        assert!(!state.set_billing(BillingMode::Batch));
        assert_eq!(state.billing(), BillingMode::Regular);
    }

    #[test]
    fn quantity_input_coerces() {
        let mut state = FormState::default();
        state.set_quantity_input(UnitKind::Text, "12.5");
        assert_eq!(state.quantity(UnitKind::Text), 12.5);
        state.set_quantity_input(UnitKind::Text, "oops");
        assert_eq!(state.quantity(UnitKind::Text), 0.0);
        state.set_quantity(UnitKind::Audio, -3.0);
        assert_eq!(state.quantity(UnitKind::Audio), 0.0);
        state.set_quantity(UnitKind::Audio, f64::NAN);
        assert_eq!(state.quantity(UnitKind::Audio), 0.0);
    }

    #[test]
    fn requests_input_keeps_previous_on_garbage() {
        let mut state = FormState::default();
        assert!(state.set_requests_input("5"));
        assert_eq!(state.requests(), 5);
        assert!(!state.set_requests_input("five"));
        assert_eq!(state.requests(), 5);
        assert!(!state.set_requests_input("2.5"));
        assert_eq!(state.requests(), 5);
        assert!(state.set_requests_input("0"));
        assert_eq!(state.requests(), 1);
    }

    #[test]
    fn set_requests_floors_at_one() {
        let mut state = FormState::default();
        state.set_requests(0);
        assert_eq!(state.requests(), 1);
    }

    #[test]
    fn scale_fixed_for_media_kinds() {
        let mut state = FormState::default();
        assert!(!state.set_scale(UnitKind::Video, UnitScale::Million));
        assert_eq!(state.scale(UnitKind::Video), UnitScale::Raw);
        assert!(state.set_scale(UnitKind::Text, UnitScale::Million));
        assert_eq!(state.scale(UnitKind::Text), UnitScale::Million);
    }

    #[test]
    fn clear_quantities_keeps_other_fields() {
        let mut state = FormState::default();
        state.set_requests(3);
        state.set_scale(UnitKind::Text, UnitScale::Raw);
        state.set_quantity(UnitKind::Text, 100.0);
        state.clear_quantities();
        assert_eq!(state.quantity(UnitKind::Text), 0.0);
        assert_eq!(state.requests(), 3);
        assert_eq!(state.scale(UnitKind::Text), UnitScale::Raw);
    }

    #[test]
    fn unit_scale_parse_and_serde_aliases() {
        assert_eq!("K".parse::<UnitScale>().unwrap(), UnitScale::Thousand);
        assert_eq!("units".parse::<UnitScale>().unwrap(), UnitScale::Raw);
        assert!("giga".parse::<UnitScale>().is_err());

        #[derive(Deserialize)]
        struct Wrap {
            scale: UnitScale,
        }
        let w: Wrap = toml::from_str("scale = \"m\"").unwrap();
        assert_eq!(w.scale, UnitScale::Million);
        let w: Wrap = toml::from_str("scale = \"Thousand\"").unwrap();
        assert_eq!(w.scale, UnitScale::Thousand);
        assert!(toml::from_str::<Wrap>("scale = \"giga\"").is_err());
    }

    #[test]
    fn character_multiplier_is_count_multiplier_in_millions() {
        for scale in [UnitScale::Raw, UnitScale::Thousand, UnitScale::Million] {
            let chars = scale.multiplier(UnitFamily::Characters);
            let count = scale.multiplier(UnitFamily::Count);
            assert!((chars - count * 1e-6).abs() < 1e-15, "{scale}: {chars} vs {count}");
        }
    }
}
