use serde::Serialize;

use crate::pricing::{BillingMode, Model, UnitKind, price_for};

use super::types::{FormState, UnitScale};

/// Cost contribution of a single unit kind
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LineItem {
    pub(crate) kind: UnitKind,
    /// Quantity as entered, in `scale` units
    pub(crate) quantity: f64,
    pub(crate) scale: UnitScale,
    /// Quantity in the unit the price is quoted against
    pub(crate) normalized_quantity: f64,
    pub(crate) price: f64,
    pub(crate) cost: f64,
}

/// Result of one full estimation pass
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Estimate {
    pub(crate) model: Model,
    pub(crate) billing: BillingMode,
    pub(crate) requests: u32,
    pub(crate) lines: Vec<LineItem>,
    pub(crate) per_request_cost: f64,
    pub(crate) total_cost: f64,
}

/// Compute the estimate for the current form state. Always recomputed from
/// scratch; kinds the model does not meter and zero quantities are skipped.
pub(crate) fn estimate(state: &FormState) -> Estimate {
    let model = state.model();
    let billing = model.effective_billing(state.billing());

    let lines: Vec<LineItem> = UnitKind::ALL
        .into_iter()
        .filter_map(|kind| line_item(state, model, billing, kind))
        .collect();

    // `Sum for f64` yields -0.0 for no lines
    let per_request_cost = lines.iter().fold(0.0, |acc, line| acc + line.cost);
    let per_request_cost = cap_cost(per_request_cost);
    let total_cost = cap_cost(per_request_cost * f64::from(state.requests()));

    Estimate {
        model,
        billing,
        requests: state.requests(),
        lines,
        per_request_cost,
        total_cost,
    }
}

fn line_item(
    state: &FormState,
    model: Model,
    billing: BillingMode,
    kind: UnitKind,
) -> Option<LineItem> {
    let price = price_for(model, billing, kind)?;
    let quantity = state.quantity(kind);
    if quantity == 0.0 {
        return None;
    }
    let scale = state.scale(kind);
    let normalized_quantity = quantity * scale.multiplier(kind.family());
    Some(LineItem {
        kind,
        quantity,
        scale,
        normalized_quantity,
        price,
        cost: cap_cost(normalized_quantity * price),
    })
}

/// Costs are non-negative; one that overflows saturates at `f64::MAX` so it
/// still prints and serializes as a number.
fn cap_cost(cost: f64) -> f64 {
    if cost.is_finite() { cost } else { f64::MAX }
}
