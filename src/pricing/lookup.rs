use super::table::model_pricing;
use super::types::{BillingMode, Model, UnitKind};

/// Price per base unit for `kind`, or `None` when the model does not meter it
/// under `billing`.
pub(crate) fn price_for(model: Model, billing: BillingMode, kind: UnitKind) -> Option<f64> {
    let pricing = model_pricing(model);
    match billing {
        BillingMode::Regular => pricing.regular.get(kind),
        BillingMode::Batch => pricing.batch.as_ref().and_then(|tier| tier.get(kind)),
    }
}

/// Kinds the model has a regular price for, in canonical order.
pub(crate) fn offered_kinds(model: Model) -> impl Iterator<Item = UnitKind> {
    UnitKind::ALL
        .into_iter()
        .filter(move |kind| model_pricing(model).regular.get(*kind).is_some())
}

pub(crate) fn is_offered(model: Model, kind: UnitKind) -> bool {
    model_pricing(model).regular.get(kind).is_some()
}
