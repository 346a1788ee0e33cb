mod lookup;
mod table;
mod types;

pub(crate) use lookup::{is_offered, offered_kinds, price_for};
pub(crate) use types::{BillingMode, Model, UnitFamily, UnitKind};
