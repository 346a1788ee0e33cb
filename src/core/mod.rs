//! Core module - form state, input coercion and the cost estimator

mod estimate;
mod input;
mod types;

pub(crate) use estimate::{Estimate, estimate};
pub(crate) use types::{FormState, UnitScale};
