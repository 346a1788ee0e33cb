mod estimate;
mod format;
mod prices;

pub(crate) use estimate::{estimate_heading, output_estimate_json, print_estimate_table, total_line};
pub(crate) use prices::{output_models_json, output_prices_json, print_models_table, print_price_table};

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
}
