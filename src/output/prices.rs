use comfy_table::{Cell, Table};

use crate::error::AppError;
use crate::pricing::{BillingMode, Model, UnitKind, offered_kinds, price_for};

use super::TableOptions;
use super::estimate::VIDEO_AUDIO_NOTE;
use super::format::{create_styled_table, format_price, header_cell, right_cell, styled_cell};

fn price_text(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), format_price)
}

fn build_price_table(models: &[Model], opts: TableOptions) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Model", c),
        header_cell("Input", c),
        header_cell("Regular", c),
        header_cell("Batch", c),
        header_cell("Per", c),
    ]);

    for &model in models {
        for (i, kind) in offered_kinds(model).enumerate() {
            let name = if i == 0 { model.display_name() } else { "" };
            table.add_row(vec![
                styled_cell(name, None, true),
                Cell::new(kind.label()),
                right_cell(&price_text(price_for(model, BillingMode::Regular, kind)), None, false),
                right_cell(&price_text(price_for(model, BillingMode::Batch, kind)), None, false),
                Cell::new(kind.price_unit()),
            ]);
        }
    }

    table
}

pub(crate) fn print_price_table(models: &[Model], opts: TableOptions) {
    println!("\n  Vertex AI Gemini prices\n");
    println!("{}", build_price_table(models, opts));
    if models.iter().any(|m| m.bills_video_audio_separately()) {
        println!("\n  {VIDEO_AUDIO_NOTE} (Gemini 2.0 models)");
    }
    println!();
}

fn kind_prices_json(model: Model, kind: UnitKind) -> serde_json::Value {
    serde_json::json!({
        "kind": kind,
        "label": kind.label(),
        "regular": price_for(model, BillingMode::Regular, kind),
        "batch": price_for(model, BillingMode::Batch, kind),
        "per": kind.price_unit(),
    })
}

pub(crate) fn output_prices_json(models: &[Model]) -> Result<String, AppError> {
    let output: Vec<serde_json::Value> = models
        .iter()
        .map(|&model| {
            serde_json::json!({
                "model": model,
                "name": model.display_name(),
                "supports_batch": model.supports_batch(),
                "prices": offered_kinds(model)
                    .map(|kind| kind_prices_json(model, kind))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&output)?)
}

pub(crate) fn print_models_table(opts: TableOptions) {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("ID", c),
        header_cell("Name", c),
        header_cell("Batch", c),
        header_cell("Inputs", c),
    ]);
    for model in Model::ALL {
        let kinds: Vec<&str> = offered_kinds(model).map(UnitKind::id).collect();
        table.add_row(vec![
            Cell::new(model.id()),
            Cell::new(model.display_name()),
            Cell::new(if model.supports_batch() { "yes" } else { "no" }),
            Cell::new(kinds.join(", ")),
        ]);
    }
    println!("{table}");
}

pub(crate) fn output_models_json() -> Result<String, AppError> {
    let output: Vec<serde_json::Value> = Model::ALL
        .into_iter()
        .map(|model| {
            serde_json::json!({
                "id": model,
                "name": model.display_name(),
                "supports_batch": model.supports_batch(),
                "kinds": offered_kinds(model).collect::<Vec<_>>(),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&output)?)
}
