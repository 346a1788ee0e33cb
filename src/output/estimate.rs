use comfy_table::{Cell, Table};

use crate::core::Estimate;
use crate::error::AppError;
use crate::pricing::UnitKind;

use super::TableOptions;
use super::format::{
    cost_color, create_styled_table, format_cost, format_price, format_quantity, header_cell,
    right_cell, styled_cell,
};

pub(crate) const VIDEO_AUDIO_NOTE: &str =
    "Note: If video contains audio, you will be billed for audio processing as well";

fn requests_label(requests: u32) -> String {
    if requests == 1 {
        "1 request".to_string()
    } else {
        format!("{requests} requests")
    }
}

/// One-line description of the settings an estimate was computed for
pub(crate) fn estimate_heading(est: &Estimate) -> String {
    format!(
        "{} | {} billing | {}",
        est.model.display_name(),
        est.billing.label(),
        requests_label(est.requests)
    )
}

pub(crate) fn total_line(est: &Estimate) -> String {
    format!("Total Estimated Cost: {}", format_cost(est.total_cost))
}

fn build_estimate_table(est: &Estimate, opts: TableOptions) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Input", c),
        header_cell("Quantity", c),
        header_cell("Unit", c),
        header_cell("Price", c),
        header_cell("Cost", c),
    ]);

    for line in &est.lines {
        table.add_row(vec![
            Cell::new(line.kind.label()),
            right_cell(&format_quantity(line.quantity), None, false),
            Cell::new(line.scale.short_label()),
            right_cell(
                &format!("{} / {}", format_price(line.price), line.kind.price_unit()),
                None,
                false,
            ),
            right_cell(&format_cost(line.cost), cost_color(c), false),
        ]);
    }

    if est.requests > 1 {
        table.add_row(vec![
            styled_cell("Per request", None, false),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
            right_cell(&format_cost(est.per_request_cost), None, false),
        ]);
    }

    table.add_row(vec![
        styled_cell("Total Estimated Cost", None, true),
        right_cell(&format!("x{}", est.requests), None, false),
        Cell::new(""),
        Cell::new(""),
        right_cell(&format_cost(est.total_cost), cost_color(c), true),
    ]);

    table
}

pub(crate) fn print_estimate_table(est: &Estimate, opts: TableOptions) {
    println!("\n  {}\n", estimate_heading(est));

    if est.lines.is_empty() {
        println!("  No usage entered. {}\n", total_line(est));
        return;
    }

    println!("{}", build_estimate_table(est, opts));

    let has_video = est.lines.iter().any(|l| l.kind == UnitKind::Video);
    if has_video && est.model.bills_video_audio_separately() {
        println!("\n  {VIDEO_AUDIO_NOTE}");
    }
    println!();
}

pub(crate) fn output_estimate_json(est: &Estimate) -> Result<String, AppError> {
    let output = serde_json::json!({
        "model": est.model,
        "model_name": est.model.display_name(),
        "billing": est.billing,
        "requests": est.requests,
        "lines": est.lines,
        "per_request_cost": est.per_request_cost,
        "total_cost": est.total_cost,
        "total_display": format_cost(est.total_cost),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
