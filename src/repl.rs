//! Interactive calculator
//!
//! Reads one edit per line, applies it to the form state and prints the
//! freshly recomputed total. Bad input never ends the session.

use std::io::{BufRead, Write};

use crate::core::{FormState, UnitScale, estimate};
use crate::error::AppError;
use crate::output::{estimate_heading, total_line};
use crate::pricing::{BillingMode, Model, UnitKind, is_offered, offered_kinds, price_for};
use crate::share::share_url;

const HELP: &str = "\
Commands:
  model <id>                  select a model (see `gemcost models`)
  batch on|off                toggle Batch API pricing
  requests <n>                number of requests
  <kind> <amount> [scale]     set a quantity, e.g. `text 2 m`, `video 30`
  unit <kind> <raw|k|m>       change the scale of text, output or training
  show                        print every field and the total
  prices                      per-unit prices for the current model
  share                       print a link to these settings
  reset                       clear all quantities
  help                        this text
  quit                        leave";

#[derive(Debug, PartialEq)]
enum Command {
    Model(Model),
    Batch(bool),
    Requests(String),
    Quantity {
        kind: UnitKind,
        amount: String,
        scale: Option<UnitScale>,
    },
    Unit(UnitKind, UnitScale),
    Show,
    Prices,
    Share,
    Reset,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let arg = |i: usize| args.get(i).copied();

    let command = match head.to_lowercase().as_str() {
        "model" => {
            let id = arg(0).ok_or("usage: model <id>")?;
            Command::Model(id.parse().map_err(|e: AppError| e.to_string())?)
        }
        "batch" => match arg(0).map(str::to_lowercase).as_deref() {
            Some("on" | "1" | "true" | "yes") => Command::Batch(true),
            Some("off" | "0" | "false" | "no") => Command::Batch(false),
            _ => return Err("usage: batch on|off".to_string()),
        },
        "requests" | "req" => Command::Requests(arg(0).unwrap_or_default().to_string()),
        "unit" => {
            let (Some(kind), Some(scale)) = (arg(0), arg(1)) else {
                return Err("usage: unit <kind> <raw|k|m>".to_string());
            };
            Command::Unit(
                kind.parse().map_err(|e: AppError| e.to_string())?,
                scale.parse().map_err(|e: AppError| e.to_string())?,
            )
        }
        "show" | "ls" => Command::Show,
        "prices" | "price" => Command::Prices,
        "share" => Command::Share,
        "reset" | "clear" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            let kind = other
                .parse::<UnitKind>()
                .map_err(|_| format!("unknown command \"{other}\", try `help`"))?;
            let scale = arg(1)
                .map(|s| s.parse().map_err(|e: AppError| e.to_string()))
                .transpose()?;
            Command::Quantity {
                kind,
                amount: arg(0).unwrap_or_default().to_string(),
                scale,
            }
        }
    };
    Ok(Some(command))
}

fn print_fields<W: Write>(state: &FormState, out: &mut W) -> std::io::Result<()> {
    let model = state.model();
    writeln!(out, "model    {} ({})", model.id(), model.display_name())?;
    if model.supports_batch() {
        let on = state.billing().is_batch();
        writeln!(out, "batch    {}", if on { "on" } else { "off" })?;
    }
    writeln!(out, "requests {}", state.requests())?;
    for kind in UnitKind::ALL {
        // Kinds the model does not meter stay hidden, even with a stale value
        if !is_offered(model, kind) {
            continue;
        }
        if kind.has_scale_choice() {
            writeln!(
                out,
                "{:<8} {} {}",
                kind.id(),
                state.quantity(kind),
                state.scale(kind).short_label()
            )?;
        } else {
            writeln!(out, "{:<8} {}", kind.id(), state.quantity(kind))?;
        }
    }
    Ok(())
}

fn print_prices<W: Write>(state: &FormState, out: &mut W) -> std::io::Result<()> {
    let model = state.model();
    let billing = model.effective_billing(state.billing());
    writeln!(out, "{} ({} billing)", model.display_name(), billing.label())?;
    for kind in offered_kinds(model) {
        if let Some(price) = price_for(model, billing, kind) {
            writeln!(out, "  {:<22} ${price} / {}", kind.label(), kind.price_unit())?;
        }
    }
    Ok(())
}

/// Run the interactive loop until `quit` or end of input.
pub(crate) fn run_repl<R: BufRead, W: Write>(
    mut state: FormState,
    share_base: &str,
    input: R,
    out: &mut W,
) -> Result<FormState, AppError> {
    writeln!(out, "{}", estimate_heading(&estimate(&state)))?;
    writeln!(out, "Type `help` for commands.")?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        tracing::debug!(?command, "repl command");

        match command {
            Command::Model(model) => state.select_model(model),
            Command::Batch(on) => {
                if !state.set_billing(BillingMode::from_batch_flag(on)) {
                    writeln!(
                        out,
                        "{} has no Batch API pricing",
                        state.model().display_name()
                    )?;
                    continue;
                }
            }
            Command::Requests(value) => {
                if !state.set_requests_input(&value) {
                    writeln!(out, "requests must be a whole number, keeping {}", state.requests())?;
                    continue;
                }
            }
            Command::Quantity { kind, amount, scale } => {
                if !is_offered(state.model(), kind) {
                    writeln!(
                        out,
                        "{} does not bill {}",
                        state.model().display_name(),
                        kind.id()
                    )?;
                    continue;
                }
                state.set_quantity_input(kind, &amount);
                if let Some(scale) = scale {
                    state.set_scale(kind, scale);
                }
            }
            Command::Unit(kind, scale) => {
                if !state.set_scale(kind, scale) {
                    writeln!(out, "{} is always counted in units", kind.id())?;
                    continue;
                }
            }
            Command::Show => {
                print_fields(&state, out)?;
            }
            Command::Prices => {
                print_prices(&state, out)?;
                continue;
            }
            Command::Share => {
                writeln!(out, "{}", share_url(&state, share_base)?)?;
                continue;
            }
            Command::Reset => state.clear_quantities(),
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        }

        let est = estimate(&state);
        writeln!(out, "{}  ({})", total_line(&est), estimate_heading(&est))?;
    }

    Ok(state)
}
