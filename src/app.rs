use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::consts::{DEFAULT_SHARE_BASE_URL, SHARE_COPIED_MESSAGE};
use crate::core::{FormState, estimate};
use crate::error::AppError;
use crate::output::{
    TableOptions, output_estimate_json, output_models_json, output_prices_json,
    print_estimate_table, print_models_table, print_price_table,
};
use crate::pricing::Model;
use crate::repl::run_repl;
use crate::share::{copy_to_clipboard, from_share_url, share_url};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) config: &'a Config,
    pub(crate) state: FormState,
}

impl CommandContext<'_> {
    fn table_options(&self) -> TableOptions {
        TableOptions {
            use_color: self.cli.use_color(),
        }
    }

    fn share_base<'b>(&'b self, flag: Option<&'b str>) -> &'b str {
        flag.or(self.config.share_base_url.as_deref())
            .unwrap_or(DEFAULT_SHARE_BASE_URL)
    }
}

/// Build the form state: defaults, then config (or a share link, which
/// replaces config entirely), then command-line flags.
pub(crate) fn build_form_state(cli: &Cli, config: &Config) -> Result<FormState, AppError> {
    let mut state = match cli.from_url.as_deref() {
        Some(link) => from_share_url(link)?,
        None => {
            let mut state = FormState::default();
            config.apply_to(&mut state);
            state
        }
    };
    cli.apply_to(&mut state);
    Ok(state)
}

fn handle_estimate(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let est = estimate(&ctx.state);
    if ctx.cli.json {
        println!("{}", output_estimate_json(&est)?);
    } else {
        print_estimate_table(&est, ctx.table_options());
    }
    Ok(())
}

fn handle_prices(ctx: &CommandContext<'_>, all: bool) -> Result<(), AppError> {
    let models: Vec<Model> = if all {
        Model::ALL.to_vec()
    } else {
        vec![ctx.state.model()]
    };
    if ctx.cli.json {
        println!("{}", output_prices_json(&models)?);
    } else {
        print_price_table(&models, ctx.table_options());
    }
    Ok(())
}

fn handle_models(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    if ctx.cli.json {
        println!("{}", output_models_json()?);
    } else {
        print_models_table(ctx.table_options());
    }
    Ok(())
}

fn handle_share(
    ctx: &CommandContext<'_>,
    copy: bool,
    base_url: Option<&str>,
) -> Result<(), AppError> {
    let url = share_url(&ctx.state, ctx.share_base(base_url))?;

    // Clipboard is best-effort: the link is printed either way
    let copied = copy
        && match copy_to_clipboard(url.as_str()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("{e}");
                false
            }
        };

    if ctx.cli.json {
        let output = serde_json::json!({
            "url": url.as_str(),
            "copied": copied,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{url}");
        if copied {
            eprintln!("{SHARE_COPIED_MESSAGE}");
        }
    }
    Ok(())
}

fn handle_repl(ctx: CommandContext<'_>) -> Result<(), AppError> {
    if ctx.cli.json {
        tracing::warn!("--json has no effect in the interactive calculator");
    }
    let base = ctx.share_base(None).to_string();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    run_repl(ctx.state, &base, stdin.lock(), &mut stdout)?;
    Ok(())
}

/// Run the selected command (estimate when none is given)
pub(crate) fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let ctx = CommandContext {
        cli,
        config,
        state: build_form_state(cli, config)?,
    };
    tracing::debug!(state = ?ctx.state, "form state ready");

    match &cli.command {
        None | Some(Commands::Estimate) => handle_estimate(&ctx),
        Some(Commands::Prices { all }) => handle_prices(&ctx, *all),
        Some(Commands::Models) => handle_models(&ctx),
        Some(Commands::Share { copy, base_url }) => {
            handle_share(&ctx, *copy, base_url.as_deref())
        }
        Some(Commands::Repl) => handle_repl(ctx),
    }
}
