//! Cobranza - Loan calculator CLI
//!
//! Runs the loan form calculator on the command line and prints the render
//! instructions the page would receive.
//!
//! # Usage
//!
//! ```bash
//! cobranza-calc <monto> [tasa] [cuotas] [limite]
//! cobranza-calc 100.000 10 12 150.000
//! ```
//!
//! # Environment Variables
//!
//! * `COBRANZA_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use anyhow::{bail, Context};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::parse_amount;
use interface_ui::config::UiConfig;
use interface_ui::handlers::calculator::{evaluate, on_calculator_input, CalculatorInput};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config();
    init_tracing(&config.log_level);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(principal) = args.first() else {
        bail!("usage: cobranza-calc <monto> [tasa] [cuotas] [limite]");
    };

    let input = CalculatorInput {
        principal: principal.clone(),
        rate: args.get(1).cloned().unwrap_or_default(),
        installments: args.get(2).cloned().unwrap_or_default(),
        credit_limit: args.get(3).map(|limit| parse_amount(limit.as_str())),
    };
    tracing::debug!(?input, "Calculating");

    let output = json!({
        "quote": evaluate(&input),
        "instructions": on_calculator_input(&input),
    });
    let rendered = serde_json::to_string_pretty(&output).context("rendering output")?;
    println!("{rendered}");
    Ok(())
}

/// Loads configuration from the environment, falling back to defaults
fn load_config() -> UiConfig {
    UiConfig::from_env().unwrap_or_else(|err| {
        eprintln!("ignoring invalid configuration: {err}");
        UiConfig::default()
    })
}

/// Initializes the tracing subscriber, logging to stderr
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
