//! Landed Cost CLI
//!
//! One-shot landed-cost calculations and the HTTP API launcher.
//!
//! ```sh
//! # Tariff on the dutiable value (China electronics, 100 units)
//! landed-cost duty-value --product-name Headphones --product-cost 1000 --shipping-cost 200 \
//!     --quantity 100 --origin China --destination "United States" --category Electronics
//!
//! # Selling price for a target margin
//! landed-cost margin --product-cost 100 --tariff-rate 20 --profit-margin 30 --total-units 10
//!
//! # Run the REST API (default config: ~/.config/landed-cost/config.toml)
//! landed-cost serve --port 8080
//!
//! # Validate config and rate file without starting
//! landed-cost check
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};

use landed_cost::application::{CalculatorFormData, LandedCostByDutyValue, LandedCostByMargin};
use landed_cost::config::AppConfig;
use landed_cost::domain::{MarginInputs, TableTariffResolver, TariffInfo};
use landed_cost::infrastructure::load_rate_sheet;
use landed_cost::server::{init_tracing, rate_sheet_from_config, ServerHandle, ServerOptions};

/// Landed cost calculator for imported goods.
#[derive(Parser, Debug)]
#[command(
    name = "landed-cost",
    version,
    about = "Estimate the landed cost of imported goods",
    long_about = "Resolves the import tariff for an origin, destination and product \
                  category and adds up product, shipping, insurance, tariff and fees \
                  into a per-unit and total landed cost.\n\n\
                  Default config: ~/.config/landed-cost/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, env = "LANDED_COST_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the REST API server.
    Serve {
        /// Override the listen port.
        #[arg(long)]
        port: Option<u16>,
        /// Override the listen host.
        #[arg(long)]
        host: Option<String>,
    },
    /// Landed cost with the tariff applied to the dutiable value.
    DutyValue(DutyValueArgs),
    /// Selling price and profit for a target margin.
    Margin(MarginArgs),
    /// Show the tariff that applies to a shipment.
    Resolve {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        category: String,
    },
    /// Validate the configuration (and rate file) and exit.
    Check,
}

/// Form fields, passed as raw text the same way the calculator form does.
#[derive(Args, Debug)]
struct DutyValueArgs {
    #[arg(long, default_value = "")]
    product_name: String,
    #[arg(long)]
    product_cost: String,
    #[arg(long)]
    quantity: String,
    #[arg(long)]
    origin: String,
    #[arg(long)]
    destination: String,
    #[arg(long)]
    category: String,
    #[arg(long, default_value = "")]
    shipping_cost: String,
    #[arg(long, default_value = "")]
    insurance_cost: String,
    #[arg(long, default_value = "")]
    additional_fees: String,
    #[arg(long, default_value = "")]
    unit_weight: String,
    #[arg(long, default_value = "")]
    hs_code: String,
    #[arg(long, default_value = "")]
    shipping_method: String,
    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

impl From<DutyValueArgs> for CalculatorFormData {
    fn from(a: DutyValueArgs) -> Self {
        Self {
            product_name: a.product_name,
            product_cost: a.product_cost,
            hs_code: a.hs_code,
            product_category: a.category,
            origin_country: a.origin,
            destination_country: a.destination,
            shipping_method: a.shipping_method,
            shipping_cost: a.shipping_cost,
            insurance_cost: a.insurance_cost,
            quantity: a.quantity,
            unit_weight: a.unit_weight,
            additional_fees: a.additional_fees,
        }
    }
}

#[derive(Args, Debug)]
struct MarginArgs {
    #[arg(long)]
    product_cost: f64,
    #[arg(long, default_value_t = 0.0)]
    shipping_cost: f64,
    #[arg(long, default_value_t = 0.0)]
    insurance_cost: f64,
    #[arg(long, default_value_t = 0.0)]
    handling_cost: f64,
    /// Tariff rate in percent.
    #[arg(long)]
    tariff_rate: f64,
    /// Target profit margin in percent.
    #[arg(long)]
    profit_margin: f64,
    #[arg(long)]
    total_units: i64,
    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

impl From<&MarginArgs> for MarginInputs {
    fn from(a: &MarginArgs) -> Self {
        Self {
            product_cost: a.product_cost,
            shipping_cost: a.shipping_cost,
            insurance_cost: a.insurance_cost,
            handling_cost: a.handling_cost,
            tariff_rate: a.tariff_rate,
            profit_margin: a.profit_margin,
            total_units: a.total_units,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let explicit_config = cli.config.is_some();
    let config_path = cli
        .config
        .unwrap_or_else(landed_cost::default_config_path);

    if let Command::Check = cli.command {
        return check(&config_path);
    }

    // ── Load configuration ─────────────────────────────────────
    let (mut config, load_error) = if explicit_config || config_path.exists() {
        match AppConfig::load(&config_path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (AppConfig::default(), Some(e)),
        }
    } else {
        (AppConfig::default(), None)
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    match cli.command {
        Command::Serve { port, host } => {
            init_tracing(&config);
            match load_error {
                Some(e) => {
                    error!("Failed to load config from {}: {}", config_path.display(), e);
                    error!("Using default configuration.");
                }
                None => info!("Configuration: {}", config_path.display()),
            }

            if let Some(port) = port {
                info!("CLI override: port = {}", port);
                config.server.port = port;
            }
            if let Some(host) = host {
                info!("CLI override: host = {}", host);
                config.server.host = host;
            }

            serve(config).await
        }
        command => {
            // One-shot commands keep stdout for results; logs go to stderr
            init_stderr_tracing(cli.log_level.as_deref().unwrap_or("warn"));
            if let Some(e) = load_error {
                warn!(
                    "Failed to load config from {}: {}; using defaults",
                    config_path.display(),
                    e
                );
            }
            run_one_shot(command, &config)
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let handle = ServerHandle::start(ServerOptions {
        config,
        enable_metrics: true,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

fn run_one_shot(command: Command, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::DutyValue(args) => {
            let json = args.json;
            let form = CalculatorFormData::from(args);
            form.validate_required()?;

            let inputs = form.parse();
            let calculator = duty_value_calculator(config);
            let calculation = calculator.calculate_detailed(&inputs);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "product_name": form.product_name,
                        "inputs": inputs,
                        "tariff": calculation.tariff,
                        "results": calculation.results,
                        "finite": calculation.results.is_finite(),
                    }))?
                );
                return Ok(());
            }

            let r = &calculation.results;
            println!("{} x {}", form.product_name, inputs.quantity);
            println!(
                "Route         : {} -> {} ({})",
                inputs.origin_country, inputs.destination_country, inputs.product_category
            );
            print_tariff(&calculation.tariff);
            println!();
            println!("Per unit");
            println!("  Product       {:>14}", format_currency(r.product_cost));
            println!("  Shipping      {:>14}", format_currency(r.shipping_cost));
            println!("  Insurance     {:>14}", format_currency(r.insurance_cost));
            println!("  Dutiable value{:>14}", format_currency(r.dutiable_value));
            println!("  Tariff        {:>14}", format_currency(r.tariff_amount));
            println!("  Fees          {:>14}", format_currency(r.additional_fees));
            println!("  Landed cost   {:>14}", format_currency(r.landed_cost_per_unit));
            println!();
            println!("Total landed cost: {}", format_currency(r.total_landed_cost));
            println!();
            println!("Breakdown (total, share)");
            let (b, p) = (&r.cost_breakdown, &r.cost_percentages);
            for (label, amount, share) in [
                ("Product", b.product, p.product),
                ("Shipping", b.shipping, p.shipping),
                ("Insurance", b.insurance, p.insurance),
                ("Tariff", b.tariff, p.tariff),
                ("Fees", b.additional_fees, p.additional_fees),
            ] {
                println!(
                    "  {:<12}{:>14}  {:>7}",
                    label,
                    format_currency(amount),
                    format_percent(share)
                );
            }
            Ok(())
        }
        Command::Margin(args) => {
            let inputs = MarginInputs::from(&args);
            let r = LandedCostByMargin::new().calculate(&inputs);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&r)?);
                return Ok(());
            }

            println!("Tariff per unit       : {}", format_currency(r.tariff_amount));
            println!("Landed cost per unit  : {}", format_currency(r.landed_cost_per_unit));
            println!("Selling price         : {}", format_currency(r.recommended_selling_price));
            println!("Total investment      : {}", format_currency(r.total_investment));
            println!("Total revenue         : {}", format_currency(r.total_revenue));
            println!("Total profit          : {}", format_currency(r.total_profit));
            println!("Actual profit margin  : {}", format_percent(r.actual_profit_margin));
            Ok(())
        }
        Command::Resolve {
            origin,
            destination,
            category,
        } => {
            let tariff = duty_value_calculator(config).resolve_tariff(&origin, &destination, &category);
            print_tariff(&tariff);
            Ok(())
        }
        Command::Serve { .. } | Command::Check => Ok(()),
    }
}

fn duty_value_calculator(config: &AppConfig) -> LandedCostByDutyValue {
    let sheet = rate_sheet_from_config(config);
    if sheet.needs_update(chrono::Utc::now(), config.tariffs.stale_after_days) {
        warn!(
            "Rate sheet last updated {} is older than {} days",
            sheet.last_updated, config.tariffs.stale_after_days
        );
    }
    let resolver = TableTariffResolver::new(Arc::new(sheet.table));
    LandedCostByDutyValue::new(Arc::new(resolver))
}

fn check(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_path)?;

    println!("Configuration is valid");
    println!("   Config file : {}", config_path.display());
    println!("   API address : {}", config.server.address());
    println!("   Log level   : {} ({})", config.logging.level, config.logging.format);

    match &config.tariffs.rates_file {
        Some(path) => {
            let sheet = load_rate_sheet(path)?;
            let stale = sheet.needs_update(chrono::Utc::now(), config.tariffs.stale_after_days);
            println!("   Rate file   : {}", path.display());
            println!("   Rates       : {} entries", sheet.table.len());
            println!(
                "   Updated     : {}{}",
                sheet.last_updated,
                if stale { " (needs update)" } else { "" }
            );
        }
        None => println!("   Rate file   : none (built-in demo rates)"),
    }
    Ok(())
}

fn init_stderr_tracing(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_tariff(tariff: &TariffInfo) {
    println!("Tariff rate   : {}", format_percent(tariff.rate));
    println!("Description   : {}", tariff.description);
    if let Some(date) = tariff.effective_date {
        println!("Effective     : {}", date);
    }
}

// ── Formatting ─────────────────────────────────────────────────

/// US-dollar amount with thousands separators and two decimals: `$1,234.56`.
fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Percentage with one decimal: `12.3%`.
fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use landed_cost::domain::DomainError;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(205.0), "$205.00");
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(133.005_1), "$133.01");
    }

    #[test]
    fn currency_negative_and_non_finite() {
        assert_eq!(format_currency(-1234.5), "-$1,234.50");
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(f64::NAN), "n/a");
        assert_eq!(format_currency(f64::INFINITY), "n/a");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(12.345), "12.3%");
        assert_eq!(format_percent(30.0), "30.0%");
        assert_eq!(format_percent(f64::NAN), "n/a");
    }

    fn duty_value_form(extra: &[&str]) -> CalculatorFormData {
        let mut argv = vec![
            "landed-cost",
            "duty-value",
            "--product-cost",
            "100abc",
            "--quantity",
            "0",
            "--origin",
            "China",
            "--destination",
            "United States",
            "--category",
            "Electronics",
        ];
        argv.extend_from_slice(extra);

        let cli = Cli::try_parse_from(argv).unwrap();
        let Command::DutyValue(args) = cli.command else {
            panic!("expected duty-value");
        };
        CalculatorFormData::from(args)
    }

    #[test]
    fn cli_parses_duty_value_as_raw_text() {
        let form = duty_value_form(&["--product-name", "Headphones", "--shipping-cost", "0"]);
        assert!(form.validate_required().is_ok());

        let inputs = form.parse();
        assert_eq!(inputs.product_cost, 100.0);
        assert_eq!(inputs.quantity, 1);
        assert_eq!(inputs.shipping_cost, 0.0);
        assert_eq!(inputs.insurance_cost, 0.0);
    }

    #[test]
    fn duty_value_without_shipping_cost_is_missing_field() {
        let form = duty_value_form(&["--product-name", "Headphones"]);
        assert_eq!(
            form.validate_required(),
            Err(DomainError::MissingFields(vec!["shippingCost"]))
        );
    }

    #[test]
    fn duty_value_reports_missing_fields_in_form_order() {
        let form = duty_value_form(&[]);
        assert_eq!(
            form.validate_required(),
            Err(DomainError::MissingFields(vec!["productName", "shippingCost"]))
        );
    }

    #[test]
    fn cli_requires_margin_inputs() {
        assert!(Cli::try_parse_from(["landed-cost", "margin", "--product-cost", "100"]).is_err());
    }
}
