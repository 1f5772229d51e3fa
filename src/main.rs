use clap::Parser;
use energy_seller::config::toml_config::LogFormat;
use energy_seller::config::Command;
use energy_seller::core::catalog::offering_row;
use energy_seller::core::{ConfigProvider, Storage};
use energy_seller::utils::error::ErrorSeverity;
use energy_seller::utils::validation::{parse_quantity, Validate};
use energy_seller::utils::logger;
use energy_seller::{
    clamp_energy, format_inr, quote, Catalog, CatalogFilter, CliConfig, HttpOrderSubmitter,
    LocalStorage, OrderSubmitter, PublishOutcome, Publisher, Quote, Result, SellerError,
    SellerSession, SimulatedSubmitter, TomlConfig,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose, config.logging.level.as_deref()),
        LogFormat::Json => logger::init_json_logger(config.logging.level.as_deref()),
    }

    tracing::info!("Starting energy-seller CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&cli, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 3,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 4,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: &TomlConfig) -> Result<()> {
    let storage = LocalStorage::new(".".to_string());
    let mut session = load_session(cli, config, &storage).await?;

    match &cli.command {
        Command::Offerings {
            query,
            component,
            only_available,
        } => {
            let filter = CatalogFilter {
                query: query.clone(),
                component: *component,
                only_available: *only_available,
            };
            let hits = session.catalog().filter(&filter);
            tracing::info!("{} of {} offerings match", hits.len(), session.catalog().len());
            for o in hits {
                println!("{}", offering_row(o));
            }
        }
        Command::Quote {
            energy,
            price,
            offering,
        } => {
            let mut energy_kwh = parse_quantity("energy", energy)?;
            let price_per_kwh = match (price, offering) {
                (Some(price), _) => parse_quantity("price", price)?,
                (None, Some(id)) => {
                    let offering = session
                        .catalog()
                        .get(id)
                        .ok_or_else(|| SellerError::OfferingNotFound { id: id.clone() })?;
                    energy_kwh = clamp_energy(energy_kwh, offering);
                    offering.price_per_kwh
                }
                (None, None) => {
                    return Err(SellerError::validation("price", "", "Give --price or --offering"))
                }
            };
            let q = quote(energy_kwh, price_per_kwh, session.pricing())?;
            print_quote(energy_kwh, price_per_kwh, &q);
        }
        Command::Preview {
            offering,
            energy,
            output,
        } => {
            select_with_energy(&mut session, offering, energy.as_deref())?;
            let payload = session
                .preview_payload()
                .ok_or(SellerError::NoOfferingSelected)?;
            let json = payload.to_pretty_json()?;
            match output {
                Some(path) => {
                    storage.write_file(path, json.as_bytes()).await?;
                    tracing::info!("📁 Payload saved to: {}", path);
                    println!("📁 Payload saved to: {}", path);
                }
                None => println!("{}", json),
            }
        }
        Command::Publish { offering, energy } => {
            select_with_energy(&mut session, offering, energy.as_deref())?;
            match config.submitter_endpoint() {
                Some(endpoint) => {
                    let submitter = HttpOrderSubmitter::with_options(
                        endpoint,
                        config.submitter.auth_token.clone(),
                        config.submitter.timeout_seconds,
                    )?;
                    publish_with(session, submitter).await?;
                }
                None => {
                    tracing::info!("No order-intake endpoint configured, simulating publish");
                    let submitter = SimulatedSubmitter::new(Duration::from_millis(
                        config.submitter.simulated_delay_ms,
                    ));
                    publish_with(session, submitter).await?;
                }
            }
        }
    }

    Ok(())
}

async fn load_session<C: ConfigProvider, S: Storage>(
    cli: &CliConfig,
    config: &C,
    storage: &S,
) -> Result<SellerSession> {
    let seed_file = cli.catalog.as_deref().or(config.catalog_seed_file());
    match seed_file {
        Some(path) => {
            tracing::info!("📁 Loading catalog from: {}", path);
            let data = storage.read_file(path).await?;
            let catalog = Catalog::from_json(&data)?;
            tracing::info!("Loaded {} offerings", catalog.len());
            Ok(SellerSession::with_catalog(catalog, config.pricing_policy()))
        }
        None => Ok(SellerSession::new(config.pricing_policy())),
    }
}

/// Selects the offering and applies the requested energy; the minimum of the
/// offering's range is used when no energy is given.
fn select_with_energy(session: &mut SellerSession, id: &str, energy: Option<&str>) -> Result<()> {
    session.select(id)?;
    match energy {
        Some(raw) => session.set_energy_input(raw)?,
        None => {
            if let Some(min_kwh) = session.selected().map(|o| o.min_kwh) {
                session.set_energy(min_kwh);
            }
        }
    }
    Ok(())
}

async fn publish_with<S: OrderSubmitter>(session: SellerSession, submitter: S) -> Result<()> {
    let publisher = Publisher::new(session, submitter);
    match publisher.publish().await? {
        PublishOutcome::Published(notice) => {
            println!("✅ {}", notice.title);
            println!("{}", notice.description);
            println!("Total incl. fee and GST: {}", format_inr(notice.total));
        }
        PublishOutcome::Ignored => {
            println!("A publish is already in progress");
        }
    }
    Ok(())
}

fn print_quote(energy_kwh: f64, price_per_kwh: f64, q: &Quote) {
    println!("Energy:        {} kWh @ {}/kWh", energy_kwh, format_inr(price_per_kwh));
    println!("Base:          {:>12} ({:.2})", format_inr(q.base), q.base);
    println!("Platform fee:  {:>12} ({:.2})", format_inr(q.fee), q.fee);
    println!("Subtotal:      {:>12} ({:.2})", format_inr(q.subtotal), q.subtotal);
    println!("GST:           {:>12} ({:.2})", format_inr(q.tax), q.tax);
    println!("Total:         {:>12} ({:.2})", format_inr(q.total), q.total);
}
