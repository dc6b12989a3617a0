use anyhow::Context;
use carstool::app::detail_view::DetailState;
use carstool::app::render::{render_detail, render_list};
use carstool::core::search::SummaryCard;
use carstool::utils::{logger, validation::Validate};
use carstool::{
    CarstoolError, CliConfig, Command, DetailView, GatewayConfig, HttpGateway, ListView,
    TomlConfig, VehicleId, VehicleSource,
};
use clap::Parser;

const EXIT_CONFIG: i32 = 1;
const EXIT_UNAVAILABLE: i32 = 2;
const EXIT_UNHEALTHY: i32 = 3;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            eprintln!("❌ {:#}", e);
            if let Some(err) = e.downcast_ref::<CarstoolError>() {
                eprintln!("💡 Suggestion: {}", err.recovery_suggestion());
            }
            std::process::exit(EXIT_CONFIG);
        }
    }
}

async fn run(cli: CliConfig) -> anyhow::Result<i32> {
    let file = match &cli.config {
        Some(path) => {
            let file = TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?;
            file.validate()
                .with_context(|| format!("Invalid config file '{}'", path))?;
            Some(file)
        }
        None => None,
    };

    let level = file.as_ref().and_then(|f| f.log_level());
    if file.as_ref().is_some_and(|f| f.json_logs()) {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    let config = GatewayConfig::resolve(file.as_ref(), cli.api_base.clone(), cli.timeout_seconds);
    config.validate().context("Invalid gateway settings")?;
    tracing::debug!("Gateway config: {:?}", config);

    let gateway = HttpGateway::new(&config).context("Failed to build HTTP client")?;
    tracing::info!("🚀 Using vehicle backend at {}", gateway.base_url());

    let code = match cli.command {
        Command::List { query } => list(&gateway, &query).await,
        Command::Show { id } => show(&gateway, VehicleId::new(id)).await,
        Command::Health => health(&gateway).await,
    };
    Ok(code)
}

async fn list(gateway: &HttpGateway, query: &str) -> i32 {
    let mut view = ListView::new();
    view.load(gateway).await;

    if let Some(notice) = view.notice() {
        eprintln!("❌ {}", notice);
        return EXIT_UNAVAILABLE;
    }

    let cards: Vec<SummaryCard> = view.filter(query).into_iter().map(SummaryCard::from).collect();
    print!("{}", render_list(&cards, &view.count_label(query)));
    if view.skipped() > 0 {
        eprintln!("🔶 {} records could not be read and were skipped", view.skipped());
    }
    0
}

async fn show(gateway: &HttpGateway, id: VehicleId) -> i32 {
    let mut view = DetailView::new();
    view.load(gateway, id).await;

    match view.state() {
        DetailState::Loaded(_) => {
            print!("{}", render_detail(&view.display()));
            0
        }
        _ => {
            eprintln!("❌ {}", view.message().unwrap_or("Unable to load vehicle details."));
            EXIT_UNAVAILABLE
        }
    }
}

async fn health(gateway: &HttpGateway) -> i32 {
    match gateway.health().await {
        Ok(()) => {
            println!("✅ Backend at {} is healthy", gateway.base_url());
            0
        }
        Err(e) => {
            tracing::error!("❌ Health check failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            EXIT_UNHEALTHY
        }
    }
}
