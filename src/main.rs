use analyzer::MaAnalyzer;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use configuration::ServerSettings;
use core_types::CompanySelector;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;

/// The main entry point for the deal valuation service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut settings = ServerSettings::from_env()?;
    let _guard = configuration::logging::init_tracing(settings.log_dir.as_deref());

    match cli.command {
        Commands::Serve(args) => {
            if let Some(addr) = args.addr {
                settings.bind_addr = addr;
            }
            web_server::run_server(settings).await
        }
        Commands::Report(args) => handle_report(args, &settings),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Valuation model for a proposed acquisition: DCF, trading and transaction
/// comparables, synergies and EPS accretion/dilution.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API.
    Serve(ServeArgs),
    /// Compute one report and print it.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind, overriding MA_BIND_ADDR.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[derive(Parser)]
struct ReportArgs {
    /// The report to compute.
    #[arg(value_enum)]
    view: View,

    /// Company valued by the `dcf` report. Anything but "target" values the acquirer.
    #[arg(long, default_value = "target")]
    company: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Overview,
    Financials,
    Dcf,
    Comps,
    Precedents,
    Synergies,
    Accretion,
    Valuation,
    Executive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

fn build_analyzer(settings: &ServerSettings) -> anyhow::Result<MaAnalyzer> {
    let data = match &settings.data_dir {
        Some(dir) => configuration::load_reference_data_from(dir)?,
        None => configuration::load_reference_data()?,
    };
    let assumptions = configuration::load_deal_assumptions(settings.deal_config.as_deref())?;
    Ok(MaAnalyzer::new(Arc::new(data), assumptions))
}

fn compute_view(analyzer: &MaAnalyzer, view: View, company: &str) -> anyhow::Result<Value> {
    let value = match view {
        View::Overview => serde_json::to_value(analyzer.company_overview())?,
        View::Financials => serde_json::to_value(analyzer.financial_statements())?,
        View::Dcf => {
            let selector = CompanySelector::from_param(company);
            serde_json::to_value(analyzer.dcf_valuation(selector)?)?
        }
        View::Comps => serde_json::to_value(analyzer.comparable_companies_analysis()?)?,
        View::Precedents => serde_json::to_value(analyzer.precedent_transactions_analysis()?)?,
        View::Synergies => serde_json::to_value(analyzer.synergies()?)?,
        View::Accretion => serde_json::to_value(analyzer.accretion_dilution()?)?,
        View::Valuation => serde_json::to_value(analyzer.valuation_summary()?)?,
        View::Executive => serde_json::to_value(analyzer.executive_summary()?)?,
    };
    Ok(value)
}

fn handle_report(args: ReportArgs, settings: &ServerSettings) -> anyhow::Result<()> {
    let analyzer = build_analyzer(settings)?;
    let value = compute_view(&analyzer, args.view, &args.company)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Table => println!("{}", render_table(&value)),
    }
    Ok(())
}

/// Renders a report as a two-column table of dotted paths and values.
fn render_table(value: &Value) -> Table {
    let mut rows = Vec::new();
    flatten("", value, &mut rows);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value"]);
    for (path, cell) in rows {
        table.add_row(vec![path, cell]);
    }
    table
}

fn flatten(prefix: &str, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, rows);
            }
        }
        Value::Array(items) if items.iter().any(|item| item.is_object()) => {
            rows.push((prefix.to_string(), format!("{} records", items.len())));
        }
        Value::Array(items) => {
            let joined = items.iter().map(format_scalar).collect::<Vec<_>>().join(", ");
            rows.push((prefix.to_string(), joined));
        }
        scalar => rows.push((prefix.to_string(), format_scalar(scalar))),
    }
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.abs() >= 100.0 => format!("{f:.2}"),
            Some(f) if n.is_f64() => format!("{f:.4}"),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
