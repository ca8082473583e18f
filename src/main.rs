//! Energy advisor entry point: CLI wiring, logging, and service startup.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::process;
use std::sync::Arc;

use anyhow::{Context, bail};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use energy_advisor::advisor::{self, ConsumptionProfile, UsageType};
use energy_advisor::api::{self, AppState};
use energy_advisor::config::ServiceConfig;
use energy_advisor::io::export::export_breakdown_csv;
use energy_advisor::llm::{LmStudioClient, TextGenerator};
use energy_advisor::report::RecommendationReport;
use energy_advisor::summary::SummaryGenerator;
use energy_advisor::summary::prompt::build_prompt;

/// Default log directive when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "energy_advisor=info";

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    port: Option<u16>,
    seed: Option<u64>,
    profile_path: Option<String>,
    breakdown_out: Option<String>,
    check_llm: bool,
    serve: bool,
}

fn print_help() {
    eprintln!("energy-advisor - Renewable-energy sizing and savings advisor");
    eprintln!();
    eprintln!("Usage: energy-advisor [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load service settings from TOML config file");
    eprintln!("  --port <u16>             Listen port (default: 5000, or $PORT)");
    eprintln!("  --serve                  Run the HTTP service");
    eprintln!("  --profile <path>         Evaluate a TOML consumption profile and print the report");
    eprintln!("  --breakdown-out <path>   With --profile, write the bill breakdown to CSV");
    eprintln!("  --seed <u64>             Fix summary phrase selection");
    eprintln!("  --check-llm              Probe the completion API and generate a sample summary");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If neither --profile nor --check-llm is given, the HTTP service is started.");
}

fn require_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    if i >= args.len() {
        eprintln!("error: {flag} requires {what}");
        process::exit(1);
    }
    args[i].clone()
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        port: None,
        seed: None,
        profile_path: None,
        breakdown_out: None,
        check_llm: false,
        serve: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                cli.config_path = Some(require_value(&args, i, "--config", "a path argument"));
            }
            "--port" => {
                i += 1;
                let raw = require_value(&args, i, "--port", "a u16 argument");
                match raw.parse::<u16>() {
                    Ok(p) if p > 0 => cli.port = Some(p),
                    _ => {
                        eprintln!("error: --port value \"{raw}\" is not a valid port");
                        process::exit(1);
                    }
                }
            }
            "--seed" => {
                i += 1;
                let raw = require_value(&args, i, "--seed", "a u64 argument");
                if let Ok(s) = raw.parse::<u64>() {
                    cli.seed = Some(s);
                } else {
                    eprintln!("error: --seed value \"{raw}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--profile" => {
                i += 1;
                cli.profile_path = Some(require_value(&args, i, "--profile", "a path argument"));
            }
            "--breakdown-out" => {
                i += 1;
                cli.breakdown_out =
                    Some(require_value(&args, i, "--breakdown-out", "a path argument"));
            }
            "--check-llm" => cli.check_llm = true,
            "--serve" => cli.serve = true,
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.breakdown_out.is_some() && cli.profile_path.is_none() {
        eprintln!("error: --breakdown-out requires --profile");
        process::exit(1);
    }

    cli
}

fn load_config(cli: &CliArgs) -> ServiceConfig {
    let mut config = match cli.config_path {
        Some(ref path) => match ServiceConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => ServiceConfig::default(),
    };

    if let Err(e) = config.apply_env() {
        eprintln!("{e}");
        process::exit(1);
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(seed) = cli.seed {
        config.summary.seed = Some(seed);
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    config
}

/// Builds the summary generator, probing the completion API once.
///
/// An unreachable API leaves the service on template summaries.
async fn build_summary(config: &ServiceConfig) -> SummaryGenerator {
    let seed = config.summary.seed;
    if !config.llm.enabled {
        info!("completion API disabled; using template summaries");
        return SummaryGenerator::template_only(seed);
    }

    let client = match LmStudioClient::new(&config.llm) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "cannot build completion API client; using template summaries");
            return SummaryGenerator::template_only(seed);
        }
    };

    if client.is_available().await {
        info!(api_base = client.api_base(), "completion API available");
        SummaryGenerator::with_generator(Arc::new(client), seed)
    } else {
        warn!(
            api_base = client.api_base(),
            "completion API not reachable; using template summaries"
        );
        SummaryGenerator::template_only(seed)
    }
}

async fn run_profile(
    config: &ServiceConfig,
    path: &str,
    breakdown_out: Option<&str>,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read profile \"{path}\""))?;
    let profile: ConsumptionProfile =
        toml::from_str(&text).with_context(|| format!("invalid profile \"{path}\""))?;

    let rec = advisor::recommend(&profile)?;
    if let Some(out) = breakdown_out {
        let plan = profile.tariff_plan()?;
        export_breakdown_csv(&plan, &rec, Path::new(out))
            .with_context(|| format!("failed to write CSV \"{out}\""))?;
        eprintln!("Breakdown written to {out}");
    }

    let summary = build_summary(config).await.generate(&rec).await;
    println!("{}", RecommendationReport::new(rec, summary));
    Ok(())
}

async fn check_llm(config: &ServiceConfig) -> anyhow::Result<()> {
    let client = LmStudioClient::new(&config.llm)?;
    if !client.is_available().await {
        bail!("completion API at {} is not reachable", client.api_base());
    }
    println!("Completion API reachable at {}", client.api_base());

    let sample = ConsumptionProfile {
        location: "Mumbai".to_string(),
        usage_type: UsageType::Home,
        monthly_consumption: 300.0,
        ..ConsumptionProfile::default()
    };
    let rec = advisor::recommend(&sample)?;
    let text = client
        .generate(&build_prompt(&rec))
        .await
        .context("sample generation failed")?;
    println!("\n{}", RecommendationReport::new(rec, text));
    Ok(())
}

async fn serve(config: &ServiceConfig) -> anyhow::Result<()> {
    let host: IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server.host \"{}\"", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    let state = Arc::new(AppState {
        summary: build_summary(config).await,
    });
    api::serve(state, addr)
        .await
        .with_context(|| format!("API server on {addr} failed"))
}

fn main() {
    let cli = parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = load_config(&cli);

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });

    let result = rt.block_on(async {
        if cli.check_llm {
            check_llm(&config).await
        } else if let Some(ref path) = cli.profile_path {
            run_profile(&config, path, cli.breakdown_out.as_deref()).await?;
            if cli.serve { serve(&config).await } else { Ok(()) }
        } else {
            serve(&config).await
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
