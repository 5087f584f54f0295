//! social-intel-cli: 针对社交情报代理执行单个工作流操作的命令行工具
//!
//! Usage:
//!   social-intel-cli niche-scout [--query <q>] [--category <c>]   Run a niche scout
//!   social-intel-cli blueprint (--video-url <url> | --niche <n>)   Build a channel blueprint
//!   social-intel-cli result <id> --type <kind>                     Fetch a workflow result
//!   social-intel-cli history | schedules | health                  Listings and health

use anyhow::{bail, Context};
use serde::Serialize;
use social_intel_proxy::{BlueprintParams, NicheScoutParams, ProxyClient, ProxyClientBuilder};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "niche-scout" => cmd_niche_scout(&args[2..]).await,
        "blueprint" => cmd_blueprint(&args[2..]).await,
        "result" => cmd_result(&args[2..]).await,
        "history" => cmd_history(&args[2..]).await,
        "schedules" => cmd_schedules(&args[2..]).await,
        "health" => cmd_health(&args[2..]).await,
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"social-intel-cli - Social Intelligence 代理命令行工具

USAGE:
    social-intel-cli <COMMAND> [OPTIONS]

COMMANDS:
    niche-scout [--query <q>] [--category <c>] [--time-range <r>] [--demographics <d>]
                                Run a niche scout (falls back to mock data)
    blueprint --video-url <url> | --niche <n> [--depth <d>]
                                Build a channel blueprint from a seed video or niche
    result <id> --type <niche-scout|seed-to-blueprint>
                                Fetch a workflow result; mock-* ids never hit the network
    history                     List recent workflow runs
    schedules                   List scheduled workflows
    health                      Check the Social Intelligence Agent
    version                     Show version information
    help                        Show this help message

OPTIONS:
    --base-url <url>            Override SOCIAL_INTEL_URL for this call

ENVIRONMENT:
    SOCIAL_INTEL_URL            Social Intelligence Agent base URL
    RUST_LOG                    Log filter (default: warn)"#
    );
}

fn cmd_version() {
    println!("social-intel-cli {}", env!("CARGO_PKG_VERSION"));
}

/// Value following `--name`, if any.
fn flag(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            return Some(arg.clone());
        }
    }
    None
}

fn client(args: &[String]) -> anyhow::Result<ProxyClient> {
    let mut builder = ProxyClientBuilder::from_env();
    if let Some(url) = flag(args, "--base-url") {
        builder = builder.base_url(url);
    }
    builder.build().context("failed to configure proxy client")
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_mock(reason: Option<&str>) {
    if let Some(reason) = reason {
        eprintln!("note: serving mock data ({reason})");
    }
}

async fn cmd_niche_scout(args: &[String]) -> anyhow::Result<()> {
    let params = NicheScoutParams {
        query: flag(args, "--query"),
        category: flag(args, "--category"),
        time_range: flag(args, "--time-range"),
        demographics: flag(args, "--demographics"),
    };
    let envelope = client(args)?.niche_scout(&params).await?;
    report_mock(envelope.mock_reason());
    print_json(&envelope)
}

async fn cmd_blueprint(args: &[String]) -> anyhow::Result<()> {
    let params = BlueprintParams {
        video_url: flag(args, "--video-url"),
        niche: flag(args, "--niche"),
        analysis_depth: flag(args, "--depth"),
    };
    let envelope = client(args)?.seed_to_blueprint(&params).await?;
    report_mock(envelope.mock_reason());
    print_json(&envelope)
}

async fn cmd_result(args: &[String]) -> anyhow::Result<()> {
    let Some(id) = positional(args) else {
        bail!("usage: social-intel-cli result <id> --type <niche-scout|seed-to-blueprint>");
    };
    let kind = flag(args, "--type");
    let envelope = client(args)?
        .workflow_result(&id, kind.as_deref())
        .await?;
    report_mock(envelope.mock_reason());
    print_json(&envelope)
}

async fn cmd_history(args: &[String]) -> anyhow::Result<()> {
    let relayed = client(args)?.workflow_history().await?;
    report_mock(relayed.mock_reason.as_deref());
    print_json(&relayed.body)
}

async fn cmd_schedules(args: &[String]) -> anyhow::Result<()> {
    let relayed = client(args)?.scheduled_workflows().await?;
    report_mock(relayed.mock_reason.as_deref());
    print_json(&relayed.body)
}

async fn cmd_health(args: &[String]) -> anyhow::Result<()> {
    let report = client(args)?.health(None).await;
    print_json(&report)
}
