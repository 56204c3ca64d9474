//! luis-sync — LUIS 分类器同步命令行工具
//!
//! Usage:
//!   luis-sync sync [--manifest <path>]     Recreate intents, then entities
//!   luis-sync list <type>                  List classifiers of a type
//!   luis-sync clear <type>                 Remove all removable classifiers of a type

use anyhow::Context;
use luis_sync::classifier::validate_type;
use luis_sync::{ClassifierStoreClient, DesiredState, LuisConfig, Reconciler};
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "sync" => cmd_sync(&args[2..]).await,
        "list" => cmd_list(&args[2..]).await,
        "clear" => cmd_clear(&args[2..]).await,
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
        tracing::error!("{e:#}");
        if let Some(hint) = config_hint(&e) {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}

/// Point the user at the setting behind a configuration failure.
fn config_hint(e: &anyhow::Error) -> Option<String> {
    let field = e
        .downcast_ref::<luis_sync::Error>()?
        .context()?
        .field_path
        .as_deref()?;
    Some(format!("hint: check `{field}` (see `luis-sync help`)"))
}

fn print_usage() {
    println!(
        r#"luis-sync — LUIS 分类器同步工具

USAGE:
    luis-sync <COMMAND> [OPTIONS]

COMMANDS:
    sync [--manifest <path>]    Recreate intents, then entities, from a manifest
    list <type>                 List classifiers (intents | entities | prebuilts)
    clear <type>                Remove all classifiers of a type (keeps the None intent)
    version                     Show version information
    help                        Show this help message

ENVIRONMENT:
    LUIS_APP_ID                 Application identifier (required)
    LUIS_SUBSCRIPTION_KEY       Subscription key (falls back to the OS keyring)
    LUIS_BASE_URL               Service origin override
    LUIS_HTTP_TIMEOUT_SECS      Per-request timeout
    RUST_LOG                    Log filter (default: info)"#
    );
}

fn cmd_version() {
    println!("luis-sync {}", env!("CARGO_PKG_VERSION"));
}

fn manifest_path(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == "--manifest")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn store() -> anyhow::Result<ClassifierStoreClient> {
    let config = LuisConfig::from_env().context("loading configuration")?;
    Ok(ClassifierStoreClient::new(config)?)
}

async fn cmd_sync(args: &[String]) -> anyhow::Result<()> {
    let desired = match manifest_path(args) {
        Some(path) => DesiredState::from_path(&path)
            .await
            .with_context(|| format!("reading manifest {}", path.display()))?,
        None => DesiredState::builtin()?,
    };

    let reconciler = Reconciler::new(store()?);
    let report = reconciler.run(&desired).await?;

    for t in &report.types {
        println!(
            "{:<10} removed {:>3}  kept {:>3}  added {:>3}",
            t.classifier_type, t.removed, t.preserved, t.added
        );
    }
    if !report.skipped_prebuilts.is_empty() {
        println!("prebuilts  skipped: {}", report.skipped_prebuilts.join(", "));
    }
    Ok(())
}

async fn cmd_list(args: &[String]) -> anyhow::Result<()> {
    let type_name = args.first().context("missing classifier type")?;
    let ty = validate_type(type_name)?;

    for classifier in store()?.list(ty).await? {
        println!("{}\t{}", classifier.id, classifier.name);
    }
    Ok(())
}

async fn cmd_clear(args: &[String]) -> anyhow::Result<()> {
    let type_name = args.first().context("missing classifier type")?;
    let ty = validate_type(type_name)?;

    let summary = Reconciler::new(store()?).clear(ty).await?;
    println!(
        "{}: removed {}, kept {}",
        ty,
        summary.deleted.len(),
        summary.preserved.len()
    );
    Ok(())
}
