use catalog_sync::{cli, config, credentials, error, loader, storage, sync};
use clap::Parser;
use cli::Cli;
use config::Config;
use error::Result;
use std::process::ExitCode;
use sync::SyncOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("エラー: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(env_file) = &cli.env_file {
        config.env_file = env_file.clone();
    }
    if let Some(fuzzy) = cli.fuzzy {
        config.fuzzy_policy = fuzzy.into();
    }
    if let Some(limit) = cli.sample_limit {
        config.unmatched_sample_limit = limit;
    }

    if cli.show_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let input = cli.input_path()?;

    // 接続先が無ければ何も読まずに終了
    let (url, source) = credentials::resolve_credential(&config.credential_var, &config.env_file)?;
    info!(
        "接続先を取得: {}（{:?}）",
        storage::postgres::redact_url(&url),
        source
    );

    let table = loader::load_source(input, &config.columns)?;
    let mut store = storage::open_catalog(&url, &config.storage)?;

    let options = SyncOptions {
        policy: config.fuzzy_policy,
        dry_run: cli.dry_run,
        unmatched_sample_limit: config.unmatched_sample_limit,
    };
    let stdout = std::io::stdout();
    let summary = sync::run_sync(&table, store.as_mut(), &options, &mut stdout.lock())?;

    info!(
        "完全一致 {} 件 / 部分一致 {} 件 / 未一致 {} 件",
        summary.exact_count(),
        summary.fuzzy_count(),
        summary.unmatched.len()
    );
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
