//! Wiring: merge CLI overrides into config, build plugins, run the command.
use gelf_tee_core::api::{
    load, run_tee, AppConfig, CliError, OutputMode, RunTeeArgs, RunnerStartArgs,
};
use gelf_tee_plugins::factory;

use crate::commands::cli::Args;
use crate::logging;

/// Whole program after argument parsing. Every error is printed and becomes 1.
pub async fn run(args: Args) -> i32 {
    match try_run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("gelf-tee: {e}");
            1
        }
    }
}

async fn try_run(args: Args) -> Result<i32, CliError> {
    let cfg = load(args.config.as_deref()).map_err(|e| CliError::Config(format!("{e:#}")))?;
    logging::init_tracing(&cfg.logging).map_err(CliError::Config)?;

    run_app(args, cfg).await
}

/// Flags win over config file and environment.
pub fn merge_overrides(mut cfg: AppConfig, args: &Args) -> AppConfig {
    if args.split {
        cfg.runner.split = true;
    }
    if let Some(host) = args.logserver.as_deref().map(str::trim) {
        if !host.is_empty() {
            cfg.sink.host = host.to_string();
        }
    }
    if let Some(port) = args.port {
        cfg.sink.port = port;
    }
    cfg
}

pub fn start_args(args: &Args) -> Result<RunnerStartArgs, CliError> {
    let (cmd, rest) = args
        .command
        .split_first()
        .ok_or_else(|| CliError::Usage("Missing command".to_string()))?;
    Ok(RunnerStartArgs::new(cmd.clone(), rest.to_vec()))
}

/// Returns the process exit code: 0 if the command succeeded, 1 otherwise.
#[tracing::instrument(name = "cli.run_app", skip(args, cfg))]
pub async fn run_app(args: Args, cfg: AppConfig) -> Result<i32, CliError> {
    let start = start_args(&args)?;
    let cfg = merge_overrides(cfg, &args);

    let runner = factory::build_runner(&cfg);
    let sink = factory::build_sink(&cfg).await;
    let host = factory::source_host(&cfg);
    tracing::debug!(
        command = %start.command_line(),
        collector = %cfg.sink.address(),
        split = cfg.runner.split,
        "run initialized"
    );

    let outcome = run_tee(RunTeeArgs {
        plugin: runner.as_ref(),
        start: &start,
        sink: sink.as_ref(),
        host: &host,
        mode: OutputMode::from_split_flag(cfg.runner.split),
        line_channel_capacity: cfg.runner.line_channel_capacity,
        silent: false,
    })
    .await?;

    Ok(outcome.exit_code)
}
