// bsys: project build-system helper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::try_parse() --> Config --> Logging --> Command Dispatch
//!   Revision | UpdateBuildSystem | Header | targets | Ci | Options | Inis
//! error --> exit_code_of(): 255 usage/precondition, tool code, or 1
//! ```

use std::path::Path;
use std::process::ExitCode;

use bsys_rs::cli::global::GlobalOptions;
use bsys_rs::cli::{self, Command};
use bsys_rs::cmd::config::{run_inis_command, run_options_command};
use bsys_rs::cmd::header::run_header_command;
use bsys_rs::cmd::revision::run_revision_command;
use bsys_rs::cmd::target::{run_ci_command, run_target_command, run_targets_command};
use bsys_rs::cmd::update::run_update_command;
use bsys_rs::config::loader::ConfigLoader;
use bsys_rs::config::{CONFIG_FILE_NAME, Config, ENV_PREFIX};
use bsys_rs::error::{EXIT_USAGE, Result, exit_code_of};
use bsys_rs::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let Some(command) = &cli.command else {
        eprintln!("No command specified. Use --help for usage information.");
        return ExitCode::from(EXIT_USAGE);
    };

    if matches!(command, Command::Version) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let root = match cli.global.project_root() {
        Ok(root) => root,
        Err(e) => return report(&e),
    };

    let loader = match build_config_loader(&cli.global, &root) {
        Ok(loader) => loader,
        Err(e) => return report(&e),
    };

    if matches!(command, Command::Inis) {
        run_inis_command(&loader.format_loaded_files());
        return ExitCode::SUCCESS;
    }

    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::from(exit_code_of(&e));
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(command, &config, &root).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {err:#}");
    ExitCode::from(exit_code_of(err))
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(
            config
                .global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string()),
        )
        .build()
}

async fn dispatch_command(command: &Command, config: &Config, root: &Path) -> Result<()> {
    if let Some(target) = command.target_name() {
        return run_target_command(&[target.to_string()], config, root).await;
    }

    match command {
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Revision(args) => run_revision_command(args, config, root),
        Command::UpdateBuildSystem(args) => run_update_command(args, config, root).await,
        Command::Header(args) => run_header_command(args, config, root),
        Command::Run(args) => run_target_command(&args.targets, config, root).await,
        Command::Targets(args) => run_targets_command(args, config),
        Command::Ci(args) => run_ci_command(args, config, root).await,
        Command::Version
        | Command::Inis
        | Command::Build
        | Command::Check
        | Command::Analyze
        | Command::Install
        | Command::Clean
        | Command::Prereqs => Ok(()),
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions, root: &Path) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(root.join(CONFIG_FILE_NAME));
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    Ok(loader)
}
