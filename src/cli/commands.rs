//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::render::{render_flat, row_parts, sorted_ids, to_termtrees};
use crate::application::{apply_all, load_tree, ApplicationError};
use crate::cli::args::{Cli, Commands, ConfigCommands, InputArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::CheckTree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `checktree --help`".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| {
            CliError::InvalidArgs(format!("cannot determine working directory: {e}"))
        })?,
    };
    let settings = Settings::load(Some(&config_dir))?;
    debug!("settings: {:?}", settings);

    match command {
        Commands::Flat { input } => cmd_flat(input, &settings),
        Commands::Tree { input } => cmd_tree(input, &settings),
        Commands::Checked { input } => cmd_checked(input),
        Commands::Expanded { input } => cmd_expanded(input),
        Commands::Json { input } => cmd_json(input),
        Commands::Config { command } => cmd_config(command, &settings, &config_dir),
        Commands::Completion { .. } => Ok(()),
    }
}

/// Load the input file and apply the requested operations.
#[instrument(level = "debug")]
pub fn prepare_tree(input: &InputArgs) -> CliResult<CheckTree> {
    let mut tree = load_tree(&input.file)?;
    apply_all(&mut tree, &input.ops).map_err(ApplicationError::from)?;
    Ok(tree)
}

fn cmd_flat(input: &InputArgs, settings: &Settings) -> CliResult<()> {
    let tree = prepare_tree(input)?;
    for row in tree.flatten_iter() {
        output::row(&row_parts(&row, settings), &settings.markers, settings.color);
    }
    Ok(())
}

fn cmd_tree(input: &InputArgs, settings: &Settings) -> CliResult<()> {
    let tree = prepare_tree(input)?;
    for root in to_termtrees(&tree, settings) {
        output::info(&root);
    }
    Ok(())
}

fn cmd_checked(input: &InputArgs) -> CliResult<()> {
    let tree = prepare_tree(input)?;
    for id in sorted_ids(tree.get_checked_nodes()) {
        output::info(&id);
    }
    Ok(())
}

fn cmd_expanded(input: &InputArgs) -> CliResult<()> {
    let tree = prepare_tree(input)?;
    for id in sorted_ids(tree.get_expanded_nodes()) {
        output::info(&id);
    }
    Ok(())
}

fn cmd_json(input: &InputArgs) -> CliResult<()> {
    let tree = prepare_tree(input)?;
    let json = serde_json::to_string_pretty(&tree.flatten()).map_err(|source| {
        ApplicationError::Render {
            what: "flattened rows as JSON".to_string(),
            source,
        }
    })?;
    output::info(&json);
    Ok(())
}

fn cmd_config(command: &ConfigCommands, settings: &Settings, config_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => {
            output::header("Config files (lowest to highest precedence)");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail("global: <no config directory>"),
            }
            output::detail(&format!(
                "local:  {}",
                local_config_path(config_dir).display()
            ));
            output::detail("env:    CHECKTREE_*");
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

/// Plain flattened lines, without colors; used by tests and scripting.
pub fn flat_lines(input: &InputArgs, settings: &Settings) -> CliResult<Vec<String>> {
    let tree = prepare_tree(input)?;
    Ok(render_flat(&tree, settings))
}
