use libtreedrop_core::{save_config, TreedropConfig, TreedropError};
use serde::Serialize;

use crate::cli::{Cli, ConfigCommand};
use crate::context::TreedropContext;
use crate::output::output_success;

#[derive(Serialize)]
struct ConfigInitOutput {
    path: String,
}

#[derive(Serialize)]
struct ConfigShowOutput {
    path: String,
    from_file: bool,
    config: TreedropConfig,
}

pub fn run(cli: &Cli, cmd: ConfigCommand) -> Result<(), TreedropError> {
    match cmd {
        ConfigCommand::Init { force } => run_init(cli, force),
        ConfigCommand::Show => run_show(cli),
    }
}

fn run_init(cli: &Cli, force: bool) -> Result<(), TreedropError> {
    let cwd = std::env::current_dir()?;
    let path = libtreedrop_core::config::config_path(&cwd, cli.config.as_deref());
    if path.exists() && !force {
        return Err(TreedropError::InvalidArgs(format!(
            "Config file '{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }
    save_config(&path, &TreedropConfig::default())?;

    output_success(
        cli,
        ConfigInitOutput {
            path: path.to_string_lossy().to_string(),
        },
        |out| format!("Wrote {}", out.path),
    );
    Ok(())
}

fn run_show(cli: &Cli) -> Result<(), TreedropError> {
    let ctx = TreedropContext::resolve(cli)?;
    let rendered = toml::to_string_pretty(&ctx.config)?;

    output_success(
        cli,
        ConfigShowOutput {
            path: ctx.config_path.to_string_lossy().to_string(),
            from_file: ctx.from_file,
            config: ctx.config,
        },
        |out| {
            let source = if out.from_file {
                out.path.clone()
            } else {
                format!("defaults ({} not found)", out.path)
            };
            format!("# {}\n{}", source, rendered)
        },
    );
    Ok(())
}
