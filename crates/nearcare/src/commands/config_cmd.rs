//! Configuration inspection and bootstrap.

use nearcare_config::{Config, config_path, load_config_from, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let explicit = global.config.as_deref();

    match args.command {
        ConfigCommand::Path => {
            let path = explicit.map_or_else(config_path, std::path::Path::to_path_buf);
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let config = load_config_from(explicit)?;
            let rendered = toml::to_string_pretty(&config)
                .map_err(nearcare_config::ConfigError::Serialization)?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let target = explicit.map_or_else(config_path, std::path::Path::to_path_buf);
            if target.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: target.display().to_string(),
                });
            }

            let written = save_config(&Config::default(), Some(&target))?;
            if !global.quiet {
                eprintln!("Wrote {}", written.display());
            }
            Ok(())
        }
    }
}
