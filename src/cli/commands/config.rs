//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigFile, InitOutcome};
use crate::error::XgoResult;
use console::style;

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, file: &ConfigFile) -> XgoResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => println!("{}", toml::to_string_pretty(config)?),
        Some(ConfigAction::Path) => println!("{}", file.path().display()),
        Some(ConfigAction::Init { force }) => match file.init(force).await? {
            InitOutcome::Written => println!(
                "{} Configuration initialized ({})",
                style("[OK]").green(),
                file.path().display()
            ),
            InitOutcome::Kept => println!(
                "{} Config already exists at {} - use --force to overwrite",
                style("[WARN]").yellow(),
                file.path().display()
            ),
        },
    }

    Ok(())
}
