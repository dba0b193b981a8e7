//! Settings CLI commands

use clap::Subcommand;

use crate::config::{Settings, TrackerPaths};
use crate::display::format_settings;
use crate::error::TrackerResult;

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show all settings
    Show,

    /// Change a setting (Theme, FontFamily, FontSize, hFontSize, ...)
    Set {
        key: String,
        value: String,
    },
}

pub fn handle_settings_command(paths: &TrackerPaths, cmd: SettingsCommands) -> TrackerResult<()> {
    let mut settings = Settings::load_or_create(paths)?;

    match cmd {
        SettingsCommands::Show => {
            print!("{}", format_settings(&settings));
        }

        SettingsCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("{} = {}", key, value.trim());
        }
    }

    Ok(())
}
