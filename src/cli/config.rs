//! `config`: show paths and effective settings

use crate::config::{Settings, SplitrPaths};
use crate::error::SplitrResult;

pub fn handle_config_command(
    paths: &SplitrPaths,
    settings: &Settings,
    init: bool,
) -> SplitrResult<()> {
    if init {
        if paths.settings_file().exists() {
            println!(
                "Settings file already exists: {}",
                paths.settings_file().display()
            );
        } else {
            settings.save(paths)?;
            println!("Wrote settings to {}", paths.settings_file().display());
        }
        println!();
    }

    println!("splitr Configuration");
    println!("====================");
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Credential cache: {}", paths.credentials_file().display());
    println!();
    println!("Settings:");
    println!("  API base URL:      {}", settings.base_url);
    println!("  Token URL:         {}", settings.token_url);
    println!("  Group ID:          {}", settings.group_id);
    println!("  Primary user ID:   {}", settings.primary_user_id);
    println!("  Secondary user ID: {}", settings.secondary_user_id);
    println!("  Currency:          {}", settings.currency_code);
    println!("  Date format:       {}", settings.date_format);

    Ok(())
}
