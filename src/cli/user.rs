//! `whoami`: show the user the cached token belongs to

use super::connect;
use crate::config::{Settings, SplitrPaths};
use crate::error::{SplitrError, SplitrResult};
use crate::models::ApiResponse;

pub fn handle_whoami_command(paths: &SplitrPaths, settings: &Settings) -> SplitrResult<()> {
    let client = connect(paths, settings)?;
    let response = client.get_current_user()?;

    let messages = response.error_messages();
    if !messages.is_empty() {
        return Err(SplitrError::Api(format!(
            "request refused: {}",
            messages.join("; ")
        )));
    }

    match response.user {
        Some(user) => {
            println!("{} (id {})", user.display_name(), user.id);
            if let Some(email) = &user.email {
                println!("  Email:    {}", email);
            }
            if let Some(currency) = &user.default_currency {
                println!("  Currency: {}", currency);
            }
        }
        None => println!("Splitwise returned no user."),
    }

    Ok(())
}
