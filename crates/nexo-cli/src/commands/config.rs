use clap::Subcommand;
use nexo_core::{LocalStore, ValidationError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the preference flags
    Show,
    /// Set a preference flag (notifications | timer_sound | dark_mode)
    Set {
        key: String,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = LocalStore::open()?;
    let mut data = store.load()?;

    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&data.preferences)?);
            return Ok(());
        }
        ConfigAction::Set { key, value } => {
            match key.as_str() {
                "notifications" => data.preferences.notifications = value,
                "timer_sound" => data.preferences.timer_sound = value,
                "dark_mode" => data.preferences.dark_mode = value,
                other => {
                    return Err(ValidationError::InvalidValue {
                        field: other.to_string(),
                        message: "expected notifications, timer_sound, or dark_mode".to_string(),
                    }
                    .into())
                }
            }
            println!("{}", serde_json::to_string_pretty(&data.preferences)?);
        }
    }

    store.save(&data)?;
    Ok(())
}
