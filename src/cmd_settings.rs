//! Settings subcommand handlers.

use docrelay_config::Config;

use crate::cli::SettingsAction;

/// Handle settings subcommands.
pub(crate) fn handle_settings_command(
    config: &Config,
    action: SettingsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = crate::settings_store(config);

    let settings = match action {
        SettingsAction::Show => store.load()?,
        SettingsAction::Set {
            pdf_prompt,
            pdf_platform,
            transcript_prompt,
            summarize_prompt,
            youtube_platform,
        } => {
            let mut settings = store.load()?;
            if let Some(prompt) = pdf_prompt {
                settings.pdf_prompt = prompt;
            }
            if let Some(platform) = pdf_platform {
                settings.pdf_platform = platform;
            }
            if let Some(prompt) = transcript_prompt {
                settings.transcript_prompt = prompt;
            }
            if let Some(prompt) = summarize_prompt {
                settings.summarize_prompt = prompt;
            }
            if let Some(platform) = youtube_platform {
                settings.youtube_platform = platform;
            }
            store.save(&settings)?;
            println!("Settings saved to {}", store.path().display());
            settings
        }
        SettingsAction::Reset => {
            let settings = store.reset()?;
            println!("Settings reset to defaults");
            settings
        }
    };

    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
