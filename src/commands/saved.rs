use super::SavedAction;
use nightlist::config::Config;
use nightlist::startup;

/// Run a `saved` subcommand against the configured storage
pub async fn run(action: SavedAction, config: &Config) -> miette::Result<()> {
    let handle = startup::start_saved_events(config).await?;

    match action {
        SavedAction::List => {
            for id in handle.saved_event_ids().await? {
                println!("{}", id);
            }
        }
        SavedAction::Count => {
            println!("{}", handle.saved_event_count().await?);
        }
        SavedAction::Check { id } => {
            let saved = handle.is_event_saved(&id).await?;
            println!("{}", if saved { "saved" } else { "not saved" });
        }
        SavedAction::Toggle { id } => {
            let saved = handle.toggle_saved_event(&id).await?;
            if saved {
                println!("Saved {}", id);
            } else {
                println!("Removed {}", id);
            }
        }
    }

    handle.shutdown().await?;
    Ok(())
}
