//! # Main Entry Point
//!
//! Initializes the glossary bot:
//! - Domain: Configuration and Types
//! - Infrastructure: Matrix, glossary database
//! - Application: Router, Engine, Parsing, Logging
//!

mod application;
mod domain;
mod infrastructure;
mod strings;

use anyhow::Result;
use clap::Parser;
use matrix_sdk::{
    Client,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::{MessageType, SyncRoomMessageEvent},
    },
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::infrastructure::matrix::MatrixService;
use crate::strings::logs;

/// Matrix bot that keeps a crowd-sourced glossary of acronyms.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "data/config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    let _guard = application::logging::init(&config.logging)?;
    tracing::info!("{}", logs::STARTING);

    // 3. Glossary Database
    let pool = infrastructure::database::connect(&config.database).await?;
    tracing::info!("{}", logs::database_ready(&config.database.url));
    let router = Arc::new(CommandRouter::new(&config, pool));

    // 4. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .send()
        .await?;

    tracing::info!("{}", logs::login_success(&config.services.matrix.username));

    if let Some(name) = &config.services.matrix.display_name {
        tracing::info!("{}", logs::setting_display_name(name));
        if let Err(e) = client.account().set_display_name(Some(name.as_str())).await {
            tracing::warn!("{}", logs::set_display_name_fail(&e.to_string()));
        }
    }

    // 5. Event Handlers
    let start_time = std::time::SystemTime::now();
    let loop_router = router.clone();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let router = loop_router.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            if original_msg.sender == room.own_user_id() {
                return;
            }

            if let MessageType::Text(text_content) = &original_msg.content.msgtype {
                let body = &text_content.body;
                tracing::debug!("Received message from {}: \n{}", original_msg.sender, body);

                let chat = MatrixService::new(room);
                if let Err(e) = router
                    .route(&chat, body, original_msg.sender.as_str())
                    .await
                {
                    tracing::error!("{}", logs::route_fail(&e.to_string()));
                }
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            tracing::info!("{}", logs::invite_received(room.room_id().as_str()));
            if let Err(e) = room.join().await {
                tracing::warn!("{}", logs::join_invite_fail(&e.to_string()));
            }
        }
    });

    // 6. Sync until the process is stopped
    if let Err(e) = client.sync(SyncSettings::default()).await {
        tracing::error!("{}", logs::sync_loop_fail(&e.to_string()));
        return Err(e.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_config_path() {
        let args = Args::parse_from(["acrobot"]);
        assert_eq!(args.config, PathBuf::from("data/config.yaml"));

        let args = Args::parse_from(["acrobot", "--config", "/etc/acrobot.yaml"]);
        assert_eq!(args.config, PathBuf::from("/etc/acrobot.yaml"));
    }
}
