//! # Command Router
//!
//! Entry point for every chat message. Decides whether a message is addressed to the bot,
//! runs it through parser and engine inside one database transaction, and sends the reply.

use anyhow::Result;
use sqlx::{SqliteConnection, SqlitePool};

use crate::application::engine::GlossaryEngine;
use crate::application::formatter;
use crate::application::parsing::parse_command;
use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{Reply, UserId};

/// Handles one command against an open unit of work and returns the reply text.
/// Domain failures come back as reply text; only storage errors are `Err`.
pub async fn process_message(
    user_id: &UserId,
    session: &mut SqliteConnection,
    command: &str,
) -> Result<String> {
    let reply = match parse_command(command) {
        Ok(directive) => {
            tracing::debug!("Parsed directive {:?}", directive);
            GlossaryEngine::new(session).execute(user_id, directive).await?
        }
        Err(err) => {
            tracing::debug!("Rejected command {:?}: {:?}", command, err);
            Reply::from(err)
        }
    };
    Ok(formatter::render(&reply))
}

pub struct CommandRouter {
    pool: SqlitePool,
    mention_only: bool,
    names: Vec<String>,
}

impl CommandRouter {
    pub fn new(config: &AppConfig, pool: SqlitePool) -> Self {
        Self {
            pool,
            mention_only: config.commands.mention_only,
            names: config.mention_names(),
        }
    }

    pub async fn route<C>(&self, chat: &C, message: &str, sender: &str) -> Result<()>
    where
        C: ChatProvider,
    {
        let Some(command) = self.addressed_command(message, chat.is_direct()) else {
            return Ok(());
        };

        tracing::info!(
            "Router dispatching cmd='{}' sender='{}' room='{}'",
            command,
            sender,
            chat.room_id()
        );

        let reply = match self.dispatch(sender, command).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Command '{}' from {} failed: {:#}", command, sender, e);
                crate::strings::messages::INTERNAL_ERROR.to_string()
            }
        };

        chat.send_message(&reply).await.map_err(|e| {
            anyhow::anyhow!(crate::strings::logs::reply_fail(&chat.room_id(), &e))
        })
    }

    /// Runs `command` in its own transaction: committed on success, rolled back when dropped
    /// on any error path. `BEGIN IMMEDIATE` takes the write lock up front, so overlapping
    /// commands queue on the busy timeout instead of deadlocking on a lock upgrade.
    pub async fn dispatch(&self, sender: &str, command: &str) -> Result<String> {
        let user = UserId::new(sender);
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        let reply = process_message(&user, &mut tx, command).await?;
        tx.commit().await?;
        Ok(reply)
    }

    /// Direct chats are always addressed to the bot; group rooms need a mention
    /// when `mention_only` is set.
    fn addressed_command<'m>(&self, message: &'m str, direct: bool) -> Option<&'m str> {
        let message = message.trim();
        let command = match strip_mention(message, &self.names) {
            Some(rest) => rest,
            None if self.mention_only && !direct => return None,
            None => message,
        };
        (!command.is_empty()).then_some(command)
    }
}

/// `acrobot: TLS`, `AcroBot, TLS` and `acrobot TLS` all yield `TLS`.
/// The longest matching name wins, so `AcroBot Helper: TLS` is not read as `Helper: TLS`.
fn strip_mention<'m>(message: &'m str, names: &[String]) -> Option<&'m str> {
    names
        .iter()
        .filter_map(|name| {
            let head = message.get(..name.len())?;
            if !head.eq_ignore_ascii_case(name) {
                return None;
            }
            let rest = &message[name.len()..];
            let is_boundary = rest.is_empty()
                || rest.starts_with(|c: char| c == ':' || c == ',' || c.is_whitespace());
            is_boundary.then(|| (name.len(), rest.trim_start_matches([':', ',']).trim()))
        })
        .max_by_key(|(len, _)| *len)
        .map(|(_, rest)| rest)
}
