use std::path::{Path, PathBuf};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use valueof_core::sync::{default_export_file_name, SyncState};
use valueof_core::{Error, SyncError};

use crate::cli::SyncCommand;
use crate::context::AppContext;

const MASK_PREFIX_CHARS: usize = 4;

/// Shows a short prefix of long tokens only; short ones are hidden entirely.
fn mask_token(token: &str) -> String {
    if token.chars().count() <= MASK_PREFIX_CHARS * 2 {
        return "****".to_string();
    }
    let visible: String = token.chars().take(MASK_PREFIX_CHARS).collect();
    format!("{}****", visible)
}

/// Adds a retry hint to transient sync failures.
fn explain(err: Error) -> anyhow::Error {
    match &err {
        Error::Sync(sync_err) if sync_err.is_retryable() => {
            anyhow!("{} (this may be temporary, try again later)", err)
        }
        Error::Sync(SyncError::Remote { status: 401, .. }) => {
            anyhow!("{} (check the token with `valueof sync configure`)", err)
        }
        _ => err.into(),
    }
}

pub async fn run(
    ctx: &mut AppContext,
    command: SyncCommand,
    now: DateTime<Utc>,
) -> anyhow::Result<String> {
    match command {
        SyncCommand::Configure { token, gist_id } => {
            Ok(match ctx.controller.configure(&token, gist_id.as_deref()) {
                Some(config) => format!("Sync {}", describe_state(SyncState::of(Some(&config)))),
                None => "Sync configuration cleared".to_string(),
            })
        }
        SyncCommand::Status => Ok(status(ctx)),
        SyncCommand::Push => {
            let mut config = ctx.sync_config().ok_or(SyncError::MissingToken)?;
            let outcome = ctx
                .controller
                .push(&mut config, &ctx.inventory, now)
                .await
                .map_err(explain)?;
            Ok(format!(
                "{} gist {} with {} items",
                if outcome.created { "Created" } else { "Updated" },
                outcome.document_id,
                outcome.item_count
            ))
        }
        SyncCommand::Pull => {
            let config = ctx.sync_config().ok_or(SyncError::MissingToken)?;
            let outcome = ctx
                .controller
                .pull(&config, &mut ctx.inventory)
                .await
                .map_err(explain)?;
            Ok(format!(
                "Restored {} items from gist {} (format {})",
                outcome.item_count,
                config.linked_document().unwrap_or_default(),
                outcome.version
            ))
        }
    }
}

fn describe_state(state: SyncState) -> &'static str {
    match state {
        SyncState::Unconfigured => "not configured",
        SyncState::Configured => "configured, no gist linked yet",
        SyncState::Linked => "linked",
    }
}

fn status(ctx: &AppContext) -> String {
    let config = ctx.sync_config();
    let state = SyncState::of(config.as_ref());
    match config.filter(|c| c.has_token()) {
        Some(config) => format!(
            "Sync {}\n  token: {}\n  gist:  {}",
            describe_state(state),
            mask_token(&config.token),
            config.linked_document().unwrap_or("-")
        ),
        None => format!("Sync {}", describe_state(state)),
    }
}

pub async fn export(
    ctx: &AppContext,
    path: Option<PathBuf>,
    now: DateTime<Utc>,
) -> anyhow::Result<String> {
    let path = path.unwrap_or_else(|| PathBuf::from(default_export_file_name(now)));
    let outcome = ctx.controller.export(&ctx.inventory, &path, now).await?;
    Ok(format!(
        "Exported {} items to {}",
        outcome.item_count,
        outcome.path.display()
    ))
}

pub async fn import(ctx: &mut AppContext, path: &Path) -> anyhow::Result<String> {
    let outcome = ctx.controller.import(path, &mut ctx.inventory).await?;
    let icons = if outcome.icons_replaced {
        ", icons replaced"
    } else {
        ""
    };
    Ok(format!(
        "Imported {} items from {}{}",
        outcome.item_count,
        path.display(),
        icons
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_tokens_are_fully_masked() {
        assert_eq!(mask_token("abc"), "****");
        assert_eq!(mask_token("abcd"), "****");
        assert_eq!(mask_token("ghp_1234"), "****");
        assert_eq!(mask_token("ghp_abcdef"), "ghp_****");
    }
}
