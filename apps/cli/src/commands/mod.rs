//! Command handlers. Each returns the text to print.

mod icons;
mod items;
mod sync;

use chrono::{DateTime, Utc};

use crate::cli::Command;
use crate::context::AppContext;

pub async fn run(
    command: Command,
    ctx: &mut AppContext,
    now: DateTime<Utc>,
) -> anyhow::Result<String> {
    match command {
        Command::Add(args) => items::add(ctx, args, now).await,
        Command::Edit { id, fields } => items::edit(ctx, &id, fields).await,
        Command::Delete { id } => items::delete(ctx, &id),
        Command::List {
            category,
            sort,
            order,
        } => Ok(items::list(ctx, category, sort, order, now)),
        Command::Show { id } => items::show(ctx, &id, now),
        Command::Summary { category } => Ok(items::summary(ctx, category, now)),
        Command::Icons(command) => icons::run(ctx, command),
        Command::Sync(command) => sync::run(ctx, command, now).await,
        Command::Export { path } => sync::export(ctx, path, now).await,
        Command::Import { path } => sync::import(ctx, &path).await,
    }
}

fn with_notice(message: String, notice: Option<String>) -> String {
    match notice {
        Some(notice) => format!("{}\n{}", message, notice),
        None => message,
    }
}
