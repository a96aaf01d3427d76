use super::with_notice;
use crate::cli::IconsCommand;
use crate::context::AppContext;

pub fn run(ctx: &mut AppContext, command: IconsCommand) -> anyhow::Result<String> {
    let message = match command {
        IconsCommand::List => return Ok(ctx.inventory.icons().as_slice().join(" ")),
        IconsCommand::Add { glyph } => {
            ctx.inventory.icons_mut().add(&glyph)?;
            format!("Added icon {}", glyph.trim())
        }
        IconsCommand::Remove { glyph } => {
            ctx.inventory.icons_mut().remove(&glyph)?;
            format!("Removed icon {}", glyph.trim())
        }
        IconsCommand::Reset => {
            ctx.inventory.icons_mut().reset();
            format!("Restored {} default icons", ctx.inventory.icons().len())
        }
    };
    let notice = (!ctx.local.save_icons(ctx.inventory.icons()))
        .then(|| "warning: icons could not be saved to local storage".to_string());
    Ok(with_notice(message, notice))
}
