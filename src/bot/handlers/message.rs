use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use crate::app::AppContext;
use crate::bot::commands::Command;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<AppContext>,
) -> ResponseResult<()> {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
        }
        Command::Start => {
            crate::bot::commands::start::handle_start(bot, msg, &ctx).await?;
        }
        Command::Menu => {
            crate::bot::commands::start::handle_menu(bot, msg, &ctx).await?;
        }
        Command::Play => {
            crate::bot::commands::gallery::handle_play(bot, msg, &ctx).await?;
        }
        Command::Gallery => {
            crate::bot::commands::gallery::handle_gallery(bot, msg, &ctx).await?;
        }
        Command::Clear => {
            crate::bot::commands::gallery::handle_clear(bot, msg, &ctx).await?;
        }
        Command::Stats => {
            crate::bot::commands::stats::handle_stats(bot, msg, &ctx).await?;
        }
    }
    Ok(())
}
