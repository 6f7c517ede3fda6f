use teloxide::prelude::*;

use crate::app::AppContext;
use crate::bot::keyboards::main_menu_keyboard;
use crate::bot::presenter::CHOOSE_CATEGORY_TEXT;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};
use crate::utils::validation::display_name;

/// Greets the user, counts the visit and shows the category menu.
pub async fn handle_start(bot: Bot, msg: Message, ctx: &AppContext) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0;
    let name = display_name(&user.full_name(), user.username.as_deref(), user_id);

    log_command_start("start", &name, user_id, msg.chat.id.0, None);

    // Stats are best effort, a failed write never blocks the game
    match ctx.stats.record_visit(user_id, &name) {
        Ok(entry) => log_command_success(
            "start",
            &name,
            user_id,
            msg.chat.id.0,
            Some(&format!("visit #{}", entry.uses)),
        ),
        Err(e) => log_command_error("start", &name, user_id, msg.chat.id.0, &e.to_string()),
    }

    bot.send_message(msg.chat.id, greeting_text(ctx))
        .reply_markup(main_menu_keyboard(ctx.categories()))
        .await?;

    Ok(())
}

pub async fn handle_menu(bot: Bot, msg: Message, ctx: &AppContext) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, CHOOSE_CATEGORY_TEXT)
        .reply_markup(main_menu_keyboard(ctx.categories()))
        .await?;
    Ok(())
}

pub fn greeting_text(ctx: &AppContext) -> String {
    let labels: Vec<&str> = ctx.categories().iter().map(|c| c.label.as_str()).collect();
    format!(
        "Hi! I show you two photos at a time, you pick the one you like more, \
         and the favourite keeps going until one winner is left.\n\n\
         {}\n\n\
         Send me photos to build your own gallery and play with /play.\n\
         Open the menu at any time with /menu",
        labels.join("  |  ")
    )
}
