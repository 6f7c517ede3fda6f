use std::sync::Arc;
use teloxide::prelude::*;

use crate::app::AppContext;
use crate::bot::callback_data::CallbackAction;
use crate::bot::commands::gallery::{delete_all_photos, delete_photo, send_gallery};
use crate::bot::presenter::TelegramPresenter;
use crate::services::game::PresenterEvent;
use crate::tournament::Scope;
use crate::utils::feedback::{CommandFeedback, FeedbackType};
use crate::utils::logging::log_validation_error;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    ctx: Arc<AppContext>,
) -> ResponseResult<()> {
    let user_id = q.from.id.0;
    let username = q.from.username.as_deref().unwrap_or("unknown");

    let (Some(data), Some(message)) = (q.data.clone(), q.message.clone()) else {
        bot.answer_callback_query(q.id)
            .text("Invalid callback data format")
            .await?;
        return Ok(());
    };
    let chat_id = message.chat.id;

    tracing::info!(
        "Callback received: '{}' from user {} ({}) in chat {}",
        data, username, user_id, chat_id.0
    );

    let action = match CallbackAction::parse(&data) {
        Ok(action) => action,
        Err(e) => {
            log_validation_error("callback", &data, &e.to_string(), user_id);
            bot.answer_callback_query(q.id).await?;
            bot.send_message(chat_id, "Unknown command. Tap /menu.").await?;
            return Ok(());
        }
    };

    // Everything below runs strictly after any earlier tap of this user
    let _guard = ctx.locks.acquire(user_id).await;
    let presenter = TelegramPresenter::new(&bot, chat_id, ctx.categories());
    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    match action {
        CallbackAction::SelectCategory(key) => {
            bot.answer_callback_query(q.id).await?;
            let events = ctx.game.select_scope(user_id, Scope::Category(key));
            presenter.render(events).await?;
        }
        CallbackAction::PlayGallery => {
            bot.answer_callback_query(q.id).await?;
            let events = ctx.game.select_scope(user_id, Scope::Gallery(user_id));
            presenter.render(events).await?;
        }
        CallbackAction::Pick { tag, pick } => {
            let events = ctx.game.submit_pick(user_id, tag, pick);
            let accepted = matches!(
                events.first(),
                Some(PresenterEvent::ShowPair(_)) | Some(PresenterEvent::ShowWinner { .. })
            );
            if accepted {
                bot.answer_callback_query(q.id).text("✅ Okay, moving on!").await?;
            } else {
                bot.answer_callback_query(q.id).await?;
            }
            presenter.render(events).await?;
        }
        CallbackAction::DeleteImage(file_name) => {
            match delete_photo(&ctx, user_id, &file_name) {
                Ok(true) => {
                    bot.answer_callback_query(q.id).text("🗑 Photo deleted").await?;
                    send_gallery(&bot, chat_id, user_id, &ctx).await?;
                }
                Ok(false) => {
                    bot.answer_callback_query(q.id).text("That photo is already gone").await?;
                }
                Err(e) => {
                    tracing::error!("Failed to delete {} for {}: {}", file_name, user_id, e);
                    bot.answer_callback_query(q.id).await?;
                    feedback.error("Could not delete the photo. Please try again later.").await?;
                }
            }
        }
        CallbackAction::RequestClear => {
            bot.answer_callback_query(q.id).await?;
            feedback
                .send_with_keyboard(
                    FeedbackType::Warning,
                    "Delete all photos from your gallery? This cannot be undone.",
                    crate::bot::keyboards::clear_confirm_keyboard(),
                )
                .await?;
        }
        CallbackAction::ClearGallery { confirmed: false } => {
            bot.answer_callback_query(q.id).await?;
            feedback
                .update_message(message.id, FeedbackType::Info, "Okay, your photos stay where they are.")
                .await?;
        }
        CallbackAction::ClearGallery { confirmed: true } => {
            bot.answer_callback_query(q.id).await?;
            match delete_all_photos(&ctx, user_id) {
                Ok(removed) => {
                    feedback
                        .update_message(
                            message.id,
                            FeedbackType::Success,
                            &format!("Deleted {removed} photo(s). Your gallery is empty now."),
                        )
                        .await?;
                }
                Err(e) => {
                    tracing::error!("Failed to clear gallery of {}: {}", user_id, e);
                    feedback.error("Could not delete your photos. Please try again later.").await?;
                }
            }
        }
    }

    Ok(())
}
