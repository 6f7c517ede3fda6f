use teloxide::prelude::*;

use crate::app::AppContext;
use crate::error::StorageError;
use crate::bot::keyboards::{clear_confirm_keyboard, gallery_keyboard, GALLERY_BUTTON_LIMIT};
use crate::bot::presenter::TelegramPresenter;
use crate::storage::images::uploaded_at;
use crate::tournament::{ImageRef, ParticipantId, Scope};
use crate::utils::feedback::{CommandFeedback, FeedbackType};
use crate::utils::logging::{log_command_error, log_command_start, log_game_event};

/// Starts a tournament over the sender's own uploads.
pub async fn handle_play(bot: Bot, msg: Message, ctx: &AppContext) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0;
    log_command_start("play", &user.full_name(), user_id, msg.chat.id.0, None);

    let _guard = ctx.locks.acquire(user_id).await;
    let events = ctx.game.select_scope(user_id, Scope::Gallery(user_id));
    TelegramPresenter::new(&bot, msg.chat.id, ctx.categories())
        .render(events)
        .await
}

pub async fn handle_gallery(bot: Bot, msg: Message, ctx: &AppContext) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    log_command_start("gallery", &user.full_name(), user.id.0, msg.chat.id.0, None);

    let _guard = ctx.locks.acquire(user.id.0).await;
    send_gallery(&bot, msg.chat.id, user.id.0, ctx).await
}

/// Asks for confirmation before wiping the gallery.
pub async fn handle_clear(bot: Bot, msg: Message, ctx: &AppContext) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    match ctx.gallery.count(user.id.0) {
        Ok(0) => {
            feedback.info("Your gallery is already empty.").await?;
        }
        Ok(count) => {
            feedback
                .send_with_keyboard(
                    FeedbackType::Warning,
                    &format!("Delete all {count} photo(s) from your gallery? This cannot be undone."),
                    clear_confirm_keyboard(),
                )
                .await?;
        }
        Err(e) => {
            log_command_error("clear", &user.full_name(), user.id.0, msg.chat.id.0, &e.to_string());
            feedback.error("Could not read your gallery. Please try again later.").await?;
        }
    }

    Ok(())
}

/// Sends the gallery listing with delete buttons. Callers hold the
/// participant lock.
pub async fn send_gallery(
    bot: &Bot,
    chat_id: ChatId,
    user_id: ParticipantId,
    ctx: &AppContext,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    let images = match ctx.gallery.list(user_id) {
        Ok(images) => images,
        Err(e) => {
            tracing::error!("Failed to list gallery of {}: {}", user_id, e);
            feedback.error("Could not read your gallery. Please try again later.").await?;
            return Ok(());
        }
    };

    if images.is_empty() {
        feedback
            .info("Your gallery is empty. Send me photos (as pictures or .jpg/.png files) to add them.")
            .await?;
        return Ok(());
    }

    feedback
        .send_with_keyboard(
            FeedbackType::Info,
            &format_gallery_listing(&images, ctx.gallery.max_photos()),
            gallery_keyboard(&images),
        )
        .await?;

    Ok(())
}

/// Plain-text listing, numbered in upload order.
pub fn format_gallery_listing(images: &[ImageRef], max_photos: usize) -> String {
    let mut text = format!("Your gallery: {}/{} photos\n\n", images.len(), max_photos);

    for (i, image) in images.iter().enumerate() {
        let uploaded = uploaded_at(image)
            .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        text.push_str(&format!("#{} uploaded {}\n", i + 1, uploaded));
    }

    if images.len() > GALLERY_BUTTON_LIMIT {
        text.push_str(&format!(
            "\nDelete buttons are shown for the newest {GALLERY_BUTTON_LIMIT} photos."
        ));
    } else {
        text.push_str("\nTap a number to delete that photo.");
    }

    text
}

/// Drops a running tournament over the participant's own gallery, since its
/// photos are about to change. Returns whether one was running.
pub fn abandon_gallery_session(ctx: &AppContext, user_id: ParticipantId) -> bool {
    let running = ctx
        .registry()
        .get_session(user_id)
        .is_some_and(|session| session.scope() == &Scope::Gallery(user_id));

    if running {
        ctx.registry().abandon(user_id);
        log_game_event("abandoned", user_id, Some("gallery changed"));
    }
    running
}

/// Deletes one photo on behalf of the gallery buttons. Callers hold the
/// participant lock.
pub fn delete_photo(ctx: &AppContext, user_id: ParticipantId, file_name: &str) -> Result<bool, StorageError> {
    let deleted = ctx.gallery.delete(user_id, file_name)?;
    if deleted {
        abandon_gallery_session(ctx, user_id);
    }
    Ok(deleted)
}

/// Deletes every photo of the participant. Callers hold the participant lock.
pub fn delete_all_photos(ctx: &AppContext, user_id: ParticipantId) -> Result<usize, StorageError> {
    let removed = ctx.gallery.delete_all(user_id)?;
    abandon_gallery_session(ctx, user_id);
    Ok(removed)
}
