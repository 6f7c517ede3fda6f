use teloxide::prelude::*;
use crate::utils::feedback::CommandFeedback;

pub async fn handle_general_message(
    bot: Bot,
    msg: Message,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    if let Some(text) = msg.text() {
        let lower = text.to_lowercase();
        if text.starts_with('/') {
            let error_msg = format!("Unknown command: {}", text.split_whitespace().next().unwrap_or(text));
            let suggestion = "Use /help to see all available commands.";
            feedback.validation_error(&error_msg, suggestion).await?;
        } else if lower.contains("photo") || lower.contains("picture") || lower.contains("upload") {
            feedback
                .info("Send me a photo (or a .jpg/.png file) to add it to your gallery, then /play to compare them.")
                .await?;
        } else if lower.contains("help") || lower.contains("menu") {
            feedback.info("Use /menu to pick a category or /help to see all commands!").await?;
        }
        // Other chatter gets no reply
    }

    Ok(())
}
