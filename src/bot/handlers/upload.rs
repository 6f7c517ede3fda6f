use std::path::Path;
use std::sync::Arc;
use teloxide::net::Download;
use teloxide::prelude::*;

use crate::app::AppContext;
use crate::error::StorageError;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success, log_validation_error};
use crate::utils::validation::image_extension;

/// Files above this size are refused before downloading.
pub const MAX_UPLOAD_BYTES: u32 = 10 * 1024 * 1024;

/// What to download for an incoming photo or image document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_id: String,
    pub extension: String,
    pub size: u32,
}

pub fn is_upload(msg: &Message) -> bool {
    msg.photo().is_some() || msg.document().is_some()
}

/// Picks the largest photo size, or the document when it looks like an image.
/// `Err` carries the reason shown to the user.
pub fn upload_request(msg: &Message) -> Result<UploadRequest, String> {
    if let Some(largest) = msg.photo().and_then(|sizes| sizes.last()) {
        return Ok(UploadRequest {
            file_id: largest.file.id.clone(),
            extension: "jpg".to_string(),
            size: largest.file.size,
        });
    }

    let document = msg.document().ok_or_else(|| "Nothing to upload".to_string())?;
    let extension = document
        .file_name
        .as_deref()
        .and_then(|name| image_extension(Path::new(name)))
        .or_else(|| {
            let mime = document.mime_type.as_ref()?.to_string();
            match mime.as_str() {
                "image/jpeg" => Some("jpg".to_string()),
                "image/png" => Some("png".to_string()),
                _ => None,
            }
        })
        .ok_or_else(|| "Only .jpg, .jpeg and .png images can be added".to_string())?;

    Ok(UploadRequest {
        file_id: document.file.id.clone(),
        extension,
        size: document.file.size,
    })
}

pub async fn upload_handler(bot: Bot, msg: Message, ctx: Arc<AppContext>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0;
    let name = user.full_name();
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    let request = match upload_request(&msg) {
        Ok(request) => request,
        Err(reason) => {
            log_validation_error("upload", "document", &reason, user_id);
            feedback
                .validation_error(&reason, "Send the picture as a photo or as a .jpg/.png file.")
                .await?;
            return Ok(());
        }
    };

    if request.size > MAX_UPLOAD_BYTES {
        log_validation_error("upload", &request.size.to_string(), "file too large", user_id);
        feedback
            .validation_error("This file is too large.", "Send images up to 10 MB.")
            .await?;
        return Ok(());
    }

    log_command_start("upload", &name, user_id, msg.chat.id.0, Some(&request.extension));

    let _guard = ctx.locks.acquire(user_id).await;

    let file = bot.get_file(request.file_id.clone()).await?;
    let mut bytes: Vec<u8> = Vec::new();
    if let Err(e) = bot.download_file(&file.path, &mut bytes).await {
        log_command_error("upload", &name, user_id, msg.chat.id.0, &e.to_string());
        feedback.error("Could not download your photo. Please try again.").await?;
        return Ok(());
    }

    match ctx.gallery.upload(user_id, &bytes, &request.extension) {
        Ok(image) => {
            // A running gallery tournament keeps its original order
            let count = ctx.gallery.count(user_id).unwrap_or(0);
            log_command_success("upload", &name, user_id, msg.chat.id.0, Some(&image.to_string()));
            let hint = if count >= 2 {
                "Use /play to start a tournament with your photos."
            } else {
                "Add one more to start playing."
            };
            feedback
                .success(&format!("Saved! Your gallery now has {count} photo(s). {hint}"))
                .await?;
        }
        Err(StorageError::GalleryFull { limit }) => {
            feedback
                .validation_error(
                    &format!("Your gallery is full ({limit} photos)."),
                    "Delete some photos with /gallery first.",
                )
                .await?;
        }
        Err(e) => {
            log_command_error("upload", &name, user_id, msg.chat.id.0, &e.to_string());
            feedback.error("Could not save your photo. Please try again later.").await?;
        }
    }

    Ok(())
}
