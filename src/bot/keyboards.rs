use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::callback_data::CallbackAction;
use crate::config::Categories;
use crate::tournament::{ImageRef, Pick, RoundTag};

/// Buttons per row in the main menu and the gallery delete grid.
const ROW_WIDTH: usize = 3;
const DELETE_ROW_WIDTH: usize = 5;

/// Telegram allows at most 100 buttons per keyboard.
pub const GALLERY_BUTTON_LIMIT: usize = 60;

fn button(text: impl Into<String>, action: &CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.into(), action.to_data())
}

/// Category buttons plus a row to play with the private gallery.
pub fn main_menu_keyboard(categories: &Categories) -> InlineKeyboardMarkup {
    let buttons: Vec<InlineKeyboardButton> = categories
        .iter()
        .map(|c| button(c.label.clone(), &CallbackAction::SelectCategory(c.key.clone())))
        .collect();

    let mut rows: Vec<Vec<InlineKeyboardButton>> =
        buttons.chunks(ROW_WIDTH).map(|row| row.to_vec()).collect();
    rows.push(vec![button("📁 My photos", &CallbackAction::PlayGallery)]);

    InlineKeyboardMarkup::new(rows)
}

pub fn pick_keyboard(tag: RoundTag) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button(
            "Photo 1 ❤️",
            &CallbackAction::Pick { tag: Some(tag), pick: Pick::ChampionWins },
        ),
        button(
            "Photo 2 💙",
            &CallbackAction::Pick { tag: Some(tag), pick: Pick::ChallengerWins },
        ),
    ]])
}

/// One delete button per photo (numbered in upload order) for the newest
/// photos, then play and clear-all rows.
pub fn gallery_keyboard(images: &[ImageRef]) -> InlineKeyboardMarkup {
    let skip = images.len().saturating_sub(GALLERY_BUTTON_LIMIT);

    let delete_buttons: Vec<InlineKeyboardButton> = images
        .iter()
        .enumerate()
        .skip(skip)
        .filter_map(|(i, image)| {
            let file_name = image.file_name()?;
            Some(button(
                format!("🗑 {}", i + 1),
                &CallbackAction::DeleteImage(file_name.to_string()),
            ))
        })
        .collect();

    let mut rows: Vec<Vec<InlineKeyboardButton>> = delete_buttons
        .chunks(DELETE_ROW_WIDTH)
        .map(|row| row.to_vec())
        .collect();

    if images.len() >= 2 {
        rows.push(vec![button("▶️ Play with my photos", &CallbackAction::PlayGallery)]);
    }
    if !images.is_empty() {
        rows.push(vec![button("🧹 Delete all", &CallbackAction::RequestClear)]);
    }

    InlineKeyboardMarkup::new(rows)
}

pub fn clear_confirm_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("Yes, delete all", &CallbackAction::ClearGallery { confirmed: true }),
        button("Cancel", &CallbackAction::ClearGallery { confirmed: false }),
    ]])
}
