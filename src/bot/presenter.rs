use teloxide::prelude::*;
use teloxide::types::{InputFile, InputMedia, InputMediaPhoto};

use crate::bot::keyboards::{main_menu_keyboard, pick_keyboard};
use crate::config::Categories;
use crate::services::game::{ErrorKind, PresenterEvent};
use crate::tournament::{ImageRef, Pair, Scope};
use crate::utils::feedback::CommandFeedback;

pub const CHOOSE_CATEGORY_TEXT: &str = "Choose a category to compare photos in:";

/// Renders [`PresenterEvent`]s into one Telegram chat.
pub struct TelegramPresenter<'a> {
    bot: &'a Bot,
    chat_id: ChatId,
    categories: &'a Categories,
}

impl<'a> TelegramPresenter<'a> {
    pub fn new(bot: &'a Bot, chat_id: ChatId, categories: &'a Categories) -> Self {
        Self {
            bot,
            chat_id,
            categories,
        }
    }

    pub async fn render(&self, events: Vec<PresenterEvent>) -> ResponseResult<()> {
        for event in events {
            match event {
                PresenterEvent::ShowPair(pair) => self.show_pair(&pair).await?,
                PresenterEvent::ShowWinner { scope, image } => self.show_winner(&scope, &image).await?,
                PresenterEvent::PromptScopeChoice => self.prompt_scope_choice().await?,
                PresenterEvent::Error { kind, message } => self.show_error(kind, &message).await?,
            }
        }
        Ok(())
    }

    /// Album first, then the pick buttons.
    async fn show_pair(&self, pair: &Pair) -> ResponseResult<()> {
        let media = vec![
            InputMedia::Photo(
                InputMediaPhoto::new(InputFile::file(pair.champion.path())).caption("Photo 1 ❤️"),
            ),
            InputMedia::Photo(
                InputMediaPhoto::new(InputFile::file(pair.challenger.path())).caption("Photo 2 💙"),
            ),
        ];
        self.bot.send_media_group(self.chat_id, media).await?;

        self.bot
            .send_message(
                self.chat_id,
                format!(
                    "Round {}/{}: which one do you like more? 👇",
                    pair.round, pair.total_rounds
                ),
            )
            .reply_markup(pick_keyboard(pair.tag()))
            .await?;

        Ok(())
    }

    async fn show_winner(&self, scope: &Scope, image: &ImageRef) -> ResponseResult<()> {
        self.bot
            .send_photo(self.chat_id, InputFile::file(image.path()))
            .caption(winner_caption(scope, self.categories))
            .await?;
        Ok(())
    }

    async fn prompt_scope_choice(&self) -> ResponseResult<()> {
        self.bot
            .send_message(self.chat_id, "Want another round? Choose a category:")
            .reply_markup(main_menu_keyboard(self.categories))
            .await?;
        Ok(())
    }

    async fn show_error(&self, kind: ErrorKind, message: &str) -> ResponseResult<()> {
        let feedback = CommandFeedback::new(self.bot.clone(), self.chat_id);
        match kind {
            ErrorKind::NotEnoughPhotos | ErrorKind::StaleChoice | ErrorKind::SessionExpired => {
                feedback.warning(message).await?;
            }
            ErrorKind::UnknownScope | ErrorKind::Internal => {
                feedback.error(message).await?;
            }
        }
        Ok(())
    }
}

pub fn winner_caption(scope: &Scope, categories: &Categories) -> String {
    match scope {
        Scope::Category(key) => format!("🏆 The winner in {}!", categories.label(key)),
        Scope::Gallery(_) => "🏆 The winner of your gallery!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_caption() {
        let categories = Categories::default();
        assert_eq!(
            winner_caption(&Scope::Category("cats".into()), &categories),
            "🏆 The winner in Cats 🐱!"
        );
        assert_eq!(
            winner_caption(&Scope::Gallery(5), &categories),
            "🏆 The winner of your gallery!"
        );
    }
}
