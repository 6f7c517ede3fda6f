pub mod callback;
pub mod general_message;
pub mod message;
pub mod upload;

use std::sync::Arc;
use teloxide::{
    dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler},
    prelude::*,
};
use crate::app::AppContext;
use crate::bot::commands::Command;

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

pub struct BotHandler {
    pub ctx: Arc<AppContext>,
}

impl BotHandler {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        let ctx_command = self.ctx.clone();
        let ctx_upload = self.ctx.clone();
        let ctx_callback = self.ctx.clone();

        let message_handler = Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let ctx = ctx_command.clone();
                        async move {
                            message::command_handler(bot, msg, cmd, ctx).await?;
                            HandlerResult::Ok(())
                        }
                    }),
            )
            .branch(
                dptree::filter(|msg: Message| upload::is_upload(&msg)).endpoint(
                    move |bot: Bot, msg: Message| {
                        let ctx = ctx_upload.clone();
                        async move {
                            upload::upload_handler(bot, msg, ctx).await?;
                            HandlerResult::Ok(())
                        }
                    },
                ),
            )
            .branch(dptree::endpoint(|bot: Bot, msg: Message| async move {
                general_message::handle_general_message(bot, msg).await?;
                HandlerResult::Ok(())
            }));

        dptree::entry()
            .branch(message_handler)
            .branch(Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
                let ctx = ctx_callback.clone();
                async move {
                    callback::callback_handler(bot, q, ctx).await?;
                    HandlerResult::Ok(())
                }
            }))
    }
}
