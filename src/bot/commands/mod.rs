pub mod gallery;
pub mod start;
pub mod stats;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Photo Tournament Bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start the bot and pick a category")]
    Start,
    #[command(description = "Show the category menu")]
    Menu,
    #[command(description = "Play a tournament with your own photos")]
    Play,
    #[command(description = "List and manage your uploaded photos")]
    Gallery,
    #[command(description = "Delete all your uploaded photos")]
    Clear,
    #[command(description = "Show usage statistics")]
    Stats,
}
