use photo_tournament_bot::bot::commands::Command;
use teloxide::utils::command::BotCommands;

#[cfg(test)]
mod command_parsing_tests {
    use super::*;

    #[test]
    fn test_all_commands_parse() {
        let cases = vec![
            ("/help", Command::Help),
            ("/start", Command::Start),
            ("/menu", Command::Menu),
            ("/play", Command::Play),
            ("/gallery", Command::Gallery),
            ("/clear", Command::Clear),
            ("/stats", Command::Stats),
        ];

        for (input, expected) in cases {
            let result = Command::parse(input, "testbot");
            assert_eq!(result.unwrap(), expected, "Failed to parse {}", input);
        }
    }

    #[test]
    fn test_command_with_bot_mention() {
        let result = Command::parse("/menu@testbot", "testbot");
        assert_eq!(result.unwrap(), Command::Menu);
    }

    #[test]
    fn test_command_for_another_bot_is_rejected() {
        assert!(Command::parse("/menu@otherbot", "testbot").is_err());
    }

    #[test]
    fn test_invalid_command_parsing() {
        assert!(Command::parse("/schedule", "testbot").is_err());
        assert!(Command::parse("/nonexistent", "testbot").is_err());
    }

    #[test]
    fn test_non_command_text_parsing() {
        assert!(Command::parse("hello", "testbot").is_err());
        assert!(Command::parse("", "testbot").is_err());
    }

    #[test]
    fn test_command_descriptions_list_every_command() {
        let descriptions = Command::descriptions().to_string();
        for command in ["/help", "/start", "/menu", "/play", "/gallery", "/clear", "/stats"] {
            assert!(descriptions.contains(command), "Missing {} in help text", command);
        }
    }
}
