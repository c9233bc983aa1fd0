use teloxide::macros::BotCommands;

/// Type alias for handler result types
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "Welcome message, your chat ID and access")]
    Start,
    #[command(description = "Display help information")]
    Help,
    #[command(description = "Check bot status and your authorization")]
    Status,
    #[command(description = "Show the interactive menu")]
    Menu,
}

/// Actions reachable from inline keyboard buttons
///
/// The callback data of every button is one of these, so an incoming
/// callback either parses into a known action or is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Menu,
    Help,
    Status,
    HowTo,
    ChatId,
    Author,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::Menu,
        MenuAction::Help,
        MenuAction::Status,
        MenuAction::HowTo,
        MenuAction::ChatId,
        MenuAction::Author,
    ];

    /// Callback data carried by the button
    pub fn as_data(self) -> &'static str {
        match self {
            MenuAction::Menu => "menu",
            MenuAction::Help => "help",
            MenuAction::Status => "status",
            MenuAction::HowTo => "howto",
            MenuAction::ChatId => "chatid",
            MenuAction::Author => "author",
        }
    }

    pub fn parse(data: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_data() == data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::utils::command::BotCommands;

    #[test]
    fn test_menu_action_parse() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::parse(action.as_data()), Some(action));
        }
        assert_eq!(MenuAction::parse(""), None);
        assert_eq!(MenuAction::parse("author"), Some(MenuAction::Author));
        assert_eq!(MenuAction::parse("rss_browse"), None);
        assert_eq!(MenuAction::parse("HELP"), None);
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("/start", "bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/help", "bot").unwrap(), Command::Help);
        assert_eq!(Command::parse("/status", "bot").unwrap(), Command::Status);
        assert_eq!(Command::parse("/menu@bot", "bot").unwrap(), Command::Menu);
        assert!(Command::parse("/setrss", "bot").is_err());
        assert!(Command::parse("hello", "bot").is_err());
    }

    #[test]
    fn test_command_descriptions_list_every_command() {
        let text = Command::descriptions().to_string();
        for cmd in ["/start", "/help", "/status", "/menu"] {
            assert!(text.contains(cmd), "missing {cmd} in {text}");
        }
    }
}
