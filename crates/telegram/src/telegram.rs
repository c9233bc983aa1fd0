use crate::types::Command;
use crate::{callbacks, commands};
use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};

/// Register bot commands in Telegram menu
pub async fn set_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(commands::start))
        .branch(case![Command::Help].endpoint(commands::help))
        .branch(case![Command::Status].endpoint(commands::status))
        .branch(case![Command::Menu].endpoint(commands::menu));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(Message::filter_document().endpoint(commands::handle_document))
        .branch(Message::filter_text().endpoint(commands::other_text));

    // Handle callback queries from inline keyboards
    let callback_handler = Update::filter_callback_query().endpoint(callbacks::handle_callback);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}
