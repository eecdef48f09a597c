use teloxide::prelude::*;
use crate::bot::commands::{find, help, Command};
use crate::bot::dialogue::{FindDialogue, HandlerResult};
use crate::utils::feedback::CommandFeedback;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: FindDialogue,
) -> HandlerResult {
    match cmd {
        Command::Help | Command::Start => help::handle_help(bot, msg).await?,
        Command::Find => find::handle_find(bot, msg, dialogue).await?,
        Command::Subject => help::handle_subject(bot, msg).await?,
    }
    Ok(())
}

/// Free text outside of a `/find` interaction. Only mistyped commands get an answer.
pub async fn general_message_handler(bot: Bot, msg: Message) -> HandlerResult {
    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            let command = text.split_whitespace().next().unwrap_or(text);
            CommandFeedback::new(bot, msg.chat.id)
                .info(&format!("Неизвестная команда {command}. Список команд: /help"))
                .await?;
        }
    }
    Ok(())
}
