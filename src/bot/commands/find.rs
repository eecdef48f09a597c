use teloxide::prelude::*;
use teloxide::types::MessageId;

use crate::bot::dialogue::{FindDialogue, FindState, HandlerResult};
use crate::services::lookup::{format_reply, TeacherLookup, GENERIC_FAILURE, SURNAME_PROMPT};
use crate::utils::{
    datetime::today_day_month,
    feedback::CommandFeedback,
    logging::{log_command_error, log_command_start, log_command_success},
    validation::validate_surname,
};

fn sender(msg: &Message) -> (String, u64) {
    msg.from()
        .map(|u| {
            (
                u.username.clone().unwrap_or_else(|| "unknown".to_string()),
                u.id.0,
            )
        })
        .unwrap_or_else(|| ("unknown".to_string(), 0))
}

/// `/find`: asks for a surname and waits for the next message.
pub async fn handle_find(bot: Bot, msg: Message, dialogue: FindDialogue) -> HandlerResult {
    let (user, user_id) = sender(&msg);
    log_command_start("find", &user, user_id, msg.chat.id.0);

    let prompt = async {
        bot.send_message(msg.chat.id, SURNAME_PROMPT).await?;
        dialogue.update(FindState::AwaitingSurname).await?;
        HandlerResult::Ok(())
    };

    if let Err(e) = prompt.await {
        log_command_error("find", &user, user_id, msg.chat.id.0, &e.to_string());
        CommandFeedback::new(bot, msg.chat.id).error(GENERIC_FAILURE).await?;
    }
    Ok(())
}

/// Sends the formatted reply. If Telegram refuses it, the generic failure
/// goes out as plain text instead and the refusal is returned.
async fn deliver_reply(
    feedback: &CommandFeedback,
    reply: &str,
    reply_to: MessageId,
) -> ResponseResult<Option<String>> {
    match feedback.send_markdown(reply, Some(reply_to)).await {
        Ok(_) => Ok(None),
        Err(e) => {
            feedback.error(GENERIC_FAILURE).await?;
            Ok(Some(e.to_string()))
        }
    }
}

/// The message after `/find`. Always ends the interaction, whatever the outcome.
pub async fn handle_surname(
    bot: Bot,
    msg: Message,
    dialogue: FindDialogue,
    lookup: TeacherLookup,
) -> HandlerResult {
    let (user, user_id) = sender(&msg);
    let chat_id = msg.chat.id.0;
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    if let Err(e) = dialogue.exit().await {
        tracing::warn!("Failed to reset dialogue for chat {}: {}", chat_id, e);
    }

    let surname = match validate_surname(msg.text().unwrap_or_default()) {
        Ok(surname) => surname,
        Err(e) => {
            tracing::warn!("Rejected surname input from {}({}): {}", user, user_id, e);
            feedback.warning(&format!("{e}. Наберите команду /find еще раз.")).await?;
            return Ok(());
        }
    };

    let (day, month) = today_day_month();
    match lookup.resolve(&surname, day, month).await {
        Ok(outcome) => match deliver_reply(&feedback, &format_reply(&outcome), msg.id).await? {
            None => log_command_success("find", &user, user_id, chat_id, Some(&surname)),
            Some(e) => log_command_error("find", &user, user_id, chat_id, &e),
        },
        Err(e) => {
            log_command_error("find", &user, user_id, chat_id, &e.to_string());
            feedback.error(GENERIC_FAILURE).await?;
        }
    }
    Ok(())
}
