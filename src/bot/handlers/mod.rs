pub mod message;

use teloxide::{
    dispatching::{dialogue, dialogue::InMemStorage, UpdateHandler},
    prelude::*,
};
use crate::bot::commands::{find, Command};
use crate::bot::dialogue::{FindDialogue, FindState};
use crate::services::lookup::TeacherLookup;

pub struct BotHandler {
    pub lookup: TeacherLookup,
}

impl BotHandler {
    pub fn new(lookup: TeacherLookup) -> Self {
        Self { lookup }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let lookup = self.lookup.clone();

        dialogue::enter::<Update, InMemStorage<FindState>, FindState, _>()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(|bot: Bot, msg: Message, cmd: Command, dialogue: FindDialogue| async move {
                        message::command_handler(bot, msg, cmd, dialogue).await
                    }),
            )
            .branch(
                Update::filter_message()
                    .branch(dptree::case![FindState::AwaitingSurname].endpoint(
                        move |bot: Bot, msg: Message, dialogue: FindDialogue| {
                            let lookup = lookup.clone();
                            async move { find::handle_surname(bot, msg, dialogue, lookup).await }
                        },
                    ))
                    .branch(dptree::endpoint(|bot: Bot, msg: Message| async move {
                        message::general_message_handler(bot, msg).await
                    })),
            )
    }
}
