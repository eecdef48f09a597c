pub mod find;
pub mod help;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Команды бота:")]
pub enum Command {
    #[command(description = "Как пользоваться ботом")]
    Help,
    #[command(description = "Начать работу с ботом")]
    Start,
    #[command(description = "Найти преподавателя по фамилии")]
    Find,
    #[command(description = "Темы курсовых и дипломных работ")]
    Subject,
}
