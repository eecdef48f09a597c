use teloxide::prelude::*;

use crate::bot::dialogue::HandlerResult;
use crate::utils::feedback::CommandFeedback;

pub const HELP_TEXT: &str = "Нужно срочно встретиться с преподавателем, но не знаете, где его найти? \
Может быть, забыли его имя или отчество? Этот бот Вам поможет! \
Просто введите команду /find, а затем фамилию преподавателя, которого надо найти. \
В ответ Вы увидите, в какие дни и в какое время у преподавателя есть занятия. \
Так Вы сможете его найти. Обратите внимание, что бот работает в тестовом режиме, \
и могут случаться ошибки в его работе. Если есть замечания и/или предложения, будем рады их услышать.\n\
Страница кафедры ЭММЭ: https://mse.msu.ru/emme/\n\
Темы дипломных и курсовых работ на кафедре ЭММЭ можно посмотреть, набрав команду /subject";

pub const SUBJECT_TEXT: &str = "Темы курсовых и дипломных работ на кафедре ЭММЭ можно посмотреть на странице \
https://mse.msu.ru/tematika-kursovyh-diplomnyh-i-nauchnyh-rabot/";

pub async fn handle_help(bot: Bot, msg: Message) -> HandlerResult {
    CommandFeedback::new(bot, msg.chat.id).info(HELP_TEXT).await?;
    Ok(())
}

pub async fn handle_subject(bot: Bot, msg: Message) -> HandlerResult {
    CommandFeedback::new(bot, msg.chat.id).info(SUBJECT_TEXT).await?;
    Ok(())
}
