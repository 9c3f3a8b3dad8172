use teloxide::types::ParseMode;
use teloxide::prelude::*;
use std::error::Error;

use crate::dialog::ConversationEngine;
use crate::handlers::utils::{make_language_keyboard, send_reply};
use crate::models::BotConfig;

use crate::Command;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    engine: ConversationEngine,
    config: BotConfig,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let chat_id = msg.chat.id;

    match cmd {
        Command::Start => {
            let name = msg
                .from
                .as_ref()
                .map(|user| user.first_name.clone())
                .unwrap_or_default();
            let reply = engine.start(chat_id, &name).await;
            send_reply(&bot, chat_id, &config, reply).await?;
        }
        Command::Help => {
            let reply = engine.help(chat_id).await;
            send_reply(&bot, chat_id, &config, reply).await?;
        }
        Command::About => {
            let reply = engine.about(chat_id).await;
            send_reply(&bot, chat_id, &config, reply).await?;
        }
        Command::SetLanguage => {
            // Клавиатура выбора языка прикрепляется к тексту-приглашению.
            let reply = engine.choose_language(chat_id).await;
            bot.send_message(chat_id, reply.text)
                .parse_mode(ParseMode::MarkdownV2)
                .reply_markup(make_language_keyboard())
                .await?;
        }
        Command::Weather => {
            let reply = engine.request_city_for_weather(chat_id).await;
            send_reply(&bot, chat_id, &config, reply).await?;
        }
        Command::Forecast => {
            let reply = engine.request_city_for_forecast(chat_id).await;
            send_reply(&bot, chat_id, &config, reply).await?;
        }
        Command::Location => {
            let reply = engine.request_location(chat_id).await;
            send_reply(&bot, chat_id, &config, reply).await?;
        }
        Command::Cancel => {
            let reply = engine.cancel(chat_id).await;
            send_reply(&bot, chat_id, &config, reply).await?;
        }
    }

    Ok(())
}
