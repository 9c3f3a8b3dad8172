use teloxide::prelude::*;
use std::error::Error;

use crate::dialog::ConversationEngine;
use crate::handlers::utils::send_reply;
use crate::models::{BotConfig, DialogState};

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    engine: ConversationEngine,
    config: BotConfig,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let chat_id = msg.chat.id;

    if let Some(location) = msg.location() {
        // Перед геокодированием и запросом погоды показываем индикатор набора
        if engine.dialog_state(chat_id).await == DialogState::AwaitingLocation {
            let _ = bot
                .send_chat_action(chat_id, teloxide::types::ChatAction::Typing)
                .await;
        }

        if let Some(reply) = engine
            .location(chat_id, location.latitude, location.longitude)
            .await
        {
            send_reply(&bot, chat_id, &config, reply).await?;
        }
        return Ok(());
    }

    if let Some(text) = msg.text() {
        // Известные команды уже разобрал command_handler, сюда доходят
        // только нераспознанные.
        if text.starts_with('/') {
            let reply = engine.unknown_command(chat_id).await;
            send_reply(&bot, chat_id, &config, reply).await?;
            return Ok(());
        }

        // Внутри сценария ответ может потребовать похода в API
        if engine.dialog_state(chat_id).await != DialogState::Idle {
            let _ = bot
                .send_chat_action(chat_id, teloxide::types::ChatAction::Typing)
                .await;
        }

        if let Some(reply) = engine.free_text(chat_id, text).await {
            send_reply(&bot, chat_id, &config, reply).await?;
        }
    }

    Ok(())
}
