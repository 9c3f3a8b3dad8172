use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile, ParseMode};

use crate::dialog::Reply;
use crate::models::{BotConfig, Language};

/// Клавиатура выбора языка
pub fn make_language_keyboard() -> InlineKeyboardMarkup {
    let mut keyboard = Vec::new();

    for lang in Language::ALL {
        keyboard.push(vec![InlineKeyboardButton::callback(
            lang.native_name(),
            lang.code(),
        )]);
    }

    InlineKeyboardMarkup::new(keyboard)
}

/// Отправка ответа движка.
///
/// Если у ответа есть картинка-обложка и файл на месте, уходит фото с
/// подписью, во всех остальных случаях обычное сообщение.
pub async fn send_reply(
    bot: &Bot,
    chat_id: ChatId,
    config: &BotConfig,
    reply: Reply,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if let Some(key) = reply.image {
        let path = config.images_dir.join(format!("{}.png", key));
        if path.exists() {
            bot.send_photo(chat_id, InputFile::file(path))
                .caption(reply.text)
                .parse_mode(ParseMode::MarkdownV2)
                .await?;
            return Ok(());
        }
        log::warn!("🖼 Image '{}' not found, falling back to text", key);
    }

    bot.send_message(chat_id, reply.text)
        .parse_mode(ParseMode::MarkdownV2)
        .await?;

    Ok(())
}
