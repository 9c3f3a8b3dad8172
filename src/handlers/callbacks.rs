use teloxide::prelude::*;
use teloxide::types::ParseMode;
use std::error::Error;

use crate::dialog::ConversationEngine;

/// Нажатия инлайн-кнопок. Единственная клавиатура бота - выбор языка,
/// payload кнопки содержит двухбуквенный код.
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    engine: ConversationEngine,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    if let Some(data) = q.data.as_deref() {
        if let Some(ref message) = q.message {
            let chat_id = message.chat().id;
            let message_id = message.id();

            let reply = engine.select_language(chat_id, data).await;

            // Подтверждение замещает сообщение с клавиатурой.
            bot.edit_message_text(chat_id, message_id, reply.text)
                .parse_mode(ParseMode::MarkdownV2)
                .await?;
        }

        // Отвечаем на колбэк, чтобы убрать индикатор загрузки
        bot.answer_callback_query(q.id).await?;
    }

    Ok(())
}
