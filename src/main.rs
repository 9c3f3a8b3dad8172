use teloxide::{prelude::*, utils::command::BotCommands};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

mod dialog;
mod forecast;
mod format;
mod handlers;
mod locale;
mod models;
mod session;
mod weather;

use crate::dialog::ConversationEngine;
use crate::locale::LocaleStore;
use crate::models::BotConfig;
use crate::session::SessionStore;
use crate::weather::WeatherClient;
use crate::handlers::{command_handler, message_handler, callback_handler};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
enum Command {
    #[command(description = "начать работу с ботом")]
    Start,
    #[command(description = "показать помощь")]
    Help,
    #[command(description = "текущая погода по городу")]
    Weather,
    #[command(description = "прогноз погоды на несколько дней")]
    Forecast,
    #[command(description = "погода по геолокации")]
    Location,
    #[command(description = "выбрать язык")]
    SetLanguage,
    #[command(description = "о боте")]
    About,
    #[command(description = "отменить текущее действие")]
    Cancel,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Загружаем .env и инициализируем логирование
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting weather bot...");

    let api_key = env::var("OPENWEATHER_API_KEY")
        .expect("OPENWEATHER_API_KEY must be set");
    let languages_dir =
        PathBuf::from(env::var("LANGUAGES_PATH").unwrap_or_else(|_| "languages".to_string()));
    let images_dir =
        PathBuf::from(env::var("IMAGES_PATH").unwrap_or_else(|_| "images".to_string()));

    // Таблицы сообщений и клиент погоды собираются один раз на старте
    let locales = Arc::new(LocaleStore::load(&languages_dir));
    let provider = Arc::new(WeatherClient::new(api_key)?);
    let engine = ConversationEngine::new(SessionStore::new(), locales, provider);
    let config = BotConfig { images_dir };
    log::info!("✅ Locale tables and weather client ready");

    let bot = Bot::from_env();

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler)
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine, config])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
