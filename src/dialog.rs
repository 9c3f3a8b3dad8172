use std::sync::Arc;

use teloxide::types::ChatId;

use crate::forecast;
use crate::format;
use crate::locale::LocaleStore;
use crate::models::{DialogState, Language};
use crate::session::SessionStore;
use crate::weather::{WeatherError, WeatherProvider};

/// Готовый ответ движка.
///
/// Текст уже экранирован для MarkdownV2; `image` задаёт картинку-обложку,
/// если ответ стоит отправить фотографией с подписью.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub image: Option<&'static str>,
}

impl Reply {
    fn text_only(text: String) -> Self {
        Reply { text, image: None }
    }
}

/// Движок диалога: конечный автомат, сессии и источник погоды.
///
/// О транспорте не знает: хендлеры передают сюда содержимое апдейтов и
/// отправляют готовые `Reply`. За счёт трейта провайдера каждый переход
/// проверяется в тестах без сети и без Telegram.
#[derive(Clone)]
pub struct ConversationEngine {
    sessions: SessionStore,
    locales: Arc<LocaleStore>,
    provider: Arc<dyn WeatherProvider>,
}

impl ConversationEngine {
    pub fn new(
        sessions: SessionStore,
        locales: Arc<LocaleStore>,
        provider: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            sessions,
            locales,
            provider,
        }
    }

    /// Текущий шаг диалога; хендлеры по нему решают, показывать ли
    /// индикатор набора перед медленным ответом.
    pub async fn dialog_state(&self, chat_id: ChatId) -> DialogState {
        self.sessions.get(chat_id).await.dialog_state
    }

    /// /start: приветствие по имени. Активный сценарий не трогает.
    pub async fn start(&self, chat_id: ChatId, first_name: &str) -> Reply {
        let lang = self.sessions.get(chat_id).await.language;
        self.message(lang, "welcome", &[("name", first_name)])
    }

    /// /help
    pub async fn help(&self, chat_id: ChatId) -> Reply {
        let lang = self.sessions.get(chat_id).await.language;
        self.message(lang, "help", &[])
    }

    /// /about
    pub async fn about(&self, chat_id: ChatId) -> Reply {
        let lang = self.sessions.get(chat_id).await.language;
        self.message(lang, "about", &[])
    }

    /// /setlanguage: текст к клавиатуре выбора языка.
    pub async fn choose_language(&self, chat_id: ChatId) -> Reply {
        let lang = self.sessions.get(chat_id).await.language;
        self.message(lang, "choose_language", &[])
    }

    /// Нажатие кнопки выбора языка.
    ///
    /// Код принимается, только если язык известен и его файл загрузился;
    /// подтверждение приходит уже на новом языке.
    pub async fn select_language(&self, chat_id: ChatId, code: &str) -> Reply {
        match Language::from_code(code) {
            Some(lang) if self.locales.has_language(lang) => {
                self.sessions.set_language(chat_id, lang).await;
                log::info!("🌐 Chat {} switched language to {}", chat_id, lang.code());
                self.message(lang, "set_language_success", &[("language", lang.native_name())])
            }
            _ => {
                let current = self.sessions.get(chat_id).await.language;
                self.message(current, "invalid_language", &[])
            }
        }
    }

    /// /weather: запрос города. Начатый ранее сценарий замещается.
    pub async fn request_city_for_weather(&self, chat_id: ChatId) -> Reply {
        let lang = self.sessions.get(chat_id).await.language;
        self.sessions
            .set_dialog_state(chat_id, DialogState::AwaitingCityForWeather)
            .await;
        self.message(lang, "please_enter_city", &[])
    }

    /// /forecast: запрос города. Начатый ранее сценарий замещается.
    pub async fn request_city_for_forecast(&self, chat_id: ChatId) -> Reply {
        let lang = self.sessions.get(chat_id).await.language;
        self.sessions
            .set_dialog_state(chat_id, DialogState::AwaitingCityForForecast)
            .await;
        self.message(lang, "please_enter_city", &[])
    }

    /// /location: запрос геолокации.
    pub async fn request_location(&self, chat_id: ChatId) -> Reply {
        let lang = self.sessions.get(chat_id).await.language;
        self.sessions
            .set_dialog_state(chat_id, DialogState::AwaitingLocation)
            .await;
        self.message(lang, "send_location", &[])
    }

    /// /cancel: отвечает одинаково и внутри сценария, и без него.
    pub async fn cancel(&self, chat_id: ChatId) -> Reply {
        let lang = self.sessions.get(chat_id).await.language;
        self.sessions.set_dialog_state(chat_id, DialogState::Idle).await;
        self.message(lang, "cancel", &[])
    }

    /// Команда, которой бот не знает.
    pub async fn unknown_command(&self, chat_id: ChatId) -> Reply {
        let lang = self.sessions.get(chat_id).await.language;
        self.message(lang, "invalid_command", &[])
    }

    /// Свободный текст. Вне сценария игнорируется, поэтому `Option`.
    pub async fn free_text(&self, chat_id: ChatId, text: &str) -> Option<Reply> {
        let session = self.sessions.get(chat_id).await;
        match session.dialog_state {
            DialogState::Idle => None,
            DialogState::AwaitingCityForWeather => {
                self.sessions.set_dialog_state(chat_id, DialogState::Idle).await;
                let city = text.trim();
                if !is_valid_city_name(city) {
                    return Some(self.message(session.language, "invalid_city", &[]));
                }
                log::info!("🌤 Chat {} asked current weather for '{}'", chat_id, city);
                Some(self.current_weather_reply(session.language, city).await)
            }
            DialogState::AwaitingCityForForecast => {
                self.sessions.set_dialog_state(chat_id, DialogState::Idle).await;
                let city = text.trim();
                if !is_valid_city_name(city) {
                    return Some(self.message(session.language, "invalid_city", &[]));
                }
                log::info!("📅 Chat {} asked a forecast for '{}'", chat_id, city);
                Some(self.forecast_reply(session.language, city).await)
            }
            DialogState::AwaitingLocation => {
                self.sessions.set_dialog_state(chat_id, DialogState::Idle).await;
                Some(self.message(session.language, "invalid_location", &[]))
            }
        }
    }

    /// Геолокация. Обрабатывается только внутри сценария /location.
    pub async fn location(&self, chat_id: ChatId, lat: f64, lon: f64) -> Option<Reply> {
        let session = self.sessions.get(chat_id).await;
        if session.dialog_state != DialogState::AwaitingLocation {
            return None;
        }
        self.sessions.set_dialog_state(chat_id, DialogState::Idle).await;
        let lang = session.language;
        log::info!("📍 Chat {} sent a location ({}, {})", chat_id, lat, lon);

        let reply = match self.provider.locate(lat, lon).await {
            Ok(Some(city)) => self.current_weather_reply(lang, &city).await,
            Ok(None) => {
                let unknown = self.locales.resolve(lang, "unknown_city");
                self.message(lang, "weather_not_found", &[("city", &unknown)])
            }
            Err(e) => {
                let unknown = self.locales.resolve(lang, "unknown_city");
                self.provider_error_reply(lang, &e, "weather_not_found", &unknown)
            }
        };
        Some(reply)
    }

    async fn current_weather_reply(&self, lang: Language, city: &str) -> Reply {
        match self.provider.current(city, lang.code()).await {
            Ok(report) => {
                let (text, image) = format::format_current(&report, lang, &self.locales);
                Reply {
                    text,
                    image: Some(image),
                }
            }
            Err(e) => self.provider_error_reply(lang, &e, "weather_not_found", city),
        }
    }

    async fn forecast_reply(&self, lang: Language, city: &str) -> Reply {
        match self.provider.forecast(city, lang.code()).await {
            Ok(report) => {
                let summaries = forecast::aggregate(&report.entries);
                Reply::text_only(format::format_forecast(
                    &report.city,
                    &report.country,
                    &summaries,
                    lang,
                    &self.locales,
                ))
            }
            Err(e) => self.provider_error_reply(lang, &e, "forecast_not_found", city),
        }
    }

    fn provider_error_reply(
        &self,
        lang: Language,
        error: &WeatherError,
        not_found_key: &str,
        city: &str,
    ) -> Reply {
        match error {
            WeatherError::NotFound => self.message(lang, not_found_key, &[("city", city)]),
            WeatherError::Unavailable(_) => {
                log::error!("❌ Weather provider request failed: {}", error);
                self.message(lang, "api_error", &[])
            }
            WeatherError::Malformed(_) => {
                log::error!("❌ Weather payload could not be processed: {}", error);
                self.message(lang, "processing_error", &[])
            }
        }
    }

    fn message(&self, lang: Language, key: &str, args: &[(&str, &str)]) -> Reply {
        Reply::text_only(format::escape_markdown_v2(
            &self.locales.resolve_with(lang, key, args),
        ))
    }
}

/// Проверка названия города: токены из латиницы, кириллицы (включая Ё/ё)
/// и дефиса, каждый от двух символов, разделённые одиночными пробелами.
fn is_valid_city_name(city: &str) -> bool {
    if city.is_empty()
        || city.starts_with(char::is_whitespace)
        || city.ends_with(char::is_whitespace)
    {
        return false;
    }

    let mut prev_ws = false;
    for ch in city.chars() {
        if ch.is_whitespace() {
            if prev_ws {
                return false;
            }
            prev_ws = true;
            continue;
        }
        prev_ws = false;
        let allowed = ch.is_ascii_alphabetic()
            || ('А'..='я').contains(&ch)
            || ch == 'Ё'
            || ch == 'ё'
            || ch == '-';
        if !allowed {
            return false;
        }
    }

    city.split_whitespace().all(|token| token.chars().count() >= 2)
}
