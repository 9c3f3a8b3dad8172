use crate::forecast::ForecastSummary;
use crate::locale::LocaleStore;
use crate::models::{Language, WeatherReport};
use crate::weather::classify::Condition;

/// Экранирование MarkdownV2
pub fn escape_markdown_v2(text: &str) -> String {
    let specials = ['_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!'];
    let mut out = String::with_capacity(text.len() * 2);

    for ch in text.chars() {
        if specials.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Число с одним знаком после запятой, экранированное для MarkdownV2
pub fn format_float(value: f64) -> String {
    let formatted = format!("{:.1}", value);
    escape_markdown_v2(&formatted)
}

/// Первая буква заглавная; описания от провайдера приходят строчными
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Собирает ответ с текущей погодой: текст в MarkdownV2 и имя картинки.
pub fn format_current(
    report: &WeatherReport,
    lang: Language,
    locales: &LocaleStore,
) -> (String, &'static str) {
    let condition = Condition::from_code(report.condition_code);
    let place = format!("{}, {}", report.city, report.country);
    let header = locales.resolve_with(lang, "weather_header", &[("city", &place)]);

    let text = format!(
        "{} *{}*\n\
         • 🌡️ *{}:* {}°C \\({} {}°C\\)\n\
         • 💧 *{}:* {}%\n\
         • 💨 *{}:* {} {}\n\
         • 🌥️ *{}:* {}",
        condition.emoji(),
        escape_markdown_v2(&header),
        escape_markdown_v2(&locales.resolve(lang, "temperature_label")),
        format_float(report.temp),
        escape_markdown_v2(&locales.resolve(lang, "feels_like_label")),
        format_float(report.feels_like),
        escape_markdown_v2(&locales.resolve(lang, "humidity_label")),
        report.humidity_pct,
        escape_markdown_v2(&locales.resolve(lang, "wind_label")),
        format_float(report.wind_speed),
        escape_markdown_v2(&locales.resolve(lang, "wind_unit")),
        escape_markdown_v2(&locales.resolve(lang, "description_label")),
        escape_markdown_v2(&capitalize(&report.description)),
    );

    (text, condition.image_key())
}

/// Собирает текст прогноза по суткам в MarkdownV2.
pub fn format_forecast(
    city: &str,
    country: &str,
    days: &[ForecastSummary],
    lang: Language,
    locales: &LocaleStore,
) -> String {
    let place = format!("{}, {}", city, country);
    let header = locales.resolve_with(lang, "forecast_header", &[("city", &place)]);
    let mut text = format!("📅 *{}*\n\n", escape_markdown_v2(&header));

    for day in days {
        let condition = Condition::from_code(day.dominant_condition_code);
        text.push_str(&format!(
            "*{}:* {} {}\n",
            escape_markdown_v2(&day.day.to_string()),
            condition.emoji(),
            escape_markdown_v2(&capitalize(&day.dominant_description)),
        ));
        text.push_str(&format!(
            "• 🌡️ *{}:* {}°C \\- {}°C\n\n",
            escape_markdown_v2(&locales.resolve(lang, "temperature_label")),
            format_float(day.temp_min),
            format_float(day.temp_max),
        ));
    }

    text
}
