/// Группа погодных условий по коду OpenWeather.
///
/// Коды сгруппированы сотнями: 2xx гроза, 3xx морось, 5xx дождь, 6xx снег,
/// 7xx атмосферные явления, 800 ясно, 801+ облака. Всё остальное, включая
/// незанятый диапазон 4xx, уходит в `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    Unknown,
}

impl Condition {
    pub fn from_code(code: u32) -> Self {
        match code {
            200..=299 => Condition::Thunderstorm,
            300..=399 => Condition::Drizzle,
            500..=599 => Condition::Rain,
            600..=699 => Condition::Snow,
            700..=799 => Condition::Atmosphere,
            800 => Condition::Clear,
            801..=899 => Condition::Clouds,
            _ => Condition::Unknown,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Condition::Thunderstorm => "⛈️",
            Condition::Drizzle => "🌦️",
            Condition::Rain => "🌧️",
            Condition::Snow => "❄️",
            Condition::Atmosphere => "🌫️",
            Condition::Clear => "☀️",
            Condition::Clouds => "☁️",
            Condition::Unknown => "🌈",
        }
    }

    /// Имя картинки-обложки для ответа с текущей погодой.
    pub fn image_key(self) -> &'static str {
        match self {
            Condition::Thunderstorm => "thunderstorm",
            Condition::Drizzle => "drizzle",
            Condition::Rain => "rain",
            Condition::Snow => "snow",
            Condition::Atmosphere => "mist",
            Condition::Clear => "clear",
            Condition::Clouds => "clouds",
            Condition::Unknown => "default",
        }
    }
}
