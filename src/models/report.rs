use chrono::{NaiveDate, NaiveDateTime};

/// Текущая погода в городе. Строится на один запрос и отбрасывается.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub description: String,
    pub temp: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub condition_code: u32,
}

/// Ответ прогноза: город из заголовка ответа и сырые 3-часовые слоты.
#[derive(Debug, Clone)]
pub struct ForecastReport {
    pub city: String,
    pub country: String,
    pub entries: Vec<ForecastEntry>,
}

/// Один 3-часовой слот прогноза, как его отдает провайдер.
#[derive(Debug, Clone)]
pub struct ForecastEntry {
    /// Локальное для города время слота (`dt_txt` провайдера).
    pub timestamp: NaiveDateTime,
    pub temp: f64,
    pub description: String,
    pub condition_code: u32,
}

impl ForecastEntry {
    /// Календарный день слота; время внутри дня отбрасывается.
    pub fn calendar_day(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
