pub mod api;
pub mod classify;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::{ForecastEntry, ForecastReport, WeatherReport};
use crate::weather::api::{CurrentResponse, ForecastResponse, GeoPlace};

const BASE_URL: &str = "https://api.openweathermap.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ошибки обращения к погодному сервису.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Сеть, таймаут или не-2xx статус, кроме 404.
    #[error("weather service unavailable: {0}")]
    Unavailable(String),
    /// Место не найдено (HTTP 404).
    #[error("place not found")]
    NotFound,
    /// Успешный ответ, который не удалось разобрать.
    #[error("malformed weather response: {0}")]
    Malformed(String),
}

/// Источник погодных данных для движка диалога.
///
/// Единственная боевая реализация ходит в OpenWeather; тесты подставляют
/// заглушку и проверяют диалог без сети.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Текущая погода по названию города.
    async fn current(&self, city: &str, lang: &str) -> Result<WeatherReport, WeatherError>;

    /// Прогноз на пять суток шагом в три часа.
    async fn forecast(&self, city: &str, lang: &str) -> Result<ForecastReport, WeatherError>;

    /// Ближайший населённый пункт по координатам, `None` если рядом ничего нет.
    async fn locate(&self, lat: f64, lon: f64) -> Result<Option<String>, WeatherError>;
}

/// Клиент OpenWeather.
pub struct WeatherClient {
    http: reqwest::Client,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(WeatherClient { http, api_key })
    }

    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<String, WeatherError> {
        let response = self
            .http
            .get(format!("{}{}", BASE_URL, path))
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound);
        }
        if !status.is_success() {
            return Err(WeatherError::Unavailable(format!("HTTP {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current(&self, city: &str, lang: &str) -> Result<WeatherReport, WeatherError> {
        let body = self
            .fetch(
                "/data/2.5/weather",
                &[("q", city), ("units", "metric"), ("lang", lang)],
            )
            .await?;
        parse_current(&body)
    }

    async fn forecast(&self, city: &str, lang: &str) -> Result<ForecastReport, WeatherError> {
        let body = self
            .fetch(
                "/data/2.5/forecast",
                &[("q", city), ("units", "metric"), ("lang", lang)],
            )
            .await?;
        parse_forecast(&body)
    }

    async fn locate(&self, lat: f64, lon: f64) -> Result<Option<String>, WeatherError> {
        let (lat, lon) = (lat.to_string(), lon.to_string());
        let body = self
            .fetch(
                "/geo/1.0/reverse",
                &[("lat", lat.as_str()), ("lon", lon.as_str()), ("limit", "1")],
            )
            .await?;
        parse_place(&body)
    }
}

fn parse_current(body: &str) -> Result<WeatherReport, WeatherError> {
    let data: CurrentResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Malformed(e.to_string()))?;
    let item = data
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Malformed("empty weather list".to_string()))?;

    Ok(WeatherReport {
        city: data.name,
        country: data.sys.country,
        description: item.description,
        temp: data.main.temp,
        feels_like: data.main.feels_like,
        humidity_pct: data.main.humidity,
        wind_speed: data.wind.speed,
        condition_code: item.id,
    })
}

fn parse_forecast(body: &str) -> Result<ForecastReport, WeatherError> {
    let data: ForecastResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Malformed(e.to_string()))?;

    let mut entries = Vec::with_capacity(data.list.len());
    for item in data.list {
        let timestamp = NaiveDateTime::parse_from_str(&item.dt_txt, DT_FORMAT)
            .map_err(|e| WeatherError::Malformed(format!("bad dt_txt {:?}: {}", item.dt_txt, e)))?;
        let weather = item
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Malformed("empty weather list".to_string()))?;
        entries.push(ForecastEntry {
            timestamp,
            temp: item.main.temp,
            description: weather.description,
            condition_code: weather.id,
        });
    }

    Ok(ForecastReport {
        city: data.city.name,
        country: data.city.country,
        entries,
    })
}

fn parse_place(body: &str) -> Result<Option<String>, WeatherError> {
    let places: Vec<GeoPlace> =
        serde_json::from_str(body).map_err(|e| WeatherError::Malformed(e.to_string()))?;
    Ok(places.into_iter().next().map(|p| p.name))
}
