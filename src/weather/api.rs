use serde::Deserialize;

// Ответы OpenWeather разбираются в усечённые структуры: поля, которых нет
// в этих структурах, просто игнорируются. Отсутствие обязательного поля в
// теле 2xx даёт ошибку декодирования, её обрабатывает клиент.

/// Ответ `/data/2.5/weather`.
#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub sys: SysSection,
    pub weather: Vec<WeatherItem>,
    pub main: MainSection,
    pub wind: WindSection,
}

#[derive(Debug, Deserialize)]
pub struct SysSection {
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct WeatherItem {
    pub id: u32,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct MainSection {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub struct WindSection {
    pub speed: f64,
}

/// Ответ `/data/2.5/forecast` (пятидневный прогноз шагом три часа).
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub city: CitySection,
    pub list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
pub struct CitySection {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastItem {
    pub dt_txt: String,
    pub main: MainSection,
    pub weather: Vec<WeatherItem>,
}

/// Элемент ответа `/geo/1.0/reverse`.
#[derive(Debug, Deserialize)]
pub struct GeoPlace {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_current_response_ignoring_extras() {
        let body = r#"{
            "coord": {"lon": 37.62, "lat": 55.75},
            "name": "Москва",
            "sys": {"type": 2, "country": "RU", "sunrise": 1},
            "weather": [{"id": 800, "main": "Clear", "description": "ясно", "icon": "01d"}],
            "main": {"temp": 21.4, "feels_like": 20.8, "pressure": 1015, "humidity": 48},
            "wind": {"speed": 3.2, "deg": 200},
            "cod": 200
        }"#;
        let parsed: CurrentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.name, "Москва");
        assert_eq!(parsed.sys.country, "RU");
        assert_eq!(parsed.weather[0].id, 800);
        assert_eq!(parsed.main.humidity, 48);
        assert_eq!(parsed.wind.speed, 3.2);
    }

    #[test]
    fn missing_required_field_is_an_error() {
        // Нет блока wind.
        let body = r#"{
            "name": "Москва",
            "sys": {"country": "RU"},
            "weather": [{"id": 800, "description": "ясно"}],
            "main": {"temp": 21.4, "feels_like": 20.8, "humidity": 48}
        }"#;
        assert!(serde_json::from_str::<CurrentResponse>(body).is_err());
    }

    #[test]
    fn decodes_forecast_and_geo_responses() {
        let forecast = r#"{
            "cod": "200",
            "city": {"id": 524901, "name": "Москва", "country": "RU"},
            "list": [{
                "dt": 1700000000,
                "dt_txt": "2026-08-25 12:00:00",
                "main": {"temp": 18.0, "feels_like": 17.1, "humidity": 60},
                "weather": [{"id": 500, "description": "небольшой дождь"}]
            }]
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(forecast).unwrap();
        assert_eq!(parsed.city.name, "Москва");
        assert_eq!(parsed.list.len(), 1);
        assert_eq!(parsed.list[0].dt_txt, "2026-08-25 12:00:00");

        let geo = r#"[{"name": "Зеленоград", "lat": 55.98, "lon": 37.18, "country": "RU"}]"#;
        let places: Vec<GeoPlace> = serde_json::from_str(geo).unwrap();
        assert_eq!(places[0].name, "Зеленоград");
    }
}
