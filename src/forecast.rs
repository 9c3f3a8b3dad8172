use chrono::NaiveDate;

use crate::models::ForecastEntry;

/// Сводка прогноза за одни календарные сутки.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    pub day: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub dominant_description: String,
    pub dominant_condition_code: u32,
}

/// Сворачивает трёхчасовые записи в посуточные сводки.
///
/// Сутки идут в порядке первого появления в ленте провайдера, без
/// пересортировки. Температуры берутся как минимум и максимум по записям
/// суток; описание и код условия считаются независимо друг от друга,
/// каждое как самое частое значение своей колонки, при равенстве частот
/// побеждает встретившееся раньше.
pub fn aggregate(entries: &[ForecastEntry]) -> Vec<ForecastSummary> {
    let mut groups: Vec<(NaiveDate, Vec<&ForecastEntry>)> = Vec::new();
    for entry in entries {
        let day = entry.calendar_day();
        match groups.iter_mut().find(|(d, _)| *d == day) {
            Some((_, bucket)) => bucket.push(entry),
            None => groups.push((day, vec![entry])),
        }
    }

    groups
        .into_iter()
        .filter_map(|(day, bucket)| summarize(day, &bucket))
        .collect()
}

fn summarize(day: NaiveDate, bucket: &[&ForecastEntry]) -> Option<ForecastSummary> {
    let descriptions: Vec<&str> = bucket.iter().map(|e| e.description.as_str()).collect();
    let codes: Vec<u32> = bucket.iter().map(|e| e.condition_code).collect();
    let dominant_description = stable_mode(&descriptions)?;
    let dominant_condition_code = stable_mode(&codes)?;
    let temp_min = bucket.iter().map(|e| e.temp).fold(f64::INFINITY, f64::min);
    let temp_max = bucket.iter().map(|e| e.temp).fold(f64::NEG_INFINITY, f64::max);

    Some(ForecastSummary {
        day,
        temp_min,
        temp_max,
        dominant_description: dominant_description.to_string(),
        dominant_condition_code,
    })
}

/// Самое частое значение среза; при равной частоте побеждает то, что
/// встретилось раньше.
fn stable_mode<T: PartialEq + Copy>(values: &[T]) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    for candidate in values {
        let count = values.iter().filter(|v| *v == candidate).count();
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((*candidate, count)),
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: u32, hour: u32, temp: f64, description: &str, code: u32) -> ForecastEntry {
        ForecastEntry {
            timestamp: NaiveDate::from_ymd_opt(2026, 8, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            temp,
            description: description.to_string(),
            condition_code: code,
        }
    }

    #[test]
    fn empty_feed_gives_no_summaries() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn days_keep_first_appearance_order() {
        let entries = vec![
            entry(26, 0, 10.0, "ясно", 800),
            entry(25, 12, 15.0, "ясно", 800),
            entry(26, 3, 11.0, "ясно", 800),
        ];
        let summaries = aggregate(&entries);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].day, NaiveDate::from_ymd_opt(2026, 8, 26).unwrap());
        assert_eq!(summaries[1].day, NaiveDate::from_ymd_opt(2026, 8, 25).unwrap());
    }

    #[test]
    fn temperatures_are_min_and_max_of_the_day() {
        let entries = vec![
            entry(25, 6, 10.0, "ясно", 800),
            entry(25, 12, 15.0, "ясно", 800),
            entry(25, 18, 12.0, "ясно", 800),
        ];
        let summaries = aggregate(&entries);
        assert_eq!(summaries[0].temp_min, 10.0);
        assert_eq!(summaries[0].temp_max, 15.0);
    }

    #[test]
    fn most_frequent_description_wins() {
        let entries = vec![
            entry(25, 6, 10.0, "дождь", 500),
            entry(25, 12, 15.0, "ясно", 800),
            entry(25, 18, 12.0, "дождь", 501),
        ];
        let summaries = aggregate(&entries);
        assert_eq!(summaries[0].dominant_description, "дождь");
        // Все коды по разу, побеждает первый из ленты.
        assert_eq!(summaries[0].dominant_condition_code, 500);
    }

    #[test]
    fn condition_code_mode_is_counted_independently() {
        let entries = vec![
            entry(25, 6, 10.0, "дождь", 500),
            entry(25, 12, 15.0, "дождь", 501),
            entry(25, 18, 12.0, "дождь", 501),
        ];
        let summaries = aggregate(&entries);
        assert_eq!(summaries[0].dominant_description, "дождь");
        // Код 501 встречается дважды против одного 500, хотя первая
        // запись с победившим описанием несёт 500.
        assert_eq!(summaries[0].dominant_condition_code, 501);
    }

    #[test]
    fn tie_goes_to_the_earlier_description() {
        let entries = vec![
            entry(25, 6, 10.0, "снег", 600),
            entry(25, 12, 15.0, "ясно", 800),
        ];
        let summaries = aggregate(&entries);
        assert_eq!(summaries[0].dominant_description, "снег");
        assert_eq!(summaries[0].dominant_condition_code, 600);
    }

    #[test]
    fn full_two_day_feed_collapses_into_two_summaries() {
        let mut entries = Vec::new();
        for day in [25, 26] {
            for hour in [0, 3, 6, 9, 12, 15, 18, 21] {
                entries.push(entry(day, hour, 10.0 + f64::from(hour) / 3.0, "ясно", 800));
            }
        }
        let summaries = aggregate(&entries);
        assert_eq!(summaries.len(), 2);
        for summary in summaries {
            assert_eq!(summary.temp_min, 10.0);
            assert_eq!(summary.temp_max, 17.0);
        }
    }
}
