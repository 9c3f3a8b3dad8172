use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::models::Language;

/// Возвращается, когда ключа нет ни в запрошенном языке, ни в русском.
const FALLBACK_MESSAGE: &str = "Sorry, this message is unavailable right now.";

/// Таблицы локализованных сообщений: язык -> ключ -> шаблон.
///
/// Разрешение ключа никогда не падает: запрошенный язык -> русская
/// таблица -> фиксированная английская строка.
pub struct LocaleStore {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl LocaleStore {
    /// Загружает `<dir>/<код>.json` для каждого поддерживаемого языка.
    ///
    /// Отсутствующий или битый файл логируется, и язык просто выпадает из
    /// набора: его запросы уйдут в русскую таблицу.
    pub fn load(dir: &Path) -> Self {
        let mut tables = HashMap::new();
        for lang in Language::ALL {
            let path = dir.join(format!("{}.json", lang.code()));
            match fs::read_to_string(&path) {
                Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                    Ok(table) => {
                        tables.insert(lang, table);
                    }
                    Err(e) => {
                        log::error!("Language file {} is not valid JSON: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    log::error!("Language file {} is missing: {}", path.display(), e);
                }
            }
        }
        LocaleStore { tables }
    }

    /// Текст по ключу с фолбэком.
    pub fn resolve(&self, lang: Language, key: &str) -> String {
        self.lookup(lang, key).unwrap_or(FALLBACK_MESSAGE).to_string()
    }

    /// То же, с подстановкой `{name}`-плейсхолдеров.
    ///
    /// Подставляются только переданные пары; незнакомые токены остаются в
    /// тексте как есть, чтобы расхождение шаблона не роняло ответ.
    pub fn resolve_with(&self, lang: Language, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.resolve(lang, key);
        for (name, value) in args {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }

    /// Язык считается доступным, если его файл загрузился.
    pub fn has_language(&self, lang: Language) -> bool {
        self.tables.contains_key(&lang)
    }

    fn lookup(&self, lang: Language, key: &str) -> Option<&str> {
        self.tables
            .get(&lang)
            .and_then(|t| t.get(key))
            .or_else(|| self.tables.get(&Language::Ru).and_then(|t| t.get(key)))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn store_with(entries: &[(Language, &[(&str, &str)])]) -> LocaleStore {
        let mut tables = HashMap::new();
        for (lang, pairs) in entries {
            let table = pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            tables.insert(*lang, table);
        }
        LocaleStore { tables }
    }

    #[test]
    fn resolves_in_requested_language() {
        let store = store_with(&[
            (Language::Ru, &[("cancel", "Действие отменено.")]),
            (Language::En, &[("cancel", "Action cancelled.")]),
        ]);
        assert_eq!(store.resolve(Language::En, "cancel"), "Action cancelled.");
    }

    #[test]
    fn missing_key_falls_back_to_russian() {
        let store = store_with(&[
            (Language::Ru, &[("cancel", "Действие отменено.")]),
            (Language::En, &[]),
        ]);
        assert_eq!(store.resolve(Language::En, "cancel"), "Действие отменено.");
    }

    #[test]
    fn missing_everywhere_yields_fixed_literal() {
        let store = store_with(&[(Language::Ru, &[])]);
        assert_eq!(store.resolve(Language::Es, "no_such_key"), FALLBACK_MESSAGE);

        let empty = store_with(&[]);
        assert_eq!(empty.resolve(Language::Ru, "cancel"), FALLBACK_MESSAGE);
    }

    #[test]
    fn placeholders_are_substituted() {
        let store = store_with(&[(Language::Ru, &[("welcome", "Привет, {name}!")])]);
        assert_eq!(
            store.resolve_with(Language::Ru, "welcome", &[("name", "Олег")]),
            "Привет, Олег!"
        );
    }

    #[test]
    fn unknown_placeholders_stay_verbatim() {
        let store = store_with(&[(Language::Ru, &[("welcome", "Привет, {name} {surname}!")])]);
        assert_eq!(
            store.resolve_with(Language::Ru, "welcome", &[("name", "Олег")]),
            "Привет, Олег {surname}!"
        );
    }

    #[test]
    fn shipped_language_files_parse_and_cover_keys() {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("languages");
        let store = LocaleStore::load(&dir);

        let required = [
            "welcome",
            "help",
            "about",
            "choose_language",
            "set_language_success",
            "invalid_language",
            "please_enter_city",
            "send_location",
            "invalid_city",
            "invalid_location",
            "weather_not_found",
            "forecast_not_found",
            "api_error",
            "processing_error",
            "invalid_command",
            "cancel",
            "unknown_city",
            "weather_header",
            "forecast_header",
            "temperature_label",
            "feels_like_label",
            "humidity_label",
            "wind_label",
            "wind_unit",
            "description_label",
        ];
        for lang in Language::ALL {
            assert!(store.has_language(lang), "{} table missing", lang.code());
            for key in required {
                assert!(
                    store.tables[&lang].contains_key(key),
                    "{}.json lacks key {}",
                    lang.code(),
                    key
                );
            }
        }
    }
}
