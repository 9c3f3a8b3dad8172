/// Поддерживаемые языки бота.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Ru,
    En,
    Es,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Ru, Language::En, Language::Es];

    /// Двухбуквенный код: параметр API погоды и имя файла локализации.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// Название языка для кнопок выбора и сообщения об успехе.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Ru => "Русский",
            Language::En => "English",
            Language::Es => "Español",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "ru" => Some(Language::Ru),
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::from_code(""), None);
        assert_eq!(Language::from_code("RU"), None);
    }

    #[test]
    fn default_is_russian() {
        assert_eq!(Language::default(), Language::Ru);
    }
}
