use crate::models::{DialogState, Language};

/// Настройки и состояние диалога одного пользователя.
///
/// Создается лениво: отсутствие записи в хранилище равносильно сессии
/// по умолчанию (русский язык, `Idle`).
#[derive(Debug, Clone, Default)]
pub struct UserSession {
    pub language: Language,
    pub dialog_state: DialogState,
}
