/// Текущий шаг диалога пользователя.
///
/// У пользователя ровно одно активное состояние; любой активный шаг
/// завершается возвратом в `Idle` после одного ответа.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Idle,
    AwaitingCityForWeather,
    AwaitingCityForForecast,
    AwaitingLocation,
}
