pub mod bot_config;
pub mod dialog_state;
pub mod language;
pub mod report;
pub mod session;

pub use bot_config::BotConfig;
pub use dialog_state::DialogState;
pub use language::Language;
pub use report::{ForecastEntry, ForecastReport, WeatherReport};
pub use session::UserSession;
