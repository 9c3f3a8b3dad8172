use std::path::PathBuf;

/// Пути к ресурсам бота; передается обработчикам через dptree.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Каталог с картинками погоды (`thunderstorm.png`, `rain.png`, ...).
    pub images_dir: PathBuf,
}
