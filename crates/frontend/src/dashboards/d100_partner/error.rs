use thiserror::Error;

/// Ошибки операций дашборда. Сообщение показывается пользователю как есть,
/// состояние формы при этом сохраняется.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// Не заполнено обязательное поле или ввод не прошёл проверку
    #[error("{0}")]
    Validation(String),

    /// Несоответствие формату (email, номер карты)
    #[error("{0}")]
    Format(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Limit(String),

    /// Слишком короткий пароль
    #[error("{0}")]
    Weakness(String),

    /// Ошибка внешнего сервиса (авторизация, хранилище), текст передаётся без изменений
    #[error("{0}")]
    Adapter(String),

    #[error("Некорректная дата: {0}")]
    Parse(String),

    /// Коллекции владельца ещё не загружены, изменять их нельзя
    #[error("Данные ещё не загружены. Повторите попытку позже.")]
    NotLoaded,
}

impl DashboardError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn adapter(message: impl Into<String>) -> Self {
        Self::Adapter(message.into())
    }
}
