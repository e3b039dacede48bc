use thiserror::Error;

/// Ошибки одного опроса. Обе восстановимые: цикл опроса продолжается,
/// текущий снимок остаётся на экране.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Нет соединения, таймаут или не-2xx ответ.
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    /// Тело не является массивом мест (нет поля, не тот тип, битый JSON).
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Parse(_) => "parse",
        }
    }
}
