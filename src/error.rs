use thiserror::Error;

#[derive(Debug, Error)]
pub enum StevioError {
    #[error("unknown category '{name}' (available: {})", available.join(", "))]
    UnknownCategory { name: String, available: Vec<String> },

    #[error("grid size {size} is outside {min}..={max}")]
    GridSizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("words per round {count} is outside {min}..={max}")]
    WordsPerRoundOutOfRange { count: usize, min: usize, max: usize },

    #[error("embedded category table is invalid: {0}")]
    CategoryData(#[from] toml::de::Error),
}
