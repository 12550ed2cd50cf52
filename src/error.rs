#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid filter family: '{name}'")]
    InvalidFilterFamily { name: String },

    #[error("Unknown curve name: '{name}'")]
    UnknownCurveName { name: String },

    #[error("Curve '{name}' is predefined and cannot be edited")]
    NotCustom { name: String },

    #[error("Index {index} out of range for a {len}-point curve")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Invalid config: {message}")]
    Config { message: String },
}
