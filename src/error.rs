/// Client-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    ExternalApi(String),

    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short reason suitable for the user-facing notification detail.
    ///
    /// Transport and parse failures collapse into the same generic notification,
    /// so the detail is the only place the cause shows up.
    pub fn detail(&self) -> Option<String> {
        match self {
            AppError::ExternalApi(msg) | AppError::MalformedResponse(msg) => Some(msg.clone()),
            AppError::HttpClient(e) if e.is_connect() => {
                Some("could not connect to the recommendation backend".to_string())
            }
            AppError::HttpClient(_) => None,
            AppError::InvalidInput(msg) => Some(msg.clone()),
            AppError::Config(_) | AppError::Io(_) | AppError::Internal(_) => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
