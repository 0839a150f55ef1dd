use howler_dom::PageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("page error: {0}")]
    Page(#[from] PageError),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
