use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("script configuration error: {0}")]
    Config(String),
}

pub type ScriptResult<T> = Result<T, ScriptError>;
