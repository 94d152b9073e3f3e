use crate::config::ConfigError;
use crate::oracle::OracleError;

#[derive(Debug, thiserror::Error)]
pub enum SafeCareError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),
}

pub type SafeCareResult<T> = std::result::Result<T, SafeCareError>;
