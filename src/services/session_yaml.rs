use std::io;
use std::path::Path;

use thiserror::Error;

use crate::services::portfolio::Portfolio;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("failed to access session file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse session yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Loads a session, or starts a fresh one when `path` does not exist yet.
pub async fn load_portfolio_from_yaml_file(path: &str) -> Result<Portfolio, SessionError> {
    if !Path::new(path).exists() {
        return Ok(Portfolio::new());
    }
    let contents = tokio::fs::read_to_string(path).await?;
    deserialize_portfolio_from_yaml_str(&contents)
}

pub fn deserialize_portfolio_from_yaml_str(contents: &str) -> Result<Portfolio, SessionError> {
    Ok(serde_yaml::from_str(contents)?)
}

pub async fn save_portfolio_to_yaml_file(
    path: &str,
    portfolio: &Portfolio,
) -> Result<(), SessionError> {
    let yaml = serde_yaml::to_string(portfolio)?;
    tokio::fs::write(path, yaml).await?;
    Ok(())
}
