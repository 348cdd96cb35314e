use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown vessel: {0}")]
    UnknownVessel(String),

    #[error("Unknown hull: {0}")]
    UnknownHull(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Unknown character: {0}")]
    UnknownCharacter(String),

    #[error("Scenario parse error: {0}")]
    ScenarioParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
