use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Request to the directory failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Directory page did not match the expected layout: {0}")]
    UnexpectedLayout(String),

    #[error("The email reveal response did not contain an address")]
    EmailUnresolved,

    #[error("Search string must not be empty")]
    EmptyQuery,

    #[error("Unknown search kind '{0}' (expected email, displayname or telephonenumber)")]
    InvalidSearchKind(String),

    #[error("Failed to parse HTML: {0}")]
    ParsingError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
