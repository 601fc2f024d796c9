use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Render error: {0}")]
    Render(#[from] cairo::Error),
}
