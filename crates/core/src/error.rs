use thiserror::Error;

use crate::model::{AnimalError, ClipError, SettingsError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Animal(#[from] AnimalError),
    #[error(transparent)]
    Clip(#[from] ClipError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
