/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// The requested entity (user, film) does not exist
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// A collaborator store failed to produce data
    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl AppError {
    /// Error for a user id that failed the identity check
    pub fn unknown_user(user_id: crate::models::UserId) -> Self {
        AppError::UnknownEntity(format!("user with id = {} not found", user_id))
    }

    /// Error for a film id the catalog cannot resolve
    pub fn unknown_film(film_id: crate::models::FilmId) -> Self {
        AppError::UnknownEntity(format!("film with id = {} not found", film_id))
    }
}

pub type AppResult<T> = Result<T, AppError>;
