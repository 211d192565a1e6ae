use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const MAX_TITLE_CHARS: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<i32>,
    pub watched: bool,
    pub created_at: Timestamp,
}

impl Movie {
    /// Builds a fresh record from an already validated title.
    pub fn new(id: u64, title: String, payload: MoviePayload) -> Self {
        Self {
            id,
            title,
            description: payload.description,
            director: payload.director,
            year: payload.year,
            rating: payload.rating,
            watched: payload.watched,
            created_at: Timestamp::now(),
        }
    }

    /// Replaces every client-writable field; `id` and `created_at` stay put.
    pub fn apply(&mut self, title: String, payload: MoviePayload) {
        self.title = title;
        self.description = payload.description;
        self.director = payload.director;
        self.year = payload.year;
        self.rating = payload.rating;
        self.watched = payload.watched;
    }
}

/// Write-side body for create and replace. Unknown keys such as `id` or
/// `createdAt` are dropped by serde.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<i32>,
    #[serde(default)]
    pub watched: bool,
}

impl MoviePayload {
    /// Takes the title out of the payload once it passes validation.
    pub fn take_title(&mut self) -> AppResult<String> {
        let title = self.title.take();
        validate_title(title.as_deref())?;
        Ok(title.unwrap_or_default())
    }
}

/// First `title` (or legacy `Title`) value in the query string, if any.
pub fn search_title(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == "title" || key == "Title")
        .map(|(_, value)| value.as_str())
}

pub fn validate_title(title: Option<&str>) -> AppResult<()> {
    let Some(title) = title else {
        return Err(AppError::Validation("title is required".to_string()));
    };
    if title.trim().is_empty() {
        return Err(AppError::Validation("title must not be blank".to_string()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::Validation(format!(
            "title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}
