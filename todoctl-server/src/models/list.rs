//! Todo list model and request inputs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::title::check_description;
use super::{Title, ValidationError};

/// Todo list record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TodoList {
    pub id: i32,
    pub title: String,
    pub description: String,
}

/// POST /api/lists body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated list to insert
#[derive(Debug, Clone)]
pub struct NewList {
    pub title: Title,
    pub description: String,
}

impl CreateListInput {
    pub fn validate(self) -> Result<NewList, ValidationError> {
        let title = Title::new(&self.title)?;
        let description = self.description.unwrap_or_default();
        check_description(&description)?;
        Ok(NewList { title, description })
    }
}

/// PUT /api/lists/{id} body. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Validated partial update; at least one field is set.
#[derive(Debug, Clone, Default)]
pub struct ListPatch {
    pub title: Option<Title>,
    pub description: Option<String>,
}

impl UpdateListInput {
    pub fn validate(self) -> Result<ListPatch, ValidationError> {
        if self.title.is_none() && self.description.is_none() {
            return Err(ValidationError::NoValues);
        }

        let title = self.title.as_deref().map(Title::new).transpose()?;
        if let Some(description) = &self.description {
            check_description(description)?;
        }

        Ok(ListPatch {
            title,
            description: self.description,
        })
    }
}
