//! Todo item model and request inputs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::title::check_description;
use super::{Title, ValidationError};

/// Todo item record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TodoItem {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub done: bool,
}

/// POST /api/lists/{id}/items body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Validated item to insert. New items start not done.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: Title,
    pub description: String,
}

impl CreateItemInput {
    pub fn validate(self) -> Result<NewItem, ValidationError> {
        let title = Title::new(&self.title)?;
        let description = self.description.unwrap_or_default();
        check_description(&description)?;
        Ok(NewItem { title, description })
    }
}

/// PUT /api/items/{id} body. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
}

/// Validated partial update; at least one field is set.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub title: Option<Title>,
    pub description: Option<String>,
    pub done: Option<bool>,
}

impl UpdateItemInput {
    pub fn validate(self) -> Result<ItemPatch, ValidationError> {
        if self.title.is_none() && self.description.is_none() && self.done.is_none() {
            return Err(ValidationError::NoValues);
        }

        let title = self.title.as_deref().map(Title::new).transpose()?;
        if let Some(description) = &self.description {
            check_description(description)?;
        }

        Ok(ItemPatch {
            title,
            description: self.description,
            done: self.done,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_rejected() {
        let input: UpdateItemInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.validate().unwrap_err(), ValidationError::NoValues);
    }

    #[test]
    fn done_only_update() {
        let input: UpdateItemInput = serde_json::from_str(r#"{"done": true}"#).unwrap();
        let patch = input.validate().unwrap();
        assert_eq!(patch.done, Some(true));
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn item_serializes_done_flag() {
        let item = TodoItem {
            id: 7,
            title: "milk".into(),
            description: String::new(),
            done: false,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["done"], false);
        assert_eq!(json["id"], 7);
    }
}
