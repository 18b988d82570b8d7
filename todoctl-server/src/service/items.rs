use sqlx::PgPool;

use super::ServiceResult;
use crate::db::{ItemRepo, ListRepo};
use crate::models::{CreateItemInput, TodoItem, UpdateItemInput};

pub struct ItemService<'a> {
    repo: ItemRepo<'a>,
    lists: ListRepo<'a>,
}

impl<'a> ItemService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self {
            repo: ItemRepo::new(pool),
            lists: ListRepo::new(pool),
        }
    }

    /// Create an item in `list_id`. A list `user_id` does not own is the
    /// list's NotFound.
    pub async fn create(
        &self,
        user_id: i32,
        list_id: i32,
        input: CreateItemInput,
    ) -> ServiceResult<i32> {
        let item = input.validate()?;
        Ok(self.repo.create(user_id, list_id, &item).await?)
    }

    /// Items of a list. A list the user does not own is NotFound rather than
    /// an empty result.
    pub async fn list_all(&self, user_id: i32, list_id: i32) -> ServiceResult<Vec<TodoItem>> {
        self.lists.get(user_id, list_id).await?;
        Ok(self.repo.list_all(user_id, list_id).await?)
    }

    pub async fn get(&self, user_id: i32, item_id: i32) -> ServiceResult<TodoItem> {
        Ok(self.repo.get(user_id, item_id).await?)
    }

    pub async fn delete(&self, user_id: i32, item_id: i32) -> ServiceResult<()> {
        Ok(self.repo.delete(user_id, item_id).await?)
    }

    pub async fn update(
        &self,
        user_id: i32,
        item_id: i32,
        input: UpdateItemInput,
    ) -> ServiceResult<()> {
        let patch = input.validate()?;
        Ok(self.repo.update(user_id, item_id, &patch).await?)
    }
}
