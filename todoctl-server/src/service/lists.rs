use sqlx::PgPool;

use super::ServiceResult;
use crate::db::ListRepo;
use crate::models::{CreateListInput, TodoList, UpdateListInput};

pub struct ListService<'a> {
    repo: ListRepo<'a>,
}

impl<'a> ListService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self {
            repo: ListRepo::new(pool),
        }
    }

    pub async fn create(&self, user_id: i32, input: CreateListInput) -> ServiceResult<i32> {
        let list = input.validate()?;
        Ok(self.repo.create(user_id, &list).await?)
    }

    pub async fn list_all(&self, user_id: i32) -> ServiceResult<Vec<TodoList>> {
        Ok(self.repo.list_all(user_id).await?)
    }

    pub async fn get(&self, user_id: i32, list_id: i32) -> ServiceResult<TodoList> {
        Ok(self.repo.get(user_id, list_id).await?)
    }

    pub async fn delete(&self, user_id: i32, list_id: i32) -> ServiceResult<()> {
        Ok(self.repo.delete(user_id, list_id).await?)
    }

    pub async fn update(
        &self,
        user_id: i32,
        list_id: i32,
        input: UpdateListInput,
    ) -> ServiceResult<()> {
        let patch = input.validate()?;
        Ok(self.repo.update(user_id, list_id, &patch).await?)
    }
}
