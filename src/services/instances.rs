//! Book instances (copies) service

use crate::{
    error::AppResult,
    models::instance::{CreateInstance, InstanceDetails, UpdateInstance},
    repository::Repository,
};

#[derive(Clone)]
pub struct InstancesService {
    repository: Repository,
}

impl InstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, book_id: Option<i32>) -> AppResult<Vec<InstanceDetails>> {
        self.repository.instances.list(book_id).await
    }

    pub async fn get(&self, id: i32) -> AppResult<InstanceDetails> {
        self.repository.instances.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateInstance) -> AppResult<InstanceDetails> {
        self.repository.books.get_by_id(data.book_id).await?;
        self.ensure_reader(data.reader_id).await?;

        let instance = self.repository.instances.create(data).await?;
        tracing::info!(
            instance_id = instance.id,
            unique_id = %instance.unique_id,
            book_id = instance.book_id,
            "Created book instance"
        );
        self.repository.instances.get_by_id(instance.id).await
    }

    pub async fn update(&self, id: i32, data: &UpdateInstance) -> AppResult<InstanceDetails> {
        self.ensure_reader(data.reader_id).await?;
        let instance = self.repository.instances.update(id, data).await?;
        tracing::debug!(instance_id = id, status = %instance.status, "Updated book instance");
        self.repository.instances.get_by_id(instance.id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.instances.delete(id).await
    }

    async fn ensure_reader(&self, reader_id: Option<i32>) -> AppResult<()> {
        if let Some(reader_id) = reader_id {
            self.repository.users.get_by_id(reader_id).await?;
        }
        Ok(())
    }
}
