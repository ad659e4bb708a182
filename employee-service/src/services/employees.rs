//! Employee record operations and their error taxonomy.

use crate::dtos::EmployeeRequest;
use crate::models::Employee;
use crate::services::metrics::record_operation;
use crate::services::store::EmployeeStore;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("invalid employee id: {0}")]
    InvalidId(String),

    #[error("malformed employee body: {0}")]
    MalformedBody(String),

    /// Create reports unreadable bodies as a server fault.
    #[error("failed to read employee body: {0}")]
    CreateBodyRejected(String),

    /// Update matched nothing. Reported as a client error, unlike delete.
    #[error("no employee with id {0}")]
    UpdateTargetMissing(ObjectId),

    #[error("employee {0} not found")]
    NotFound(ObjectId),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<EmployeeError> for AppError {
    fn from(err: EmployeeError) -> Self {
        match err {
            EmployeeError::InvalidId(_)
            | EmployeeError::MalformedBody(_)
            | EmployeeError::UpdateTargetMissing(_) => AppError::BadRequest(anyhow::Error::new(err)),
            EmployeeError::NotFound(_) => AppError::NotFound(anyhow::Error::new(err)),
            EmployeeError::CreateBodyRejected(message) => {
                AppError::InternalError(anyhow::anyhow!(message))
            }
            EmployeeError::Store(source) => AppError::DatabaseError(source),
        }
    }
}

fn observe<T>(
    operation: &'static str,
    result: Result<T, EmployeeError>,
) -> Result<T, EmployeeError> {
    let outcome = match &result {
        Ok(_) => "success",
        Err(EmployeeError::Store(_)) => "store_error",
        Err(_) => "rejected",
    };
    record_operation(operation, outcome);
    result
}

/// Maps employee operations onto an [`EmployeeStore`], one store call each
/// (create also re-reads the inserted document).
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn EmployeeStore> {
        &self.store
    }

    pub async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        let result = self.store.list().await.map_err(|e| {
            tracing::error!("Failed to list employees: {}", e);
            EmployeeError::Store(e)
        });
        observe("list", result)
    }

    /// Inserts the candidate (client id dropped) and returns the stored form.
    pub async fn create(&self, request: EmployeeRequest) -> Result<Employee, EmployeeError> {
        observe("create", self.create_inner(request).await)
    }

    async fn create_inner(&self, request: EmployeeRequest) -> Result<Employee, EmployeeError> {
        let candidate = request.into_new_employee();
        let id = self.store.insert(&candidate).await.map_err(|e| {
            tracing::error!("Failed to insert employee: {}", e);
            EmployeeError::Store(e)
        })?;
        tracing::info!(employee_id = %id, "Employee created");

        let created = self.store.find_by_id(id).await.map_err(|e| {
            tracing::error!(employee_id = %id, "Failed to re-read created employee: {}", e);
            EmployeeError::Store(e)
        })?;

        created.ok_or_else(|| {
            tracing::error!(employee_id = %id, "Created employee vanished before re-read");
            EmployeeError::Store(anyhow::anyhow!(
                "employee {} was not found after insert",
                id
            ))
        })
    }

    /// Sets name, age and salary on `id`. Nothing is re-read afterwards;
    /// callers echo the submitted values.
    pub async fn update(&self, id: ObjectId, request: &EmployeeRequest) -> Result<(), EmployeeError> {
        observe("update", self.update_inner(id, request).await)
    }

    async fn update_inner(&self, id: ObjectId, request: &EmployeeRequest) -> Result<(), EmployeeError> {
        let matched = self
            .store
            .update_fields(id, &request.to_update())
            .await
            .map_err(|e| {
                tracing::error!(employee_id = %id, "Failed to update employee: {}", e);
                EmployeeError::Store(e)
            })?;

        if !matched {
            tracing::debug!(employee_id = %id, "Update matched no employee");
            return Err(EmployeeError::UpdateTargetMissing(id));
        }

        tracing::info!(employee_id = %id, "Employee updated");
        Ok(())
    }

    pub async fn delete(&self, id: ObjectId) -> Result<(), EmployeeError> {
        observe("delete", self.delete_inner(id).await)
    }

    async fn delete_inner(&self, id: ObjectId) -> Result<(), EmployeeError> {
        let deleted = self.store.delete_by_id(id).await.map_err(|e| {
            tracing::error!(employee_id = %id, "Failed to delete employee: {}", e);
            EmployeeError::Store(e)
        })?;

        if deleted < 1 {
            return Err(EmployeeError::NotFound(id));
        }

        tracing::info!(employee_id = %id, "Employee deleted");
        Ok(())
    }
}
