//! Storage seam for employee documents.

use crate::models::{Employee, EmployeeUpdate};
use anyhow::Result;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Document operations the employee service needs from a store.
///
/// Each method maps to exactly one store call. Errors are surfaced untouched.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All employees in store-native order.
    async fn list(&self) -> Result<Vec<Employee>>;

    /// Inserts `employee` and returns the identifier the store assigned.
    async fn insert(&self, employee: &Employee) -> Result<ObjectId>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Employee>>;

    /// Sets the whitelisted fields on the matching document.
    /// Returns `false` when no document matched `id`.
    async fn update_fields(&self, id: ObjectId, update: &EmployeeUpdate) -> Result<bool>;

    /// Returns the number of documents removed.
    async fn delete_by_id(&self, id: ObjectId) -> Result<u64>;

    async fn ping(&self) -> Result<()>;
}

/// Insertion-ordered store kept in process memory.
#[derive(Clone, Default)]
pub struct InMemoryEmployeeStore {
    employees: Arc<RwLock<Vec<Employee>>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn list(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.read().await.clone())
    }

    async fn insert(&self, employee: &Employee) -> Result<ObjectId> {
        let id = ObjectId::new();
        let mut stored = employee.clone();
        stored.id = Some(id);
        self.employees.write().await.push(stored);
        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Employee>> {
        Ok(self
            .employees
            .read()
            .await
            .iter()
            .find(|e| e.id == Some(id))
            .cloned())
    }

    async fn update_fields(&self, id: ObjectId, update: &EmployeeUpdate) -> Result<bool> {
        let mut employees = self.employees.write().await;
        match employees.iter_mut().find(|e| e.id == Some(id)) {
            Some(employee) => {
                update.apply_to(employee);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64> {
        let mut employees = self.employees.write().await;
        let before = employees.len();
        employees.retain(|e| e.id != Some(id));
        Ok((before - employees.len()) as u64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
