pub mod database;
pub mod employees;
pub mod metrics;
pub mod store;

pub use database::{MongoDb, MongoEmployeeStore};
pub use employees::{EmployeeError, EmployeeService};
pub use metrics::{get_metrics, init_metrics};
pub use store::{EmployeeStore, InMemoryEmployeeStore};
