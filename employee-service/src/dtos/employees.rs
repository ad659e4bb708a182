use crate::models::{Employee, EmployeeUpdate};
use crate::services::EmployeeError;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Inbound employee body for create and update.
///
/// Missing fields decode to zero values. `id` is accepted but never used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmployeeRequest {
    pub id: Option<String>,
    pub name: String,
    pub salary: f64,
    pub age: f64,
}

impl EmployeeRequest {
    /// Candidate document for insertion; any client id is dropped.
    pub fn into_new_employee(self) -> Employee {
        Employee {
            id: None,
            name: self.name,
            salary: self.salary,
            age: self.age,
        }
    }

    pub fn to_update(&self) -> EmployeeUpdate {
        EmployeeUpdate {
            name: self.name.clone(),
            age: self.age,
            salary: self.salary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub salary: f64,
    pub age: f64,
}

impl EmployeeResponse {
    /// Echo of a submitted update. `raw_id` is the path segment exactly as sent.
    pub fn echo(raw_id: String, request: EmployeeRequest) -> Self {
        Self {
            id: Some(raw_id),
            name: request.name,
            salary: request.salary,
            age: request.age,
        }
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.map(|id| id.to_hex()),
            name: employee.name,
            salary: employee.salary,
            age: employee.age,
        }
    }
}

/// Parses a path identifier as a 24-character hex ObjectId.
pub fn parse_employee_id(raw: &str) -> Result<ObjectId, EmployeeError> {
    ObjectId::parse_str(raw).map_err(|_| EmployeeError::InvalidId(raw.to_string()))
}
