pub mod employees;

pub use employees::{parse_employee_id, EmployeeRequest, EmployeeResponse};
