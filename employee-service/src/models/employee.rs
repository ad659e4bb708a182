use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Employee as persisted in the `employees` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Assigned by the store on insert; never taken from the client.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub age: f64,
}

impl Employee {
    pub fn new(name: impl Into<String>, salary: f64, age: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            salary,
            age,
        }
    }
}

/// The only fields an update may touch. `_id` is deliberately absent.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeUpdate {
    pub name: String,
    pub age: f64,
    pub salary: f64,
}

impl EmployeeUpdate {
    /// `$set` document for a partial update.
    pub fn to_set_document(&self) -> Document {
        doc! {
            "$set": {
                "name": &self.name,
                "age": self.age,
                "salary": self.salary,
            }
        }
    }

    pub fn apply_to(&self, employee: &mut Employee) {
        employee.name = self.name.clone();
        employee.age = self.age;
        employee.salary = self.salary;
    }
}
