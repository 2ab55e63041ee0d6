use serde::Deserialize;
use serde::Serialize;

use crate::student::errors::StudentError;

/// Entry in the student list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub course: String,
}

impl Student {
    /// Create a student, rejecting blank names and courses.
    ///
    /// # Errors
    /// * `InvalidField` - `name` or `course` is blank
    pub fn new(id: i32, name: String, course: String) -> Result<Self, StudentError> {
        if name.trim().is_empty() {
            return Err(StudentError::InvalidField("name must not be blank".to_string()));
        }
        if course.trim().is_empty() {
            return Err(StudentError::InvalidField(
                "course must not be blank".to_string(),
            ));
        }

        Ok(Self { id, name, course })
    }
}
