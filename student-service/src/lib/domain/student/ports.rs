use async_trait::async_trait;

use crate::student::errors::StudentError;
use crate::student::models::Student;

/// Storage for the student list.
#[async_trait]
pub trait StudentRepository: Send + Sync + 'static {
    /// All students in insertion order.
    async fn list(&self) -> Vec<Student>;

    /// Append a student.
    ///
    /// # Errors
    /// * `DuplicateId` - A student with the same id is already listed
    async fn add(&self, student: Student) -> Result<Student, StudentError>;
}
