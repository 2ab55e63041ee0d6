use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::student::errors::StudentError;
use crate::domain::student::models::Student;
use crate::domain::student::ports::StudentRepository;

/// Process-local student list.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    students: RwLock<Vec<Student>>,
}

impl InMemoryStudentRepository {
    pub fn new(students: Vec<Student>) -> Self {
        Self {
            students: RwLock::new(students),
        }
    }

    /// List pre-populated with the demo roster.
    pub fn seeded() -> Self {
        Self::new(vec![
            Student {
                id: 1,
                name: "Tarun".to_string(),
                course: "Java".to_string(),
            },
            Student {
                id: 2,
                name: "Rahul".to_string(),
                course: "Python".to_string(),
            },
            Student {
                id: 3,
                name: "Raj".to_string(),
                course: "C++".to_string(),
            },
        ])
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn list(&self) -> Vec<Student> {
        self.students.read().await.clone()
    }

    async fn add(&self, student: Student) -> Result<Student, StudentError> {
        let mut students = self.students.write().await;

        if students.iter().any(|s| s.id == student.id) {
            return Err(StudentError::DuplicateId(student.id));
        }

        students.push(student.clone());
        Ok(student)
    }
}
