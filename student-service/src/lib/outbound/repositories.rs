pub mod credential;
pub mod memory;
pub mod student;

pub use credential::PostgresCredentialStore;
pub use memory::InMemoryCredentialStore;
pub use student::InMemoryStudentRepository;
