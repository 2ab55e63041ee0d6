use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::student::models::Student;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_students(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<Student>>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        state.student_repository.list().await,
    ))
}

pub async fn add_student(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<AddStudentRequest>,
) -> Result<ApiSuccess<Student>, ApiError> {
    let student = Student::new(body.id, body.name, body.course)?;

    let student = state.student_repository.add(student).await?;
    tracing::info!(student_id = student.id, added_by = %user.username, "Student added");

    Ok(ApiSuccess::new(StatusCode::CREATED, student))
}

/// HTTP request body for adding a student (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddStudentRequest {
    id: i32,
    name: String,
    course: String,
}
