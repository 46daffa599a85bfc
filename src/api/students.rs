//! Student intake call: the submission behind the single-use entry form.

use crate::api::{ApiClient, ClientError};
use serde::Serialize;

#[derive(Serialize)]
struct AddStudentRequest<'a> {
    unique_id: &'a str,
    email: &'a str,
}

impl ApiClient {
    /// Registers a student submission.
    ///
    /// # Errors
    /// Rejects on transport failure or a non-success status.
    pub async fn add_student(&self, unique_id: &str, email: &str) -> Result<(), ClientError> {
        let body = AddStudentRequest { unique_id, email };
        self.post_json_for_status("/api/students/", &body).await
    }
}
