//! Quiz management calls. Rendering and form building happen elsewhere;
//! these wrappers exist so every quiz call flows through the authorized
//! request path.

use crate::api::{ApiClient, ClientError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    /// Indices into `options`.
    pub correct_answers: Vec<usize>,
}

#[derive(Serialize)]
struct NewQuizRequest<'a> {
    title: &'a str,
    description: &'a str,
    teacher: &'a str,
    questions: &'a [Question],
}

impl ApiClient {
    /// Creates a quiz; the API answers with a plain-text receipt.
    ///
    /// # Errors
    /// Rejects on transport failure or a non-success status.
    pub async fn post_quiz(
        &self,
        title: &str,
        description: &str,
        teacher: &str,
        questions: &[Question],
    ) -> Result<String, ClientError> {
        let body = NewQuizRequest {
            title,
            description,
            teacher,
            questions,
        };
        self.post_json_for_text("/api/quizzes/", &body).await
    }

    /// # Errors
    /// Rejects on transport failure or a non-success status.
    pub async fn delete_quiz(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("/api/quizzes/{id}")).await
    }

    /// All quizzes owned by a teacher, as raw JSON for the listing layer.
    ///
    /// # Errors
    /// Rejects on transport failure, a non-success status, or a non-JSON
    /// payload.
    pub async fn quizzes_by_teacher(&self, teacher_id: &str) -> Result<Value, ClientError> {
        self.get_json(&format!("/api/quizzes/all/{teacher_id}")).await
    }
}
