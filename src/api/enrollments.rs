use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::schemas::enrollment::Enrollment;

#[derive(Serialize)]
struct EnrollPayload<'a> {
    #[serde(rename = "moduleId")]
    module_id: &'a str,
}

#[derive(Deserialize)]
struct EnrollmentsEnvelope {
    #[serde(default)]
    enrollments: Vec<Enrollment>,
}

pub(crate) async fn enroll(client: &ApiClient, module_id: &str) -> Result<(), ApiError> {
    let _: serde_json::Value = client.post("/enrollments", &EnrollPayload { module_id }).await?;
    Ok(())
}

pub(crate) async fn my_courses(client: &ApiClient) -> Result<Vec<Enrollment>, ApiError> {
    let envelope: EnrollmentsEnvelope = client.get("/enrollments/my-courses").await?;
    Ok(envelope.enrollments)
}
