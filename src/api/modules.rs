use serde::Deserialize;

use crate::api::client::ApiClient;
use crate::api::errors::ApiError;
use crate::schemas::module::{Module, ModuleCreate};

#[derive(Deserialize)]
struct ModulesEnvelope {
    #[serde(default)]
    modules: Vec<Module>,
}

#[derive(Deserialize)]
struct ModuleEnvelope {
    module: Module,
}

pub(crate) async fn list(client: &ApiClient) -> Result<Vec<Module>, ApiError> {
    let envelope: ModulesEnvelope = client.get("/modules").await?;
    Ok(envelope.modules)
}

pub(crate) async fn my_modules(client: &ApiClient) -> Result<Vec<Module>, ApiError> {
    let envelope: ModulesEnvelope = client.get("/modules/my-modules").await?;
    Ok(envelope.modules)
}

pub(crate) async fn get(client: &ApiClient, module_id: &str) -> Result<Module, ApiError> {
    let envelope: ModuleEnvelope = client.get(&format!("/modules/{module_id}")).await?;
    Ok(envelope.module)
}

pub(crate) async fn create(client: &ApiClient, payload: &ModuleCreate) -> Result<Module, ApiError> {
    let envelope: ModuleEnvelope = client.post("/modules", payload).await?;
    Ok(envelope.module)
}
