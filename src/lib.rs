pub(crate) mod api;
pub(crate) mod app;
pub(crate) mod core;
pub(crate) mod nav;
pub(crate) mod schemas;
pub(crate) mod session;
pub(crate) mod workflow;

#[cfg(test)]
mod test_support;

use crate::api::client::ApiClient;
use crate::app::Shell;
use crate::core::{config::Settings, telemetry};
use crate::nav::Navigator;
use crate::session::storage::SessionStorage;
use crate::session::SessionStore;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;

    let storage = SessionStorage::new(settings.storage_dir());
    let session = SessionStore::new(storage);
    session.init();

    let navigator = Navigator::new();
    let client = ApiClient::from_settings(&settings, session.clone(), navigator.clone())?;

    tracing::info!(
        backend = %settings.api().base_url,
        storage = %settings.storage_dir().display(),
        "EduQuiz client starting"
    );

    // A restored token may have expired since the last run; asking the
    // backend up front lets the 401 policy clear it before any screen renders.
    if session.current_user().is_some() {
        match api::auth::me(&client).await {
            Ok(user) => tracing::debug!(user = %user.email, "Restored session verified"),
            Err(err) => tracing::warn!(error = %err, "Restored session rejected"),
        }
    }

    Shell::new(client, navigator).run().await
}
