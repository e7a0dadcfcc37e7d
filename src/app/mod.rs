mod auth;
mod prompt;
mod student;
mod take_quiz;
mod teacher;

use anyhow::Result;

pub(crate) use prompt::Prompt;

use crate::api::client::ApiClient;
use crate::nav::guard::{self, GuardDecision};
use crate::nav::{Navigator, Route};

/// Outcome of one rendered screen.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// The route loop: read the current route, let the guard decide, run the
/// matching screen. Screens navigate by mutating the shared `Navigator`.
pub(crate) struct Shell {
    client: ApiClient,
    navigator: Navigator,
    prompt: Prompt,
}

impl Shell {
    pub(crate) fn new(client: ApiClient, navigator: Navigator) -> Self {
        Self { client, navigator, prompt: Prompt::new() }
    }

    pub(crate) async fn run(mut self) -> Result<()> {
        loop {
            let route = self.navigator.current();
            let session = self.client.session().view();

            let decision = if route.is_public_only() {
                guard::public_only(session, &route)
            } else {
                guard::protected(session, &route)
            };

            match decision {
                GuardDecision::Wait => {
                    // Startup restores the session synchronously, so this is
                    // only reachable if init was skipped.
                    if self.client.session().is_loading() {
                        tracing::warn!("Session not initialized before the route loop");
                        self.client.session().init();
                    }
                    continue;
                }
                GuardDecision::Render => {}
                GuardDecision::RedirectToLogin { from } => {
                    tracing::debug!(from = %from.path(), "Guarded route requires login");
                    self.navigator.remember_return_to(from);
                    self.navigator.replace(Route::Login);
                    continue;
                }
                GuardDecision::Redirect(target) => {
                    tracing::debug!(from = %route.path(), to = %target.path(), "Guard redirect");
                    self.navigator.replace(target);
                    continue;
                }
            }

            let flow = match route {
                Route::Home => auth::home(&self.client, &self.navigator, &mut self.prompt).await?,
                Route::Login => auth::login(&self.client, &self.navigator, &mut self.prompt).await?,
                Route::Register => {
                    auth::register(&self.client, &self.navigator, &mut self.prompt).await?
                }
                Route::TeacherDashboard => {
                    teacher::dashboard(&self.client, &self.navigator, &mut self.prompt).await?
                }
                Route::TeacherModule(module_id) => {
                    teacher::module_detail(&self.client, &self.navigator, &mut self.prompt, &module_id)
                        .await?
                }
                Route::StudentDashboard => {
                    student::dashboard(&self.client, &self.navigator, &mut self.prompt).await?
                }
                Route::StudentModule(module_id) => {
                    student::module_detail(&self.client, &self.navigator, &mut self.prompt, &module_id)
                        .await?
                }
                Route::TakeQuiz(quiz_id) => {
                    take_quiz::run(&self.client, &self.navigator, &mut self.prompt, &quiz_id).await?
                }
            };

            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }
}

/// Post-login destination: the guarded route the visitor originally asked
/// for when one was remembered, else the role landing page.
pub(crate) fn after_auth(navigator: &Navigator, role: crate::schemas::user::Role) {
    let target = navigator.take_return_to().unwrap_or_else(|| Route::landing_for(role));
    navigator.replace(target);
}
