pub(crate) mod guard;

use std::sync::{Arc, Mutex};

use crate::schemas::user::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    Home,
    Login,
    Register,
    TeacherDashboard,
    TeacherModule(String),
    StudentDashboard,
    StudentModule(String),
    TakeQuiz(String),
}

impl Route {
    pub(crate) fn landing_for(role: Role) -> Route {
        match role {
            Role::Teacher => Route::TeacherDashboard,
            Role::Student => Route::StudentDashboard,
        }
    }

    /// Role a visitor must hold to render this route; None means unguarded.
    pub(crate) fn required_role(&self) -> Option<Role> {
        match self {
            Route::TeacherDashboard | Route::TeacherModule(_) => Some(Role::Teacher),
            Route::StudentDashboard | Route::StudentModule(_) | Route::TakeQuiz(_) => {
                Some(Role::Student)
            }
            Route::Home | Route::Login | Route::Register => None,
        }
    }

    /// Login/register are for anonymous visitors only.
    pub(crate) fn is_public_only(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    pub(crate) fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::TeacherDashboard => "/teacher/dashboard".to_string(),
            Route::TeacherModule(id) => format!("/teacher/module/{id}"),
            Route::StudentDashboard => "/student/dashboard".to_string(),
            Route::StudentModule(id) => format!("/student/module/{id}"),
            Route::TakeQuiz(quiz_id) => format!("/student/quiz/{quiz_id}"),
        }
    }
}

#[derive(Debug)]
struct NavState {
    current: Route,
    history: Vec<Route>,
    return_to: Option<Route>,
}

/// Shared navigation handle. The shell reads `current` to decide which screen
/// to run; the 401 interceptor uses `force` to drop the visitor back on the
/// login screen from any depth.
#[derive(Clone)]
pub(crate) struct Navigator {
    inner: Arc<Mutex<NavState>>,
}

impl Navigator {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(NavState {
                current: Route::Home,
                history: Vec::new(),
                return_to: None,
            })),
        }
    }

    pub(crate) fn current(&self) -> Route {
        self.lock().current.clone()
    }

    pub(crate) fn goto(&self, route: Route) {
        let mut state = self.lock();
        let previous = std::mem::replace(&mut state.current, route);
        state.history.push(previous);
    }

    /// Navigate without leaving a history entry (redirects).
    pub(crate) fn replace(&self, route: Route) {
        self.lock().current = route;
    }

    pub(crate) fn back(&self) {
        let mut state = self.lock();
        state.current = state.history.pop().unwrap_or(Route::Home);
    }

    /// Hard redirect used by the 401 policy: history is discarded so back
    /// navigation cannot land on a screen that needs the cleared session.
    pub(crate) fn force(&self, route: Route) {
        let mut state = self.lock();
        state.history.clear();
        state.current = route;
    }

    pub(crate) fn remember_return_to(&self, route: Route) {
        self.lock().return_to = Some(route);
    }

    pub(crate) fn take_return_to(&self) -> Option<Route> {
        self.lock().return_to.take()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NavState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goto_and_back_walk_the_history() {
        let nav = Navigator::new();
        nav.goto(Route::StudentDashboard);
        nav.goto(Route::StudentModule("m1".to_string()));
        assert_eq!(nav.current(), Route::StudentModule("m1".to_string()));
        nav.back();
        assert_eq!(nav.current(), Route::StudentDashboard);
        nav.back();
        assert_eq!(nav.current(), Route::Home);
        nav.back();
        assert_eq!(nav.current(), Route::Home);
    }

    #[test]
    fn force_discards_history() {
        let nav = Navigator::new();
        nav.goto(Route::StudentDashboard);
        nav.goto(Route::TakeQuiz("q1".to_string()));
        nav.force(Route::Login);
        assert_eq!(nav.current(), Route::Login);
        nav.back();
        assert_eq!(nav.current(), Route::Home);
    }

    #[test]
    fn return_to_is_taken_once() {
        let nav = Navigator::new();
        nav.remember_return_to(Route::TakeQuiz("q1".to_string()));
        assert_eq!(nav.take_return_to(), Some(Route::TakeQuiz("q1".to_string())));
        assert_eq!(nav.take_return_to(), None);
    }
}
