use crate::nav::Route;
use crate::schemas::user::Role;

/// What the guard can see of the session store: nothing beyond presence and
/// role is needed for a navigation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionView {
    Loading,
    Anonymous,
    Authenticated(Role),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GuardDecision {
    /// Session still loading from persisted storage; render nothing yet.
    Wait,
    Render,
    /// Unauthenticated visitor on a guarded route; the requested location is
    /// preserved for post-login return.
    RedirectToLogin { from: Route },
    Redirect(Route),
}

pub(crate) fn protected(session: SessionView, requested: &Route) -> GuardDecision {
    match session {
        SessionView::Loading => GuardDecision::Wait,
        SessionView::Anonymous => GuardDecision::RedirectToLogin { from: requested.clone() },
        SessionView::Authenticated(role) => match requested.required_role() {
            Some(required) if required != role => GuardDecision::Redirect(Route::landing_for(role)),
            _ => GuardDecision::Render,
        },
    }
}

pub(crate) fn public_only(session: SessionView, requested: &Route) -> GuardDecision {
    debug_assert!(requested.is_public_only());
    match session {
        SessionView::Loading => GuardDecision::Wait,
        SessionView::Anonymous => GuardDecision::Render,
        SessionView::Authenticated(role) => GuardDecision::Redirect(Route::landing_for(role)),
    }
}
