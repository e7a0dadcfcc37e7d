pub(crate) mod attempts;
pub(crate) mod auth;
pub(crate) mod client;
pub(crate) mod enrollments;
pub(crate) mod errors;
pub(crate) mod modules;
pub(crate) mod quizzes;
