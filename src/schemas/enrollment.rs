use serde::Deserialize;

use crate::schemas::module::Module;

/// Only the populated module matters client-side.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Enrollment {
    pub(crate) module: Module,
}
