pub(crate) mod config;
pub(crate) mod telemetry;
pub(crate) mod time;
