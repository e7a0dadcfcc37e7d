pub(crate) mod attempt;
pub(crate) mod authoring;
pub(crate) mod timer;
