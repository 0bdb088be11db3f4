mod bootstrap;
mod runner;

pub(crate) use bootstrap::build_app;
pub(crate) use runner::run;
