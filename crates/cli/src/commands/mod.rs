mod history;
mod run;

pub(crate) use history::{clear, stats};
pub(crate) use run::run;
