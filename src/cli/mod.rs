mod args;
mod runner;

pub(crate) use args::{Cli, Commands, FavAction};
pub(crate) use runner::run;
