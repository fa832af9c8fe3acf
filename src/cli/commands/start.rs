use crate::config::Config;
use crate::core::session::Session;
use crate::errors::AppResult;

/// Handle the `start` command: run the interactive focus/rest loop
/// until the user ends the session.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut session = Session::new(cfg.clone())?;
    session.run()
}
