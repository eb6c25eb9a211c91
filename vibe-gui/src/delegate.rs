use druid::{AppDelegate, Command, DelegateCtx, Env, Handled, Target};

use crate::{cmd, data::AppState};

pub struct Delegate;

impl AppDelegate<AppState> for Delegate {
    fn command(
        &mut self,
        _ctx: &mut DelegateCtx,
        _target: Target,
        cmd: &Command,
        data: &mut AppState,
        _env: &Env,
    ) -> Handled {
        if let Some(message) = cmd.get(cmd::FAULT) {
            data.close_views();
            data.set_fault(message);
            Handled::Yes
        } else if let Some(url) = cmd.get(cmd::OPEN_LINK) {
            if let Err(err) = open::that(url) {
                log::error!("failed to open {}: {}", url, err);
            }
            Handled::Yes
        } else {
            Handled::No
        }
    }
}
