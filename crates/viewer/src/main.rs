use std::process::ExitCode;

use tracing::error;

mod app;
mod atomic_io;
mod preview;
mod scene_file;
mod traversal;

fn main() -> ExitCode {
    match app::build_app() {
        Ok(wiring) => app::run(wiring),
        Err(err) => {
            error!(error = %err, "startup_failed");
            ExitCode::FAILURE
        }
    }
}
