use std::process::ExitCode;

use tracing::error;

fn main() -> ExitCode {
    let app = match game::build_app() {
        Ok(app) => app,
        Err(err) => {
            error!(error = %err, "startup_failed");
            return ExitCode::FAILURE;
        }
    };
    game::run(app)
}
