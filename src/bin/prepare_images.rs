//! Sprite preparation tool
//!
//! Usage: prepare-images <directory>

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    use brick_bounce::prep::{self, TrimOptions};

    env_logger::init();

    let dir = match prep::parse_args(std::env::args()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };

    let mut stdout = std::io::stdout().lock();
    match prep::run(&dir, &TrimOptions::default(), &mut stdout) {
        Ok(summary) => {
            log::info!(
                "Prepared {} images ({} failed)",
                summary.processed,
                summary.failed
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(1)
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Offline tool, native only
}
