use std::process::ExitCode;

fn main() -> ExitCode {
    match iwmenu_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("iwmenu: {e:#}");
            ExitCode::FAILURE
        }
    }
}
