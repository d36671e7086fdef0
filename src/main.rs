use std::process::ExitCode;

fn main() -> ExitCode {
    pretty_env_logger::init();

    match tax_dash::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("exiting with {err:?}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
