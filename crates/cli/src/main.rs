use std::process::ExitCode;

fn main() -> ExitCode {
    marmor_cli::run()
}
