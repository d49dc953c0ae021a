use std::process::ExitCode;

fn main() -> ExitCode {
    stackcoach_cli::run()
}
