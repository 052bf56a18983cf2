use std::process::ExitCode;

fn main() -> ExitCode {
    jetter::entry::run()
}
