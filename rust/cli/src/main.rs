use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    pokerlab_cli::logging::init_logging();
    let code = pokerlab_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    ExitCode::from(u8::try_from(code).unwrap_or(2))
}
