use lox_scanner::{
    config::{Config, Mode},
    driver::{Lox, EXIT_DATA_ERROR, EXIT_USAGE},
    logger,
    Error,
    Result,
};
use std::io::{self, Write};

fn main() -> Result<()> {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(Error::Usage) => {
            let mut stdout = io::stdout();
            writeln!(stdout, "{}", Error::Usage)?;
            stdout.flush()?;
            std::process::exit(EXIT_USAGE);
        },
        Err(e) => return Err(e),
    };

    logger::init(&config.log_filter);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut lox = Lox::new(stdout.lock(), stderr.lock());

    match config.mode {
        Mode::Prompt => {
            let stdin = io::stdin();
            lox.run_prompt(stdin.lock())?;
        },
        Mode::File(path) => {
            lox.run_file(&path)?;
            if lox.had_error() {
                std::process::exit(EXIT_DATA_ERROR);
            }
        },
    }

    Ok(())
}
