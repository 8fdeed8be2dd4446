use std::{
    fs,
    io::{BufRead, Write},
    path::Path,
};

use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    scanner::Scanner,
};

/// Exit status for a bad command line.
pub const EXIT_USAGE: i32 = 64;
/// Exit status for a script with lexical errors.
pub const EXIT_DATA_ERROR: i32 = 65;

/// One interpreter session: scans source text, writes errors to `err_out`
/// and, when a run is clean, lists its tokens on `out`.
pub struct Lox<Out, ErrOut> {
    out: Out,
    err_out: ErrOut,
    had_error: bool,
}

impl <Out: Write, ErrOut: Write> Lox<Out, ErrOut> {
    pub fn new(out: Out, err_out: ErrOut) -> Self {
        Self {
            out,
            err_out,
            had_error: false,
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn into_inner(self) -> (Out, ErrOut) {
        (self.out, self.err_out)
    }

    pub fn run_file(&mut self, path: &Path) -> Result<()> {
        info!(path = %path.display(), "running script");
        let bytes = fs::read(path)?;
        let contents = String::from_utf8_lossy(&bytes);
        self.run(&contents)
    }

    /// Reads and runs one line at a time until `input` is exhausted. Errors
    /// on one line do not carry over to the next.
    pub fn run_prompt<In: BufRead>(&mut self, mut input: In) -> Result<()> {
        let mut buffer = Vec::new();

        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            buffer.clear();

            let num_bytes = input.read_until(b'\n', &mut buffer)?;
            if num_bytes == 0 { break };

            let line = String::from_utf8_lossy(&buffer);
            self.run(line.trim_end_matches(&['\n', '\r'][..]))?;
            self.had_error = false;
        }

        Ok(())
    }

    pub fn run(&mut self, source: &str) -> Result<()> {
        let mut errors: Vec<Error> = Vec::new();
        let tokens = Scanner::new(source).scan_tokens(&mut errors);

        if !errors.is_empty() {
            debug!(count = errors.len(), "lexical errors, skipping token listing");
            for e in errors.iter() {
                writeln!(self.err_out, "{}", e)?;
            }
            self.err_out.flush()?;
            self.had_error = true;
            return Ok(());
        }

        for token in tokens.iter() {
            writeln!(self.out, "{}", token)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session() -> Lox<Vec<u8>, Vec<u8>> {
        Lox::new(Vec::new(), Vec::new())
    }

    fn outputs(lox: Lox<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (out, err) = lox.into_inner();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn clean_run_lists_tokens() -> Result<()> {
        let mut lox = session();
        lox.run("print 1;")?;
        assert!(!lox.had_error());

        let (out, err) = outputs(lox);
        assert_eq!("PRINT print null\nNUMBER 1 1.0\nSEMICOLON ; null\nEOF  null\n", out);
        assert_eq!("", err);
        Ok(())
    }

    #[test]
    fn huge_number_lists_without_exponent() -> Result<()> {
        let mut lox = session();
        lox.run("1000000000000000000000")?;

        let (out, _) = outputs(lox);
        assert_eq!("NUMBER 1000000000000000000000 1000000000000000000000.0\nEOF  null\n", out);
        Ok(())
    }

    #[test]
    fn lexical_errors_suppress_listing() -> Result<()> {
        let mut lox = session();
        lox.run("var a = @;\n\"open")?;
        assert!(lox.had_error());

        let (out, err) = outputs(lox);
        assert_eq!("", out);
        assert_eq!("[line 1] Error: Unexpected character.\n[line 2] Error: Unterminated string.\n", err);
        Ok(())
    }

    #[test]
    fn error_flag_sticks_across_runs() -> Result<()> {
        let mut lox = session();
        lox.run("@")?;
        lox.run("1")?;
        assert!(lox.had_error());
        Ok(())
    }

    #[test]
    fn prompt_resets_error_flag_per_line() -> Result<()> {
        let mut lox = session();
        lox.run_prompt(Cursor::new("1\n@\n2\n"))?;
        assert!(!lox.had_error());

        let (out, err) = outputs(lox);
        assert_eq!("> NUMBER 1 1.0\nEOF  null\n> > NUMBER 2 2.0\nEOF  null\n> ", out);
        assert_eq!("[line 1] Error: Unexpected character.\n", err);
        Ok(())
    }

    #[test]
    fn prompt_strips_line_endings() -> Result<()> {
        let mut lox = session();
        lox.run_prompt(Cursor::new("x\r\n"))?;

        let (out, _) = outputs(lox);
        assert_eq!("> IDENTIFIER x null\nEOF  null\n> ", out);
        Ok(())
    }

    #[test]
    fn prompt_survives_invalid_utf8_line() -> Result<()> {
        let mut lox = session();
        lox.run_prompt(Cursor::new(&b"\xff\n1\n"[..]))?;
        assert!(!lox.had_error());

        let (out, err) = outputs(lox);
        assert_eq!("> > NUMBER 1 1.0\nEOF  null\n> ", out);
        assert_eq!("[line 1] Error: Unexpected character.\n", err);
        Ok(())
    }

    #[test]
    fn run_file_reads_whole_script() -> Result<()> {
        let mut script = tempfile::NamedTempFile::new()?;
        write!(script, "var x = 1;\n// done\n")?;

        let mut lox = session();
        lox.run_file(script.path())?;
        assert!(!lox.had_error());

        let (out, _) = outputs(lox);
        assert_eq!(
            "VAR var null\nIDENTIFIER x null\nEQUAL = null\nNUMBER 1 1.0\nSEMICOLON ; null\nEOF  null\n",
            out
        );
        Ok(())
    }

    #[test]
    fn run_file_decodes_invalid_utf8_lossily() -> Result<()> {
        let mut script = tempfile::NamedTempFile::new()?;
        script.write_all(b"a \xff b")?;

        let mut lox = session();
        lox.run_file(script.path())?;
        assert!(lox.had_error());

        let (_, err) = outputs(lox);
        assert_eq!("[line 1] Error: Unexpected character.\n", err);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut lox = session();
        let result = lox.run_file(Path::new("/definitely/not/here.lox"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
