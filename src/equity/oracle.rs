use super::query::Query;
use crate::Error;
use std::path::Path;
use std::path::PathBuf;

/// Something that can answer a Query with raw text, one line per hand.
///
/// The answer is opaque here; [`super::parse::scan`] gives it shape.
pub trait Oracle {
    fn consult(&self, query: &Query) -> Result<String, Error>;
}

impl<O: Oracle + ?Sized> Oracle for &O {
    fn consult(&self, query: &Query) -> Result<String, Error> {
        (**self).consult(query)
    }
}

/// The `ps-eval` program from pokerstove, run as a child process.
#[derive(Debug, Clone)]
pub struct PokerStove {
    program: PathBuf,
}

impl Default for PokerStove {
    fn default() -> Self {
        Self::new(crate::PS_EVAL)
    }
}

impl PokerStove {
    /// A bare name is looked up on `PATH`; anything with a separator is
    /// taken as a path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Resolves the program to an existing file.
    pub fn locate(&self) -> Result<PathBuf, Error> {
        let found = match self.program.components().count() {
            1 => std::env::var_os("PATH").and_then(|paths| {
                std::env::split_paths(&paths)
                    .map(|dir| dir.join(&self.program))
                    .find(|candidate| candidate.is_file())
            }),
            _ => Some(self.program.clone()).filter(|path| path.is_file()),
        };
        found.ok_or_else(|| {
            log::error!(
                "make sure `{}` is available in your path. \
                 on macOS: `brew install circleoncircles/homebrew-tap/pokerstove`, \
                 otherwise build it from https://github.com/andrewprock/pokerstove",
                self.program.display()
            );
            Error::EvaluatorUnavailable(format!("{} not found", self.program.display()))
        })
    }
}

impl Oracle for PokerStove {
    fn consult(&self, query: &Query) -> Result<String, Error> {
        let program = self.locate()?;
        let args = query.args();
        log::debug!("{} {}", program.display(), args.join(" "));
        let output = std::process::Command::new(&program)
            .args(&args)
            .output()
            .map_err(|e| {
                Error::EvaluatorUnavailable(format!("{}: {}", program.display(), e))
            })?;
        if !output.status.success() {
            return Err(Error::EvaluatorUnavailable(format!(
                "{} exited with {}: {}",
                program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| Error::MalformedEvaluatorOutput(e.to_string()))?;
        log::debug!("full output\n{}", stdout);
        Ok(stdout)
    }
}
