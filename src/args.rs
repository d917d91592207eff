use bank::Result;

use std::{env, fs, path::PathBuf};

use anyhow::Context;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputArgsError {
    #[error("Usage: bank-ledger <command file>")]
    MissingCommandFile,

    #[error("Unexpected argument after the command file: {0}")]
    Unexpected(String),

    #[error("Command file not found: {0}")]
    FileNotFound(String),
}

/// The command file given as the first and only argument, canonicalised
pub fn parse_input_arg() -> Result<PathBuf> {
    return command_file(env::args().skip(1));
}

fn command_file(mut args: impl Iterator<Item = String>) -> Result<PathBuf> {
    let filename = args.next().ok_or(InputArgsError::MissingCommandFile)?;

    if let Some(extra) = args.next() {
        Err(InputArgsError::Unexpected(extra))?
    }

    let path = fs::canonicalize(&filename)
        .with_context(|| InputArgsError::FileNotFound(filename))?;

    return Ok(path);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn command_file_exists() {
        let path = command_file(args(&["Cargo.toml"])).unwrap();
        assert!(path.is_absolute());
    }

    #[test]
    fn command_file_errors() {
        let missing = command_file(args(&[])).unwrap_err();
        assert!(matches!(
            missing.downcast_ref::<InputArgsError>(),
            Some(InputArgsError::MissingCommandFile)
        ));

        let extra = command_file(args(&["Cargo.toml", "more.csv"])).unwrap_err();
        assert!(matches!(
            extra.downcast_ref::<InputArgsError>(),
            Some(InputArgsError::Unexpected(_))
        ));

        assert!(command_file(args(&["does-not-exist.csv"])).is_err());
    }
}
