//! Problem input parsing.
//!
//! Instances are whitespace-separated `x y` coordinate pairs, one target per
//! pair. Duplicates are dropped, and the origin is remembered separately since
//! the ship already stands there.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

#[derive(Debug)]
pub enum InputError {
    Io(io::Error),
    BadToken(String),
    MissingCoordinate,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read input: {err}"),
            Self::BadToken(token) => write!(f, "expected an integer, got `{token}`"),
            Self::MissingCoordinate => write!(f, "input ends mid-pair (odd token count)"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for InputError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// One problem instance: the targets to visit, in input order.
#[derive(Debug, Clone)]
pub struct Problem {
    pub targets: Vec<(i64, i64)>,
    pub has_origin: bool,
}

impl Problem {
    pub fn from_reader(mut reader: impl Read) -> Result<Self, InputError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let mut numbers = Vec::new();
        for token in text.split_whitespace() {
            let value: i64 = token
                .parse()
                .map_err(|_| InputError::BadToken(token.to_owned()))?;
            numbers.push(value);
        }
        if numbers.len() % 2 != 0 {
            return Err(InputError::MissingCoordinate);
        }

        let mut targets = Vec::new();
        let mut seen = HashSet::new();
        let mut has_origin = false;
        for pair in numbers.chunks_exact(2) {
            let point = (pair[0], pair[1]);
            if point == (0, 0) {
                has_origin = true;
                continue;
            }
            if seen.insert(point) {
                targets.push(point);
            }
        }
        Ok(Self {
            targets,
            has_origin,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}
