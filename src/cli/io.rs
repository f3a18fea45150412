//! Input and output handling for the CLI
//!
//! - Input: one JSON document, from a file or all of stdin
//! - UTF-8 only

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::record::{Dataset, LoadError, LoadResult};

/// Read the whole input, from `path` or stdin when `None`
pub fn read_input(path: Option<&Path>) -> LoadResult<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
            _ => LoadError::Io(format!("{}: {}", path.display(), e)),
        }),
        None => {
            let mut input = String::new();
            io::stdin()
                .lock()
                .read_to_string(&mut input)
                .map_err(|e| LoadError::Io(format!("stdin: {}", e)))?;
            Ok(input)
        }
    }
}

/// Read and parse the dataset
pub fn read_dataset(path: Option<&Path>) -> LoadResult<Dataset> {
    Dataset::from_json_str(&read_input(path)?)
}
