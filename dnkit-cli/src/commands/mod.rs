pub mod build;
pub mod check;
pub mod compare;
pub mod explode;
pub mod parse;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};

/// Read a file, or stdin when `input` is `-`
pub(crate) fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))
    }
}

/// Write to a file, or print when no output path is given
pub(crate) fn write_output(output: Option<&str>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write output file: {}", path))
        }
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}
