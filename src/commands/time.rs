//! Timestamp conversion handlers

use anyhow::{bail, Result};

use audiomark::{format_time, parse_time};

pub fn handle_format(seconds: f64) -> Result<()> {
    println!("{}", format_time(seconds));
    Ok(())
}

pub fn handle_parse(text: &str) -> Result<()> {
    match parse_time(text) {
        Some(seconds) => {
            println!("{}", seconds);
            Ok(())
        }
        None => bail!("Not a timestamp: {:?}", text),
    }
}
