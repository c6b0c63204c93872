use std::io::{self, Write};

use chrono::{Local, NaiveDate};

/// Prints `prompt` and reads one line. `None` once stdin is closed.
pub fn input(prompt: &str) -> io::Result<Option<String>> {
    let mut line = String::new();
    print!("{prompt}");
    io::stdout().flush()?;
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

pub fn str_to_bool(mut str: String) -> Option<bool> {
    str.make_ascii_lowercase();
    match str.trim() {
        "y" | "yes" | "yeah" | "yea" | "true" | "on" | "1" => Some(true),
        "n" | "no" | "nope" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// The local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
