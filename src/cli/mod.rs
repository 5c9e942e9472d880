//! Command-line surface: argument definitions and the selection prompt.

mod args;

pub use args::Args;

use std::io::{self, ErrorKind, Write};

use crate::device::AppInfo;

/// Print the application catalog and prompt for a numeric selection.
pub fn choose_app(apps: &[AppInfo]) -> io::Result<&AppInfo> {
    println!("Installed applications:");
    println!("{:-<70}", "");
    for (i, app) in apps.iter().enumerate() {
        println!(
            "{i:>3}  {} [{}] [{}]",
            app.display_name, app.bundle_id, app.executable
        );
    }
    println!("{:-<70}", "");
    println!("Enter an application number to start capturing:");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "stdin closed"));
        }

        match input.trim().parse::<usize>() {
            Ok(idx) if idx < apps.len() => return Ok(&apps[idx]),
            _ => println!(
                "Invalid selection, enter a number between 0 and {}.",
                apps.len() - 1
            ),
        }
    }
}
