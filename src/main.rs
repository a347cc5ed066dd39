use extidy::cli::{CleanupChoice, run_cli};
use std::env;
use std::io::{self, Write};
use std::path::Path;

fn main() {
    println!("Welcome to extidy - tidy a directory tree by file extension!");

    // The path can come as a single positional argument; otherwise ask.
    let dir_path = match env::args().nth(1) {
        Some(arg) => arg,
        None => match prompt("Enter the path of the directory to organize: ") {
            Ok(input) => input,
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                std::process::exit(1);
            }
        },
    };
    let base_path = Path::new(dir_path.trim());

    let result = run_cli(base_path, || {
        let answer = prompt("Delete the empty directories that remain? (s/n): ").unwrap_or_default();
        CleanupChoice::from_input(&answer)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
