//! turnin CLI
//!
//! Entry point for the `turnin` command-line tool.

use clap::Parser;
use std::process;
use turnin::pipeline::{self, SubmitConfig};

#[derive(Parser)]
#[command(name = "turnin")]
#[command(about = "Package a homework submission for upload", version)]
struct Cli {
    /// Berkeley student ID for submission (8-10 digits)
    #[arg(long)]
    student_id: String,

    /// Assignment to package (e.g. hw1)
    #[arg(long)]
    assignment: String,
}

fn main() {
    let cli = Cli::parse();

    let invocation_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot determine current directory: {}", e);
            process::exit(1);
        }
    };

    let config = SubmitConfig::new(cli.student_id, cli.assignment, invocation_dir);

    match pipeline::run(&config) {
        Ok(_) => {
            println!("Created {}.zip", config.assignment);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}
