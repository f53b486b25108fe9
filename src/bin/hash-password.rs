//! Prints a bcrypt hash for ADMIN_HASH_PASSWORD.
//!
//! The password is read from the first argument, or from stdin when the
//! argument is `-` so it stays out of shell history.

use bcrypt::{hash, DEFAULT_COST};
use std::{env, io::BufRead};

fn read_password() -> Option<String> {
    match env::args().nth(1)?.as_str() {
        "-" => std::io::stdin()
            .lock()
            .lines()
            .next()?
            .ok()
            .map(|line| line.trim_end_matches(['\r', '\n']).to_string()),
        arg => Some(arg.to_string()),
    }
}

fn main() {
    let password = read_password().filter(|p| !p.is_empty()).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --bin hash-password <PASSWORD | ->");
        std::process::exit(1);
    });

    match hash(&password, DEFAULT_COST) {
        Ok(hashed) => {
            println!("Cost : {}", DEFAULT_COST);
            println!("Hash : {}\n", hashed);
            println!("# Paste this into your .env:");
            println!("ADMIN_HASH_PASSWORD={}", hashed);
        }
        Err(e) => {
            eprintln!("Error hashing password: {}", e);
            std::process::exit(1);
        }
    }
}
