//! Prints the decrypted table text of a .spass export
//!
//! Primarily for investigating the export format. It takes the password
//! on the CLI, which is insecure

use std::process::exit;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: spass-decrypt <path to .spass file> <password>");
        exit(2);
    }

    let raw = match std::fs::read(&args[1]) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("Could not read {}: {}", args[1], err);
            exit(1);
        }
    };

    match spass_rs::decrypt(&raw, &args[2]) {
        Ok(plaintext) => println!("{}", plaintext),
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    }
}
