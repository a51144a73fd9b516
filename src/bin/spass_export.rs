//! Decrypts a .spass export and writes the recovered tables to disk
//!
//! Usage: `spass-export <path to .spass file> <password> [csv|txt|md]`
//!
//! Writes `<input>.txt` / `<input>.md`, or one `<input>.<table>.csv` per
//! recovered table. Takes the password on the CLI, which is insecure

use spass_rs::{output, Document, Error};

use std::fs::File;
use std::io;
use std::path::Path;
use std::process::exit;

fn usage() -> ! {
    eprintln!("Usage: spass-export <path to .spass file> <password> [csv|txt|md]");
    exit(2)
}

fn write_output(document: &Document, input: &Path, format: &str) -> io::Result<()> {
    match format {
        "csv" => {
            for table in document.tables() {
                let path = input.with_extension(format!("{}.csv", table.name()));
                output::write_tabular(table, File::create(&path)?)?;
                println!("Wrote {}", path.display());
            }
        }
        "txt" => {
            let path = input.with_extension("txt");
            output::write_report(document, File::create(&path)?)?;
            println!("Wrote {}", path.display());
        }
        "md" => {
            let path = input.with_extension("md");
            output::write_cards(document, File::create(&path)?)?;
            println!("Wrote {}", path.display());
        }
        _ => usage(),
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        usage();
    }
    let input = Path::new(&args[1]);
    let format = args.get(3).map(String::as_str).unwrap_or("csv");

    let raw = match std::fs::read(input) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("Could not read {}: {}", input.display(), err);
            exit(1);
        }
    };

    let document = match spass_rs::recover(&raw, &args[2]) {
        Ok(document) => document,
        Err(err @ Error::NoData(_)) => {
            eprintln!("{}", err);
            exit(4);
        }
        Err(err) => {
            eprintln!("{}", err);
            exit(3);
        }
    };

    for warning in document.warnings() {
        eprintln!("Warning: skipped {}", warning);
    }
    let records: usize = document
        .tables()
        .iter()
        .map(|table| table.records().len())
        .sum();
    println!(
        "Recovered {} records across {} tables",
        records,
        document.tables().len()
    );

    if let Err(err) = write_output(&document, input, format) {
        eprintln!("Could not write output: {}", err);
        exit(1);
    }
}
