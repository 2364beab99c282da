/// Example: Shift a JSON file with a config file
///
/// Usage: cargo run --example shift_file <config_file> <input_file>

use jshift::{ShiftConfig, Shifter};
use std::{env, fs};

fn main() {
    let mut args = env::args().skip(1);
    let (Some(config_path), Some(input_path)) = (args.next(), args.next()) else {
        eprintln!("Usage: shift_file <config_file> <input_file>");
        std::process::exit(2);
    };

    let config = ShiftConfig::from_path(&config_path).unwrap_or_else(|e| {
        eprintln!("Failed to load config '{}': {}", config_path, e);
        std::process::exit(1);
    });

    println!("Spec entries: {}", config.spec.len());
    for (i, entry) in config.spec.entries().iter().enumerate() {
        println!("  {}: {} <- {:?}", i + 1, entry.dest, entry.source.paths());
    }

    let input = fs::read(&input_path).unwrap_or_else(|e| {
        eprintln!("Failed to read input '{}': {}", input_path, e);
        std::process::exit(1);
    });

    match Shifter::new(&config).shift(&input) {
        Ok(output) => {
            println!("\n--- Shifted Document ---");
            println!("{}", String::from_utf8_lossy(&output));
        }
        Err(e) => {
            eprintln!("✗ Shift failed:");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
