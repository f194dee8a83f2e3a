use std::env::args_os;

use sprite_extractor::{extract_sprite_file, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match extract_sprite_file(&arguments) {
        Ok(_) => println!("Extraction successful"),
        Err(e) => eprintln!("Extraction failed because of: {}", e),
    }
}
