use std::env;
use std::fs;
use std::io::{self, BufRead, Write};

use log::{debug, error, info};

use huffman_codes::config::{Config, InputSource};
use huffman_codes::stats::{average_code_length, entropy_from_freq};
use huffman_codes::{FrequencyTable, Result, build_code_table, build_huffman_tree};

fn strip_line_ending(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

fn read_input(source: &InputSource) -> Result<String> {
    let text = match source {
        InputSource::Prompt => {
            println!("String to encode: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line
        }
        InputSource::File(path) => {
            info!("Reading input file: {}", path.display());
            fs::read_to_string(path)?
        }
    };
    Ok(strip_line_ending(text))
}

fn display_symbol(symbol: char) -> String {
    match symbol {
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        ' ' => "' '".to_string(),
        c => c.to_string(),
    }
}

fn run(config: &Config) -> Result<()> {
    let text = read_input(&config.input)?;
    debug!("Input length: {} chars", text.chars().count());

    let freq = FrequencyTable::from_text(&text)?;
    let tree = build_huffman_tree(&freq)?;
    let table = build_code_table(&tree);

    println!("\n✅ Done!\n\nCode table: ");
    for (symbol, code) in &table {
        println!("{} {}", display_symbol(*symbol), code);
    }

    if config.stats {
        println!(
            "\nℹ️  Entropy:        {:.4} bits/symbol\n\
             🗜️  Average length: {:.4} bits/symbol",
            entropy_from_freq(&freq),
            average_code_length(&freq, &table)
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("Usage: {} [input_file] [--stats]", args[0]);
            eprintln!("  [input_file]: Optional. Text file to build codes for.");
            eprintln!("                Without it the text is read from stdin.");
            eprintln!("  --stats:      Print entropy and average code length.");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        error!("Failed to build codes: {}", e);
        std::process::exit(1);
    }
}
