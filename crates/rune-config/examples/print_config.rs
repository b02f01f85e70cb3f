/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    // Load configuration from rune.toml, then RUNE_BIDI_* overrides
    let config = rune_config::RuneConfig::load();

    println!("=== Rune Draw Configuration ===\n");

    println!("BiDi Settings:");
    println!("  Validate Levels: {}", config.bidi.validate_levels);
    println!("  Max Level: {}", config.bidi.max_level);
    println!("  Stack Capacity: {}", config.bidi.stack_capacity);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
