//! The `bloomquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("bloomquiz.toml");
    if path.exists() {
        println!("bloomquiz.toml already exists, skipping.");
        return Ok(());
    }

    std::fs::write(path, SAMPLE_CONFIG)?;
    println!("Created bloomquiz.toml");

    println!("\nNext steps:");
    println!("  1. Adjust the limits in bloomquiz.toml if needed");
    println!("  2. Run: bloomquiz");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# bloomquiz configuration

# Largest estimated time (minutes) accepted for one question
max_minutes = 60

# Largest year accepted; 0 always means "no year"
max_year = 2100

# Characters of question text shown in listings
summary_width = 50

# Clear the terminal before each screen
clear_screen = true

# Wait for Enter after each screen
pause_after_action = true
"#;
