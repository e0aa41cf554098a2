//! Banners printed before and at the start of a chat.

use console::style;

/// Print the welcome text shown when the program starts.
pub fn print_welcome_banner() {
    println!();
    println!("  {}", style("Welcome to the Character Chat!").cyan().bold());
    println!();
    println!(
        "  {}",
        style("You can talk to your favorite characters from your favorite book, movie, or TV show.")
            .dim()
    );
    println!();
}

/// Print the header for a conversation once the character is confirmed.
pub fn print_chat_banner(character: &str, source_material: &str, model: &str, session_id: &str) {
    println!();
    println!(
        "  {} {}",
        style(character).cyan().bold(),
        style(format!("from {source_material}")).dim()
    );
    println!();
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type 'quit' to exit the program, /help for commands").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
