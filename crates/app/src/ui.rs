//! Terminal output helpers.

use colored::Colorize;

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

pub fn header(text: &str) {
    println!("\n{}", text.bold().underline());
}

pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

pub fn separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// Render `data` as a QR code made of block characters.
pub fn qr_string(data: &str) -> anyhow::Result<String> {
    use qrcode::QrCode;

    let code = QrCode::new(data)?;
    Ok(code
        .render::<char>()
        .quiet_zone(false)
        .module_dimensions(2, 1)
        .build())
}

/// Display a QR code in the terminal
pub fn qr_code(data: &str) -> anyhow::Result<()> {
    let string = qr_string(data)?;
    println!("\n{}\n", string);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_string_is_a_square_block() {
        let qr = qr_string("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let rows: Vec<&str> = qr.lines().collect();
        assert!(rows.len() >= 21);
        assert!(rows.iter().all(|r| r.chars().count() == rows.len() * 2));
    }
}
