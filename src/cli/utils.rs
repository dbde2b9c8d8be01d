use anyhow::{anyhow, Result};
use std::io::{self, BufRead, Write};

pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}

pub fn print_warning(message: &str) {
    println!("⚠️ {}", message);
}

pub fn print_info(message: &str) {
    println!("{}", message);
}

pub fn print_header(title: &str) {
    println!("\n{}", title);
    println!("{}", "=".repeat(title.chars().count()));
}

/// Read a line of input from the terminal
pub fn read_line(prompt_text: &str) -> Result<String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    prompt(&mut input, &mut output, prompt_text)?
        .ok_or_else(|| anyhow!("Input closed"))
}

/// Show a prompt and read one trimmed line. `None` means end of input.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt_text: &str) -> Result<Option<String>> {
    write!(output, "{}", prompt_text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}

/// Parse an amount typed by a user
pub fn parse_amount(input: &str) -> Result<f64> {
    match input.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(anyhow!("Invalid amount. Please enter a valid number.")),
    }
}

/// `y`/`Y` confirms, anything else declines
pub fn is_confirmed(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_trimmed_lines() {
        let mut input = Cursor::new("  12345 \n");
        let mut output = Vec::new();

        let line = prompt(&mut input, &mut output, "Account ID: ").unwrap();
        assert_eq!(line.as_deref(), Some("12345"));
        assert_eq!(String::from_utf8(output).unwrap(), "Account ID: ");

        let line = prompt(&mut input, &mut Vec::new(), "Again: ").unwrap();
        assert_eq!(line, None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_amount("-3").unwrap(), -3.0);
        assert!(parse_amount("ten").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_is_confirmed() {
        assert!(is_confirmed("y"));
        assert!(is_confirmed("Y "));
        assert!(!is_confirmed("yes"));
        assert!(!is_confirmed(""));
    }
}
