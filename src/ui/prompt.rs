use crate::playback::clamp_delay;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Print `text: ` and read one trimmed line from stdin
pub fn prompt(text: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}: ", text)?;
    stdout.flush()?;

    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

/// Prompt for a value, using `default` when the answer is empty
pub fn prompt_or(text: &str, default: &str) -> io::Result<String> {
    let answer = prompt(&format!("{} [{}]", text, default))?;
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer
    })
}

/// Whether an answer means yes
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Parse a delay answer; invalid input falls back to `default`, and the
/// result is clamped into the allowed range
pub fn parse_delay(answer: &str, default: f64) -> f64 {
    let answer = answer.trim();
    if answer.is_empty() {
        return clamp_delay(default);
    }
    match answer.parse::<f64>() {
        Ok(delay) if delay.is_finite() => clamp_delay(delay),
        _ => {
            warn!("Invalid delay value {:?}. Using default {}s", answer, default);
            clamp_delay(default)
        }
    }
}
