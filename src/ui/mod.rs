pub mod progress;
pub mod prompt;

pub use progress::{present, CONTROLS_LEGEND};
pub use prompt::{is_yes, parse_delay, prompt, prompt_or};
