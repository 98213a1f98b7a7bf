use std::num::NonZeroUsize;

const VALID_TOKENS: &str =
    "<number>, back, reset, guide, popup:<key>, link:<number|label>, audit, quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkCommand {
    Choose(NonZeroUsize),
    Back,
    Reset,
    Guide,
    Popup(String),
    Link(String),
    Audit,
    Quit,
}

pub fn parse_walk_command(raw: &str) -> Result<WalkCommand, String> {
    let token = raw.trim();
    if let Some(key) = token.strip_prefix("popup:") {
        return Ok(WalkCommand::Popup(key.trim().to_string()));
    }
    if let Some(label) = token.strip_prefix("link:") {
        return Ok(WalkCommand::Link(label.trim().to_string()));
    }
    if let Ok(index) = token.parse::<NonZeroUsize>() {
        return Ok(WalkCommand::Choose(index));
    }
    match token.to_ascii_lowercase().as_str() {
        "back" | "b" => Ok(WalkCommand::Back),
        "reset" | "r" => Ok(WalkCommand::Reset),
        "guide" | "g" => Ok(WalkCommand::Guide),
        "audit" | "a" => Ok(WalkCommand::Audit),
        "quit" | "q" => Ok(WalkCommand::Quit),
        other => Err(format!(
            "invalid walk command `{other}`; valid commands: {VALID_TOKENS}"
        )),
    }
}

pub fn parse_walk_script(raw: &str) -> Result<Vec<WalkCommand>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_walk_command)
        .collect()
}
