//! Line-oriented key translation.
//!
//! Each character of an input line is one key press:
//!
//! | key | input |
//! |-----|-------|
//! | `w` `a` `s` `d` | move up / left / down / right |
//! | `.` or space | search (wait a turn) |
//! | `q` | quit |
//!
//! A line of the form `close N` closes client `N`'s window instead.
use runtime::{ClientId, Input};

pub fn parse_key(key: char) -> Option<Input> {
    let input = match key.to_ascii_lowercase() {
        'w' => Input::Up,
        'a' => Input::Left,
        's' => Input::Down,
        'd' => Input::Right,
        '.' | ' ' => Input::Search,
        'q' => Input::QuitGame,
        _ => return None,
    };
    Some(input)
}

/// Translates one line of keys. Unknown keys are skipped; an empty line is
/// a single [`Input::None`].
pub fn parse_line(line: &str) -> Vec<Input> {
    if let Some(id) = line.trim().strip_prefix("close ") {
        return match id.trim().parse() {
            Ok(id) => vec![Input::CloseWindow(ClientId(id))],
            Err(_) => Vec::new(),
        };
    }

    if line.is_empty() {
        return vec![Input::None];
    }
    line.chars().filter_map(parse_key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_inputs() {
        assert_eq!(
            parse_line("wasd. q"),
            [
                Input::Up,
                Input::Left,
                Input::Down,
                Input::Right,
                Input::Search,
                Input::Search,
                Input::QuitGame,
            ]
        );
    }

    #[test]
    fn unknown_keys_are_skipped() {
        assert_eq!(parse_line("xWz"), [Input::Up]);
        assert!(parse_line("zzz").is_empty());
    }

    #[test]
    fn empty_line_is_idle() {
        assert_eq!(parse_line(""), [Input::None]);
    }

    #[test]
    fn close_command_targets_a_client() {
        assert_eq!(parse_line("close 2"), [Input::CloseWindow(ClientId(2))]);
        assert!(parse_line("close two").is_empty());
    }
}
