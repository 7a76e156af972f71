//! Encodes `Char`/`Key` steps into command lines for the keystroke helper's
//! mini-language (`§4.2`).

use crate::types::KeyName;

/// Encode a non-character key as its command line.
#[must_use]
pub const fn encode_key(key: KeyName) -> &'static str {
    match key {
        KeyName::Enter => "{ENTER}",
        KeyName::Backspace => "{BACKSPACE}",
        KeyName::Left => "{LEFT}",
        KeyName::Right => "{RIGHT}",
        KeyName::Home => "{HOME}",
        KeyName::End => "{END}",
        KeyName::CtrlHome => "^{HOME}",
        KeyName::CtrlEnd => "^{END}",
    }
}

/// Encode a single typed character as its command line, escaping any
/// codepoint that would otherwise be misread as a brace/chord token by the
/// helper's tokenizer.
#[must_use]
pub fn encode_char(ch: char) -> String {
    match ch {
        '\t' => "{TAB}".to_string(),
        '{' => "{{".to_string(),
        '}' => "}}".to_string(),
        '+' => "{+}".to_string(),
        '^' => "{^}".to_string(),
        '%' => "{%}".to_string(),
        '~' => "{~}".to_string(),
        '(' => "{(}".to_string(),
        ')' => "{)}".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys_round_trip_their_tokens() {
        assert_eq!(encode_key(KeyName::Enter), "{ENTER}");
        assert_eq!(encode_key(KeyName::CtrlEnd), "^{END}");
    }

    #[test]
    fn tab_is_sent_as_named_key_token() {
        assert_eq!(encode_char('\t'), "{TAB}");
    }

    #[test]
    fn brace_and_chord_characters_are_escaped() {
        assert_eq!(encode_char('{'), "{{");
        assert_eq!(encode_char('^'), "{^}");
    }

    #[test]
    fn ordinary_characters_pass_through() {
        assert_eq!(encode_char('a'), "a");
    }
}
