//! Speaker boundaries of a generated script.
//!
//! The script writer emits a JSON-like conversation, one turn per line:
//!
//! ```text
//! {
//!   "Speaker 1": "Welcome to our podcast!",
//!   "Speaker 2": "Hi! Can you explain..."
//! }
//! ```
//!
//! Keys repeat, so the script is not parsed as JSON. Every
//! `"Speaker N": "..."` pair is matched on its own, so compact output with
//! several turns on one line splits the same way.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Value is a JSON string literal: escaped quotes stay inside, the next pair does not
static TURN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""Speaker\s+(\d+)"\s*:\s*"((?:[^"\\\n]|\\.)*)""#).expect("turn regex")
});

/// One utterance of the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptTurn {
    pub speaker_id: u32,
    pub text: String,
}

/// First `"Speaker N": "utterance"` turn of `line`, `None` when there is none.
pub fn parse_script_line(line: &str) -> Option<ScriptTurn> {
    turns(line).next()
}

/// All turns of `script`, in order, including several turns on one line.
pub fn parse_script(script: &str) -> Vec<ScriptTurn> {
    script.lines().flat_map(turns).collect()
}

fn turns(text: &str) -> impl Iterator<Item = ScriptTurn> + '_ {
    TURN.captures_iter(text).filter_map(|captures| {
        let speaker_id = captures[1].parse().ok()?;
        Some(ScriptTurn {
            speaker_id,
            text: unescape(&captures[2]),
        })
    })
}

fn unescape(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{raw}\""))
        .unwrap_or_else(|_| raw.replace("\\\"", "\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_turn_with_trailing_comma() {
        let turn = parse_script_line(r#"  "Speaker 1": "Welcome to our podcast!","#).unwrap();
        assert_eq!(turn.speaker_id, 1);
        assert_eq!(turn.text, "Welcome to our podcast!");
    }

    #[test]
    fn parses_last_turn_without_comma() {
        let turn = parse_script_line(r#""Speaker 2": "Oh, that's cool!""#).unwrap();
        assert_eq!(turn.speaker_id, 2);
        assert_eq!(turn.text, "Oh, that's cool!");
    }

    #[test]
    fn unescapes_quotes() {
        let turn = parse_script_line(r#""Speaker 1": "She said \"hmm\" twice","#).unwrap();
        assert_eq!(turn.text, r#"She said "hmm" twice"#);
    }

    #[test]
    fn keeps_text_with_stray_backslash() {
        let turn = parse_script_line(r#""Speaker 1": "C:\path \"quoted\"""#).unwrap();
        assert_eq!(turn.text, r#"C:\path "quoted""#);
    }

    #[test]
    fn ignores_structure_and_prose() {
        for line in ["{", "}", "", "Here is your script:", r#""Host": "hello""#] {
            assert_eq!(parse_script_line(line), None, "line {line:?}");
        }
    }

    #[test]
    fn first_turn_of_a_shared_line_stops_at_its_quote() {
        let turn = parse_script_line(r#""Speaker 1": "Hi", "Speaker 2": "Hello""#).unwrap();
        assert_eq!(turn.speaker_id, 1);
        assert_eq!(turn.text, "Hi");
    }

    #[test]
    fn splits_several_turns_on_one_line() {
        let turns = parse_script(r#""Speaker 1": "Hi", "Speaker 2": "Hello \"there\"""#);
        assert_eq!(
            turns,
            vec![
                ScriptTurn {
                    speaker_id: 1,
                    text: "Hi".to_string()
                },
                ScriptTurn {
                    speaker_id: 2,
                    text: r#"Hello "there""#.to_string()
                },
            ]
        );
    }

    #[test]
    fn parses_compact_json_script() {
        let script = r#"{"Speaker 1": "Welcome!", "Speaker 2": "Thanks, glad to be here.", "Speaker 1": "Let's go."}"#;
        let turns = parse_script(script);
        let ids: Vec<_> = turns.iter().map(|t| t.speaker_id).collect();
        assert_eq!(ids, vec![1, 2, 1]);
        assert_eq!(turns[1].text, "Thanks, glad to be here.");
        assert_eq!(parse_script_line(script).unwrap().text, "Welcome!");
    }

    #[test]
    fn parse_script_preserves_order() {
        let script = r#"{
  "Speaker 1": "One",
  "Speaker 2": "Two",
  "Speaker 1": "Three"
}
"#;
        let turns = parse_script(script);
        let ids: Vec<_> = turns.iter().map(|t| t.speaker_id).collect();
        let texts: Vec<_> = turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(ids, vec![1, 2, 1]);
        assert_eq!(texts, vec!["One", "Two", "Three"]);
    }
}
