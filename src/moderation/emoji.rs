use lazy_static::lazy_static;
use regex::Regex;

/// Chatwork emoticon shortcodes, written unescaped.
const EMOJI_CODES: &[&str] = &[
    "roger", "bow", "cracker", "dance", "clap", "y", "sweat", "blush", "inlove", "talk", "yawn",
    "puke", "emo", "nod", "shake", "^^;", ":/", "whew", "flex", "gogo", "think", "please", "quick",
    "anger", "devil", "lightbulb", "h", "F", "eat", "^", "coffee", "beer", "handshake",
];

lazy_static! {
    static ref EMOJI_RE: Regex = {
        let alternation = EMOJI_CODES
            .iter()
            .map(|code| regex::escape(code))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\((?:{alternation})\)")).expect("emoji pattern is valid")
    };
}

/// Counts non-overlapping `(code)` emoticons in a message body.
pub fn count_emojis(text: &str) -> usize {
    EMOJI_RE.find_iter(text).count()
}
