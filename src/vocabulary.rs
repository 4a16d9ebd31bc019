// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Spoken-word to sign lookup.
//!
//! Maps transcribed speech onto the sign vocabulary so a client can play
//! back the matching sign images in order.

use serde::Serialize;

/// Base URL path under which sign images are served.
pub const SIGN_MEDIA_ROOT: &str = "/media/signs";

/// One sign in a lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignEntry {
    /// Display label, e.g. `"THANK YOU"`.
    pub label: &'static str,
    /// Image path under [`SIGN_MEDIA_ROOT`].
    pub image: String,
}

/// (word, label, image file)
const SIGNS: &[(&str, &str, &str)] = &[
    ("hello", "HELLO", "hello.png"),
    ("hi", "HELLO", "hello.png"),
    ("yes", "YES", "yes.png"),
    ("no", "NO", "no.png"),
    ("bye", "BYE", "bye.png"),
    ("goodbye", "BYE", "bye.png"),
    ("call", "CALL ME", "call_me.png"),
    ("peace", "PEACE", "peace.png"),
    ("love", "I LOVE YOU", "i_love_you.png"),
    ("ok", "OK", "ok.png"),
    ("welcome", "WELCOME", "welcome.png"),
    ("thankyou", "THANK YOU", "thankyou.png"),
];

/// Look up a single word (case-insensitive).
#[must_use]
pub fn lookup_word(word: &str) -> Option<SignEntry> {
    let word = word.to_lowercase();
    SIGNS.iter().find(|(w, _, _)| *w == word).map(|&(_, label, file)| SignEntry {
        label,
        image: format!("{SIGN_MEDIA_ROOT}/{file}"),
    })
}

/// Translate free text into a sequence of signs.
///
/// Words are split on whitespace and matched case-insensitively. Unknown
/// words are skipped; repeats are kept.
#[must_use]
pub fn lookup(text: &str) -> Vec<SignEntry> {
    text.split_whitespace().filter_map(lookup_word).collect()
}
