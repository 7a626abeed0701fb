// src/exec/ansi.rs

use std::sync::LazyLock;

use regex::Regex;

/// CSI sequences (colours, cursor movement) and OSC sequences (titles,
/// hyperlinks) terminated by BEL or ST.
static ANSI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)")
        .expect("ansi escape regex")
});

/// Remove terminal escape sequences from tool output.
pub fn strip_ansi(value: &str) -> String {
    ANSI.replace_all(value, "").into_owned()
}
