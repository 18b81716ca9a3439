//! Normalisation of pasted text: invisible characters, blank-line runs,
//! repeated spaces and the many bullet glyphs people decorate lists with.

use super::document::Document;

/// Invisible characters removed by [`Document::clear`]; NBSP becomes a
/// regular space.
const INVISIBLE: &[(&str, &str)] = &[
    ("\u{200E}", ""), // LRM
    ("\u{200F}", ""), // RLM
    ("\u{200B}", ""), // ZWSP
    ("\u{202A}", ""), // LRE
    ("\u{202B}", ""), // RLE
    ("\u{00A0}", " "),
    ("\u{00AD}", ""), // soft hyphen
    ("\u{200C}", ""), // ZWNJ
    ("\u{200D}", ""), // ZWJ
    ("\u{FEFF}", ""), // BOM
];

/// Line-start bullet glyphs and their replacement, applied in order.
const BULLETS: &[(&str, &str)] = &[
    ("\n\u{2714}\u{FE0F}", "\n• "),
    ("\n\u{2714}", "\n• "),
    ("\n\u{25AA}\u{FE0F}", "\n• "),
    ("\n\u{25CF} ", "\n• "),
    ("\n\u{25FC} ", "\n• "),
    ("\n\u{25CB} ", "\n• "),
    ("\n\u{00B7} ", "\n• "),
    ("\n\u{2014} ", "\n• "),
    ("\n\u{1F7E3} ", "\n• "),
    ("\n\u{26A0}\u{FE0F} ", "\n• "),
    ("\n\u{2705} ", "\n• "),
    ("\n\u{2705}", "\n• "),
    ("\n\u{2733}\u{FE0F}", "\n• "),
    ("\n\u{1F539}\u{FE0F}", "\n• "),
    ("\n\u{1F539} \u{FE0F}", "\n• "),
    ("\n\u{1F4A1}\u{FE0F}", "\n• "),
    ("\n\u{1F4A1} \u{FE0F}", "\n• "),
    ("\n\u{1F4CD}\u{FE0F}", "\n• "),
    ("\n\u{1F4CC}  ", "\n• "),
    ("\n\u{1F4CC} ", "\n• "),
    ("\n\u{1F4CC}", "\n• "),
    ("\n\u{1F535}", "\n• "),
    ("\n\u{1F9FF}", "\n"),
    ("\n\u{2757}\u{FE0F}", "\n• "),
    ("\n\u{1F525}\u{FE0F}", "\n• "),
    ("\n\u{2B55}\u{FE0F} ", "\n• "),
    ("\n\u{1F538} ", "\n• "),
    ("\n\u{25FC}\u{FE0F} ", "\n• "),
    ("\n\u{25FC}\u{FE0F}", "\n• "),
    ("\n\u{25FE}\u{FE0F} ", "\n• "),
    ("\n\u{25FE}\u{FE0F}", "\n• "),
    ("\n\u{26A0}\u{FE0F}", "\n• "),
    ("\no •", "\n• "),
    ("\no ", "\n• "),
    ("\n• -", "\n• "),
    ("\n- ", "\n• "),
    ("\n-", "\n• "),
    // keep list items together
    ("\n\n• ", "\n• "),
    ("\n\n  •", "\n• "),
];

/// Code point ranges treated as emoji when cleaning headings.
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x200D, 0x200D),
    (0x20E3, 0x20E3),
    (0x231A, 0x231B),
    (0x23CF, 0x23CF),
    (0x23E9, 0x23F3),
    (0x24C2, 0x24C2),
    (0x2500, 0x2BEF),
    (0x3030, 0x3030),
    (0xFE0F, 0xFE0F),
    (0x1F000, 0x1FAFF),
];

pub fn is_emoji(ch: char) -> bool {
    let cp = u32::from(ch);
    EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

pub fn is_emoji_or_space(ch: char) -> bool {
    ch == ' ' || is_emoji(ch)
}

pub fn remove_emojis(s: &str) -> String {
    s.chars().filter(|&ch| !is_emoji(ch)).collect()
}

/// Applies the bullet table to a plain string.
pub fn normalize_bullets(s: &str) -> String {
    BULLETS
        .iter()
        .fold(s.to_string(), |acc, (old, new)| acc.replace(old, new))
}

impl Document {
    /// Replaces `old` until it no longer occurs. `new` must be shorter than
    /// `old` so the loop ends.
    fn replace_while_present(&self, old: &str, new: &str) -> Self {
        debug_assert!(new.len() < old.len());
        let mut doc = self.replace(old, new);
        while doc.contains(old) {
            doc = doc.replace(old, new);
        }
        doc
    }

    /// Normalises whitespace and list decoration, keeping spans attached to
    /// the text they formatted.
    ///
    /// Steps, in order: invisible characters and blank-line runs, runs of
    /// spaces, `.;`/`;.` artifacts, line-start bullet glyphs, then
    /// [`Document::strip`].
    pub fn clear(&self) -> Self {
        let mut doc = INVISIBLE
            .iter()
            .fold(self.clone(), |doc, (old, new)| doc.replace(old, new));
        for k in (1..=10).rev() {
            let blank_line = format!("\n{}\n", " ".repeat(k));
            doc = doc.replace_while_present(&blank_line, "\n\n");
        }
        doc = doc.replace_while_present("\n\n\n", "\n\n");

        doc = doc.replace_while_present("  ", " ");
        doc = doc.replace(".;", ".").replace(";.", ".");
        doc = BULLETS
            .iter()
            .fold(doc, |doc, (old, new)| doc.replace(old, new));

        let mut doc = doc.strip();
        crate::spans::adjust::trim_edges(&doc.units, &mut doc.spans);
        crate::spans::adjust::prune(&doc.units, &mut doc.spans);
        Document::from_parts(doc.units, doc.spans)
    }
}
