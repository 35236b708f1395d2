//! Marker-based field extraction from free-form model replies.
//!
//! A field starts at `LABEL:` where the label is matched case-sensitively and
//! must not be the tail of a longer identifier (`CLEANED_INGREDIENTS:` does not
//! count as `INGREDIENTS:`). The first occurrence of a label wins. A block
//! value runs until the next occurrence of any label in the same
//! [`MarkerSet`], or end of text.

use std::sync::LazyLock;

use regex::Regex;

// `*` needs trailing space so `**bold**` lines stay continuations.
static HYPHEN_BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-•]\s*|\*\s+)").expect("Invalid hyphen bullet regex")
});

static NUMBERED_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("Invalid numbered step regex"));

/// How items in a line-based list are introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bullet {
    /// `- item` or `* item`, used for ingredient-like fields
    Hyphen,
    /// `1. step`, used for instruction-like fields
    Numbered,
}

impl Bullet {
    fn pattern(self) -> &'static Regex {
        match self {
            Bullet::Hyphen => &HYPHEN_BULLET,
            Bullet::Numbered => &NUMBERED_STEP,
        }
    }

    /// If `line` opens a new item, return the item text after the bullet.
    fn strip<'a>(self, line: &'a str) -> Option<&'a str> {
        self.pattern().find(line).map(|m| line[m.end()..].trim())
    }
}

#[derive(Debug)]
struct Marker {
    label: &'static str,
    pattern: Regex,
}

/// The labels one reply format recognizes.
#[derive(Debug)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    /// Build a marker set from static labels.
    pub fn new(labels: &[&'static str]) -> Self {
        let markers = labels
            .iter()
            .map(|&label| Marker {
                label,
                pattern: Regex::new(&format!(
                    r"(?:^|[^A-Za-z0-9_])({}):",
                    regex::escape(label)
                ))
                .expect("Invalid marker regex"),
            })
            .collect();
        Self { markers }
    }

    /// Find every marker occurrence in `text`.
    pub fn locate<'t>(&self, text: &'t str) -> Located<'t> {
        let mut hits: Vec<Hit> = self
            .markers
            .iter()
            .flat_map(|marker| {
                marker.pattern.captures_iter(text).filter_map(move |caps| {
                    let label = caps.get(1)?;
                    Some(Hit {
                        label: marker.label,
                        start: label.start(),
                        value_start: label.end() + 1,
                    })
                })
            })
            .collect();
        hits.sort_by_key(|h| h.start);
        Located { text, hits }
    }
}

#[derive(Debug, Clone, Copy)]
struct Hit {
    label: &'static str,
    start: usize,
    value_start: usize,
}

/// Marker positions within one reply.
#[derive(Debug)]
pub struct Located<'t> {
    text: &'t str,
    hits: Vec<Hit>,
}

impl<'t> Located<'t> {
    fn first(&self, label: &str) -> Option<Hit> {
        self.hits.iter().copied().find(|h| h.label == label)
    }

    /// Whether `label` appears at all.
    pub fn has(&self, label: &str) -> bool {
        self.first(label).is_some()
    }

    /// Text between `label:` and the next recognized marker (or end of text),
    /// trimmed. `None` if the label is absent.
    pub fn block(&self, label: &str) -> Option<&'t str> {
        let hit = self.first(label)?;
        let end = self
            .hits
            .iter()
            .find(|h| h.start >= hit.value_start)
            .map(|h| h.start)
            .unwrap_or(self.text.len());
        Some(clean(&self.text[hit.value_start..end]))
    }

    /// Rest of the marker's line. When that is blank, the first non-blank line
    /// of the block instead. `None` if the label is absent or nothing follows it.
    pub fn scalar(&self, label: &str) -> Option<String> {
        let hit = self.first(label)?;
        let rest = &self.text[hit.value_start..];
        let line = clean(rest.lines().next().unwrap_or(""));
        if !line.is_empty() {
            return Some(line.to_string());
        }

        self.block(label)?
            .lines()
            .map(clean)
            .find(|l| !l.is_empty())
            .map(str::to_string)
    }
}

/// Trim whitespace, markdown emphasis and heading marks around a captured value.
fn clean(value: &str) -> &str {
    value.trim_matches(|c: char| c == '*' || c == '#' || c.is_whitespace())
}

/// Parse `[a, 'b', "c"]` into its items. `None` if `value` is not bracketed.
pub fn bracketed_list(value: &str) -> Option<Vec<String>> {
    let value = value.trim();
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    Some(
        inner
            .split(',')
            .map(|piece| strip_quotes(piece.trim()).trim())
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Remove one layer of matching single or double quotes.
fn strip_quotes(piece: &str) -> &str {
    for quote in ['"', '\''] {
        if piece.len() >= 2 && piece.starts_with(quote) && piece.ends_with(quote) {
            return &piece[1..piece.len() - 1];
        }
    }
    piece
}

/// Group non-blank lines into items. A line matching `bullet` opens a new
/// item; any other line is appended to the item under construction.
pub fn bulleted_items(value: &str, bullet: Bullet) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();

    for line in value.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match bullet.strip(line) {
            Some(text) => {
                if !current.is_empty() {
                    items.push(std::mem::take(&mut current));
                }
                current.push_str(text);
            }
            None => {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(line);
            }
        }
    }

    if !current.is_empty() {
        items.push(current);
    }
    items
}

/// A bracketed literal filling the value, or failing that its first line.
///
/// Models often follow `[a, b]` with a sign-off on the next line.
fn leading_bracketed_list(value: &str) -> Option<Vec<String>> {
    bracketed_list(value).or_else(|| {
        value
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .and_then(bracketed_list)
    })
}

/// A list written either as a bracketed literal or as bulleted lines.
pub fn itemized_list(value: &str, bullet: Bullet) -> Vec<String> {
    leading_bracketed_list(value).unwrap_or_else(|| bulleted_items(value, bullet))
}

/// A list written as a bracketed literal, hyphen bullets, or a bare
/// comma-separated line.
pub fn delimited_list(value: &str) -> Vec<String> {
    if let Some(items) = leading_bracketed_list(value) {
        return items;
    }

    let first_line = value.lines().map(str::trim).find(|l| !l.is_empty());
    if first_line.is_some_and(|l| Bullet::Hyphen.strip(l).is_some()) {
        return bulleted_items(value, Bullet::Hyphen);
    }

    value
        .split([',', '\n'])
        .map(|piece| strip_quotes(piece.trim()).trim())
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}
