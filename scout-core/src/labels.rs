//! Label presentation helpers and the built-in filter catalogs.

/// Languages offered as search filters.
pub const AVAILABLE_LANGUAGES: [&str; 20] = [
    "JavaScript",
    "Python",
    "Java",
    "TypeScript",
    "C++",
    "C#",
    "PHP",
    "Ruby",
    "Go",
    "Rust",
    "Swift",
    "Kotlin",
    "Shell",
    "HTML",
    "CSS",
    "C",
    "Dart",
    "Scala",
    "R",
    "Perl",
];

/// Issue labels offered as search filters.
pub const COMMON_ISSUE_LABELS: [&str; 20] = [
    "bug",
    "enhancement",
    "documentation",
    "good first issue",
    "help wanted",
    "question",
    "feature",
    "duplicate",
    "invalid",
    "wontfix",
    "dependencies",
    "security",
    "performance",
    "refactoring",
    "testing",
    "ui",
    "backend",
    "frontend",
    "api",
    "database",
];

/// Readable text colour on a label background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    pub fn hex(self) -> &'static str {
        match self {
            TextColor::Black => "000000",
            TextColor::White => "ffffff",
        }
    }
}

/// Parse `rrggbb`, with or without a leading `#`.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Black on light backgrounds, white on dark ones, by perceived luminance.
///
/// Unparseable colours are treated as dark.
pub fn label_text_color(color: &str) -> TextColor {
    let Some((r, g, b)) = parse_hex_color(color) else {
        return TextColor::White;
    };
    let luminance = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
    if luminance > 0.5 {
        TextColor::Black
    } else {
        TextColor::White
    }
}

/// Catalog entries containing `needle`, ignoring case.
pub fn search_catalog<'a>(catalog: &[&'a str], needle: &str) -> Vec<&'a str> {
    let needle = needle.trim().to_lowercase();
    catalog
        .iter()
        .copied()
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .collect()
}
