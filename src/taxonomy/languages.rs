/// Colour used for any language without a dedicated entry.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#7C7CFF";

/// Display colour for a language name. Matching is exact.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "TypeScript" => "#3178C6",
        "JavaScript" => "#F7DF1E",
        "Python" => "#3776AB",
        "Rust" => "#DEA584",
        "Go" => "#00ADD8",
        "Java" => "#007396",
        "C++" => "#00599C",
        "C" => "#555555",
        "HTML" => "#E34C26",
        "CSS" => "#563D7C",
        "Vue" => "#4FC08D",
        "React" => "#61DAFB",
        "Svelte" => "#FF3E00",
        "Swift" => "#F05138",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}
