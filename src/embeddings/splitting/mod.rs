#[cfg(test)]
mod tests;

/// Maximum length in characters of a section's display label.
pub const SECTION_LABEL_MAX_CHARS: usize = 40;

/// Split document content into paragraph sections.
///
/// A section is a maximal run of text between blank-line boundaries (lines
/// containing only whitespace count as blank). Sections are trimmed and
/// whitespace-only results are dropped; the original order is preserved.
#[inline]
pub fn split_sections(content: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            flush_section(&mut sections, &mut current);
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    flush_section(&mut sections, &mut current);

    sections
}

fn flush_section(sections: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sections.push(trimmed.to_string());
    }
    current.clear();
}

/// Derive a short display identifier from a section's content prefix.
///
/// Used for listings and debugging output, not uniqueness.
#[inline]
pub fn section_label(text: &str) -> String {
    text.chars().take(SECTION_LABEL_MAX_CHARS).collect()
}
