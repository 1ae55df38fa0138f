/// Paragraphs joined by single spaces.
pub fn render_narrative(paragraphs: &[String]) -> String {
    paragraphs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
