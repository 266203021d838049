use crate::models::SearchResultItem;

pub const NO_RESULTS: &str = "No results to display.";
const MISSING: &str = "N/A";
const SEPARATOR: &str = "\n\n---\n\n";

/// Plain-text listing of a result set, one numbered block per row.
pub fn render_results(results: &[SearchResultItem]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(index, item)| render_item(index + 1, item))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

pub fn render_item(rank: usize, item: &SearchResultItem) -> String {
    if item.is_rate_limit_placeholder() {
        return format!("{}\n{}", item.title, item.content_snippet);
    }

    let lines = [
        format!("Result #{rank}"),
        format!("Title: {}", or_missing(&item.title)),
        format!("Preacher: {}", or_missing(&item.preacher_name)),
        format!("Section: {}", or_missing(&item.section_name)),
        format!("Bi-Encoder Distance: {}", score(item.distance)),
        format!("Reranker Score: {}", score(item.rerank_score)),
        format!("Chunk ID: {}", item.id),
        "Sources:".to_string(),
        format!("  Video: {}", link(&item.video_url)),
        format!("  MP4: {}", link(&item.media_video_url)),
        format!("  MP3: {}", link(&item.media_audio_url)),
        format!("  VTT (Captions): {}", link(&item.caption_url)),
        format!("Document: {}", item.content_snippet),
    ];

    lines.join("\n")
}

fn or_missing(value: &str) -> &str {
    if value.trim().is_empty() {
        MISSING
    } else {
        value
    }
}

fn link(value: &Option<String>) -> &str {
    value.as_deref().map(or_missing).unwrap_or(MISSING)
}

fn score(value: Option<f64>) -> String {
    match value {
        Some(number) if number.is_finite() => format!("{number:.4}"),
        _ => MISSING.to_string(),
    }
}
