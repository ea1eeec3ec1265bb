/*!
 * Splitting oversized page text into request-sized chunks.
 *
 * A page whose text exceeds the provider's per-request character limit is
 * split at newline boundaries near the limit so sentences survive intact.
 * Chunks are translated sequentially and rejoined in order, so a page is
 * still a single translation unit from the pipeline's point of view.
 */

/// Split `text` into chunks of at most `chunk_size` characters.
///
/// Prefers to break at the last newline within a chunk, but never below
/// half the limit, so a long unbroken paragraph still makes progress.
/// Returns at least one chunk for non-empty input; empty input yields
/// no chunks.
pub fn split_text(text: &str, chunk_size: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let chunk_size = chunk_size.max(1);
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = start + chunk_size;
        if end >= chars.len() {
            chunks.push(chars[start..].iter().collect());
            break;
        }

        // Break at the last newline in the chunk, if it leaves enough behind
        if let Some(offset) = chars[start..end].iter().rposition(|&c| c == '\n') {
            if offset > chunk_size / 2 {
                end = start + offset + 1;
            }
        }

        chunks.push(chars[start..end].iter().collect());
        start = end;
    }

    chunks
}
