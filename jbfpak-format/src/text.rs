//! ASCII text handling for titles, descriptions and filenames.

/// Decode `data` as ASCII, dropping control bytes and trimming whitespace.
///
/// Returns `None` when any byte falls outside the ASCII range; callers
/// treat that as "not text" rather than an error.
pub fn decode_ascii(data: &[u8]) -> Option<String> {
    if !data.is_ascii() {
        return None;
    }
    let cleaned: String = data
        .iter()
        .copied()
        .filter(|&b| b >= 0x20)
        .map(char::from)
        .collect();
    Some(cleaned.trim().to_string())
}

/// Reduce `data` to its printable ASCII bytes and trim whitespace.
///
/// Used for the lock-name region, where malformed text must degrade
/// instead of aborting the header decode.
pub fn printable_ascii(data: &[u8]) -> String {
    let cleaned: String = data
        .iter()
        .copied()
        .filter(|&b| (0x20..0x7F).contains(&b))
        .map(char::from)
        .collect();
    cleaned.trim().to_string()
}

/// Characters that never survive into an output filename.
const FILENAME_REJECTS: &[char] = &['\\', '/', '.', '*', '?', ':', '"', '<', '>', '|', '!'];

/// Strip filesystem-hostile characters and control bytes from a title.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !FILENAME_REJECTS.contains(c) && *c as u32 >= 0x20)
        .collect();
    cleaned.trim().to_string()
}
