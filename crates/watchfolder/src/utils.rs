//! Filename and content helpers for torrent uploads

use sha1::{Digest, Sha1};

/// Extension the torrent client looks for
pub const TORRENT_EXTENSION: &str = ".torrent";

/// Stem used when sanitizing leaves nothing usable
const FALLBACK_STEM: &str = "upload";

/// Maximum stem length in bytes, well under common 255-byte name limits
const MAX_STEM_BYTES: usize = 200;

/// Nesting limit when walking bencoded data
const MAX_BENCODE_DEPTH: usize = 64;

/// Check whether a file name has the `.torrent` extension (case-insensitive)
pub fn is_torrent_filename(name: &str) -> bool {
    let name = name.trim_end();
    let split = match name.len().checked_sub(TORRENT_EXTENSION.len()) {
        Some(split) if split > 0 => split,
        _ => return false,
    };
    name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(TORRENT_EXTENSION)
}

/// Turn a client-supplied file name into a safe name inside the watch folder
///
/// Directory components are dropped, characters that are unsafe on common
/// filesystems are replaced with `_`, leading dots are stripped so the file
/// is never hidden, and the stem is bounded in length. The `.torrent`
/// extension is normalized to lowercase.
///
/// Returns `None` when the name does not end in `.torrent`.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(name)
        .trim();
    if !is_torrent_filename(base) {
        return None;
    }

    let stem = &base[..base.len() - TORRENT_EXTENSION.len()];
    let cleaned: String = stem
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let cleaned = cleaned
        .trim_start_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_end();
    let cleaned = truncate_on_char_boundary(cleaned, MAX_STEM_BYTES).trim_end();

    let stem = if cleaned.is_empty() {
        FALLBACK_STEM
    } else {
        cleaned
    };

    Some(format!("{stem}{TORRENT_EXTENSION}"))
}

fn truncate_on_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Cheap check that the payload is a bencoded dictionary
pub fn looks_like_torrent(data: &[u8]) -> bool {
    data.first() == Some(&b'd')
}

/// Extract the BitTorrent info hash from .torrent file data
///
/// Walks the top-level bencoded dictionary, finds the `info` key and
/// returns the lowercase hex SHA-1 of the raw `info` value bytes.
pub fn extract_info_hash(data: &[u8]) -> Option<String> {
    if !looks_like_torrent(data) {
        return None;
    }

    let mut pos = 1;
    while *data.get(pos)? != b'e' {
        let (key, value_start) = read_bytes(data, pos)?;
        let value_end = skip_value(data, value_start, 0)?;
        if key == b"info" {
            let hash = Sha1::digest(&data[value_start..value_end]);
            return Some(format!("{:x}", hash));
        }
        pos = value_end;
    }

    None
}

/// Read a `<len>:<bytes>` string at `pos`, returning it and the next position
fn read_bytes(data: &[u8], pos: usize) -> Option<(&[u8], usize)> {
    let colon = pos + data.get(pos..)?.iter().position(|&b| b == b':')?;
    let len: usize = std::str::from_utf8(&data[pos..colon]).ok()?.parse().ok()?;
    let start = colon + 1;
    let end = start.checked_add(len)?;
    Some((data.get(start..end)?, end))
}

/// Return the position just past the bencoded value starting at `pos`
fn skip_value(data: &[u8], pos: usize, depth: usize) -> Option<usize> {
    if depth > MAX_BENCODE_DEPTH {
        return None;
    }

    match *data.get(pos)? {
        b'i' => {
            let end = pos + data.get(pos..)?.iter().position(|&b| b == b'e')?;
            Some(end + 1)
        }
        b'l' => {
            let mut cur = pos + 1;
            while *data.get(cur)? != b'e' {
                cur = skip_value(data, cur, depth + 1)?;
            }
            Some(cur + 1)
        }
        b'd' => {
            let mut cur = pos + 1;
            while *data.get(cur)? != b'e' {
                let (_, value_start) = read_bytes(data, cur)?;
                cur = skip_value(data, value_start, depth + 1)?;
            }
            Some(cur + 1)
        }
        b'0'..=b'9' => read_bytes(data, pos).map(|(_, end)| end),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_torrent_filename() {
        assert!(is_torrent_filename("ubuntu.torrent"));
        assert!(is_torrent_filename("UBUNTU.TORRENT"));
        assert!(is_torrent_filename("a.b.Torrent"));
        assert!(!is_torrent_filename("ubuntu.iso"));
        assert!(!is_torrent_filename("ubuntu.torrent.exe"));
        assert!(!is_torrent_filename("torrent"));
        assert!(!is_torrent_filename(""));
    }

    #[test]
    fn test_sanitize_keeps_plain_names() {
        assert_eq!(
            sanitize_filename("Movie (2024) [1080p].torrent").as_deref(),
            Some("Movie (2024) [1080p].torrent")
        );
        assert_eq!(sanitize_filename("Ñandú.torrent").as_deref(), Some("Ñandú.torrent"));
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(
            sanitize_filename("../../etc/passwd.torrent").as_deref(),
            Some("passwd.torrent")
        );
        assert_eq!(
            sanitize_filename("C:\\Users\\me\\file.torrent").as_deref(),
            Some("file.torrent")
        );
        assert_eq!(sanitize_filename("/abs/path/x.torrent").as_deref(), Some("x.torrent"));
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(
            sanitize_filename("a<b>c:d\"e|f?g*h.torrent").as_deref(),
            Some("a_b_c_d_e_f_g_h.torrent")
        );
        assert_eq!(sanitize_filename("tab\there.torrent").as_deref(), Some("tab_here.torrent"));
    }

    #[test]
    fn test_sanitize_never_hidden_or_empty() {
        assert_eq!(sanitize_filename(".hidden.torrent").as_deref(), Some("hidden.torrent"));
        assert_eq!(sanitize_filename("...torrent").as_deref(), Some("upload.torrent"));
        assert_eq!(sanitize_filename(".torrent").as_deref(), None);
        assert_eq!(sanitize_filename("   .TORRENT").as_deref(), None);
        assert_eq!(sanitize_filename("  .x.TORRENT").as_deref(), Some("x.torrent"));
        assert_eq!(sanitize_filename(". .x.torrent").as_deref(), Some("x.torrent"));
        assert_eq!(sanitize_filename("  . .movie.torrent").as_deref(), Some("movie.torrent"));
        assert_eq!(sanitize_filename(". . ..torrent").as_deref(), Some("upload.torrent"));
    }

    #[test]
    fn test_sanitize_rejects_other_extensions() {
        assert!(sanitize_filename("movie.mkv").is_none());
        assert!(sanitize_filename("x.torrent/evil.sh").is_none());
    }

    #[test]
    fn test_sanitize_bounds_length() {
        let long = format!("{}.torrent", "é".repeat(300));
        let name = sanitize_filename(&long).unwrap();
        assert!(name.ends_with(".torrent"));
        assert!(name.len() <= MAX_STEM_BYTES + TORRENT_EXTENSION.len());
        assert!(name.starts_with('é'));
    }

    #[test]
    fn test_looks_like_torrent() {
        assert!(looks_like_torrent(b"d4:infodee"));
        assert!(!looks_like_torrent(b""));
        assert!(!looks_like_torrent(b"<html>"));
    }

    #[test]
    fn test_extract_info_hash() {
        assert!(extract_info_hash(b"not a torrent").is_none());
        assert!(extract_info_hash(b"").is_none());
        assert!(extract_info_hash(b"d8:announcei0ee").is_none());

        let data = b"d8:announce14:http://tr/anno4:infod6:lengthi42e4:name4:teste8:url-listle";
        let info = b"d6:lengthi42e4:name4:teste";
        let expected = format!("{:x}", Sha1::digest(info));
        assert_eq!(extract_info_hash(data), Some(expected));
    }

    #[test]
    fn test_extract_info_hash_ignores_lookalike_strings() {
        // "4:infod" appears inside a string value before the real key
        let data = b"d7:comment7:4:infod4:infod4:name1:xee";
        let expected = format!("{:x}", Sha1::digest(b"d4:name1:xe"));
        assert_eq!(extract_info_hash(data), Some(expected));
    }

    #[test]
    fn test_extract_info_hash_truncated() {
        assert!(extract_info_hash(b"d4:infod4:name4:te").is_none());
        assert!(extract_info_hash(b"d4:info").is_none());
    }
}
