//! CP866 encoding utilities for Cyrillic ticket output
//!
//! Receipt hardware in the target region expects CP866 (the DOS Cyrillic
//! code page, ESC/POS code page 17). This module provides utilities for:
//! - Calculating CP866 string widths
//! - Truncating/padding/wrapping strings to CP866 widths
//! - Converting UTF-8 to CP866 while preserving ESC/POS commands

use tracing::instrument;

/// Get the CP866 byte width of a string
///
/// Every encodable character is a single byte; unmappable characters
/// are replaced during encoding and still occupy one column.
pub fn cp866_width(s: &str) -> usize {
    let (cow, _, _) = encoding_rs::IBM866.encode(s);
    cow.len()
}

/// Truncate a string to fit within a CP866 byte width
pub fn truncate_cp866(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut result = String::new();
    for c in s.chars() {
        let s_char = c.to_string();
        let (cow, _, _) = encoding_rs::IBM866.encode(&s_char);
        let char_len = cow.len();

        if width + char_len > max_width {
            break;
        }
        result.push(c);
        width += char_len;
    }
    result
}

/// Pad a string to a specific CP866 byte width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_cp866(s: &str, width: usize, align_right: bool) -> String {
    let current_width = cp866_width(s);
    if current_width >= width {
        return truncate_cp866(s, width);
    }
    let spaces = width - current_width;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

/// Word-wrap a string into lines no wider than `width` CP866 columns
///
/// Splits on whitespace; a single word wider than the whole line is
/// hard-split so no content is ever lost. Empty input yields no lines.
pub fn wrap_cp866(s: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in s.split_whitespace() {
        let word_width = cp866_width(word);

        if word_width > width {
            // Oversized word: flush the current line and hard-split
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut rest = word;
            while cp866_width(rest) > width {
                let head = truncate_cp866(rest, width);
                if head.is_empty() {
                    // Single glyph wider than the line; emit it whole
                    break;
                }
                rest = &rest[head.len()..];
                lines.push(head);
            }
            current = rest.to_string();
            continue;
        }

        let current_width = cp866_width(&current);
        if current.is_empty() {
            current.push_str(word);
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to CP866
///
/// ASCII bytes (0x00-0x7F) are preserved exactly as is, which protects
/// ESC/POS commands from being corrupted. Only bytes >= 0x80 are treated
/// as UTF-8 sequences and converted to CP866.
///
/// Also re-selects the CP866 code page after an INIT command (ESC @),
/// since INIT resets the printer to its default code page.
#[instrument(skip(bytes))]
pub fn convert_to_cp866(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + 8);

    // Select CP866 at the start: ESC t 17
    result.extend_from_slice(&[0x1B, 0x74, 17]);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        // INIT command (ESC @) resets the code page; re-select after it
        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            flush_buffer(&mut buffer, &mut result);

            result.push(0x1B);
            result.push(0x40);
            result.extend_from_slice(&[0x1B, 0x74, 17]);

            i += 2;
            continue;
        }

        if b < 128 {
            // ASCII byte (command or ASCII text)
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            // Non-ASCII byte (part of a UTF-8 sequence)
            buffer.push(b);
        }
        i += 1;
    }

    flush_buffer(&mut buffer, &mut result);
    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to CP866
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }
    let s = String::from_utf8_lossy(buffer);
    let (cp866, _, _) = encoding_rs::IBM866.encode(&s);
    result.extend_from_slice(&cp866);
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cp866_width() {
        assert_eq!(cp866_width("hello"), 5);
        assert_eq!(cp866_width("Привет"), 6);
        assert_eq!(cp866_width("AB Мыло"), 7);
    }

    #[test]
    fn test_truncate_cp866() {
        assert_eq!(truncate_cp866("hello world", 5), "hello");
        assert_eq!(truncate_cp866("Моющие средства", 6), "Моющие");
    }

    #[test]
    fn test_pad_cp866() {
        assert_eq!(pad_cp866("hi", 5, false), "hi   ");
        assert_eq!(pad_cp866("hi", 5, true), "   hi");
        assert_eq!(pad_cp866("hello world", 5, false), "hello");
    }

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_cp866("Ташкент, ул. Навои 12", 40).len(), 1);
    }

    #[test]
    fn test_wrap_preserves_all_words() {
        let text = "г. Ташкент, Чиланзарский район, ул. Катартал, дом 28, кв. 14";
        let lines = wrap_cp866(text, 20);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(cp866_width(line) <= 20);
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined.split_whitespace().count(), text.split_whitespace().count());
    }

    #[test]
    fn test_wrap_hard_splits_long_word() {
        let lines = wrap_cp866("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_cp866("", 10).is_empty());
        assert!(wrap_cp866("   ", 10).is_empty());
    }

    #[test]
    fn test_convert_selects_code_page() {
        let out = convert_to_cp866(b"plain");
        assert_eq!(&out[..3], &[0x1B, 0x74, 17]);
        assert!(out.ends_with(b"plain"));
    }

    #[test]
    fn test_convert_preserves_commands() {
        // ESC E 1 (bold on) must survive conversion byte-for-byte
        let mut input = vec![0x1B, 0x45, 0x01];
        input.extend_from_slice("Итого".as_bytes());
        let out = convert_to_cp866(&input);
        assert!(out.windows(3).any(|w| w == [0x1B, 0x45, 0x01]));
        // No raw UTF-8 multibyte sequences remain
        assert!(out.windows(2).all(|w| !(w[0] == 0xD0 && w[1] >= 0x90)));
    }

    #[test]
    fn test_convert_reselects_after_init() {
        let input = vec![b'a', 0x1B, 0x40, b'b'];
        let out = convert_to_cp866(&input);
        // ESC @ followed by ESC t 17
        let pos = out
            .windows(2)
            .position(|w| w == [0x1B, 0x40])
            .unwrap();
        assert_eq!(&out[pos + 2..pos + 5], &[0x1B, 0x74, 17]);
    }
}
