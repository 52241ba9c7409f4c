//! Text/binary classification for template files.
//! Binary files are copied verbatim instead of being rendered.

use std::path::Path;

/// Extensions that are always treated as binary.
const BINARY_EXTENSIONS: &[&str] = &[
    "exe", "dll", "so", "dylib", "bin", "o", "a", "lib", "zip", "tar", "gz", "bz2", "xz", "7z",
    "rar", "zst", "jpg", "jpeg", "png", "gif", "bmp", "ico", "icns", "webp", "tiff", "psd",
    "mp3", "mp4", "avi", "mov", "mkv", "flv", "wav", "ogg", "flac", "pdf", "doc", "docx", "xls",
    "xlsx", "ppt", "pptx", "woff", "woff2", "ttf", "otf", "eot", "wasm", "pyc", "class", "jar",
];

/// Extensions that are always treated as text.
const TEXT_EXTENSIONS: &[&str] = &[
    "rs", "py", "js", "mjs", "cjs", "ts", "tsx", "jsx", "vue", "svelte", "go", "java", "c", "cpp",
    "h", "hpp", "rb", "php", "swift", "kt", "scala", "cs", "lua", "pl", "sh", "bash", "zsh",
    "ps1", "bat", "cmd", "md", "txt", "json", "yaml", "yml", "toml", "xml", "svg", "html", "htm",
    "css", "scss", "sass", "less", "csv", "ini", "cfg", "conf", "hbs", "j2", "tpl",
];

/// Number of leading bytes inspected when the extension is inconclusive
const SNIFF_LEN: usize = 1024;

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check if a file is binary based on its extension alone.
pub fn is_binary_extension(filename: &str) -> bool {
    extension_of(filename).is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.as_str()))
}

/// Check if a file is text based on its extension alone.
pub fn is_text_extension(filename: &str) -> bool {
    extension_of(filename).is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}

/// Check if content looks binary: a NUL byte or invalid UTF-8 in the first chunk.
///
/// A multi-byte character cut off at the end of the chunk is not counted
/// as invalid.
pub fn is_binary_content(content: &[u8]) -> bool {
    let chunk = &content[..content.len().min(SNIFF_LEN)];
    if chunk.contains(&0) {
        return true;
    }
    match std::str::from_utf8(chunk) {
        Ok(_) => false,
        Err(e) => e.error_len().is_some(),
    }
}

/// Classifies a file as binary from its name and contents.
///
/// The extension decides when it is known; otherwise the content is sniffed.
pub fn is_binary(filename: &str, content: &[u8]) -> bool {
    if is_text_extension(filename) {
        false
    } else if is_binary_extension(filename) {
        true
    } else {
        is_binary_content(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_binary_extension() {
        assert!(is_binary_extension("logo.png"));
        assert!(is_binary_extension("LOGO.PNG"));
        assert!(!is_binary_extension("index.js"));
        assert!(!is_binary_extension("Makefile"));
    }

    #[test]
    fn test_is_binary_content() {
        assert!(is_binary_content(&[0x89, b'P', b'N', b'G', 0x00, 0x1a]));
        assert!(is_binary_content(&[0xff, 0xfe, 0xfd]));
        assert!(!is_binary_content(b"plain {{ name }} text"));
        assert!(!is_binary_content("héllo".as_bytes()));
        assert!(!is_binary_content(b""));
    }

    #[test]
    fn test_truncated_multibyte_char_is_text() {
        let mut content = vec![b'a'; SNIFF_LEN - 1];
        content.extend_from_slice("é".as_bytes());
        assert!(!is_binary_content(&content));
    }

    #[test]
    fn test_extension_wins_over_content() {
        assert!(is_binary("image.png", b"{{ name }}"));
        assert!(!is_binary("notes.txt", &[b'a', 0, b'b']));
        assert!(is_binary("blob", &[b'a', 0, b'b']));
        assert!(!is_binary("Dockerfile", b"FROM {{ image }}"));
    }
}
