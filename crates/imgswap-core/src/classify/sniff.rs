//! Magic-byte MIME detection.
//!
//! Only the leading bytes of the body are inspected. Transport headers such as
//! `Content-Type` are never consulted.

/// MIME type reported for content that matches no known signature.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const EBML_MAGIC: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];

/// How far into an Ogg stream we look for the Theora codec marker.
const OGG_SCAN_LEN: usize = 64;

/// How far into an EBML header we look for the DocType (matches libmagic's search window).
const EBML_SCAN_LEN: usize = 4096;

/// Detect the MIME type of `content` from its leading bytes.
/// Returns `None` for empty or unrecognized content.
pub fn sniff_mime(content: &[u8]) -> Option<&'static str> {
    if content.is_empty() {
        return None;
    }

    if content.starts_with(&PNG_SIGNATURE) {
        return Some("image/png");
    }
    if content.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if content.starts_with(b"GIF87a") || content.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if content.len() >= 12 && content.starts_with(b"RIFF") {
        match &content[8..12] {
            b"WEBP" => return Some("image/webp"),
            b"WAVE" => return Some("audio/x-wav"),
            _ => {}
        }
    }
    if let Some(mime) = sniff_iso_bmff(content) {
        return Some(mime);
    }
    if content.starts_with(&EBML_MAGIC) {
        let head = &content[..content.len().min(EBML_SCAN_LEN)];
        return if contains(head, b"webm") {
            Some("video/webm")
        } else {
            Some("video/x-matroska")
        };
    }
    if content.starts_with(b"OggS") {
        let head = &content[..content.len().min(OGG_SCAN_LEN)];
        return if contains(head, b"\x80theora") {
            Some("video/ogg")
        } else {
            Some("audio/ogg")
        };
    }
    if content.starts_with(b"fLaC") {
        return Some("audio/flac");
    }
    if content.starts_with(b"ID3") || is_mpeg_audio_frame(content) {
        return Some("audio/mpeg");
    }
    if content.starts_with(b"%PDF") {
        return Some("application/pdf");
    }
    if looks_like_html(content) {
        return Some("text/html");
    }

    None
}

/// ISO base media file format: `[size:4]["ftyp"][major brand:4]`.
/// Only known brands map to a MIME type; unknown brands are unrecognized.
fn sniff_iso_bmff(content: &[u8]) -> Option<&'static str> {
    if content.len() < 12 || &content[4..8] != b"ftyp" {
        return None;
    }
    let brand = [content[8], content[9], content[10], content[11]];
    let mime = match &brand {
        b"isom" | b"iso2" | b"iso3" | b"iso4" | b"iso5" | b"iso6" | b"mp41" | b"mp42"
        | b"avc1" | b"dash" | b"mmp4" => "video/mp4",
        b"M4V " | b"M4VH" | b"M4VP" => "video/x-m4v",
        [b'3', b'g', b'p', _] => "video/3gpp",
        [b'3', b'g', b'2', _] => "video/3gpp2",
        b"avif" | b"avis" => "image/avif",
        b"heic" | b"heix" | b"mif1" => "image/heic",
        b"msf1" | b"hevc" | b"hevx" => "image/heif-sequence",
        b"jp2 " => "image/jp2",
        b"jpx " => "image/jpx",
        b"crx " => "image/x-canon-cr3",
        b"M4A " => "audio/mp4",
        b"qt  " => "video/quicktime",
        _ => return None,
    };
    Some(mime)
}

/// MPEG-1/2 audio frame header: 11-bit sync, non-reserved layer, valid bitrate index.
fn is_mpeg_audio_frame(content: &[u8]) -> bool {
    if content.len() < 3 || content[0] != 0xFF {
        return false;
    }
    let sync = content[1] & 0xE0 == 0xE0;
    // Layer bits 00 are reserved (ADTS AAC uses them).
    let layer = (content[1] >> 1) & 0x03;
    let bitrate = content[2] >> 4;
    sync && layer != 0 && bitrate != 0x0F
}

fn looks_like_html(content: &[u8]) -> bool {
    let start = content
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(content.len());
    let rest = &content[start..];
    starts_with_ignore_case(rest, b"<!doctype html") || starts_with_ignore_case(rest, b"<html")
}

fn starts_with_ignore_case(haystack: &[u8], prefix: &[u8]) -> bool {
    haystack.len() >= prefix.len() && haystack[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
