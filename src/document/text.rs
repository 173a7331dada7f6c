use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use tracing::debug;

use crate::error::{Result, LongtextError};

/// Guess the encoding of raw bytes: a byte order mark wins, otherwise a statistical guess
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

/// Decode bytes with the detected encoding, failing on malformed input
pub fn decode(bytes: &[u8]) -> Result<String> {
    let encoding = detect_encoding(bytes);
    debug!("Detected text encoding: {}", encoding.name());

    let bom_length = Encoding::for_bom(bytes).map_or(0, |(_, length)| length);
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            LongtextError::Read(format!("Content is not valid {}", encoding.name()))
        })
}

/// Read a text file of unknown encoding
pub async fn read_text_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;
    decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode("Grüße, 世界".as_bytes()).unwrap(), "Grüße, 世界");
    }

    #[test]
    fn test_decode_strips_bom() {
        let bytes = b"\xEF\xBB\xBFHello";
        assert_eq!(decode(bytes).unwrap(), "Hello");

        let utf16: Vec<u8> = [0xFF, 0xFE, b'H', 0, b'i', 0].to_vec();
        assert_eq!(decode(&utf16).unwrap(), "Hi");
    }

    #[test]
    fn test_decode_legacy_encoding() {
        let (bytes, _, _) = encoding_rs::GBK.encode("这是一个用于检测编码的中文段落。我们需要足够多的常用汉字，这样统计方法才能可靠地判断出文件使用的是简体中文编码，而不是其他语言的编码。");
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, "这是一个用于检测编码的中文段落。我们需要足够多的常用汉字，这样统计方法才能可靠地判断出文件使用的是简体中文编码，而不是其他语言的编码。");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode(b"").unwrap(), "");
    }
}
