//! Byte-to-text decoding for spreadsheet exports.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Decoded file content and the encoding it was read with.
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static Encoding,
}

/// Decodes bytes, trying in order: byte-order mark (UTF-8, UTF-16LE/BE),
/// strict UTF-8, then Windows-1252.
///
/// Windows-1252 maps every byte, so decoding never fails; it is a superset
/// of Latin-1 and covers the accented letters of Portuguese exports.
pub fn decode_bytes(bytes: &[u8]) -> DecodedText {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return DecodedText {
            text: text.into_owned(),
            encoding,
        };
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodedText {
            text: text.to_string(),
            encoding: UTF_8,
        };
    }
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    DecodedText {
        text: text.into_owned(),
        encoding: WINDOWS_1252,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        let decoded = decode_bytes("Situação".as_bytes());
        assert_eq!(decoded.text, "Situação");
        assert_eq!(decoded.encoding, UTF_8);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let decoded = decode_bytes(b"\xEF\xBB\xBFNome");
        assert_eq!(decoded.text, "Nome");
        assert_eq!(decoded.encoding, UTF_8);
    }

    #[test]
    fn test_latin1_falls_back_to_windows_1252() {
        // "Mãe;Endereço" in Latin-1
        let decoded = decode_bytes(b"M\xE3e;Endere\xE7o");
        assert_eq!(decoded.text, "Mãe;Endereço");
        assert_eq!(decoded.encoding, WINDOWS_1252);
    }

    #[test]
    fn test_utf16le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Cep".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let decoded = decode_bytes(&bytes);
        assert_eq!(decoded.text, "Cep");
        assert_eq!(decoded.encoding.name(), "UTF-16LE");
    }
}
