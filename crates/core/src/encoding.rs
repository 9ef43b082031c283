//! Transport encodings for image payloads.
//!
//! Image bytes are never transcoded: encoding and decoding only change how
//! the exact provider bytes travel over JSON.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Content type used for binary image responses.
pub const IMAGE_CONTENT_TYPE: &str = "image/png";

/// Encode raw image bytes as standard (padded) base64.
pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a standard base64 image payload back into raw bytes.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(encoded.trim())
}

/// Build a `data:` URI embedding an already base64-encoded image.
pub fn data_uri(content_type: &str, encoded: &str) -> String {
    format!("data:{content_type};base64,{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_value_survives_encoding() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(1031).collect();
        let decoded = decode_image(&encode_image(&bytes)).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn png_signature_encodes_as_expected() {
        let png_header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(encode_image(&png_header), "iVBORw0KGgo=");
    }

    #[test]
    fn invalid_base64_is_an_error() {
        assert!(decode_image("not*base64").is_err());
    }

    #[test]
    fn data_uri_embeds_content_type() {
        assert_eq!(
            data_uri(IMAGE_CONTENT_TYPE, "AAEC"),
            "data:image/png;base64,AAEC"
        );
    }
}
