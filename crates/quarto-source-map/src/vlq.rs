//! Base64 VLQ encoding used by the `mappings` field

const BASE64_CHARS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const CONTINUATION_BIT: u64 = 0x20;
const DIGIT_MASK: u64 = 0x1F;

/// Append the VLQ encoding of `value` to `out`
pub fn encode_vlq(value: i64, out: &mut String) {
    // Sign goes in the lowest bit
    let mut vlq = if value < 0 {
        (value.unsigned_abs() << 1) | 1
    } else {
        (value as u64) << 1
    };

    loop {
        let mut digit = vlq & DIGIT_MASK;
        vlq >>= 5;
        if vlq > 0 {
            digit |= CONTINUATION_BIT;
        }
        out.push(BASE64_CHARS[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}

fn base64_value(byte: u8) -> Option<u64> {
    let value = match byte {
        b'A'..=b'Z' => byte - b'A',
        b'a'..=b'z' => byte - b'a' + 26,
        b'0'..=b'9' => byte - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => return None,
    };
    Some(value as u64)
}

/// Decode one VLQ value from the front of `bytes`
///
/// Returns the value and the number of bytes consumed, or `None` when the
/// input is truncated, contains a non-base64 byte, or overflows.
pub fn decode_vlq(bytes: &[u8]) -> Option<(i64, usize)> {
    let mut result: u64 = 0;
    let mut shift = 0;

    for (consumed, &byte) in bytes.iter().enumerate() {
        let digit = base64_value(byte)?;
        if shift > 60 {
            return None;
        }
        result |= (digit & DIGIT_MASK) << shift;
        shift += 5;

        if digit & CONTINUATION_BIT == 0 {
            let magnitude = (result >> 1) as i64;
            let value = if result & 1 == 1 { -magnitude } else { magnitude };
            return Some((value, consumed + 1));
        }
    }

    None
}
