use crate::tokens::Encoding;

/// Check whether `text` holds only hex digits, optionally mixed with
/// whitespace. Empty and whitespace-only input is never hex.
pub fn is_hex(text: &str, allow_whitespace: bool) -> bool {
	if text.trim().is_empty() {
		return false;
	}

	text.chars()
		.all(|ch| ch.is_ascii_hexdigit() || (allow_whitespace && ch.is_whitespace()))
}

/// Convert a string of hex digits into bytes, two digits per byte.
///
/// Returns `None` when [`is_hex`] rejects the input. Whitespace (when
/// allowed) is ignored, and a trailing unpaired digit becomes a byte of its
/// own.
///
/// ```rust
/// use strexpand_core::hex_to_bytes;
///
/// assert_eq!(hex_to_bytes("de ad be ef", true), Some(vec![0xde, 0xad, 0xbe, 0xef]));
/// assert_eq!(hex_to_bytes("abc", false), Some(vec![0xab, 0x0c]));
/// assert_eq!(hex_to_bytes("xyz", true), None);
/// ```
pub fn hex_to_bytes(text: &str, allow_whitespace: bool) -> Option<Vec<u8>> {
	if !is_hex(text, allow_whitespace) {
		return None;
	}

	let digits: Vec<u8> = text
		.chars()
		.filter_map(|ch| ch.to_digit(16))
		.map(|digit| digit as u8)
		.collect();

	let bytes = digits
		.chunks(2)
		.map(|pair| {
			match pair {
				[high, low] => (*high << 4) | *low,
				[single] => *single,
				_ => 0,
			}
		})
		.collect();

	Some(bytes)
}

/// Decode the digits of a hex escape into text. The digit count is expected
/// to be a whole number of units for `encoding`; invalid sequences decode to
/// U+FFFD.
pub fn decode_hex(encoding: Encoding, digits: &str) -> String {
	let bytes = hex_to_bytes(digits, false).unwrap_or_default();

	match encoding {
		Encoding::Utf8 => String::from_utf8_lossy(&bytes).into_owned(),
		Encoding::Utf16Le => decode_utf16(&bytes, u16::from_le_bytes),
		Encoding::Utf16Be => decode_utf16(&bytes, u16::from_be_bytes),
	}
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
	let units = bytes
		.chunks_exact(2)
		.map(|pair| unit([pair[0], pair[1]]));

	char::decode_utf16(units)
		.map(|result| result.unwrap_or(char::REPLACEMENT_CHARACTER))
		.collect()
}
