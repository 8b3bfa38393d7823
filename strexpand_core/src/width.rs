/// Largest width honored when padding.
pub const MAX_WIDTH: usize = 4096;

/// Pad or truncate `text` to a display width.
///
/// When `|width|` exceeds the length of `text` it is padded with spaces, on the
/// left for a positive width and on the right for a negative one. Afterwards,
/// when `0 < maxwidth < len`, only the first `maxwidth` characters are kept.
/// Truncation runs after padding, so a `maxwidth` below the padded width cuts
/// into the padding first:
///
/// ```rust
/// use strexpand_core::adjust;
///
/// assert_eq!(adjust("ab", Some(5), None), "   ab");
/// assert_eq!(adjust("ab", Some(-5), None), "ab   ");
/// assert_eq!(adjust("abcdef", None, Some(3)), "abc");
/// assert_eq!(adjust("ab", Some(5), Some(3)), "   ");
/// ```
///
/// Lengths are counted in `char`s. Padding never grows the text beyond
/// [`MAX_WIDTH`] characters.
pub fn adjust(text: &str, width: Option<i32>, maxwidth: Option<u32>) -> String {
	let mut adjusted = text.to_string();
	let length = text.chars().count();

	if let Some(width) = width {
		let target = (width.unsigned_abs() as usize).min(MAX_WIDTH);
		if target > length {
			let padding = " ".repeat(target - length);
			adjusted = if width > 0 {
				format!("{padding}{text}")
			} else {
				format!("{text}{padding}")
			};
		}
	}

	if let Some(maxwidth) = maxwidth.map(|value| value as usize) {
		if maxwidth > 0 && maxwidth < adjusted.chars().count() {
			adjusted = adjusted.chars().take(maxwidth).collect();
		}
	}

	adjusted
}
