use std::fmt::Display;
use std::ops::Range;

/// The three independent token grammars recognized in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
	/// `{KEY[-INDEX][,width][,maxwidth][:format]}`
	Named,
	/// `{INDEX[,width][,maxwidth][:format]}`
	Indexed,
	/// `#hh…`, `#uhhhh…`, `#Uhhhh…` and their braced forms.
	Hex,
}

impl Display for Family {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Family::Named => write!(f, "named"),
			Family::Indexed => write!(f, "indexed"),
			Family::Hex => write!(f, "hex"),
		}
	}
}

/// Character encoding selected by the optional code letter of a hex escape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
	/// No code letter.
	#[default]
	Utf8,
	/// `u`
	Utf16Le,
	/// `U`
	Utf16Be,
}

impl Encoding {
	/// Map a code letter to its encoding. Only `u` and `U` are codes.
	pub fn from_code(code: char) -> Option<Self> {
		match code {
			'u' => Some(Self::Utf16Le),
			'U' => Some(Self::Utf16Be),
			_ => None,
		}
	}

	/// Number of hex digits making up one decoded unit.
	pub fn unit_digits(self) -> usize {
		match self {
			Self::Utf8 => 2,
			Self::Utf16Le | Self::Utf16Be => 4,
		}
	}
}

/// Width, truncation and format options shared by named and indexed
/// placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
	/// Pad to this many characters. Negative values left-align.
	pub width: Option<i32>,
	/// Truncate to at most this many characters. `0` disables truncation.
	pub maxwidth: Option<u32>,
	/// Free text between `:` and the closing brace.
	pub format: Option<String>,
}

impl Layout {
	pub fn format(&self) -> &str {
		self.format.as_deref().unwrap_or_default()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderKind {
	Named {
		key: String,
		/// Positional argument bound to the expander, e.g. `{DATE-0}`.
		index: Option<usize>,
		layout: Layout,
	},
	Indexed {
		index: usize,
		layout: Layout,
	},
	Hex {
		encoding: Encoding,
		/// The consumed hex digits, always a whole number of units.
		digits: String,
		/// Whether the digits were wrapped in `{…}`.
		braced: bool,
	},
}

/// A token matched in a template. Never mutated once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
	pub kind: PlaceholderKind,
	/// The exact source text of the match.
	pub raw: String,
	/// Byte offset of `raw` in the scanned text.
	pub offset: usize,
}

impl Placeholder {
	pub fn family(&self) -> Family {
		match self.kind {
			PlaceholderKind::Named { .. } => Family::Named,
			PlaceholderKind::Indexed { .. } => Family::Indexed,
			PlaceholderKind::Hex { .. } => Family::Hex,
		}
	}

	/// Byte range of the match in the scanned text.
	pub fn span(&self) -> Range<usize> {
		self.offset..self.offset + self.raw.len()
	}

	pub fn layout(&self) -> Option<&Layout> {
		match &self.kind {
			PlaceholderKind::Named { layout, .. } | PlaceholderKind::Indexed { layout, .. } => {
				Some(layout)
			}
			PlaceholderKind::Hex { .. } => None,
		}
	}
}

impl Display for Placeholder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.raw)
	}
}
