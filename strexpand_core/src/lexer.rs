use std::ops::Range;

use logos::Logos;

use crate::tokens::Encoding;
use crate::tokens::Family;
use crate::tokens::Layout;
use crate::tokens::Placeholder;
use crate::tokens::PlaceholderKind;

/// Raw tokens produced by logos. Only the two anchor characters matter, the
/// rest of the template is collapsed into text runs.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[token("{")]
	BraceOpen,
	#[token("#")]
	Hash,
	#[regex(r"[^{#]+")]
	Text,
}

impl RawToken {
	fn opens(self, family: Family) -> bool {
		match family {
			Family::Named | Family::Indexed => self == RawToken::BraceOpen,
			Family::Hex => self == RawToken::Hash,
		}
	}
}

/// Walks the anchors of a template and parses candidate placeholders from
/// each one.
struct TokenWalker<'a> {
	/// The scanned text.
	source: &'a str,
	/// Anchor tokens (`{` and `#`) with their byte spans.
	anchors: Vec<(RawToken, Range<usize>)>,
}

impl<'a> TokenWalker<'a> {
	fn new(source: &'a str) -> Self {
		let anchors = RawToken::lexer(source)
			.spanned()
			.filter_map(|(result, span)| {
				match result {
					Ok(RawToken::Text) | Err(()) => None,
					Ok(raw) => Some((raw, span)),
				}
			})
			.collect();

		Self { source, anchors }
	}

	/// Collect the non-overlapping, left-to-right matches of one family. A
	/// failed attempt at an anchor moves on to the next anchor; a successful
	/// one resumes after the end of the match.
	fn walk(&self, family: Family) -> Vec<Placeholder> {
		let mut placeholders = Vec::new();
		let mut resume = 0;

		for (raw, span) in &self.anchors {
			if span.start < resume || !raw.opens(family) {
				continue;
			}

			let mut cursor = Cursor::new(self.source, span.start);
			let kind = match family {
				Family::Named => cursor.named(),
				Family::Indexed => cursor.indexed(),
				Family::Hex => cursor.hex(),
			};

			let Some(kind) = kind else {
				continue;
			};

			let end = cursor.pos;
			placeholders.push(Placeholder {
				kind,
				raw: self.source[span.start..end].to_string(),
				offset: span.start,
			});
			resume = end;
		}

		placeholders
	}
}

/// Byte cursor over the template. Every syntax character is ASCII so byte
/// positions always land on char boundaries when a parse succeeds.
struct Cursor<'a> {
	source: &'a str,
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	fn new(source: &'a str, pos: usize) -> Self {
		Self {
			source,
			bytes: source.as_bytes(),
			pos,
		}
	}

	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn eat(&mut self, byte: u8) -> bool {
		if self.peek() == Some(byte) {
			self.pos += 1;
			true
		} else {
			false
		}
	}

	/// Consume bytes while `predicate` holds and return the consumed slice.
	fn take_while(&mut self, predicate: impl Fn(u8) -> bool) -> &'a str {
		let start = self.pos;
		while self.peek().is_some_and(&predicate) {
			self.pos += 1;
		}
		&self.source[start..self.pos]
	}

	/// `{KEY[-INDEX][,width][,maxwidth][:format]}`
	fn named(&mut self) -> Option<PlaceholderKind> {
		if !self.eat(b'{') || !self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
			return None;
		}

		let key = self.take_while(|b| b.is_ascii_alphanumeric() || b == b'_');

		let index = if self.eat(b'-') {
			let digits = self.take_while(|b| b.is_ascii_digit());
			if digits.is_empty() {
				return None;
			}
			digits.parse::<usize>().ok()
		} else {
			None
		};

		let layout = self.layout()?;

		Some(PlaceholderKind::Named {
			key: key.to_string(),
			index,
			layout,
		})
	}

	/// `{INDEX[,width][,maxwidth][:format]}`
	fn indexed(&mut self) -> Option<PlaceholderKind> {
		if !self.eat(b'{') {
			return None;
		}

		let digits = self.take_while(|b| b.is_ascii_digit());
		if digits.is_empty() {
			return None;
		}
		let index = digits.parse::<usize>().ok()?;
		let layout = self.layout()?;

		Some(PlaceholderKind::Indexed { index, layout })
	}

	/// The shared `[,width][,maxwidth][:format]}` tail.
	fn layout(&mut self) -> Option<Layout> {
		let mut layout = Layout::default();

		if self.eat(b',') {
			let start = self.pos;
			self.eat(b'-');
			self.take_while(|b| b.is_ascii_digit());
			layout.width = self.source[start..self.pos].parse::<i32>().ok();
		}

		if self.eat(b',') {
			let digits = self.take_while(|b| b.is_ascii_digit());
			layout.maxwidth = digits.parse::<u32>().ok();
		}

		if self.peek() == Some(b':') {
			let start = self.pos + 1;
			let close = self.bytes[start..].iter().position(|b| *b == b'}')?;
			if close == 0 {
				return None;
			}
			layout.format = Some(self.source[start..start + close].to_string());
			self.pos = start + close;
		}

		self.eat(b'}').then_some(layout)
	}

	/// `#[u|U]hh…` or `#[u|U]{hh…}`
	fn hex(&mut self) -> Option<PlaceholderKind> {
		if !self.eat(b'#') {
			return None;
		}

		let encoding = match self.peek().map(char::from).and_then(Encoding::from_code) {
			Some(encoding) => {
				self.pos += 1;
				encoding
			}
			None => Encoding::Utf8,
		};
		let unit = encoding.unit_digits();

		if self.eat(b'{') {
			let digits = self.take_while(|b| b.is_ascii_hexdigit());
			if digits.is_empty() || digits.len() % unit != 0 || !self.eat(b'}') {
				return None;
			}

			return Some(PlaceholderKind::Hex {
				encoding,
				digits: digits.to_string(),
				braced: true,
			});
		}

		let start = self.pos;
		let available = self.take_while(|b| b.is_ascii_hexdigit()).len();
		let consumed = available - available % unit;
		if consumed == 0 {
			return None;
		}
		self.pos = start + consumed;

		Some(PlaceholderKind::Hex {
			encoding,
			digits: self.source[start..self.pos].to_string(),
			braced: false,
		})
	}
}

/// Scan `source` for every family. Each family is matched independently, so
/// tokens of different families may overlap. The result is ordered by offset.
pub fn tokenize(source: &str) -> Vec<Placeholder> {
	let walker = TokenWalker::new(source);
	let mut placeholders: Vec<Placeholder> = [Family::Named, Family::Hex, Family::Indexed]
		.into_iter()
		.flat_map(|family| walker.walk(family))
		.collect();
	placeholders.sort_by_key(|placeholder| placeholder.offset);

	placeholders
}

/// Scan `source` for the tokens of a single family, left to right.
pub fn tokenize_family(source: &str, family: Family) -> Vec<Placeholder> {
	TokenWalker::new(source).walk(family)
}
