use chrono::Utc;

use crate::ExpandResult;
use crate::Expander;
use crate::HandlerCall;
use crate::NamedValues;
use crate::Registry;
use crate::Value;
use crate::hex::decode_hex;
use crate::lexer::tokenize;
use crate::lexer::tokenize_family;
use crate::tokens::Family;
use crate::tokens::Placeholder;
use crate::tokens::PlaceholderKind;
use crate::width::adjust;

/// Expand `template` using `registry` and positional arguments.
pub fn expand(registry: &Registry, template: &str, args: &[Value]) -> ExpandResult<String> {
	expand_with(registry, template, None, args)
}

/// Expand `template` using `registry`, call-scoped named overrides and
/// positional arguments.
///
/// The passes run in a fixed order:
///
/// 1. named placeholders of the original template, resolved through `named`
///    first and then the registry.
/// 2. hex escapes of the partially expanded text.
/// 3. indexed placeholders of the original template, when `args` is not
///    empty.
///
/// Each named or indexed placeholder replaces the first remaining occurrence
/// of its exact text in the working string. A placeholder whose text no
/// longer occurs is skipped without being evaluated. Unresolved names and
/// out-of-range indices are left untouched.
///
/// ```rust
/// use strexpand_core::Registry;
/// use strexpand_core::Value;
///
/// let registry = Registry::new();
/// let output = registry.expand("{0,5:x}|{REPEAT-1:2}", &[Value::from(42), Value::from("ab")])?;
/// assert_eq!(output, "   2a|abab");
/// # Ok::<(), strexpand_core::ExpandError>(())
/// ```
pub fn expand_with(
	registry: &Registry,
	template: &str,
	named: Option<&NamedValues>,
	args: &[Value],
) -> ExpandResult<String> {
	if template.trim().is_empty() {
		return Ok(template.to_string());
	}

	tracing::debug!(
		length = template.len(),
		named = named.map_or(0, |named| named.len()),
		args = args.len(),
		"expand template"
	);

	let now = Utc::now();
	let placeholders = tokenize(template);
	let mut working = template.to_string();

	for placeholder in placeholders.iter().filter(|p| p.family() == Family::Named) {
		let PlaceholderKind::Named { key, index, layout } = &placeholder.kind else {
			continue;
		};

		let expander = named
			.and_then(|named| named.get(key.as_str()).cloned())
			.or_else(|| registry.resolve(key));
		let Some(expander) = expander else {
			tracing::debug!(key = %key, "unresolved placeholder");
			continue;
		};

		if !working.contains(placeholder.raw.as_str()) {
			continue;
		}

		let value = index.and_then(|index| args.get(index));
		let text = match &expander {
			Expander::Handler(handler) => {
				let call = HandlerCall {
					name: key,
					format: layout.format(),
					value,
					now,
				};
				(handler.as_ref())(&call)?
			}
			Expander::Static(value) => value.format(layout.format())?,
		};

		replace_first(&mut working, placeholder, &adjust(&text, layout.width, layout.maxwidth));
	}

	working = decode_hex_escapes(&working);

	if args.is_empty() {
		return Ok(working);
	}

	for placeholder in placeholders.iter().filter(|p| p.family() == Family::Indexed) {
		let PlaceholderKind::Indexed { index, layout } = &placeholder.kind else {
			continue;
		};

		let Some(value) = args.get(*index) else {
			tracing::debug!(index, "positional index out of range");
			continue;
		};

		if !working.contains(placeholder.raw.as_str()) {
			continue;
		}

		let text = value.format(layout.format())?;
		replace_first(&mut working, placeholder, &adjust(&text, layout.width, layout.maxwidth));
	}

	Ok(working)
}

/// Replace the first occurrence of the placeholder's text in `working`.
fn replace_first(working: &mut String, placeholder: &Placeholder, replacement: &str) {
	let Some(start) = working.find(placeholder.raw.as_str()) else {
		return;
	};

	tracing::trace!(placeholder = %placeholder, replacement, "substitute");
	working.replace_range(start..start + placeholder.raw.len(), replacement);
}

/// Decode every hex escape in `text`. Escapes are spliced in from the end so
/// earlier spans stay valid.
pub fn decode_hex_escapes(text: &str) -> String {
	let escapes = tokenize_family(text, Family::Hex);
	let mut decoded = text.to_string();

	for escape in escapes.iter().rev() {
		let PlaceholderKind::Hex {
			encoding, digits, ..
		} = &escape.kind
		else {
			continue;
		};

		let replacement = decode_hex(*encoding, digits);
		tracing::trace!(escape = %escape, replacement = %replacement, "decode hex escape");
		decoded.replace_range(escape.span(), &replacement);
	}

	decoded
}
