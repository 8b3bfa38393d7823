use std::collections::HashMap;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use chrono::DateTime;
use chrono::Utc;
use derive_more::Deref;
use derive_more::DerefMut;

use crate::ExpandResult;
use crate::Value;
use crate::builtins;
use crate::engine;

/// The arguments passed to a handler when a named placeholder resolves to it.
#[derive(Debug, Clone, Copy)]
pub struct HandlerCall<'a> {
	/// The placeholder key, e.g. `DATE` for `{DATE-0:yyyy}`.
	pub name: &'a str,
	/// The inline format, empty when none was given.
	pub format: &'a str,
	/// The positional argument bound with `-INDEX`, if present and in range.
	pub value: Option<&'a Value>,
	/// The instant the current expansion started.
	pub now: DateTime<Utc>,
}

pub type HandlerFn = Arc<dyn Fn(&HandlerCall<'_>) -> ExpandResult<String> + Send + Sync>;

/// What a placeholder name resolves to.
#[derive(Clone)]
pub enum Expander {
	/// A value formatted with the placeholder's format.
	Static(Value),
	/// A function computing the replacement text.
	Handler(HandlerFn),
}

impl Expander {
	pub fn value(value: impl Into<Value>) -> Self {
		Self::Static(value.into())
	}

	pub fn handler(
		handler: impl Fn(&HandlerCall<'_>) -> ExpandResult<String> + Send + Sync + 'static,
	) -> Self {
		Self::Handler(Arc::new(handler))
	}

	pub fn is_handler(&self) -> bool {
		matches!(self, Self::Handler(_))
	}
}

impl std::fmt::Debug for Expander {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
			Self::Handler(_) => f.debug_tuple("Handler").finish_non_exhaustive(),
		}
	}
}

impl From<Value> for Expander {
	fn from(value: Value) -> Self {
		Self::Static(value)
	}
}

/// Named overrides supplied to a single expansion. They take precedence over
/// the registry and are never retained.
#[derive(Debug, Clone, Default, Deref, DerefMut)]
pub struct NamedValues(
	#[deref]
	#[deref_mut]
	HashMap<String, Expander>,
);

impl NamedValues {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	#[must_use]
	pub fn with(mut self, name: impl Into<String>, expander: impl Into<Expander>) -> Self {
		self.0.insert(name.into(), expander.into());
		self
	}
}

impl<K, V> FromIterator<(K, V)> for NamedValues
where
	K: Into<String>,
	V: Into<Expander>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(name, expander)| (name.into(), expander.into()))
				.collect(),
		)
	}
}

/// A monotonically increasing counter backing the `COUNTER` expander.
#[derive(Debug, Default)]
pub struct Counter(AtomicI64);

impl Counter {
	pub fn new(start: i64) -> Self {
		Self(AtomicI64::new(start))
	}

	/// Return the current value and advance it.
	pub fn next(&self) -> i64 {
		self.0.fetch_add(1, Ordering::SeqCst)
	}

	/// Reset to `value`, returning the previous value.
	pub fn set(&self, value: i64) -> i64 {
		self.0.swap(value, Ordering::SeqCst)
	}

	/// Reset to `value` and consume it in one step, as `{COUNTER-0}` does.
	pub fn restart(&self, value: i64) -> i64 {
		self.0.store(value.wrapping_add(1), Ordering::SeqCst);
		value
	}

	/// The value the next call to [`Counter::next`] will return.
	pub fn peek(&self) -> i64 {
		self.0.load(Ordering::SeqCst)
	}
}

/// A mapping from placeholder names to expanders.
///
/// Reads vastly outnumber writes, so entries sit behind a `RwLock`. Resolved
/// expanders are cloned out of the lock, handlers never run while it is held.
pub struct Registry {
	entries: RwLock<HashMap<String, Expander>>,
	counter: Arc<Counter>,
}

impl Registry {
	/// A registry pre-populated with the built-in expanders.
	pub fn new() -> Self {
		let registry = Self::empty();
		builtins::install(&registry);
		registry
	}

	/// A registry without any entries.
	pub fn empty() -> Self {
		Self {
			entries: RwLock::new(HashMap::new()),
			counter: Arc::new(Counter::default()),
		}
	}

	/// Insert or overwrite the entry for `name`.
	pub fn register(&self, name: impl Into<String>, expander: impl Into<Expander>) {
		let name = name.into();
		let expander = expander.into();
		tracing::debug!(name = %name, handler = expander.is_handler(), "register expander");
		self.write().insert(name, expander);
	}

	/// Insert `expander`, or remove the entry when it is `None`.
	pub fn set(&self, name: impl Into<String>, expander: Option<Expander>) {
		let name = name.into();
		match expander {
			Some(expander) => self.register(name, expander),
			None => {
				self.remove(&name);
			}
		}
	}

	pub fn remove(&self, name: &str) -> Option<Expander> {
		let removed = self.write().remove(name);
		if removed.is_some() {
			tracing::debug!(name, "remove expander");
		}
		removed
	}

	pub fn resolve(&self, name: &str) -> Option<Expander> {
		self.read().get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.read().contains_key(name)
	}

	/// Registered names in sorted order.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.read().keys().cloned().collect();
		names.sort();
		names
	}

	pub fn counter(&self) -> &Counter {
		&self.counter
	}

	pub(crate) fn shared_counter(&self) -> Arc<Counter> {
		Arc::clone(&self.counter)
	}

	/// Expand `template` with positional arguments only.
	pub fn expand(&self, template: &str, args: &[Value]) -> ExpandResult<String> {
		engine::expand(self, template, args)
	}

	/// Expand `template` with named overrides and positional arguments.
	pub fn expand_with(
		&self,
		template: &str,
		named: Option<&NamedValues>,
		args: &[Value],
	) -> ExpandResult<String> {
		engine::expand_with(self, template, named, args)
	}

	fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Expander>> {
		self.entries.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Expander>> {
		self.entries.write().unwrap_or_else(PoisonError::into_inner)
	}
}

impl Default for Registry {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("names", &self.names())
			.field("counter", &self.counter.peek())
			.finish()
	}
}
