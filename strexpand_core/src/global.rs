use std::sync::OnceLock;

use crate::ExpandError;
use crate::ExpandResult;
use crate::NamedValues;
use crate::Registry;
use crate::Value;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Install the process-wide registry. Only the first call succeeds.
pub fn init_global(registry: Registry) -> ExpandResult<&'static Registry> {
	GLOBAL
		.set(registry)
		.map_err(|_| ExpandError::GlobalAlreadyInitialized)?;
	tracing::debug!("global registry initialized");

	global()
}

/// The process-wide registry installed by [`init_global`].
pub fn global() -> ExpandResult<&'static Registry> {
	GLOBAL.get().ok_or(ExpandError::GlobalNotInitialized)
}

/// [`crate::expand`] against the process-wide registry.
pub fn expand_global(template: &str, args: &[Value]) -> ExpandResult<String> {
	global()?.expand(template, args)
}

/// [`crate::expand_with`] against the process-wide registry.
pub fn expand_global_with(
	template: &str,
	named: Option<&NamedValues>,
	args: &[Value],
) -> ExpandResult<String> {
	global()?.expand_with(template, named, args)
}
