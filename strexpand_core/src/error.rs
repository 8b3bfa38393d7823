use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ExpandError {
	#[error(transparent)]
	#[diagnostic(code(strexpand::io_error))]
	Io(#[from] std::io::Error),

	#[error("invalid format `{format}` for {kind} value")]
	#[diagnostic(
		code(strexpand::invalid_format),
		help(
			"standard specifiers are a letter with an optional precision, e.g. `x8`, `N2`, `D4`; \
			 dates accept custom patterns such as `yyyy-MM-dd`"
		)
	)]
	InvalidFormat { format: String, kind: &'static str },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(strexpand::config_parse),
		help("check that strexpand.toml is valid TOML with an optional [values] table")
	)]
	ConfigParse(String),

	#[error("invalid assignment `{0}`")]
	#[diagnostic(
		code(strexpand::invalid_assignment),
		help("named values are written as `NAME=VALUE`")
	)]
	InvalidAssignment(String),

	#[error("`{0}` is not a hex string")]
	#[diagnostic(
		code(strexpand::invalid_hex),
		help("use digits 0-9 and a-f; whitespace between digits is allowed unless `--strict` is set")
	)]
	InvalidHex(String),

	#[error("the global registry has already been initialized")]
	#[diagnostic(code(strexpand::global_already_initialized))]
	GlobalAlreadyInitialized,

	#[error("the global registry has not been initialized")]
	#[diagnostic(
		code(strexpand::global_not_initialized),
		help("call `strexpand_core::init_global` once at startup")
	)]
	GlobalNotInitialized,
}

impl ExpandError {
	pub(crate) fn invalid_format(format: impl Into<String>, kind: &'static str) -> Self {
		Self::InvalidFormat {
			format: format.into(),
			kind,
		}
	}
}

pub type ExpandResult<T> = Result<T, ExpandError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
