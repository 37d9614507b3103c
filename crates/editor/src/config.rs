//! Editor configuration.
//!
//! Every field has a default, so an empty TOML document yields
//! [`EditorConfig::default`].
//!
//! ```toml
//! [normalize]
//! iterations_per_dirty_path = 42
//! min_iterations = 100
//!
//! [tab]
//! indent = "\t"
//!
//! [lists]
//! default_kind = "unordered"
//! ```

use serde::Deserialize;

use crate::error::ConfigError;
use crate::node::ListKind;

/// Top-level editor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
	pub normalize: NormalizeConfig,
	pub tab: TabConfig,
	pub lists: ListConfig,
}

/// Fixpoint limits for the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeConfig {
	/// Iterations budgeted per dirty path at the start of a pass.
	pub iterations_per_dirty_path: usize,
	/// Floor for the iteration budget.
	pub min_iterations: usize,
}

impl Default for NormalizeConfig {
	fn default() -> Self {
		Self {
			iterations_per_dirty_path: 42,
			min_iterations: 100,
		}
	}
}

impl NormalizeConfig {
	/// Iteration cap for a pass that starts with `dirty` paths.
	pub fn cap(&self, dirty: usize) -> usize {
		self.min_iterations
			.max(dirty.saturating_mul(self.iterations_per_dirty_path))
	}
}

/// Tab key behavior outside lists and tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TabConfig {
	/// Literal inserted by Tab.
	pub indent: String,
}

impl Default for TabConfig {
	fn default() -> Self {
		Self { indent: "\t".into() }
	}
}

/// List defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
	/// Kind given to lists synthesized without an enclosing list to copy.
	pub default_kind: ListKind,
}

impl EditorConfig {
	/// Parses and validates a TOML configuration.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Rejects values that parse but cannot work.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.tab.indent.is_empty() {
			return Err(ConfigError::Invalid {
				field: "tab.indent",
				reason: "must not be empty".into(),
			});
		}
		if self.normalize.min_iterations == 0 {
			return Err(ConfigError::Invalid {
				field: "normalize.min_iterations",
				reason: "must be positive".into(),
			});
		}
		if self.normalize.iterations_per_dirty_path == 0 {
			return Err(ConfigError::Invalid {
				field: "normalize.iterations_per_dirty_path",
				reason: "must be positive".into(),
			});
		}
		Ok(())
	}
}
