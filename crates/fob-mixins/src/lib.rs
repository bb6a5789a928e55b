//! Build-time mixin injection for Vue single file components.
//!
//! A [`RuleSet`] maps component files (by glob) to mixin modules. For every
//! matching component, [`MixinTransformer::transform`] imports those modules
//! at the top of the `<script>` block and merges them into the `mixins`
//! option of the default-exported component object:
//!
//! ```text
//! id → RuleSet::matches → extract_script → inject → recompose → document
//! ```
//!
//! Only the script block changes; template, styles and custom blocks are
//! copied byte for byte.

pub mod config;
pub mod discovery;
pub mod edit;
pub mod error;
pub mod extract;
pub mod inject;
mod matcher;
pub mod paths;
pub mod recompose;
pub mod rules;
pub mod sfc;
pub mod transform;

// Re-export main types
pub use config::{MixinOptions, RuleOptions};
pub use discovery::ConfigDiscovery;
pub use edit::{Side, TextEdits};
pub use error::{ConfigError, InjectError, ParseDiagnostic, Result, SfcError, TransformError};
pub use extract::{extract_script, ScriptLang, ScriptRegion};
pub use inject::{find_exported_object, inject, inject_with_lang, Injected, MergeOutcome};
pub use paths::normalize_id;
pub use recompose::recompose;
pub use rules::{MixinRule, RuleSet};
pub use sfc::{parse_sfc, SfcBlock, SfcDescriptor};
pub use transform::{MixinTransformer, Transformed};
