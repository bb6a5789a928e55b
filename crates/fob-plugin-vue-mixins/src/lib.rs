//! Rolldown plugin that injects mixins into Vue single file components
//!
//! The plugin rewrites the `<script>` block of every component matched by
//! the configured rules, importing the rule's mixin modules and merging them
//! into the component's `mixins` option.
//!
//! ## Architecture
//!
//! ```text
//! .vue source → transform() → MixinTransformer → rewritten .vue source → SFC compiler
//! ```
//!
//! ## Ordering
//!
//! The plugin works on raw SFC text, so it must be registered before any
//! plugin that compiles `.vue` files in its `transform` hook.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fob_mixins::{MixinOptions, RuleOptions};
//! use fob_plugin_vue_mixins::FobVueMixinsPlugin;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = MixinOptions::new(vec![
//!     RuleOptions::new("src/pages/*.vue").with_mixin("build/mixins/page.js"),
//! ]);
//! let plugin = Arc::new(FobVueMixinsPlugin::from_options(&options, Path::new("."))?);
//! // Add to your Rolldown bundler configuration
//! # Ok(())
//! # }
//! ```

use anyhow::Context;
use fob_mixins::{normalize_id, ConfigDiscovery, ConfigError, MixinOptions, MixinTransformer};
use rolldown_plugin::{
    HookTransformArgs, HookTransformOutput, HookTransformReturn, HookUsage, Plugin,
    SharedTransformPluginContext,
};
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Rolldown plugin running the mixin transform on every module.
///
/// Rules are resolved once, when the plugin is built, and shared across all
/// concurrent transform calls.
#[derive(Debug, Clone)]
pub struct FobVueMixinsPlugin {
    transformer: Arc<MixinTransformer>,
}

impl FobVueMixinsPlugin {
    pub fn new(transformer: MixinTransformer) -> Self {
        Self {
            transformer: Arc::new(transformer),
        }
    }

    /// Resolves `options` against the project root.
    pub fn from_options(options: &MixinOptions, root: &Path) -> Result<Self, ConfigError> {
        Ok(Self::new(MixinTransformer::from_options(options, root)?))
    }

    /// Loads options from `fob-mixins.toml`, `fob-mixins.json` or the
    /// `vueMixins` field of `package.json` in `root`.
    pub fn discover(root: &Path) -> anyhow::Result<Self> {
        let options = ConfigDiscovery::new(root)
            .load()
            .with_context(|| format!("Failed to load mixin config from {}", root.display()))?;
        Self::from_options(&options, root)
            .with_context(|| format!("Invalid mixin config in {}", root.display()))
    }

    pub fn transformer(&self) -> &MixinTransformer {
        &self.transformer
    }

    /// Runs the transform outside of a bundler.
    ///
    /// Returns `Ok(None)` when `code` should be used unchanged.
    pub fn transform_source(&self, id: &str, code: &str) -> anyhow::Result<Option<String>> {
        run(&self.transformer, id, code)
    }
}

fn run(transformer: &MixinTransformer, id: &str, code: &str) -> anyhow::Result<Option<String>> {
    let id = normalize_id(id);
    let transformed = transformer
        .transform(&id, code)
        .with_context(|| format!("Failed to inject mixins into: {}", id))?;

    Ok(transformed.map(|out| {
        debug!(
            "[fob-vue-mixins] Injected {} mixin(s) into {}",
            out.mixins.len(),
            id
        );
        out.code
    }))
}

impl Plugin for FobVueMixinsPlugin {
    fn name(&self) -> Cow<'static, str> {
        "fob-vue-mixins".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::Transform
    }

    /// Transform hook - rewrites matching components
    ///
    /// # Returns
    ///
    /// - `Ok(Some(output))` - The component was rewritten
    /// - `Ok(None)` - No rule matches the module
    /// - `Err(e)` - The component could not be split or its script parsed
    fn transform(
        &self,
        _ctx: SharedTransformPluginContext,
        args: &HookTransformArgs<'_>,
    ) -> impl std::future::Future<Output = HookTransformReturn> + Send {
        let id = args.id.to_string();
        let code = args.code.to_string();
        let transformer = Arc::clone(&self.transformer);

        async move {
            let Some(code) = run(&transformer, &id, &code)? else {
                return Ok(None);
            };

            Ok(Some(HookTransformOutput {
                code: Some(code),
                map: None,
                side_effects: None,
                module_type: None,
            }))
        }
    }
}
