//! Per-file pipeline: match, extract, inject, recompose.

use std::path::Path;

use tracing::{debug, warn};

use crate::config::MixinOptions;
use crate::error::{ConfigError, InjectError, Result, TransformError};
use crate::extract::{extract_script, ScriptLang, ScriptRegion};
use crate::inject::{inject_with_lang, MergeOutcome};
use crate::recompose::recompose;
use crate::rules::RuleSet;

/// A rewritten component document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub code: String,
    /// The injected mixin modules, in injection order
    pub mixins: Vec<String>,
    pub outcome: MergeOutcome,
}

/// Applies a [`RuleSet`] to component documents.
///
/// Holds no per-call state; share one instance (behind `Arc` if needed)
/// across threads.
///
/// # Example
///
/// ```
/// use fob_mixins::{MixinOptions, MixinTransformer, RuleOptions};
/// use std::path::Path;
///
/// let options = MixinOptions::new(vec![
///     RuleOptions::new("src/pages/*.vue").with_mixin("build/mixins/page.js"),
/// ]);
/// let transformer = MixinTransformer::from_options(&options, Path::new("/app")).unwrap();
///
/// let out = transformer
///     .transform("/app/src/pages/Home.vue", "<script>export default {}</script>")
///     .unwrap()
///     .unwrap();
/// assert!(out.code.contains(r#"import __mixin_0 from "/app/build/mixins/page.js";"#));
/// assert!(out.code.contains("export default {mixins: __mixins,}"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MixinTransformer {
    rules: RuleSet,
}

impl MixinTransformer {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Resolves `options` against `root` and builds a transformer.
    pub fn from_options(
        options: &MixinOptions,
        root: &Path,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(RuleSet::resolve(options, root)?))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Transforms one component.
    ///
    /// `id` must be canonical. Returns `Ok(None)` when no rule matches, in
    /// which case `document` is not even parsed.
    pub fn transform(&self, id: &str, document: &str) -> Result<Option<Transformed>> {
        let matched = self.rules.matches(id);
        if matched.is_empty() {
            debug!("[fob-mixins] no rule matches {}", id);
            return Ok(None);
        }
        debug!("[fob-mixins] {} <- {:?}", id, matched);

        let region = extract_script(document).map_err(|source| TransformError::Sfc {
            id: id.to_string(),
            source,
        })?;

        let (script, lang) = region
            .as_ref()
            .map(|region| (region.text.as_str(), region.lang))
            .unwrap_or(("", ScriptLang::Js));

        let injected = inject_with_lang(script, &matched, lang)
            .map_err(|err| parse_error(id, document, region.as_ref(), err))?;

        match &injected.outcome {
            MergeOutcome::Unsupported { kind } => warn!(
                "[fob-mixins] {}: `mixins` is a {}, injected mixins were not merged",
                id, kind
            ),
            MergeOutcome::NoTarget => debug!(
                "[fob-mixins] {}: no default-exported object literal, only imports were added",
                id
            ),
            outcome => debug!("[fob-mixins] {}: merged ({:?})", id, outcome),
        }

        Ok(Some(Transformed {
            code: recompose(document, region.as_ref(), &injected.code),
            mixins: matched.into_iter().map(str::to_string).collect(),
            outcome: injected.outcome,
        }))
    }
}

fn parse_error(
    id: &str,
    document: &str,
    region: Option<&ScriptRegion>,
    err: InjectError,
) -> TransformError {
    let message = err.to_string();
    let InjectError::Parse { diagnostics } = err;

    // Offsets only map back when the script came from the document
    let position = region.and_then(|region| {
        let offset = diagnostics.first()?.offset?;
        let absolute = (region.start + offset).min(region.end);
        Some(line_column(document, absolute))
    });
    let (line, column) = position.unzip();

    TransformError::Parse {
        id: id.to_string(),
        message: diagnostics
            .first()
            .map(|d| d.message.clone())
            .unwrap_or(message),
        line,
        column,
        diagnostics,
    }
}

/// 1-based line and column (in chars) of a byte offset.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
