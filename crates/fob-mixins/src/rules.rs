//! Resolved, immutable rule set.

use std::path::Path;

use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

use crate::config::MixinOptions;
use crate::error::ConfigError;
use crate::paths;

/// A rule whose patterns and mixin paths are canonical and whose globs are
/// compiled.
#[derive(Debug, Clone)]
pub struct MixinRule {
    include: String,
    include_glob: GlobMatcher,
    exclude: Option<(String, GlobMatcher)>,
    mixins: Vec<String>,
}

impl MixinRule {
    /// Compiles a rule from patterns that are already canonical.
    pub fn new(
        include: impl Into<String>,
        exclude: Option<String>,
        mixins: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let include = include.into();
        let include_glob = compile_glob(&include)?;
        let exclude = match exclude {
            Some(pattern) => {
                let glob = compile_glob(&pattern)?;
                Some((pattern, glob))
            }
            None => None,
        };

        Ok(Self {
            include,
            include_glob,
            exclude,
            mixins,
        })
    }

    pub fn include(&self) -> &str {
        &self.include
    }

    pub fn exclude(&self) -> Option<&str> {
        self.exclude.as_ref().map(|(pattern, _)| pattern.as_str())
    }

    pub fn mixins(&self) -> &[String] {
        &self.mixins
    }

    /// Whether this rule contributes its mixins to `id`.
    pub fn applies_to(&self, id: &str) -> bool {
        self.include_glob.is_match(id)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|(_, glob)| glob.is_match(id))
    }
}

/// Ordered set of rules, built once per build session.
///
/// The set is immutable and `Send + Sync`, so one instance can serve any
/// number of concurrent transforms.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<MixinRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<MixinRule>) -> Self {
        Self { rules }
    }

    /// Resolves user options against the project root.
    ///
    /// `include`/`exclude` become absolute glob patterns and every mixin
    /// becomes an absolute module path. An empty `exclude` is treated as
    /// absent.
    pub fn resolve(options: &MixinOptions, root: &Path) -> Result<Self, ConfigError> {
        let mut rules = Vec::with_capacity(options.rules.len());

        for (index, rule) in options.rules.iter().enumerate() {
            let include = rule
                .include
                .as_deref()
                .filter(|pattern| !pattern.trim().is_empty())
                .ok_or(ConfigError::MissingInclude { index })?;
            let include = paths::resolve(root, include)?;

            let exclude = rule
                .exclude
                .as_deref()
                .filter(|pattern| !pattern.trim().is_empty())
                .map(|pattern| paths::resolve(root, pattern))
                .transpose()?;

            let mixins = rule
                .mixins
                .iter()
                .map(|mixin| paths::resolve(root, mixin))
                .collect::<Result<Vec<_>, _>>()?;

            if mixins.is_empty() {
                warn!("[fob-mixins] rule #{} ({}) has no mixins", index, include);
            }

            rules.push(MixinRule::new(include, exclude, mixins)?);
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[MixinRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Compiles a glob with minimatch-like separator handling: `*` and `?`
/// stay within one path segment, `**` spans segments.
fn compile_glob(pattern: &str) -> Result<GlobMatcher, ConfigError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleOptions;

    fn options(rules: Vec<RuleOptions>) -> MixinOptions {
        MixinOptions::new(rules)
    }

    #[test]
    fn resolve_makes_everything_absolute() {
        let set = RuleSet::resolve(
            &options(vec![RuleOptions::new("src/pages/*.vue")
                .with_exclude("src/pages/Login.vue")
                .with_mixin("build/mixins/page.js")]),
            Path::new("/project"),
        )
        .unwrap();

        let rule = &set.rules()[0];
        assert_eq!(rule.include(), "/project/src/pages/*.vue");
        assert_eq!(rule.exclude(), Some("/project/src/pages/Login.vue"));
        assert_eq!(rule.mixins(), ["/project/build/mixins/page.js"]);
    }

    #[test]
    fn resolve_requires_include() {
        let err = RuleSet::resolve(
            &options(vec![
                RuleOptions::new("src/*.vue"),
                RuleOptions::default().with_mixin("a.js"),
            ]),
            Path::new("/project"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingInclude { index: 1 }));
    }

    #[test]
    fn empty_exclude_is_absent() {
        let set = RuleSet::resolve(
            &options(vec![RuleOptions::new("src/*.vue").with_exclude("")]),
            Path::new("/project"),
        )
        .unwrap();
        assert_eq!(set.rules()[0].exclude(), None);
    }

    #[test]
    fn invalid_glob_is_config_error() {
        let err = RuleSet::resolve(
            &options(vec![RuleOptions::new("src/[a-.vue")]),
            Path::new("/project"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn single_star_stays_in_segment() {
        let rule = MixinRule::new("/p/src/*.vue", None, vec![]).unwrap();
        assert!(rule.applies_to("/p/src/App.vue"));
        assert!(!rule.applies_to("/p/src/pages/Home.vue"));
    }

    #[test]
    fn double_star_spans_segments() {
        let rule = MixinRule::new("/p/src/**/*.vue", None, vec![]).unwrap();
        assert!(rule.applies_to("/p/src/App.vue"));
        assert!(rule.applies_to("/p/src/pages/deep/Home.vue"));
        assert!(!rule.applies_to("/p/lib/Home.vue"));
    }

    #[test]
    fn brace_alternation() {
        let rule = MixinRule::new("/p/src/{pages,views}/*.vue", None, vec![]).unwrap();
        assert!(rule.applies_to("/p/src/pages/A.vue"));
        assert!(rule.applies_to("/p/src/views/B.vue"));
        assert!(!rule.applies_to("/p/src/widgets/C.vue"));
    }

    #[test]
    fn rule_set_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet>();
    }
}
