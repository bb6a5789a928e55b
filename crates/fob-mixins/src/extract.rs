//! Locates the Options API `<script>` block of a component.

use crate::error::SfcError;
use crate::sfc::{parse_sfc, SfcBlock};

/// Script dialect, taken from the block's `lang` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScriptLang {
    #[default]
    Js,
    Jsx,
    Ts,
    Tsx,
}

impl ScriptLang {
    /// Maps a `lang` attribute value. Unknown values fall back to plain
    /// JavaScript.
    pub fn from_attr(lang: Option<&str>) -> Self {
        match lang.map(str::trim) {
            Some("ts" | "typescript") => Self::Ts,
            Some("tsx") => Self::Tsx,
            Some("jsx") => Self::Jsx,
            _ => Self::Js,
        }
    }
}

/// The regular script block: its content span in the document plus the
/// content itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRegion {
    /// Byte offset of the first content byte
    pub start: usize,
    /// Byte offset just past the last content byte
    pub end: usize,
    pub text: String,
    pub lang: ScriptLang,
}

impl ScriptRegion {
    fn from_block(block: &SfcBlock<'_>) -> Self {
        Self {
            start: block.start,
            end: block.end,
            text: block.content.to_string(),
            lang: ScriptLang::from_attr(block.lang()),
        }
    }
}

/// Returns the regular `<script>` block, or `None` when the document has
/// none. `<script setup>` is never returned.
pub fn extract_script(document: &str) -> Result<Option<ScriptRegion>, SfcError> {
    let descriptor = parse_sfc(document)?;
    Ok(descriptor.script.as_ref().map(ScriptRegion::from_block))
}
