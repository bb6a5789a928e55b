//! Top-level block scanner for Vue single file components.
//!
//! Splits a component document into its `<template>`, `<script>`,
//! `<script setup>`, `<style>` and custom blocks, recording the byte range
//! of each block's inner content. Only top-level blocks are recognised:
//! anything inside `<template>` (including nested `<template>` tags) belongs
//! to the template, and HTML comments between blocks are skipped.
//!
//! The scanner uses memchr rather than regex, never panics on malformed
//! input, and enforces the same size limits as the other framework
//! extractors.

use memchr::{memchr, memchr2, memmem};
use tracing::debug;

use crate::error::SfcError;

/// Maximum file size in bytes (10 MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of top-level blocks to process
pub const MAX_BLOCKS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Template,
    Script,
    Style,
    Custom,
}

/// One top-level block of a component document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcBlock<'a> {
    pub kind: BlockKind,
    /// Tag name as written
    pub tag: &'a str,
    /// Attributes in source order; valueless attributes map to `None`
    pub attrs: Vec<(&'a str, Option<&'a str>)>,
    /// Byte offset of the first content byte (just after the opening tag)
    pub start: usize,
    /// Byte offset just past the last content byte (start of the closing tag)
    pub end: usize,
    /// `&source[start..end]`
    pub content: &'a str,
}

impl<'a> SfcBlock<'a> {
    /// Looks up an attribute. The outer `Option` is presence, the inner one
    /// the value.
    pub fn attr(&self, name: &str) -> Option<Option<&'a str>> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn lang(&self) -> Option<&'a str> {
        self.attr("lang").flatten()
    }
}

/// All top-level blocks of a component document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfcDescriptor<'a> {
    pub template: Option<SfcBlock<'a>>,
    /// Regular `<script>` (Options API)
    pub script: Option<SfcBlock<'a>>,
    /// `<script setup>`
    pub script_setup: Option<SfcBlock<'a>>,
    pub styles: Vec<SfcBlock<'a>>,
    pub custom_blocks: Vec<SfcBlock<'a>>,
}

/// Splits `source` into its top-level blocks.
///
/// Self-closing top-level tags carry no content and are skipped. When a
/// block kind that may only appear once is repeated, the first occurrence
/// wins.
pub fn parse_sfc(source: &str) -> Result<SfcDescriptor<'_>, SfcError> {
    if source.len() > MAX_FILE_SIZE {
        return Err(SfcError::FileTooLarge {
            size: source.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let bytes = source.as_bytes();
    let mut descriptor = SfcDescriptor::default();
    let mut pointer = 0;
    let mut block_count = 0;

    while let Some(offset) = memchr(b'<', &bytes[pointer..]) {
        let open = pointer + offset;
        let rest = &bytes[open..];

        if rest.starts_with(b"<!--") {
            match memmem::find(&bytes[open + 4..], b"-->") {
                Some(end) => {
                    pointer = open + 4 + end + 3;
                    continue;
                }
                // An unterminated comment swallows the rest of the file
                None => break,
            }
        }

        // Doctype, processing instructions and stray closing tags
        if rest.starts_with(b"</") || rest.starts_with(b"<!") || rest.starts_with(b"<?") {
            match find_closing_angle(bytes, open + 1) {
                Some(end) => {
                    pointer = end + 1;
                    continue;
                }
                None => break,
            }
        }

        let name_start = open + 1;
        let name_end = scan_tag_name(bytes, name_start);
        if name_end == name_start {
            pointer = open + 1;
            continue;
        }
        let tag = &source[name_start..name_end];

        let tag_end =
            find_closing_angle(bytes, name_end).ok_or_else(|| SfcError::UnclosedBlock {
                tag: tag.to_string(),
                position: open,
            })?;

        if bytes[tag_end - 1] == b'/' {
            debug!("[fob-mixins] skipping self-closing <{}> block", tag);
            pointer = tag_end + 1;
            continue;
        }

        let content_start = tag_end + 1;
        let close = if tag == "template" {
            find_template_end(bytes, content_start)
        } else {
            find_close_tag(bytes, content_start, tag)
        };
        let (content_end, block_end) = close.ok_or_else(|| SfcError::UnclosedBlock {
            tag: tag.to_string(),
            position: open,
        })?;

        block_count += 1;
        if block_count > MAX_BLOCKS {
            return Err(SfcError::TooManyBlocks {
                count: block_count,
                max: MAX_BLOCKS,
            });
        }

        let kind = match tag {
            "template" => BlockKind::Template,
            "script" => BlockKind::Script,
            "style" => BlockKind::Style,
            _ => BlockKind::Custom,
        };

        let block = SfcBlock {
            kind,
            tag,
            attrs: parse_attrs(&source[name_end..tag_end]),
            start: content_start,
            end: content_end,
            content: &source[content_start..content_end],
        };
        descriptor.insert(block);

        pointer = block_end;
    }

    Ok(descriptor)
}

impl<'a> SfcDescriptor<'a> {
    fn insert(&mut self, block: SfcBlock<'a>) {
        let slot = match block.kind {
            BlockKind::Template => &mut self.template,
            BlockKind::Script if block.has_attr("setup") => &mut self.script_setup,
            BlockKind::Script => &mut self.script,
            BlockKind::Style => {
                self.styles.push(block);
                return;
            }
            BlockKind::Custom => {
                self.custom_blocks.push(block);
                return;
            }
        };

        if slot.is_some() {
            debug!(
                "[fob-mixins] ignoring duplicate <{}> block at byte {}",
                block.tag, block.start
            );
            return;
        }
        *slot = Some(block);
    }
}

/// Returns the end of a tag name starting at `start`, or `start` if the
/// bytes there do not form a tag name.
fn scan_tag_name(bytes: &[u8], start: usize) -> usize {
    if !bytes.get(start).is_some_and(u8::is_ascii_alphabetic) {
        return start;
    }

    let mut end = start;
    while end < bytes.len()
        && (bytes[end].is_ascii_alphanumeric() || matches!(bytes[end], b'-' | b'_' | b':' | b'.'))
    {
        end += 1;
    }
    end
}

/// Finds the closing `>` of a tag, handling quoted attributes.
fn find_closing_angle(bytes: &[u8], start: usize) -> Option<usize> {
    let mut in_quote = false;
    let mut quote_char = 0u8;

    for (i, &byte) in bytes[start..].iter().enumerate() {
        match byte {
            b'"' | b'\'' => {
                if !in_quote {
                    in_quote = true;
                    quote_char = byte;
                } else if byte == quote_char {
                    in_quote = false;
                }
            }
            b'>' if !in_quote => return Some(start + i),
            _ => {}
        }
    }

    None
}

/// Finds `</tag>` for a raw-text block. Returns `(content_end, block_end)`.
fn find_close_tag(bytes: &[u8], start: usize, tag: &str) -> Option<(usize, usize)> {
    let needle = format!("</{}", tag);
    let finder = memmem::Finder::new(needle.as_bytes());
    let mut from = start;

    while let Some(offset) = finder.find(&bytes[from..]) {
        let close = from + offset;
        let after = close + needle.len();
        if is_close_boundary(bytes.get(after)) {
            let gt = find_closing_angle(bytes, after)?;
            return Some((close, gt + 1));
        }
        from = after;
    }

    None
}

/// Finds the `</template>` matching a top-level `<template>`, counting
/// nested `<template>` elements (slots, conditionals).
///
/// Attribute values and `{{ }}` interpolations are opaque, so markup-like
/// text inside them is not counted.
fn find_template_end(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
    const OPEN: &[u8] = b"<template";
    const CLOSE: &[u8] = b"</template";

    let mut depth = 1usize;
    let mut pointer = start;

    while let Some(offset) = memchr2(b'<', b'{', &bytes[pointer..]) {
        let at = pointer + offset;
        let rest = &bytes[at..];

        if rest.starts_with(b"{{") {
            // An interpolation never spans the closing tag
            let body = &bytes[at + 2..];
            pointer = match memmem::find(body, b"}}") {
                Some(end) if memmem::find(&body[..end], CLOSE).is_none() => at + 2 + end + 2,
                _ => at + 2,
            };
        } else if rest[0] == b'{' {
            pointer = at + 1;
        } else if rest.starts_with(b"<!--") {
            let end = memmem::find(&bytes[at + 4..], b"-->")?;
            pointer = at + 4 + end + 3;
        } else if rest.starts_with(CLOSE) && is_close_boundary(bytes.get(at + CLOSE.len())) {
            let gt = find_closing_angle(bytes, at + CLOSE.len())?;
            depth -= 1;
            if depth == 0 {
                return Some((at, gt + 1));
            }
            pointer = gt + 1;
        } else if rest.starts_with(OPEN) && is_open_boundary(bytes.get(at + OPEN.len())) {
            let gt = find_closing_angle(bytes, at + OPEN.len())?;
            if bytes[gt - 1] != b'/' {
                depth += 1;
            }
            pointer = gt + 1;
        } else if scan_tag_name(bytes, at + 1) > at + 1 {
            pointer = find_closing_angle(bytes, at + 1).map_or(at + 1, |gt| gt + 1);
        } else {
            pointer = at + 1;
        }
    }

    None
}

fn is_open_boundary(byte: Option<&u8>) -> bool {
    matches!(byte, Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/'))
}

fn is_close_boundary(byte: Option<&u8>) -> bool {
    matches!(byte, Some(b' ' | b'\t' | b'\n' | b'\r' | b'>'))
}

/// Parses the attribute section of an opening tag.
fn parse_attrs(text: &str) -> Vec<(&str, Option<&str>)> {
    let bytes = text.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let name_start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let name = &text[name_start..i];
        if name.is_empty() {
            i += 1;
            continue;
        }

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            let value = match bytes.get(i) {
                Some(&quote @ (b'"' | b'\'')) => {
                    let value_start = i + 1;
                    let value_end = memchr(quote, &bytes[value_start..])
                        .map(|offset| value_start + offset)
                        .unwrap_or(bytes.len());
                    i = (value_end + 1).min(bytes.len());
                    &text[value_start..value_end]
                }
                _ => {
                    let value_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                        i += 1;
                    }
                    &text[value_start..i]
                }
            };
            attrs.push((name, Some(value)));
        } else {
            attrs.push((name, None));
        }
    }

    attrs
}
