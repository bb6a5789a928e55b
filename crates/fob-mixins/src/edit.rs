//! Ordered insertion list over an immutable source string.

/// Which neighbour an insertion sticks to when several land on one offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Side {
    /// Binds to the preceding character
    Left,
    /// Binds to the following character
    Right,
}

#[derive(Debug, Clone)]
struct Insertion {
    offset: usize,
    side: Side,
    text: String,
}

/// Collects insertions and renders them in a single pass.
///
/// Existing characters are never removed or reordered: stripping every
/// inserted string from [`TextEdits::render`] yields the source again.
///
/// # Example
///
/// ```
/// use fob_mixins::TextEdits;
///
/// let mut edits = TextEdits::new("[a]");
/// edits.insert_right(1, "x,");
/// edits.insert_left(2, ",y");
/// assert_eq!(edits.render(), "[x,a,y]");
/// ```
#[derive(Debug, Clone)]
pub struct TextEdits<'a> {
    source: &'a str,
    insertions: Vec<Insertion>,
}

impl<'a> TextEdits<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            insertions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.insertions.len()
    }

    pub fn insert_left(&mut self, offset: usize, text: impl Into<String>) -> &mut Self {
        self.push(offset, Side::Left, text.into())
    }

    pub fn insert_right(&mut self, offset: usize, text: impl Into<String>) -> &mut Self {
        self.push(offset, Side::Right, text.into())
    }

    fn push(&mut self, offset: usize, side: Side, text: String) -> &mut Self {
        debug_assert!(
            self.source.is_char_boundary(offset),
            "insertion offset {} is not a char boundary of a {}-byte source",
            offset,
            self.source.len()
        );
        self.insertions.push(Insertion { offset, side, text });
        self
    }

    /// Applies every insertion. Insertions at the same offset are ordered
    /// Left before Right, then by insertion order.
    pub fn render(&self) -> String {
        let mut ordered: Vec<&Insertion> = self.insertions.iter().collect();
        ordered.sort_by_key(|insertion| (insertion.offset, insertion.side));

        let extra: usize = ordered.iter().map(|insertion| insertion.text.len()).sum();
        let mut out = String::with_capacity(self.source.len() + extra);
        let mut cursor = 0;

        for insertion in ordered {
            let offset = insertion.offset.min(self.source.len());
            out.push_str(&self.source[cursor..offset]);
            out.push_str(&insertion.text);
            cursor = offset;
        }
        out.push_str(&self.source[cursor..]);

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn no_insertions_renders_source() {
        let edits = TextEdits::new("export default {}");
        assert!(edits.is_empty());
        assert_eq!(edits.render(), "export default {}");
    }

    #[test]
    fn wrap_value() {
        let source = "mixins: [a]";
        let mut edits = TextEdits::new(source);
        edits
            .insert_left(8, "__mixins.concat(")
            .insert_right(11, ")");
        assert_eq!(edits.render(), "mixins: __mixins.concat([a])");
        assert_eq!(edits.len(), 2);
    }

    #[test]
    fn left_precedes_right_at_same_offset() {
        let mut edits = TextEdits::new("ab");
        edits.insert_right(1, "R");
        edits.insert_left(1, "L");
        assert_eq!(edits.render(), "aLRb");
    }

    #[test]
    fn same_side_keeps_insertion_order() {
        let mut edits = TextEdits::new("ab");
        edits.insert_right(1, "1");
        edits.insert_right(1, "2");
        edits.insert_left(1, "x");
        edits.insert_left(1, "y");
        assert_eq!(edits.render(), "axy12b");
    }

    #[test]
    fn insert_at_ends() {
        let mut edits = TextEdits::new("mid");
        edits.insert_right(0, "<");
        edits.insert_left(3, ">");
        assert_eq!(edits.render(), "<mid>");
    }

    #[test]
    fn multibyte_source() {
        let source = "{ t: 'héllo' }";
        let mut edits = TextEdits::new(source);
        edits.insert_right(1, "mixins: __mixins,");
        assert_eq!(edits.render(), "{mixins: __mixins, t: 'héllo' }");
    }

    fn strip(rendered: &str, source: &str, inserted: &[(usize, bool, String)]) -> String {
        // Rebuild the source by walking the same ordering render() uses.
        let mut ordered: Vec<_> = inserted
            .iter()
            .enumerate()
            .map(|(i, (offset, left, text))| {
                let side = if *left { Side::Left } else { Side::Right };
                (*offset, side, i, text)
            })
            .collect();
        ordered.sort_by_key(|(offset, side, i, _)| (*offset, *side, *i));

        let mut out = String::new();
        let mut rest = rendered;
        let mut cursor = 0;
        for (offset, _, _, text) in ordered {
            let chunk = &source[cursor..offset];
            assert!(rest.starts_with(chunk));
            out.push_str(chunk);
            rest = &rest[chunk.len()..];
            assert!(rest.starts_with(text.as_str()));
            rest = &rest[text.len()..];
            cursor = offset;
        }
        assert_eq!(rest, &source[cursor..]);
        out.push_str(rest);
        out
    }

    proptest! {
        #[test]
        fn never_alters_source_characters(
            source in "[a-z{}\\[\\], ]{0,40}",
            raw in prop::collection::vec((0usize..64, any::<bool>(), "[A-Z_()]{0,6}"), 0..8),
        ) {
            let inserted: Vec<(usize, bool, String)> = raw
                .into_iter()
                .map(|(offset, left, text)| (offset % (source.len() + 1), left, text))
                .collect();

            let mut edits = TextEdits::new(&source);
            for (offset, left, text) in &inserted {
                if *left {
                    edits.insert_left(*offset, text.clone());
                } else {
                    edits.insert_right(*offset, text.clone());
                }
            }

            let rendered = edits.render();
            let added: usize = inserted.iter().map(|(_, _, text)| text.len()).sum();
            prop_assert_eq!(rendered.len(), source.len() + added);
            prop_assert_eq!(strip(&rendered, &source, &inserted), source);
        }
    }
}
