//! Splices a rewritten script back into its component document.

use crate::extract::ScriptRegion;

/// Replaces the script region of `document` with `rewritten`, or appends a
/// new `<script>` block when the document had none.
///
/// Every byte outside the region is copied unchanged.
pub fn recompose(document: &str, region: Option<&ScriptRegion>, rewritten: &str) -> String {
    match region {
        Some(region) => {
            let capacity = document.len() - (region.end - region.start) + rewritten.len();
            let mut out = String::with_capacity(capacity);
            out.push_str(&document[..region.start]);
            out.push_str(rewritten);
            out.push_str(&document[region.end..]);
            out
        }
        None => {
            let mut out = String::with_capacity(document.len() + rewritten.len() + 17);
            out.push_str(document);
            out.push_str("<script>");
            out.push_str(rewritten);
            out.push_str("</script>");
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract_script, ScriptLang};

    #[test]
    fn replaces_region_only() {
        let doc = "<template><p/></template>\n<script>old</script>\n<style>p{}</style>";
        let region = extract_script(doc).unwrap().unwrap();
        assert_eq!(
            recompose(doc, Some(&region), "new"),
            "<template><p/></template>\n<script>new</script>\n<style>p{}</style>"
        );
    }

    #[test]
    fn appends_when_missing() {
        assert_eq!(
            recompose("<template><p/></template>\n", None, "export default {}"),
            "<template><p/></template>\n<script>export default {}</script>"
        );
    }

    #[test]
    fn empty_region() {
        let region = ScriptRegion {
            start: 8,
            end: 8,
            text: String::new(),
            lang: ScriptLang::Js,
        };
        assert_eq!(recompose("<script></script>", Some(&region), "x"), "<script>x</script>");
    }
}
