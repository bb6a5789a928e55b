//! End-to-end behaviour of the per-file transform.

use std::path::Path;
use std::sync::Arc;
use std::thread;

use fob_mixins::{
    extract_script, MergeOutcome, MixinOptions, MixinTransformer, RuleOptions, TransformError,
};
use proptest::prelude::*;

const ROOT: &str = "/project";

fn transformer(rules: Vec<RuleOptions>) -> MixinTransformer {
    MixinTransformer::from_options(&MixinOptions::new(rules), Path::new(ROOT)).unwrap()
}

fn pages() -> MixinTransformer {
    transformer(vec![
        RuleOptions::new("src/pages/*.vue").with_mixin("build/mixins/page.js"),
    ])
}

const PAGE: &str = r#"<template>
  <div class="home">{{ title }}</div>
</template>

<script>
export default {
  name: 'Home',
  data() {
    return { title: 'Home' }
  }
}
</script>

<style scoped>
.home { color: red; }
</style>
"#;

#[test]
fn unmatched_file_is_passed_through() {
    let out = pages().transform("/project/src/components/Button.vue", PAGE).unwrap();
    assert!(out.is_none());
}

#[test]
fn empty_rule_set_never_transforms() {
    let out = transformer(vec![]).transform("/project/src/pages/Home.vue", PAGE).unwrap();
    assert!(out.is_none());
}

#[test]
fn inserts_mixins_when_absent() {
    let out = pages()
        .transform("/project/src/pages/Home.vue", PAGE)
        .unwrap()
        .unwrap();

    assert_eq!(out.outcome, MergeOutcome::Inserted);
    assert!(out.code.contains(
        "<script>import __mixin_0 from \"/project/build/mixins/page.js\";const __mixins = [__mixin_0];\nexport default {mixins: __mixins,\n  name: 'Home',"
    ));
}

#[test]
fn regions_outside_script_are_untouched() {
    let out = pages()
        .transform("/project/src/pages/Home.vue", PAGE)
        .unwrap()
        .unwrap();

    let script_open = PAGE.find("<script>").unwrap() + "<script>".len();
    let script_close = PAGE.find("</script>").unwrap();
    assert!(out.code.starts_with(&PAGE[..script_open]));
    assert!(out.code.ends_with(&PAGE[script_close..]));
}

#[test]
fn concatenation_follows_rule_order() {
    let t = transformer(vec![
        RuleOptions::new("src/**/*.vue")
            .with_mixin("build/mixins/A.js")
            .with_mixin("build/mixins/B.js"),
        RuleOptions::new("src/pages/*.vue").with_mixin("build/mixins/C.js"),
    ]);
    let out = t
        .transform("/project/src/pages/Home.vue", PAGE)
        .unwrap()
        .unwrap();

    assert_eq!(
        out.mixins,
        vec![
            "/project/build/mixins/A.js",
            "/project/build/mixins/B.js",
            "/project/build/mixins/C.js",
        ]
    );
    assert!(out.code.contains(concat!(
        r#"import __mixin_0 from "/project/build/mixins/A.js";"#,
        r#"import __mixin_1 from "/project/build/mixins/B.js";"#,
        r#"import __mixin_2 from "/project/build/mixins/C.js";"#,
        "const __mixins = [__mixin_0,__mixin_1,__mixin_2];",
    )));
}

#[test]
fn exclude_takes_precedence() {
    let t = transformer(vec![
        RuleOptions::new("src/pages/*.vue")
            .with_exclude("src/pages/Login.vue")
            .with_mixin("build/mixins/auth.js"),
    ]);
    assert!(t.transform("/project/src/pages/Login.vue", PAGE).unwrap().is_none());
    assert!(t.transform("/project/src/pages/Home.vue", PAGE).unwrap().is_some());
}

#[test]
fn shorthand_mixins_are_merged() {
    let doc = "<script>\nimport mixins from './mixins'\nexport default { mixins }\n</script>";
    let out = pages()
        .transform("/project/src/pages/A.vue", doc)
        .unwrap()
        .unwrap();
    assert_eq!(out.outcome, MergeOutcome::Shorthand);
    assert!(out
        .code
        .contains("export default { mixins: __mixins.concat(mixins) }\n</script>"));
}

#[test]
fn array_mixins_are_merged() {
    let doc = "<script>\nimport x from './x'\nexport default { mixins: [x], name: 'A' }\n</script>";
    let out = pages()
        .transform("/project/src/pages/A.vue", doc)
        .unwrap()
        .unwrap();
    assert_eq!(out.outcome, MergeOutcome::Array);
    assert!(out.code.contains("{ mixins: __mixins.concat([x]), name: 'A' }"));
}

#[test]
fn missing_script_is_synthesized() {
    let doc = "<template><div/></template>\n";
    let out = pages()
        .transform("/project/src/pages/A.vue", doc)
        .unwrap()
        .unwrap();
    assert_eq!(
        out.code,
        "<template><div/></template>\n<script>import __mixin_0 from \"/project/build/mixins/page.js\";const __mixins = [__mixin_0];export default {mixins: __mixins,}</script>"
    );
}

#[test]
fn setup_only_component_gets_a_regular_script() {
    let doc = "<script setup>\nconst n = 1\n</script>\n<template><p>{{ n }}</p></template>";
    let out = pages()
        .transform("/project/src/pages/A.vue", doc)
        .unwrap()
        .unwrap();
    assert!(out.code.starts_with(doc));
    assert!(out.code.ends_with("export default {mixins: __mixins,}</script>"));
}

#[test]
fn typescript_script_uses_ts_grammar() {
    let doc = r#"<script lang="ts">
import type { PropType } from 'vue'
export default {
  props: { items: Array as PropType<string[]> },
}
</script>"#;
    let out = pages()
        .transform("/project/src/pages/A.vue", doc)
        .unwrap()
        .unwrap();
    assert_eq!(out.outcome, MergeOutcome::Inserted);
    assert!(out.code.contains("export default {mixins: __mixins,\n  props:"));
}

#[test]
fn unsupported_shape_is_left_alone() {
    let doc = "<script>\nexport default { mixins: cond ? [a] : [b] }\n</script>";
    let out = pages()
        .transform("/project/src/pages/A.vue", doc)
        .unwrap()
        .unwrap();
    assert_eq!(
        out.outcome,
        MergeOutcome::Unsupported {
            kind: "conditional expression"
        }
    );
    assert!(out.code.contains("export default { mixins: cond ? [a] : [b] }"));
}

#[test]
fn parse_failure_names_the_file() {
    let doc = "<script>\nexport default {\n</script>";
    let err = pages()
        .transform("/project/src/pages/Broken.vue", doc)
        .unwrap_err();
    assert!(matches!(err, TransformError::Parse { .. }));
    assert!(err.to_string().contains("/project/src/pages/Broken.vue"));
}

#[test]
fn header_collision_is_a_parse_error() {
    let doc = "<script>\nconst __mixins = []\nexport default { mixins: __mixins }\n</script>";
    let err = pages()
        .transform("/project/src/pages/A.vue", doc)
        .unwrap_err();
    assert!(matches!(err, TransformError::Parse { .. }));
}

#[test]
fn transformed_output_is_not_transformed_twice() {
    let once = pages()
        .transform("/project/src/pages/Home.vue", PAGE)
        .unwrap()
        .unwrap();
    let twice = pages().transform("/project/src/pages/Home.vue", &once.code);
    assert!(matches!(twice, Err(TransformError::Parse { .. })));
}

#[test]
fn shared_transformer_across_threads() {
    let shared = Arc::new(transformer(vec![
        RuleOptions::new("src/**/*.vue").with_mixin("build/mixins/log.js"),
    ]));
    let expected = shared
        .transform("/project/src/pages/Home.vue", PAGE)
        .unwrap()
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                shared
                    .transform("/project/src/pages/Home.vue", PAGE)
                    .unwrap()
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,:;(){}\n]{0,24}"
}

/// A top-level block that is not the regular script.
fn other_block() -> impl Strategy<Value = String> {
    prop_oneof![
        text().prop_map(|t| format!("<template>\n  <div class=\"a\">{}</div>\n</template>", t)),
        text().prop_map(|t| format!("<style scoped>\n{}\n</style>", t)),
        text().prop_map(|t| format!("<docs lang=\"md\">{}</docs>", t)),
        text().prop_map(|t| format!("<!-- {} -->", t)),
        text().prop_map(|t| format!("<script setup>\nconst t = '{}'\n</script>", t)),
    ]
}

fn script_body() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("\nexport default { name: 'A' }\n".to_string()),
        Just("\nimport a from './a'\nexport default { mixins: [a] }\n".to_string()),
        Just("\nimport mixins from './m'\nexport default { mixins }\n".to_string()),
        Just("\nconst x = 1\n".to_string()),
    ]
}

/// Component documents with blocks in any order, with or without a regular
/// script.
fn document() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(other_block(), 0..5),
        prop::option::of((script_body(), any::<prop::sample::Index>())),
        prop::collection::vec("[ \n]{0,2}", 6),
    )
        .prop_map(|(mut blocks, script, gaps)| {
            if let Some((body, index)) = script {
                let at = index.index(blocks.len() + 1);
                blocks.insert(at, format!("<script>{}</script>", body));
            }
            blocks
                .iter()
                .zip(gaps.iter().cycle())
                .map(|(block, gap)| format!("{}{}", block, gap))
                .collect()
        })
}

proptest! {
    #[test]
    fn bytes_outside_the_script_are_preserved(doc in document(), count in 1usize..4) {
        let rule = (0..count).fold(RuleOptions::new("src/**/*.vue"), |rule, i| {
            rule.with_mixin(format!("build/mixins/m{}.js", i))
        });
        let out = transformer(vec![rule])
            .transform("/project/src/A.vue", &doc)
            .unwrap()
            .unwrap();

        match extract_script(&doc).unwrap() {
            Some(region) => {
                prop_assert!(out.code.starts_with(&doc[..region.start]));
                prop_assert!(out.code.ends_with(&doc[region.end..]));
            }
            None => prop_assert!(out.code.starts_with(&doc)),
        }
        prop_assert_eq!(out.mixins.len(), count);
    }
}
