//! Merges injected mixins into a component's default-exported options object.
//!
//! The script is prefixed with a one-line header that imports every mixin and
//! collects them into `__mixins`, then the `mixins` property of the exported
//! object literal is rewritten (or added) to include that array. Edits are
//! pure insertions, so every byte of the user's script survives.

use std::fmt::Write as _;

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingIdentifier, Declaration, ExportDefaultDeclarationKind, Expression, ObjectExpression,
    ObjectProperty, ObjectPropertyKind, Program, PropertyKind, Statement, VariableDeclaration,
};
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{ParseOptions, Parser};
use oxc_semantic::SemanticBuilder;
use oxc_span::{GetSpan, SourceType};

use crate::edit::TextEdits;
use crate::error::{InjectError, ParseDiagnostic};
use crate::extract::ScriptLang;

const MIXINS_VAR: &str = "__mixins";
const MIXIN_PREFIX: &str = "__mixin_";
const EMPTY_EXPORT: &str = "export default {}";

/// What the injector did to the exported object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No `mixins` property existed; one was added
    Inserted,
    /// `{ mixins }` became `{ mixins: __mixins.concat(mixins) }`
    Shorthand,
    /// `mixins: x` was wrapped
    Identifier,
    /// `mixins: [..]` was wrapped
    Array,
    /// `mixins` has a shape that cannot be merged textually; left as is
    Unsupported { kind: &'static str },
    /// No default-exported object literal; only the header was added
    NoTarget,
}

impl MergeOutcome {
    /// Whether the injected mixins actually reach the component.
    pub fn is_merged(&self) -> bool {
        matches!(
            self,
            Self::Inserted | Self::Shorthand | Self::Identifier | Self::Array
        )
    }
}

/// Rewritten script text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injected {
    pub code: String,
    pub outcome: MergeOutcome,
}

/// Injects `mixins` into a plain JavaScript script.
pub fn inject(script: &str, mixins: &[&str]) -> Result<Injected, InjectError> {
    inject_with_lang(script, mixins, ScriptLang::Js)
}

/// Injects `mixins` into a script written in `lang`.
///
/// `mixins` should not be empty: with no mixins there is nothing to merge
/// and callers pass the document through untouched instead.
pub fn inject_with_lang(
    script: &str,
    mixins: &[&str],
    lang: ScriptLang,
) -> Result<Injected, InjectError> {
    debug_assert!(!mixins.is_empty(), "inject called without mixins");

    let header = build_header(mixins);
    let body = if script.trim().is_empty() {
        EMPTY_EXPORT
    } else {
        script
    };
    let mut combined = String::with_capacity(header.len() + body.len());
    combined.push_str(&header);
    combined.push_str(body);

    let allocator = Allocator::default();
    let parser_ret = Parser::new(&allocator, &combined, source_type(lang))
        .with_options(ParseOptions {
            preserve_parens: false,
            ..ParseOptions::default()
        })
        .parse();

    if !parser_ret.errors.is_empty() || parser_ret.panicked {
        return Err(InjectError::Parse {
            diagnostics: collect_diagnostics(&parser_ret.errors, header.len()),
        });
    }

    let program = parser_ret.program;
    let semantic_ret = SemanticBuilder::new()
        .with_check_syntax_error(true)
        .build(&program);
    if !semantic_ret.errors.is_empty() {
        return Err(InjectError::Parse {
            diagnostics: collect_diagnostics(&semantic_ret.errors, header.len()),
        });
    }
    if let Some(diagnostic) = header_collision(&program, header.len(), mixins.len()) {
        return Err(InjectError::Parse {
            diagnostics: vec![diagnostic],
        });
    }

    let mut edits = TextEdits::new(&combined);
    let outcome = match find_exported_object(&program) {
        Some(object) => merge_into(object, &mut edits),
        None => MergeOutcome::NoTarget,
    };

    Ok(Injected {
        code: edits.render(),
        outcome,
    })
}

/// `import __mixin_0 from "..";...const __mixins = [__mixin_0,..];`
///
/// Kept on one line so the user's script keeps its line numbers past the
/// first line.
fn build_header(mixins: &[&str]) -> String {
    let mut header = String::new();
    let mut names = Vec::with_capacity(mixins.len());

    for (index, mixin) in mixins.iter().enumerate() {
        let name = format!("{}{}", MIXIN_PREFIX, index);
        let specifier = serde_json::Value::String((*mixin).to_string()).to_string();
        let _ = write!(header, "import {} from {};", name, specifier);
        names.push(name);
    }
    let _ = write!(header, "const {} = [{}];", MIXINS_VAR, names.join(","));

    header
}

fn source_type(lang: ScriptLang) -> SourceType {
    let source_type = match lang {
        ScriptLang::Js => SourceType::mjs(),
        ScriptLang::Jsx => SourceType::jsx(),
        ScriptLang::Ts => SourceType::ts(),
        ScriptLang::Tsx => SourceType::tsx(),
    };
    source_type.with_module(true)
}

/// Converts oxc diagnostics, shifting offsets so they are relative to the
/// user's script. Offsets inside the header are dropped.
fn collect_diagnostics(errors: &[OxcDiagnostic], header_len: usize) -> Vec<ParseDiagnostic> {
    errors
        .iter()
        .map(|err| {
            let offset = err
                .labels
                .as_ref()
                .and_then(|labels| labels.first())
                .map(|label| label.offset())
                .and_then(|offset| offset.checked_sub(header_len));
            ParseDiagnostic {
                message: err.to_string(),
                offset,
            }
        })
        .collect()
}

/// Reports a top-level user binding that shadows a header name.
///
/// The semantic pass lets `let`, `const` and `class` redeclare an import
/// binding, so those are caught here.
fn header_collision(
    program: &Program<'_>,
    header_len: usize,
    mixin_count: usize,
) -> Option<ParseDiagnostic> {
    let mut bindings = Vec::new();
    for statement in &program.body {
        if (statement.span().start as usize) >= header_len {
            declared_bindings(statement, &mut bindings);
        }
    }

    bindings
        .into_iter()
        .find(|ident| is_header_name(ident.name.as_str(), mixin_count))
        .map(|ident| ParseDiagnostic {
            message: format!("Identifier `{}` has already been declared", ident.name),
            offset: (ident.span.start as usize).checked_sub(header_len),
        })
}

fn is_header_name(name: &str, mixin_count: usize) -> bool {
    if name == MIXINS_VAR {
        return true;
    }
    name.strip_prefix(MIXIN_PREFIX).is_some_and(|suffix| {
        suffix
            .parse::<usize>()
            .is_ok_and(|index| index < mixin_count && index.to_string() == suffix)
    })
}

fn declared_bindings<'p, 'a>(
    statement: &'p Statement<'a>,
    out: &mut Vec<&'p BindingIdentifier<'a>>,
) {
    match statement {
        Statement::VariableDeclaration(decl) => variable_bindings(decl, out),
        Statement::FunctionDeclaration(func) => out.extend(func.id.as_ref()),
        Statement::ClassDeclaration(class) => out.extend(class.id.as_ref()),
        Statement::TSEnumDeclaration(decl) => out.push(&decl.id),
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::VariableDeclaration(decl)) => variable_bindings(decl, out),
            Some(Declaration::FunctionDeclaration(func)) => out.extend(func.id.as_ref()),
            Some(Declaration::ClassDeclaration(class)) => out.extend(class.id.as_ref()),
            Some(Declaration::TSEnumDeclaration(decl)) => out.push(&decl.id),
            _ => {}
        },
        Statement::ExportDefaultDeclaration(export) => match &export.declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(func) => out.extend(func.id.as_ref()),
            ExportDefaultDeclarationKind::ClassDeclaration(class) => out.extend(class.id.as_ref()),
            _ => {}
        },
        _ => {}
    }
}

fn variable_bindings<'p, 'a>(
    decl: &'p VariableDeclaration<'a>,
    out: &mut Vec<&'p BindingIdentifier<'a>>,
) {
    for declarator in &decl.declarations {
        out.extend(declarator.id.get_binding_identifiers());
    }
}

/// Returns the object literal that is the direct declaration of the first
/// `export default`.
///
/// `export default` is only legal at the top level of a module, so the
/// search never descends into nested statements.
pub fn find_exported_object<'p, 'a>(
    program: &'p Program<'a>,
) -> Option<&'p ObjectExpression<'a>> {
    program.body.iter().find_map(|statement| match statement {
        Statement::ExportDefaultDeclaration(export) => match &export.declaration {
            ExportDefaultDeclarationKind::ObjectExpression(object) => Some(&**object),
            _ => None,
        },
        _ => None,
    })
}

fn mixins_property<'p, 'a>(object: &'p ObjectExpression<'a>) -> Option<&'p ObjectProperty<'a>> {
    object.properties.iter().find_map(|property| match property {
        ObjectPropertyKind::ObjectProperty(property)
            if !property.computed
                && property.key.static_name().is_some_and(|name| name == "mixins") =>
        {
            Some(&**property)
        }
        _ => None,
    })
}

fn merge_into(object: &ObjectExpression<'_>, edits: &mut TextEdits<'_>) -> MergeOutcome {
    let Some(property) = mixins_property(object) else {
        // Right after `{`
        edits.insert_right(object.span.start as usize + 1, format!("mixins: {},", MIXINS_VAR));
        return MergeOutcome::Inserted;
    };

    if property.shorthand {
        edits.insert_right(
            property.key.span().end as usize,
            format!(": {}.concat(mixins)", MIXINS_VAR),
        );
        return MergeOutcome::Shorthand;
    }

    if let Some(kind) = unsupported_kind(property) {
        return MergeOutcome::Unsupported { kind };
    }

    let span = property.value.span();
    edits.insert_left(span.start as usize, format!("{}.concat(", MIXINS_VAR));
    edits.insert_right(span.end as usize, ")");

    match &property.value {
        Expression::ArrayExpression(_) => MergeOutcome::Array,
        _ => MergeOutcome::Identifier,
    }
}

/// Names the shape of a `mixins` property that cannot be wrapped, or `None`
/// for an identifier or array value.
fn unsupported_kind(property: &ObjectProperty<'_>) -> Option<&'static str> {
    match property.kind {
        PropertyKind::Get => return Some("getter"),
        PropertyKind::Set => return Some("setter"),
        PropertyKind::Init => {}
    }
    if property.method {
        return Some("method");
    }

    match &property.value {
        Expression::Identifier(_) | Expression::ArrayExpression(_) => None,
        Expression::CallExpression(_) => Some("call expression"),
        Expression::ConditionalExpression(_) => Some("conditional expression"),
        Expression::LogicalExpression(_) => Some("logical expression"),
        Expression::StaticMemberExpression(_)
        | Expression::ComputedMemberExpression(_)
        | Expression::PrivateFieldExpression(_) => Some("member expression"),
        Expression::ObjectExpression(_) => Some("object literal"),
        Expression::TSAsExpression(_)
        | Expression::TSSatisfiesExpression(_)
        | Expression::TSTypeAssertion(_)
        | Expression::TSNonNullExpression(_) => Some("type assertion"),
        _ => Some("expression"),
    }
}
