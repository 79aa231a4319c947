//! Walks the top-level statements of a parsed TypeScript program and reduces each
//! declaration to the language-neutral shape in [`crate::ast`].
//!
//! Declarations are read off `Program::body` directly rather than through a full
//! recursive [`oxc::ast_visit::Visit`] implementation: the AST Record only ever
//! describes top-level declarations, so there is nothing to gain from visiting nested
//! expressions.

use oxc::ast::ast::{
    self, BindingPatternKind, Declaration, PropertyKey, Statement, TSSignature, TSType,
};
use oxc::span::GetSpan;

use crate::ast::{
    AstRecord, Declaration as AstDecl, DeclarationDetail, DeclarationKind, EnumMember, Method,
    Param, Property,
};
use crate::jsdoc::preceding_doc_comment;

pub(crate) fn extract(
    source: &str,
    program: &ast::Program<'_>,
    path: std::path::PathBuf,
) -> AstRecord {
    let mut declarations = Vec::new();

    for stmt in &program.body {
        match stmt {
            Statement::ExportNamedDeclaration(export) => {
                if let Some(decl) = &export.declaration {
                    push_declaration(decl, true, source, &mut declarations);
                }
            }
            Statement::ExportDefaultDeclaration(export) => {
                push_default_declaration(&export.declaration, source, &mut declarations);
            }
            _ => {
                if let Some(decl) = statement_as_declaration(stmt) {
                    push_declaration(decl, false, source, &mut declarations);
                }
            }
        }
    }

    AstRecord { path, declarations }
}

fn statement_as_declaration<'a, 'b>(stmt: &'b Statement<'a>) -> Option<&'b Declaration<'a>> {
    match stmt {
        Statement::VariableDeclaration(_)
        | Statement::FunctionDeclaration(_)
        | Statement::ClassDeclaration(_)
        | Statement::TSTypeAliasDeclaration(_)
        | Statement::TSInterfaceDeclaration(_)
        | Statement::TSEnumDeclaration(_) => stmt.as_declaration(),
        _ => None,
    }
}

fn push_default_declaration(
    decl: &ast::ExportDefaultDeclarationKind<'_>,
    source: &str,
    out: &mut Vec<AstDecl>,
) {
    match decl {
        ast::ExportDefaultDeclarationKind::FunctionDeclaration(f) => {
            push_function(f, true, source, out);
        }
        ast::ExportDefaultDeclarationKind::ClassDeclaration(c) => {
            push_class(c, true, source, out);
        }
        _ => {}
    }
}

fn push_declaration(decl: &Declaration<'_>, exported: bool, source: &str, out: &mut Vec<AstDecl>) {
    match decl {
        Declaration::TSInterfaceDeclaration(iface) => push_interface(iface, exported, source, out),
        Declaration::TSTypeAliasDeclaration(alias) => {
            push_type_alias(alias, exported, source, out)
        }
        Declaration::TSEnumDeclaration(e) => push_enum(e, exported, source, out),
        Declaration::ClassDeclaration(c) => push_class(c, exported, source, out),
        Declaration::FunctionDeclaration(f) => push_function(f, exported, source, out),
        Declaration::VariableDeclaration(v) => push_variables(v, exported, source, out),
        _ => {}
    }
}

fn span_text<'a>(source: &'a str, span: oxc::span::Span) -> &'a str {
    source
        .get(span.start as usize..span.end as usize)
        .unwrap_or_default()
}

fn ts_type_text(source: &str, ty: &TSType<'_>) -> String {
    span_text(source, ty.span()).trim().to_string()
}

fn push_interface(
    iface: &ast::TSInterfaceDeclaration<'_>,
    exported: bool,
    source: &str,
    out: &mut Vec<AstDecl>,
) {
    let extends = iface
        .extends
        .iter()
        .map(|h| span_text(source, h.expression.span()).trim().to_string())
        .collect();

    let properties = iface
        .body
        .body
        .iter()
        .filter_map(|sig| signature_to_property(sig, source))
        .collect();

    out.push(AstDecl {
        kind: DeclarationKind::Interface,
        name: iface.id.name.to_string(),
        doc: preceding_doc_comment(source, iface.span().start as usize),
        exported,
        detail: DeclarationDetail::Interface { properties, extends },
    });
}

fn signature_to_property(sig: &TSSignature<'_>, source: &str) -> Option<Property> {
    let TSSignature::TSPropertySignature(prop) = sig else {
        return None;
    };
    let name = property_key_name(&prop.key)?;
    let type_text = prop
        .type_annotation
        .as_ref()
        .map(|ann| ts_type_text(source, &ann.type_annotation))
        .unwrap_or_else(|| "any".to_string());

    Some(Property {
        name,
        type_text,
        optional: prop.optional,
        readonly: prop.readonly,
        jsdoc: preceding_doc_comment(source, prop.span().start as usize),
    })
}

fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

fn push_type_alias(
    alias: &ast::TSTypeAliasDeclaration<'_>,
    exported: bool,
    source: &str,
    out: &mut Vec<AstDecl>,
) {
    let type_text = ts_type_text(source, &alias.type_annotation);
    let string_union = match &alias.type_annotation {
        TSType::TSUnionType(u) => {
            let members: Vec<String> = u
                .types
                .iter()
                .filter_map(|t| match t {
                    TSType::TSLiteralType(lit) => match &lit.literal {
                        ast::TSLiteral::StringLiteral(s) => Some(s.value.to_string()),
                        _ => None,
                    },
                    _ => None,
                })
                .collect();
            if members.len() == u.types.len() && !members.is_empty() {
                Some(members)
            } else {
                None
            }
        }
        _ => None,
    };

    out.push(AstDecl {
        kind: DeclarationKind::TypeAlias,
        name: alias.id.name.to_string(),
        doc: preceding_doc_comment(source, alias.span().start as usize),
        exported,
        detail: DeclarationDetail::TypeAlias { type_text, string_union },
    });
}

fn push_enum(e: &ast::TSEnumDeclaration<'_>, exported: bool, source: &str, out: &mut Vec<AstDecl>) {
    let members = e
        .body
        .members
        .iter()
        .map(|m| {
            let name = match &m.id {
                ast::TSEnumMemberName::Identifier(id) => id.name.to_string(),
                ast::TSEnumMemberName::String(s) => s.value.to_string(),
                ast::TSEnumMemberName::ComputedString(s) => s.value.to_string(),
                ast::TSEnumMemberName::ComputedTemplateString(t) => {
                    span_text(source, t.span()).trim().to_string()
                }
            };
            let value = m.initializer.as_ref().map(|expr| match expr {
                ast::Expression::StringLiteral(s) => s.value.to_string(),
                other => span_text(source, other.span()).trim().to_string(),
            });
            EnumMember { name, value }
        })
        .collect();

    out.push(AstDecl {
        kind: DeclarationKind::Enum,
        name: e.id.name.to_string(),
        doc: preceding_doc_comment(source, e.span().start as usize),
        exported,
        detail: DeclarationDetail::Enum { members },
    });
}

fn push_class(class: &ast::Class<'_>, exported: bool, source: &str, out: &mut Vec<AstDecl>) {
    let Some(id) = &class.id else { return };

    let mut properties = Vec::new();
    let mut methods = Vec::new();

    for member in &class.body.body {
        match member {
            ast::ClassElement::PropertyDefinition(p) => {
                let Some(name) = property_key_name(&p.key) else {
                    continue;
                };
                let type_text = p
                    .type_annotation
                    .as_ref()
                    .map(|ann| ts_type_text(source, &ann.type_annotation))
                    .unwrap_or_else(|| "any".to_string());
                properties.push(Property {
                    name,
                    type_text,
                    optional: p.optional,
                    readonly: p.readonly,
                    jsdoc: preceding_doc_comment(source, p.span().start as usize),
                });
            }
            ast::ClassElement::MethodDefinition(m) => {
                let Some(name) = property_key_name(&m.key) else {
                    continue;
                };
                let parameters = m
                    .value
                    .params
                    .items
                    .iter()
                    .map(|p| param_from_formal(p, source))
                    .collect();
                let return_type_text = m
                    .value
                    .return_type
                    .as_ref()
                    .map(|ann| ts_type_text(source, &ann.type_annotation));
                methods.push(Method {
                    name,
                    parameters,
                    return_type_text,
                    is_async: m.value.r#async,
                    jsdoc: preceding_doc_comment(source, m.span().start as usize),
                });
            }
            _ => {}
        }
    }

    out.push(AstDecl {
        kind: DeclarationKind::Class,
        name: id.name.to_string(),
        doc: preceding_doc_comment(source, class.span().start as usize),
        exported,
        detail: DeclarationDetail::Class { properties, methods },
    });
}

fn param_from_formal(p: &ast::FormalParameter<'_>, source: &str) -> Param {
    let (name, optional) = match &p.pattern.kind {
        BindingPatternKind::BindingIdentifier(id) => (id.name.to_string(), p.pattern.optional),
        other => (
            span_text(source, other.span()).trim().to_string(),
            p.pattern.optional,
        ),
    };
    let type_text = p
        .pattern
        .type_annotation
        .as_ref()
        .map(|ann| ts_type_text(source, &ann.type_annotation));

    Param { name, type_text, optional, default_value: None }
}

fn push_function(f: &ast::Function<'_>, exported: bool, source: &str, out: &mut Vec<AstDecl>) {
    let Some(id) = &f.id else { return };
    let params = &f.params;

    let parameters = params
        .items
        .iter()
        .map(|p| param_from_formal(p, source))
        .collect::<Vec<_>>();
    let return_type_text = f
        .return_type
        .as_ref()
        .map(|ann| ts_type_text(source, &ann.type_annotation));

    out.push(AstDecl {
        kind: DeclarationKind::Function,
        name: id.name.to_string(),
        doc: preceding_doc_comment(source, f.span().start as usize),
        exported,
        detail: DeclarationDetail::FunctionOrConstant {
            type_text: Some(signature_text(&parameters, return_type_text.as_deref())),
        },
    });
}

fn signature_text(parameters: &[Param], return_type_text: Option<&str>) -> String {
    let params = parameters
        .iter()
        .map(|p| {
            let ty = p.type_text.as_deref().unwrap_or("any");
            format!("{}{}: {ty}", p.name, if p.optional { "?" } else { "" })
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("({params}) => {}", return_type_text.unwrap_or("void"))
}

fn push_variables(
    decl: &ast::VariableDeclaration<'_>,
    exported: bool,
    source: &str,
    out: &mut Vec<AstDecl>,
) {
    for declarator in &decl.declarations {
        let BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind else {
            continue;
        };
        let type_text = declarator
            .id
            .type_annotation
            .as_ref()
            .map(|ann| ts_type_text(source, &ann.type_annotation))
            .or_else(|| {
                declarator
                    .init
                    .as_ref()
                    .map(|init| span_text(source, init.span()).trim().to_string())
            });

        out.push(AstDecl {
            kind: DeclarationKind::Constant,
            name: id.name.to_string(),
            doc: preceding_doc_comment(source, decl.span().start as usize),
            exported,
            detail: DeclarationDetail::FunctionOrConstant { type_text },
        });
    }
}
