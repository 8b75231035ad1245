//! Integration tests for the Generator API
//!
//! These tests drive whole declarations through `Generator::analyze` and
//! `Generator::expand` and check the generated model and items.

use proc_macro2::TokenStream;
use quote::quote;

use tagsmith_codegen::{
    Analysis, GenerateError, Generator, MethodKind, TypeModel,
    config::{GeneratorConfig, NamingConfig, RuntimeConfig},
};
use tagsmith_parser::error::ErrorCode;

fn analyze(tokens: TokenStream) -> Analysis {
    Generator::default()
        .analyze(tokens)
        .expect("default configuration is valid")
}

fn analyze_ok(tokens: TokenStream) -> Analysis {
    let analysis = analyze(tokens);
    assert!(
        !analysis.has_errors(),
        "unexpected diagnostics: {:?}",
        analysis.diagnostics()
    );
    analysis
}

fn root(analysis: &Analysis) -> &TypeModel {
    analysis.model().hosts()[0].root()
}

fn names(ty: &TypeModel) -> Vec<String> {
    ty.registry().types().map(TypeModel::name).collect()
}

#[test]
fn test_distinct_top_level_tags_yield_one_type_each() {
    let analysis = analyze_ok(quote! {
        struct Page {
            schema = || {
                h1();
                p();
                p();
                div();
                h1();
            };
        }
    });

    let root = root(&analysis);
    assert_eq!(names(root), ["PageH1Tag", "PagePTag", "PageDivTag"]);
    assert_eq!(root.registry().len(), 3);
}

#[test]
fn test_same_tag_under_two_parents_yields_two_types() {
    let analysis = analyze_ok(quote! {
        struct Page {
            schema = || {
                a(|| { b(); });
                c(|| { b(); });
            };
        }
    });

    let root = root(&analysis);
    let under_a = root.child("a").unwrap().child("b").unwrap();
    let under_c = root.child("c").unwrap().child("b").unwrap();
    assert_eq!(under_a.name(), "PageATagBTag");
    assert_eq!(under_c.name(), "PageCTagBTag");
    assert_eq!(analysis.model().hosts()[0].tag_types().len(), 4);
}

#[test]
fn test_default_options_generate_three_methods() {
    let analysis = analyze_ok(quote! {
        struct Page {
            schema = || { p(); };
        }
    });

    let root = root(&analysis);
    assert_eq!(root.method_names(), ["p", "p_text", "p_with"]);
    assert_eq!(root.method("p").unwrap().kind(), &MethodKind::Empty);
    assert_eq!(root.method("p_text").unwrap().kind(), &MethodKind::Text);
    assert_eq!(root.method("p_with").unwrap().target(), "PagePTag");
}

#[test]
fn test_empty_attributes_enable_attributed_method() {
    let analysis = analyze_ok(quote! {
        struct Page {
            schema = || {
                a(Options { attributes: [] });
                b();
            };
        }
    });

    let root = root(&analysis);
    assert_eq!(
        root.method("a_with_attrs").unwrap().kind(),
        &MethodKind::Attributed(vec![])
    );
    assert!(root.method("b_with_attrs").is_none());
}

#[test]
fn test_declared_attributes_are_recorded() {
    let analysis = analyze_ok(quote! {
        struct Page {
            schema = || {
                a(Options { attributes: [href, "data-id"] });
            };
        }
    });

    assert_eq!(
        root(&analysis).method("a_with_attrs").unwrap().kind(),
        &MethodKind::Attributed(vec!["href".to_string(), "data-id".to_string()])
    );
}

#[test]
fn test_disallowed_text_keeps_body_methods() {
    let analysis = analyze_ok(quote! {
        struct Page {
            schema = || {
                ul(Options { allow_text: false, attributes: [id] }, || { li(); });
            };
        }
    });

    assert_eq!(root(&analysis).method_names(), ["ul_with", "ul_with_attrs"]);
}

#[test]
fn test_repeated_invocations_merge_methods() {
    let analysis = analyze_ok(quote! {
        struct Page {
            schema = || {
                ul(Options { allow_text: false }, || { li(); });
                ul(Options { attributes: [class] }, || { li(); a(); });
            };
        }
    });

    let root = root(&analysis);
    assert_eq!(root.registry().len(), 1);
    assert_eq!(root.method_names(), ["ul_with", "ul", "ul_text", "ul_with_attrs"]);

    let ul = root.child("ul").unwrap();
    assert_eq!(names(ul), ["PageUlTagLiTag", "PageUlTagATag"]);
}

#[test]
fn test_first_site_wins_for_attributed_method() {
    let analysis = analyze_ok(quote! {
        struct Page {
            schema = || {
                a(Options { attributes: [href] });
                a(Options { attributes: [title] });
            };
        }
    });

    assert_eq!(
        root(&analysis).method("a_with_attrs").unwrap().kind(),
        &MethodKind::Attributed(vec!["href".to_string()])
    );
}

#[test]
fn test_deep_nesting() {
    let analysis = analyze_ok(quote! {
        struct Doc {
            schema = || {
                html(|| { body(|| { div(|| { p(); }); }); });
            };
        }
    });

    let host = &analysis.model().hosts()[0];
    let names: Vec<_> = host.tag_types().iter().map(|ty| ty.name()).collect();
    assert_eq!(
        names,
        [
            "DocHtmlTag",
            "DocHtmlTagBodyTag",
            "DocHtmlTagBodyTagDivTag",
            "DocHtmlTagBodyTagDivTagPTag",
        ]
    );
    let p = host.tag_types()[3];
    assert_eq!(p.tag_name(), Some("p"));
    assert!(p.registry().is_empty());
}

#[test]
fn test_colliding_type_names_are_numbered() {
    let analysis = analyze_ok(quote! {
        struct Page {
            schema = || {
                b(|| { a(); });
                bTagA();
            };
        }
    });

    let root = root(&analysis);
    assert_eq!(root.child("b").unwrap().child("a").unwrap().name(), "PageBTagATag");
    assert_eq!(root.child("bTagA").unwrap().name(), "PageBTagATag2");
}

#[test]
fn test_raw_identifier_tag() {
    let analysis = analyze_ok(quote! {
        struct Form {
            schema = || { r#type(); };
        }
    });

    let root = root(&analysis);
    assert_eq!(root.child("type").unwrap().name(), "FormTypeTag");
    assert_eq!(root.method("type").unwrap().ident().to_string(), "r#type");
}

#[test]
fn test_receiver_call_is_skipped_and_siblings_generate() {
    let analysis = analyze(quote! {
        struct Page {
            schema = || {
                self.p();
                div();
            };
        }
    });

    assert_eq!(analysis.error_codes(), [ErrorCode::E301]);
    let root = root(&analysis);
    assert!(root.method("p").is_none());
    assert_eq!(names(root), ["PageDivTag"]);
}

#[test]
fn test_unsupported_statement_is_skipped() {
    let analysis = analyze(quote! {
        struct Page {
            schema = || {
                let x = 1;
                p();
            };
        }
    });

    assert_eq!(analysis.error_codes(), [ErrorCode::E300]);
    assert_eq!(root(&analysis).method_names(), ["p", "p_text", "p_with"]);
}

#[test]
fn test_self_tag_is_invalid() {
    let analysis = analyze(quote! {
        struct Page {
            schema = || { self(); p(); };
        }
    });

    assert_eq!(analysis.error_codes(), [ErrorCode::E301]);
    assert_eq!(names(root(&analysis)), ["PagePTag"]);
}

#[test]
fn test_constructor_aborts_host() {
    let analysis = analyze(quote! {
        struct Page {
            fn new() -> Self { todo!() }
            schema = || { p(); };
        }
    });

    assert_eq!(analysis.error_codes(), [ErrorCode::E202]);
    assert!(analysis.model().is_empty());
}

#[test]
fn test_host_level_error_only_skips_its_declaration() {
    let analysis = analyze(quote! {
        enum Broken { A }
        struct Page: Base {
            schema = || { p(); };
        }
        struct Good {
            schema = || { p(); };
        }
    });

    assert_eq!(analysis.error_codes(), [ErrorCode::E200, ErrorCode::E201]);
    assert_eq!(analysis.model().hosts().len(), 1);
    assert!(analysis.model().host("Good").is_some());
}

#[test]
fn test_missing_schema_value() {
    let analysis = analyze(quote! {
        struct Page {
            schema;
        }
    });
    assert_eq!(analysis.error_codes(), [ErrorCode::E203]);
}

#[test]
fn test_host_without_schema_is_kept() {
    let analysis = analyze_ok(quote! {
        struct Page {
            title: String;
        }
    });

    let host = analysis.model().host("Page").unwrap();
    assert!(host.root().method_names().is_empty());
    assert_eq!(host.fields().len(), 1);
}

#[test]
fn test_collision_with_host_method() {
    let analysis = analyze(quote! {
        struct Page {
            fn p_text(&self) -> usize { 0 }
            schema = || { p(); };
        }
    });

    assert_eq!(analysis.error_codes(), [ErrorCode::E302]);
    let host = analysis.model().host("Page").unwrap();
    assert_eq!(host.root().method_names(), ["p", "p_with"]);
    assert_eq!(host.methods().len(), 1);
}

#[test]
fn test_collision_between_tags() {
    let analysis = analyze(quote! {
        struct Page {
            schema = || {
                p();
                p_text();
            };
        }
    });

    assert_eq!(analysis.error_codes(), [ErrorCode::E302]);
    let diag = &analysis.diagnostics()[0];
    assert_eq!(diag.labels().len(), 2);
    assert_eq!(
        root(&analysis).method_names(),
        ["p", "p_text", "p_with", "p_text_text", "p_text_with"]
    );
}

#[test]
fn test_tag_named_new_collides_with_constructor() {
    let analysis = analyze(quote! {
        struct Page {
            schema = || { new(); };
        }
    });

    assert_eq!(analysis.error_codes(), [ErrorCode::E302]);
    assert_eq!(root(&analysis).method_names(), ["new_text", "new_with"]);
}

#[test]
fn test_ignored_options_only_warn() {
    let analysis = analyze_ok(quote! {
        struct Page {
            schema = || {
                p(Options { colour: "red" });
                a(Options { attributes: href });
            };
        }
    });

    assert_eq!(analysis.error_codes(), [ErrorCode::W300, ErrorCode::W300]);
    assert_eq!(
        root(&analysis).method_names(),
        ["p", "p_text", "p_with", "a", "a_text", "a_with", "a_with_attrs"]
    );
}

#[test]
fn test_syntax_error_skips_only_its_declaration() {
    let analysis = analyze(quote! {
        struct Page {
            title = 1;
        }

        struct Article {
            schema = || { p(); };
        }
    });

    assert_eq!(analysis.error_codes(), [ErrorCode::E100]);
    assert!(analysis.model().host("Page").is_none());
    let article = analysis.model().host("Article").unwrap();
    assert_eq!(article.root().method_names(), ["p", "p_text", "p_with"]);
}

#[test]
fn test_custom_naming() {
    let config = GeneratorConfig::new(
        NamingConfig::new("Builder", "_str", "_body", "_attrs"),
        RuntimeConfig::default(),
    );
    let analysis = Generator::new(config)
        .analyze(quote! {
            struct Page {
                schema = || { a(Options { attributes: [] }); };
            }
        })
        .unwrap();

    let root = root(&analysis);
    assert_eq!(root.child("a").unwrap().name(), "PageABuilder");
    assert_eq!(root.method_names(), ["a", "a_str", "a_body", "a_attrs"]);
}

#[test]
fn test_invalid_config_is_an_error() {
    let config = GeneratorConfig::new(NamingConfig::default(), RuntimeConfig::new("::"));
    let result = Generator::new(config).expand(quote! { struct Page; });
    assert!(matches!(result, Err(GenerateError::Config(_))));
}

mod expansion {
    use super::*;

    fn expand(tokens: TokenStream) -> syn::File {
        let generated = Generator::default()
            .expand(tokens)
            .expect("declarations expand");
        syn::parse2(generated).expect("generated items parse")
    }

    fn struct_names(file: &syn::File) -> Vec<String> {
        file.items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Struct(item) => Some(item.ident.to_string()),
                _ => None,
            })
            .collect()
    }

    fn inherent_methods(file: &syn::File, type_name: &str) -> Vec<String> {
        file.items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Impl(item) if item.trait_.is_none() => Some(item),
                _ => None,
            })
            .filter(|item| match item.self_ty.as_ref() {
                syn::Type::Path(path) => path.path.segments[0].ident == type_name,
                _ => false,
            })
            .flat_map(|item| item.items.iter())
            .filter_map(|item| match item {
                syn::ImplItem::Fn(method) => Some(method.sig.ident.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_expanded_items() {
        let file = expand(quote! {
            pub struct Page {
                title: String = "home".to_string();
                schema = || {
                    ul(|| { li(); });
                };

                fn title(&self) -> &str {
                    &self.title
                }
            }
        });

        assert_eq!(struct_names(&file), ["Page", "PageUlTag", "PageUlTagLiTag"]);
        assert_eq!(
            inherent_methods(&file, "Page"),
            ["new", "ul", "ul_text", "ul_with", "title"]
        );
        assert_eq!(
            inherent_methods(&file, "PageUlTag"),
            ["new", "li", "li_text", "li_with"]
        );
    }

    #[test]
    fn test_schema_field_is_removed() {
        let file = expand(quote! {
            struct Page {
                count: usize;
                schema = || { p(); };
            }
        });

        let syn::Item::Struct(page) = &file.items[0] else {
            panic!("expected the host struct first");
        };
        let fields: Vec<_> = page
            .fields
            .iter()
            .map(|field| field.ident.as_ref().unwrap().to_string())
            .collect();
        assert_eq!(fields, ["__base", "count"]);
    }

    #[test]
    fn test_tag_types_share_host_visibility() {
        let file = expand(quote! {
            pub(crate) struct Page {
                schema = || { p(); };
            }
        });

        for item in &file.items {
            if let syn::Item::Struct(item) = item {
                assert!(matches!(item.vis, syn::Visibility::Restricted(_)));
            }
        }
    }

    #[test]
    fn test_expand_reports_every_diagnostic() {
        let err = Generator::default()
            .expand(quote! {
                struct Page {
                    schema = || { self.p(); 1; };
                }
            })
            .unwrap_err();

        let GenerateError::Parse { err, .. } = err else {
            panic!("expected a parse error");
        };
        assert_eq!(err.diagnostics().len(), 2);
    }

    #[test]
    fn test_expand_or_report_keeps_valid_output() {
        let output = Generator::default()
            .expand_or_report(quote! {
                struct Page {
                    schema = || { self.p(); div(); };
                }
            })
            .to_string();

        assert!(output.contains("PageDivTag"));
        assert_eq!(output.matches("compile_error").count(), 1);
    }

    #[test]
    fn test_expand_source_formats_output() {
        let formatted = Generator::default()
            .expand_source("struct Page { schema = || { p(); }; }")
            .unwrap();

        assert!(formatted.contains("impl<'out> ::tagsmith::MarkupTag<'out> for PagePTag<'out>"));
        assert!(formatted.contains("const NAME: &'static str = \"p\";"));
    }

    #[test]
    fn test_expand_source_keeps_source_on_error() {
        let source = "struct Page { schema = 1; }";
        let err = Generator::default().expand_source(source).unwrap_err();
        match err {
            GenerateError::Parse { err, src } => {
                assert_eq!(src, source);
                assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E203));
            }
            other => panic!("expected a parse error, got {other}"),
        }
    }

    #[test]
    fn test_expand_source_rejects_unbalanced_tokens() {
        let err = Generator::default()
            .expand_source("struct Page { schema = || { p(); };")
            .unwrap_err();
        assert!(matches!(err, GenerateError::Parse { .. }));
    }
}
