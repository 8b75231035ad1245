//! Tagsmith Codegen - the generator behind `markup_builder!`.
//!
//! Validates host declarations, synthesizes one builder type per distinct
//! tag name per scope together with its methods, and emits the result as
//! Rust tokens. The procedural macro and the CLI are thin adapters over
//! [`Generator`].

pub mod config;

mod emit;
mod error;
mod host;
mod model;
mod registry;
mod synth;

pub use error::{GenerateError, compile_errors};
pub use model::{BuilderModel, HostModel, MethodKind, MethodModel, TypeModel};
pub use registry::Registry;

use std::{fs, path::Path};

use log::{debug, info, trace, warn};
use proc_macro2::TokenStream;

use tagsmith_parser::{
    Span,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    parse_schema, recover_declarations,
};

use config::GeneratorConfig;

/// Expands markup builder declarations.
///
/// # Examples
///
/// ```
/// use tagsmith_codegen::{Generator, config::GeneratorConfig};
///
/// let generator = Generator::new(GeneratorConfig::default());
/// let source = "struct Page { schema = || { p(); }; }";
///
/// let expanded = generator.expand_source(source).expect("declarations expand");
/// assert!(expanded.contains("struct PagePTag<'out>"));
/// ```
#[derive(Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the model for `tokens` without emitting anything.
    ///
    /// Each declaration is processed on its own: a host-level error skips
    /// that declaration only, and statement-level errors still leave the
    /// rest of its schema generated. A declaration with a syntax error is
    /// reported and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Config`] if the configuration is invalid.
    /// Problems in the declarations are reported through
    /// [`Analysis::diagnostics`], not as an error.
    pub fn analyze(&self, tokens: TokenStream) -> Result<Analysis, GenerateError> {
        self.config.validate()?;
        info!("Expanding declarations");

        let mut model = BuilderModel::default();
        let mut diagnostics = DiagnosticCollector::new();

        let (declarations, syntax_errors) = recover_declarations(tokens);
        if !syntax_errors.is_empty() {
            debug!(errors = syntax_errors.len(); "Skipping declarations that failed to parse");
        }
        for diag in syntax_errors {
            diagnostics.emit(diag);
        }

        for declaration in &declarations {
            let host = match host::validate(declaration) {
                Ok(host) => host,
                Err(diag) => {
                    debug!(diagnostic = diag.to_string(); "Skipping declaration");
                    diagnostics.emit(diag);
                    continue;
                }
            };

            let mut local = DiagnosticCollector::new();
            let schema = host.schema.and_then(|value| parse_schema(value, &mut local));
            let host_model =
                synth::synthesize_host(host.decl, schema.as_ref(), self.config.naming(), &mut local);

            for diag in local.diagnostics() {
                if diag.severity().is_warning() {
                    warn!(diagnostic = diag.to_string(); "Schema warning");
                } else {
                    debug!(diagnostic = diag.to_string(); "Schema diagnostic");
                }
            }
            debug!(
                host = host_model.name(),
                tag_types = host_model.tag_types().len();
                "Synthesized host"
            );

            diagnostics.extend(local);
            model.push(host_model);
        }

        trace!(model:?; "Built model");

        Ok(Analysis {
            model,
            diagnostics: diagnostics.into_diagnostics(),
        })
    }

    /// Expand declarations into generated items.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Parse`] with every diagnostic if any
    /// declaration has an error, or [`GenerateError::Config`] if the
    /// configuration is invalid.
    pub fn expand(&self, tokens: TokenStream) -> Result<TokenStream, GenerateError> {
        let runtime = self.config.runtime().path()?;
        let src = tokens.to_string();
        let analysis = self.analyze(tokens)?;

        if analysis.has_errors() {
            return Err(GenerateError::new_parse_error(
                ParseError::new(analysis.diagnostics),
                src,
            ));
        }

        Ok(emit::emit_model(&analysis.model, &runtime))
    }

    /// Expand declarations for a procedural macro.
    ///
    /// Never fails: whatever could be generated is emitted, followed by one
    /// `compile_error!` per diagnostic.
    pub fn expand_or_report(&self, tokens: TokenStream) -> TokenStream {
        let result = self
            .config
            .runtime()
            .path()
            .and_then(|runtime| Ok((runtime, self.analyze(tokens)?)));

        match result {
            Ok((runtime, analysis)) => {
                let mut output = emit::emit_model(&analysis.model, &runtime);
                output.extend(compile_errors(&analysis.diagnostics));
                output
            }
            Err(err) => err.to_compile_error(),
        }
    }

    /// Expand declaration source text into formatted Rust.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Parse`] carrying `source` when tokenizing or
    /// generation fails, and [`GenerateError::Format`] if the output cannot
    /// be formatted.
    pub fn expand_source(&self, source: &str) -> Result<String, GenerateError> {
        let tokens: TokenStream = source.parse().map_err(|err: proc_macro2::LexError| {
            let diag = Diagnostic::error(format!("cannot tokenize declarations: {err}"))
                .with_code(ErrorCode::E100)
                .with_label(Span::new(err.span()), "could not tokenize this");
            GenerateError::new_parse_error(ParseError::from(diag), source)
        })?;

        let generated = self.expand(tokens).map_err(|err| match err {
            GenerateError::Parse { err, .. } => GenerateError::new_parse_error(err, source),
            other => other,
        })?;

        format_tokens(generated)
    }

    /// Expand the declaration file at `path` into formatted Rust.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] if the file cannot be read, otherwise
    /// as [`Generator::expand_source`].
    pub fn expand_file(&self, path: &Path) -> Result<String, GenerateError> {
        info!(path = path.display().to_string(); "Reading declarations");
        let source = fs::read_to_string(path)?;
        self.expand_source(&source)
    }
}

/// Format generated tokens as a Rust source file.
///
/// # Errors
///
/// Returns [`GenerateError::Format`] if `tokens` is not a sequence of items.
pub fn format_tokens(tokens: TokenStream) -> Result<String, GenerateError> {
    let file: syn::File =
        syn::parse2(tokens).map_err(|err| GenerateError::Format(err.to_string()))?;
    Ok(prettyplease::unparse(&file))
}

/// The model of one generation pass together with its diagnostics.
#[derive(Debug)]
pub struct Analysis {
    model: BuilderModel,
    diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn model(&self) -> &BuilderModel {
        &self.model
    }

    /// Diagnostics in the order they were reported.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity().is_error())
    }

    /// Error codes of all diagnostics, in order.
    pub fn error_codes(&self) -> Vec<ErrorCode> {
        self.diagnostics.iter().filter_map(Diagnostic::code).collect()
    }
}
