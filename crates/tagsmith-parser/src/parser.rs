//! Parser for the declarations handed to `markup_builder!`.
//!
//! Turns the macro input tokens into the syntax tree defined in
//! [`parser_types`](super::parser_types). The grammar is:
//!
//! ```text
//! declaration := outer-attrs visibility? ( host | other-item )
//! host        := 'struct' Ident (':' Type)? ( ';' | '{' member* '}' )
//! member      := outer-attrs visibility? ( fn-item | field )
//! field       := Ident (':' Type)? ('=' Expr)? ';'
//! ```
//!
//! Only syntax is checked here. Whether a declaration is a valid host is
//! decided per declaration by the generator. A syntax error only costs the
//! declaration it occurs in; see [`recover_declarations`].

use proc_macro2::{Delimiter, TokenStream, TokenTree};
use syn::{
    Attribute, Ident, ImplItemFn, Item, Token, Visibility, braced,
    parse::{Parse, ParseStream, discouraged::Speculative as _},
};

use crate::{
    error::{Diagnostic, ParseError},
    parser_types::{Declaration, FieldDecl, HostDecl, OtherItem},
    span::Span,
};

/// Parse macro input into declarations.
///
/// # Errors
///
/// Returns a [`ParseError`] with one `E100` diagnostic per syntax error.
pub fn build_declarations(tokens: TokenStream) -> Result<Vec<Declaration>, ParseError> {
    let (declarations, diagnostics) = recover_declarations(tokens);
    if diagnostics.is_empty() {
        Ok(declarations)
    } else {
        Err(ParseError::new(diagnostics))
    }
}

/// Parse macro input, skipping declarations that fail to parse.
///
/// A declaration with a syntax error is reported as `E100` and skipped up
/// to the end of its item: the first top-level `;`, or a top-level brace
/// group together with a `;` following it. Parsing resumes with the next
/// declaration.
pub fn recover_declarations(tokens: TokenStream) -> (Vec<Declaration>, Vec<Diagnostic>) {
    match syn::parse2::<Declarations>(tokens) {
        Ok(Declarations {
            declarations,
            errors,
        }) => {
            let diagnostics = errors.into_iter().flatten().map(Diagnostic::from).collect();
            (declarations, diagnostics)
        }
        Err(err) => (Vec::new(), err.into_iter().map(Diagnostic::from).collect()),
    }
}

/// All declarations of one macro input, with the errors of those skipped.
struct Declarations {
    declarations: Vec<Declaration>,
    errors: Vec<syn::Error>,
}

impl Parse for Declarations {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut declarations = Vec::new();
        let mut errors = Vec::new();
        while !input.is_empty() {
            let fork = input.fork();
            match fork.parse() {
                Ok(declaration) => {
                    input.advance_to(&fork);
                    declarations.push(declaration);
                }
                Err(err) => {
                    errors.push(err);
                    skip_item(input)?;
                }
            }
        }
        Ok(Self {
            declarations,
            errors,
        })
    }
}

/// Consume the tokens of the item at the front of `input`.
fn skip_item(input: ParseStream) -> syn::Result<()> {
    while !input.is_empty() {
        if input.peek(Token![;]) {
            input.parse::<Token![;]>()?;
            return Ok(());
        }

        if let TokenTree::Group(group) = input.parse::<TokenTree>()?
            && group.delimiter() == Delimiter::Brace
        {
            if input.peek(Token![;]) {
                input.parse::<Token![;]>()?;
            }
            return Ok(());
        }
    }
    Ok(())
}

impl Parse for Declaration {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let fork = input.fork();
        fork.call(Attribute::parse_outer)?;
        fork.parse::<Visibility>()?;

        if fork.peek(Token![struct]) {
            return input.parse().map(Declaration::Host);
        }

        let item: Item = input.parse()?;
        Ok(Declaration::Other(OtherItem::from_item(&item)))
    }
}

impl Parse for HostDecl {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        let struct_token: Token![struct] = input.parse()?;
        let ident: Ident = input.parse()?;
        let span = Span::of(&struct_token).union(Span::of(&ident));

        if input.peek(Token![<]) {
            return Err(input.error("builder hosts cannot declare generic parameters"));
        }

        let supertype = if input.peek(Token![:]) {
            input.parse::<Token![:]>()?;
            Some(input.parse()?)
        } else {
            None
        };

        let mut fields = Vec::new();
        let mut methods = Vec::new();

        if input.peek(Token![;]) {
            input.parse::<Token![;]>()?;
        } else {
            let content;
            braced!(content in input);
            while !content.is_empty() {
                match content.parse()? {
                    Member::Field(field) => fields.push(field),
                    Member::Method(method) => methods.push(method),
                }
            }
        }

        Ok(Self {
            attrs,
            vis,
            ident,
            supertype,
            fields,
            methods,
            span,
        })
    }
}

/// A member inside a host body.
enum Member {
    Field(FieldDecl),
    Method(ImplItemFn),
}

impl Parse for Member {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let fork = input.fork();
        fork.call(Attribute::parse_outer)?;
        fork.parse::<Visibility>()?;

        let is_field = fork.peek(Ident)
            && (fork.peek2(Token![:]) || fork.peek2(Token![=]) || fork.peek2(Token![;]));

        if is_field {
            input.parse().map(Member::Field)
        } else {
            input.parse().map(Member::Method)
        }
    }
}

impl Parse for FieldDecl {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        let ident: Ident = input.parse()?;

        let ty = if input.peek(Token![:]) {
            input.parse::<Token![:]>()?;
            Some(input.parse()?)
        } else {
            None
        };

        let default = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse()?)
        } else {
            None
        };

        input.parse::<Token![;]>()?;

        let field = Self {
            attrs,
            vis,
            span: Span::of(&ident),
            ident,
            ty,
            default,
        };

        if field.ty.is_none() && !field.is_schema() {
            return Err(syn::Error::new(
                field.span.inner(),
                format!("field `{}` needs a type", field.ident),
            ));
        }

        Ok(field)
    }
}

impl OtherItem {
    fn from_item(item: &Item) -> Self {
        let (kind, ident) = match item {
            Item::Const(item) => ("constant", Some(&item.ident)),
            Item::Enum(item) => ("enum", Some(&item.ident)),
            Item::ExternCrate(item) => ("extern crate", Some(&item.ident)),
            Item::Fn(item) => ("function", Some(&item.sig.ident)),
            Item::ForeignMod(_) => ("extern block", None),
            Item::Impl(_) => ("impl block", None),
            Item::Macro(item) => ("macro invocation", item.ident.as_ref()),
            Item::Mod(item) => ("module", Some(&item.ident)),
            Item::Static(item) => ("static", Some(&item.ident)),
            Item::Trait(item) => ("trait", Some(&item.ident)),
            Item::TraitAlias(item) => ("trait alias", Some(&item.ident)),
            Item::Type(item) => ("type alias", Some(&item.ident)),
            Item::Union(item) => ("union", Some(&item.ident)),
            Item::Use(_) => ("use declaration", None),
            _ => ("item", None),
        };

        Self {
            kind,
            ident: ident.cloned(),
            span: ident.map_or_else(|| Span::of(item), Span::of),
        }
    }
}
