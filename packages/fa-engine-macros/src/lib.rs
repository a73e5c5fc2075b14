use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Expr, GenericArgument, Ident, PathArguments, Token, Type, Visibility,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
};

/// One `name: Type = default` line of a `config!` block.
struct ConfigField {
    attrs: Vec<Attribute>,
    name: Ident,
    ty: Type,
    default_value: Expr,
}

impl Parse for ConfigField {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let name = input.parse()?;
        input.parse::<Token![:]>()?;
        let ty = input.parse()?;
        input.parse::<Token![=]>()?;
        let default_value = input.parse()?;

        Ok(ConfigField {
            attrs,
            name,
            ty,
            default_value,
        })
    }
}

struct ConfigInput {
    attrs: Vec<Attribute>,
    vis: Visibility,
    name: Ident,
    fields: Punctuated<ConfigField, Token![,]>,
}

impl Parse for ConfigInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        input.parse::<Token![struct]>()?;
        let name: Ident = input.parse()?;
        let content;
        syn::braced!(content in input);
        let fields = content.parse_terminated(ConfigField::parse, Token![,])?;
        Ok(ConfigInput {
            attrs,
            vis,
            name,
            fields,
        })
    }
}

/// Whether `ty` is spelled `Option<T>`, in which case the partial field keeps
/// the type as is instead of wrapping it a second time.
fn is_option(ty: &Type) -> bool {
    let Type::Path(tp) = ty else {
        return false;
    };

    match tp.path.segments.last() {
        Some(seg) if seg.ident == "Option" => match &seg.arguments {
            PathArguments::AngleBracketed(args) => {
                args.args.len() == 1 && matches!(args.args[0], GenericArgument::Type(_))
            }
            _ => false,
        },
        _ => false,
    }
}

/// Declares a configuration struct together with a `Partial` twin that can be
/// deserialized from TOML where every field is optional. Missing fields fall
/// back to the declared defaults.
#[proc_macro]
pub fn config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ConfigInput);
    let attrs = &input.attrs;
    let vis = &input.vis;
    let struct_name = &input.name;
    let partial_struct_name = format_ident!("Partial{}", struct_name);

    let mut fields = Vec::new();
    let mut partial_fields = Vec::new();
    let mut from_partial = Vec::new();
    let mut defaults = Vec::new();
    let mut accessors = Vec::new();

    for f in input.fields.iter() {
        let field_attrs = &f.attrs;
        let name = &f.name;
        let ty = &f.ty;
        let default_value = &f.default_value;

        fields.push(quote! { #( #field_attrs )* #name: #ty });

        let partial_ty = if is_option(ty) {
            quote! { #ty }
        } else {
            quote! { Option<#ty> }
        };
        partial_fields.push(quote! {
            #[serde(default)]
            #name: #partial_ty
        });

        from_partial.push(quote! { #name: partial.#name.fill_with(#default_value) });
        defaults.push(quote! { #name: #default_value });

        let with_name = format_ident!("with_{}", name);
        let set_name = format_ident!("set_{}", name);
        let get_name = format_ident!("get_{}", name);
        accessors.push(quote! {
            pub fn #with_name(mut self, #name: #ty) -> Self {
                self.#name = #name;
                self
            }
            pub fn #set_name(&mut self, #name: #ty) {
                self.#name = #name;
            }
            pub fn #get_name(&self) -> &#ty {
                &self.#name
            }
        });
    }

    let expanded = quote! {
        #( #attrs )*
        #[derive(Debug, Clone, PartialEq, serde::Serialize)]
        #vis struct #struct_name {
            #( #fields, )*
        }

        #[derive(Debug, Clone, Default, serde::Deserialize)]
        #vis struct #partial_struct_name {
            #( #partial_fields, )*
        }

        impl #struct_name {
            pub fn from_partial(partial: #partial_struct_name) -> Self {
                use crate::config::FillWith;
                Self {
                    #( #from_partial, )*
                }
            }
            pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
                Ok(Self::from_partial(toml::from_str(content)?))
            }
            pub fn from_file<P: AsRef<std::path::Path>>(file_path: P) -> anyhow::Result<Self> {
                let canonic_path = std::fs::canonicalize(file_path)?;
                let content = std::fs::read_to_string(canonic_path)?;
                Self::from_toml_str(&content)
            }
            pub fn from_optional_file<P: AsRef<std::path::Path>>(file_path: Option<P>) -> anyhow::Result<Self> {
                match file_path {
                    Some(p) => Self::from_file(p),
                    None => Ok(Self::default()),
                }
            }
            #( #accessors )*
        }

        impl Default for #struct_name {
            fn default() -> Self {
                #struct_name {
                    #( #defaults, )*
                }
            }
        }
    };
    TokenStream::from(expanded)
}
