#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![no_std]

use core::{borrow::Borrow, str::FromStr, iter::Peekable};

extern crate alloc;
use alloc::{
  vec,
  vec::Vec,
  string::{String, ToString},
  format,
};

extern crate proc_macro;
use proc_macro::{Delimiter, Spacing, Punct, TokenTree, TokenStream};

mod r#struct;
use r#struct::StructField;

// `<` will not open a group, so we use this to take all items within a `< ... >` expression.
fn take_angle_expression(
  iter: &mut Peekable<impl Iterator<Item: Borrow<TokenTree>>>,
) -> TokenStream {
  {
    let Some(peeked) = iter.peek() else { return TokenStream::default() };
    let TokenTree::Punct(punct) = peeked.borrow() else { return TokenStream::default() };
    if punct.as_char() != '<' {
      return TokenStream::default();
    }
  }

  let mut result = vec![];
  let mut count = 0;
  // If the prior token was the `-` of a `->`, whose `>` doesn't close an angle expression
  let mut arrow = false;
  loop {
    let item = iter.next().expect("`TokenTree` unexpectedly terminated when taking `< ... >`");
    result.push(item.borrow().clone());
    if let TokenTree::Punct(punct) = item.borrow() {
      let char = punct.as_char();
      if char == '<' {
        count += 1;
      }
      if (char == '>') && !arrow {
        count -= 1;
      }
      arrow = (char == '-') && matches!(punct.spacing(), Spacing::Joint);
      if count == 0 {
        break;
      }
    } else {
      arrow = false;
    }
  }
  TokenStream::from_iter(result)
}

// Advance the iterator past the next `,` on this depth, if there is one.
fn skip_comma_delimited(iter: &mut Peekable<impl Iterator<Item: Borrow<TokenTree>>>) {
  loop {
    take_angle_expression(iter);
    let Some(item) = iter.next() else { return };
    if let TokenTree::Punct(punct) = item.borrow() {
      if punct.as_char() == ',' {
        return;
      }
    }
  }
}

// Skip a `Visibility` (`pub`, `pub(crate)`, `pub(in path)`, ...), if present.
fn skip_optional_visibility(iter: &mut Peekable<impl Iterator<Item = TokenTree>>) {
  if !matches!(iter.peek(), Some(TokenTree::Ident(ident)) if ident.to_string() == "pub") {
    return;
  }
  let _ = iter.next().expect("peeked visibility couldn't be consumed");
  if matches!(
    iter.peek(),
    Some(TokenTree::Group(group)) if group.delimiter() == Delimiter::Parenthesis
  ) {
    let _ = iter.next().expect("peeked visibility scope couldn't be consumed");
  }
}

struct Struct {
  generic_bounds: String,
  generics: String,
  name: String,
  fields: Vec<StructField>,
}

// This is somewhat comparable to `syn::Generics`, especially its `split_for_impl` method.
fn parse_struct(object: TokenStream) -> Struct {
  let mut object = object.into_iter().peekable();

  loop {
    match object.peek() {
      Some(TokenTree::Punct(punct)) if punct.as_char() == '#' => {
        let _ = object.next().expect("peeked but not present");
        let TokenTree::Group(_) = object.next().expect("`#` but no `[ ... ]`") else {
          panic!("`#` not followed by a `TokenTree::Group` for its `[ ... ]`")
        };
      }
      _ => break,
    }
  }

  skip_optional_visibility(&mut object);

  match object.next() {
    Some(TokenTree::Ident(ident)) if ident.to_string() == "struct" => {}
    _ => panic!("`Structure` wasn't applied to a `struct`"),
  }
  let name = match object.next() {
    Some(TokenTree::Ident(ident)) => ident.to_string(),
    _ => panic!("`Structure` wasn't applied to a `struct` with a name"),
  };

  let generic_bounds_tree = take_angle_expression(&mut object);

  let mut generics_tree = vec![];
  {
    let mut iter = generic_bounds_tree.clone().into_iter().peekable();
    while let Some(component) = iter.next() {
      // Take until the next colon, used to mark trait bounds
      if let TokenTree::Punct(punct) = &component {
        if punct.as_char() == ':' {
          // Skip the actual bounds
          skip_comma_delimited(&mut iter);
          // Add our own comma delimiter and move to the next item
          generics_tree.push(TokenTree::Punct(Punct::new(',', Spacing::Alone)));
          continue;
        }
      }
      // Push this component as it isn't part of the bounds
      generics_tree.push(component);
    }
  }
  // Ensure this is terminated, which it won't be if the last item had bounds yet didn't have a
  // trailing comma
  if let Some(last) = generics_tree.last() {
    match last {
      TokenTree::Punct(punct) if punct.as_char() == '>' => {}
      _ => generics_tree.push(TokenTree::Punct(Punct::new('>', Spacing::Alone))),
    }
  }

  let generic_bounds = generic_bounds_tree.to_string();
  let generics = TokenStream::from_iter(generics_tree).to_string();

  // This presumably means we don't support `struct`s defined with `where` bounds
  let Some(TokenTree::Group(struct_body)) = object.next() else {
    panic!("`struct`'s name was not followed by its body");
  };
  if struct_body.delimiter() != Delimiter::Brace {
    panic!("`Structure` derivation applied to `struct` with anonymous fields");
  }

  let fields = r#struct::parse_struct_fields(&mut struct_body.stream().into_iter().peekable());

  Struct { generic_bounds, generics, name, fields }
}

/// Derive an implementation of the `Structure` trait, and the `JsonSerialize` and
/// `JsonDeserialize` traits by way of it.
///
/// Every member of the `struct` must be a `Named` field, unless it's annotated with the `skip`
/// attribute. Members are serialized in the order they're declared. Skipped members are neither
/// serialized nor deserialized, and are left to their `Default` initialization when
/// deserializing.
///
/// This _requires_ the `struct` derived for implement `Default`. Fields which aren't present in
/// the serialization will be left to their `Default` initialization, unless their name was
/// declared as required.
///
/// As a procedural macro, this will panic causing a compile-time error on any unexpected input.
#[proc_macro_derive(Structure, attributes(skip))]
pub fn derive_structure(object: TokenStream) -> TokenStream {
  let Struct { generic_bounds, generics, name, fields } = parse_struct(object);

  let mut names = String::new();
  let mut bindings = String::new();
  let mut views = String::new();
  let mut views_mut = String::new();
  for StructField { identifier, ty, .. } in fields.iter().filter(|field| !field.skip) {
    names.push_str(&format!("<{ty} as named_json::NamedField>::NAME,"));
    bindings.push_str(&format!("{identifier},"));
    views.push_str(&format!("{identifier} as &dyn named_json::FieldView,"));
    views_mut.push_str(&format!("{identifier} as &mut dyn named_json::FieldViewMut,"));
  }

  TokenStream::from_str(&format!(
    r#"
    impl{generic_bounds} named_json::Structure for {name}{generics}
      where Self: core::default::Default {{
      const FIELDS: &'static [&'static str] = &[{names}];

      fn fields(&self) -> named_json::Fields<'_> {{
        let Self {{ {bindings} .. }} = self;
        named_json::Fields::from([{views}])
      }}

      fn fields_mut(&mut self) -> named_json::FieldsMut<'_> {{
        let Self {{ {bindings} .. }} = self;
        named_json::FieldsMut::from([{views_mut}])
      }}
    }}

    impl{generic_bounds} named_json::JsonSerialize for {name}{generics}
      where Self: named_json::Structure {{
      fn serialize(&self) -> impl core::iter::Iterator<Item = char> {{
        named_json::serialize_structure(self)
      }}
    }}

    impl{generic_bounds} named_json::JsonDeserialize for {name}{generics}
      where Self: named_json::Structure {{
      fn deserialize(
        value: &named_json::Value,
      ) -> core::result::Result<Self, named_json::JsonError> {{
        named_json::deserialize_structure(value)
      }}
    }}
    "#
  ))
  .expect("typo in implementation of `Structure`")
}
