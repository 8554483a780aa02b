use core::iter::Peekable;
use alloc::{
  vec::Vec,
  string::{String, ToString},
};

use proc_macro::{Spacing, Delimiter, TokenTree, TokenStream};

/// A member of a `struct` with named fields.
pub(crate) struct StructField {
  /// If this member is annotated with `#[skip]`.
  pub(crate) skip: bool,
  pub(crate) identifier: String,
  /// The member's type, as Rust source.
  pub(crate) ty: String,
}

/// Parse a potentially-present `OuterAttribute`, returning the contained `Attr`.
///
/// This only performs partial validation of the syntax from
/// <https://doc.rust-lang.org/1.91.0/reference/attributes.html#grammar-OuterAttribute>.
fn parse_optional_outer_attribute(
  iter: &mut Peekable<impl Iterator<Item = TokenTree>>,
) -> Option<TokenStream> {
  // If this is present, it will have the mandatory `#`
  if !matches!(iter.peek(), Some(TokenTree::Punct(pound)) if pound.as_char() == '#') {
    return None;
  }
  let _pound = iter.next().expect("peeked attribute declaration couldn't be consumed");
  let Some(TokenTree::Group(group)) = iter.next() else {
    panic!("attribute declaration wasn't followed by `TokenTree::Group`");
  };
  assert_eq!(group.delimiter(), Delimiter::Bracket, "attribute had unexpected delimiter");
  Some(group.stream())
}

/// If an attribute is our `skip` attribute.
fn is_skip(attribute: TokenStream) -> bool {
  let mut attribute = attribute.into_iter();
  let Some(TokenTree::Ident(ident)) = attribute.next() else { return false };
  if ident.to_string() != "skip" {
    return false;
  }
  assert!(attribute.next().is_none(), "`skip` attribute doesn't take arguments");
  true
}

impl StructField {
  /// Parse a `StructField`, if present.
  ///
  /// This follows the syntax from
  /// <https://doc.rust-lang.org/1.91.0/reference/items/structs.html#grammar-StructField>,
  /// consuming the trailing comma if one is present.
  fn parse_optional(iter: &mut Peekable<impl Iterator<Item = TokenTree>>) -> Option<Self> {
    iter.peek()?;

    let mut skip = false;
    while let Some(attribute) = parse_optional_outer_attribute(iter) {
      skip |= is_skip(attribute);
    }

    crate::skip_optional_visibility(iter);

    let Some(TokenTree::Ident(identifier)) = iter.next() else {
      panic!("couldn't find the name of the field within the `struct`")
    };

    let Some(TokenTree::Punct(colon)) = iter.next() else {
      panic!("colon not found after identifier within `StructField`")
    };
    assert_eq!(colon.as_char(), ':', "colon wasn't a colon");
    assert!(
      matches!(colon.spacing(), Spacing::Alone),
      "colon between identifier and type wasn't independent"
    );

    // Take the type, up to the comma delimiting the next field
    let mut ty = Vec::new();
    loop {
      let angle_expression = crate::take_angle_expression(iter);
      if !angle_expression.is_empty() {
        ty.push(angle_expression);
        continue;
      }
      let Some(item) = iter.next() else { break };
      if let TokenTree::Punct(comma) = &item {
        if comma.as_char() == ',' {
          break;
        }
      }
      ty.push(TokenStream::from_iter([item]));
    }
    assert!(!ty.is_empty(), "field `{identifier}` didn't have a type");

    Some(StructField {
      skip,
      identifier: identifier.to_string(),
      ty: TokenStream::from_iter(ty).to_string(),
    })
  }
}

/// Parse `StructFields`.
///
/// This follows the syntax from
/// <https://doc.rust-lang.org/1.91.0/reference/items/structs.html#grammar-StructFields>.
pub(crate) fn parse_struct_fields(
  iter: &mut Peekable<impl Iterator<Item = TokenTree>>,
) -> Vec<StructField> {
  core::iter::from_fn(|| StructField::parse_optional(iter)).collect()
}
