pub type Input<'a> = &'a str;
pub type Result<'a, O> = nom::IResult<Input<'a>, O, nom::error::VerboseError<Input<'a>>>;

/// Render a parser error against the input that produced it, in a form that's suitable for
/// printing to a terminal.
pub fn pretty_error_message(i: Input, e: nom::Err<nom::error::VerboseError<Input>>) -> String {
    match e {
        nom::Err::Error(e) | nom::Err::Failure(e) => nom::error::convert_error(i, e),
        nom::Err::Incomplete(_) => "Incomplete input".to_string(),
    }
}

/// Implements a `parse` function for a `#[repr(u8)]` enum whose discriminants are ASCII
/// letters. The letter is read case-insensitively.
///
/// Shamelessly borrowed from fasterthanlime's executable packer tutorial:
/// https://fasterthanli.me/series/making-our-own-executable-packer
#[macro_export]
macro_rules! impl_parse_for_enum {
    ($type: ident) => {
        impl $type {
            pub fn parse(i: crate::parse::Input) -> crate::parse::Result<Self> {
                use nom::{
                    character::complete::anychar,
                    combinator::map_res,
                    error::{context, ErrorKind},
                };
                use std::convert::TryFrom;

                let parser = map_res(anychar, |c: char| {
                    if !c.is_ascii() {
                        return Err(ErrorKind::Alt);
                    }
                    Self::try_from(c.to_ascii_uppercase() as u8).map_err(|_| ErrorKind::Alt)
                });
                context(stringify!($type), parser)(i)
            }
        }
    };
}
