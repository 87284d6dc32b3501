//! Low-level nom parser functions for schema style values.
//!
//! This module provides composable parser functions for the small value
//! grammars that appear in card schemas: dimensions, tags, font sizes and
//! font keywords.

use crate::dimension::Dimension;
use crate::font::{FontStyle, FontWeight};
use crate::tag::Tag;
use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take_while1};
use nom::character::complete::{char, space0};
use nom::combinator::{opt, rest};
use nom::number::complete::float;
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },

    #[error("Invalid color: {0}")]
    Color(String),
}

// --- Helper Parsers ---

fn number(input: &str) -> IResult<&str, f32> {
    delimited(space0, float, space0).parse(input)
}

fn unit(input: &str) -> IResult<&str, &str> {
    alt((tag("%"), tag_no_case("px"))).parse(input)
}

fn tag_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-').parse(input)
}

fn tag_data(input: &str) -> IResult<&str, &str> {
    preceded(char('='), rest).parse(input)
}

// --- Value Parsers ---

/// Parses a dimension: `"25%"`, `"12px"` or a bare number.
///
/// Bare numbers follow [`Dimension::from_number`]: magnitudes up to 1 are
/// relative, anything larger is pixels.
pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    let (input, value) = number(input)?;
    let (input, unit) = opt(unit).parse(input)?;
    let dimension = match unit {
        Some("%") => Dimension::Relative(value / 100.0),
        Some(_) => Dimension::Px(value),
        None => Dimension::from_number(value),
    };
    Ok((input, dimension))
}

/// Parses a tag written as `name` or `name=data`.
pub fn parse_tag(input: &str) -> IResult<&str, Tag> {
    let (input, name) = tag_name(input)?;
    let (input, data) = opt(tag_data).parse(input)?;
    Ok((input, Tag::new(name, data)))
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: FnMut(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(format!("'{}': {}", input, e))),
    }
}

// --- High-level Parse Functions ---

/// Parses a font size from tag data. Sizes must be positive.
pub fn parse_font_size(s: &str) -> Result<f32, StyleParseError> {
    let invalid = || StyleParseError::InvalidValue {
        property: "size".to_string(),
        value: s.to_string(),
    };
    let size = run_parser(number, s).map_err(|_| invalid())?;
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(invalid())
    }
}

/// Parses a font weight string (e.g., "bold", "400").
pub fn parse_font_weight(s: &str) -> Result<FontWeight, StyleParseError> {
    s.parse().map_err(|_| StyleParseError::InvalidValue {
        property: "font-weight".to_string(),
        value: s.to_string(),
    })
}

/// Parses a font style string (e.g., "normal", "italic").
pub fn parse_font_style(s: &str) -> Result<FontStyle, StyleParseError> {
    s.parse().map_err(|_| StyleParseError::InvalidValue {
        property: "font-style".to_string(),
        value: s.to_string(),
    })
}
