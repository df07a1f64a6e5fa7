//! Parsing utilities for Matrix Market text lines
//!
//! Pure, allocation-free parsing of the size line and of coordinate entry
//! lines. Banner and comment handling is left to the caller.

/// Reasons a Matrix Market line can fail to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer whitespace-separated fields than required
    MissingField,
    /// More fields than the line kind allows
    UnexpectedField,
    /// A field that should be an unsigned integer is not one
    InvalidInteger,
    /// The value field is not a number
    InvalidValue,
    /// The value has no exact counterpart in the element type
    InexactValue,
    /// A coordinate used index 0 (Matrix Market indices are 1-based)
    ZeroIndex,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ParseError::MissingField => "missing field",
            ParseError::UnexpectedField => "unexpected trailing field",
            ParseError::InvalidInteger => "invalid unsigned integer",
            ParseError::InvalidValue => "invalid numeric value",
            ParseError::InexactValue => "value not representable in element type",
            ParseError::ZeroIndex => "indices are 1-based, found 0",
        };
        write!(f, "{msg}")
    }
}

/// Parse a size line of the form "rows columns nonzeros"
pub fn parse_size_line(line: &str) -> Result<(usize, usize, usize), ParseError> {
    let mut fields = line.split_whitespace();

    let rows = parse_usize(fields.next())?;
    let columns = parse_usize(fields.next())?;
    let nonzeros = parse_usize(fields.next())?;

    if fields.next().is_some() {
        return Err(ParseError::UnexpectedField);
    }

    Ok((rows, columns, nonzeros))
}

/// Parse an entry line of the form "row column value"
///
/// Indices are 1-based in the text and returned 0-based.
pub fn parse_entry_line(line: &str) -> Result<(usize, usize, f64), ParseError> {
    let mut fields = line.split_whitespace();

    let row = parse_index(fields.next())?;
    let column = parse_index(fields.next())?;
    let value = fields
        .next()
        .ok_or(ParseError::MissingField)?
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidValue)?;

    if fields.next().is_some() {
        return Err(ParseError::UnexpectedField);
    }

    Ok((row, column, value))
}

fn parse_usize(field: Option<&str>) -> Result<usize, ParseError> {
    field
        .ok_or(ParseError::MissingField)?
        .parse::<usize>()
        .map_err(|_| ParseError::InvalidInteger)
}

fn parse_index(field: Option<&str>) -> Result<usize, ParseError> {
    match parse_usize(field)? {
        0 => Err(ParseError::ZeroIndex),
        index => Ok(index - 1),
    }
}
