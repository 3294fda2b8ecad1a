//! Reconstruction of line/column positions from byte offsets.
//!
//! Tokens and diagnostics carry plain byte offsets into the source
//! buffer; turning them into human-oriented positions is done against
//! the original text on demand.

/// Computes the 1-based line and column of `position` in `source`.
///
/// Positions past the end of the buffer report the position just after
/// the last byte.
pub fn line_col(source: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;

    for &c in source.as_bytes().iter().take(position) {
        if c == b'\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (line, column)
}
