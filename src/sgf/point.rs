use std::collections::HashSet;

use derive_more::{Display, Error};

/// A board point as a `(row, col)` pair. Rows are counted from the bottom
/// edge of the board and columns from the left edge, both starting at zero;
/// the coordinate letters in the record count rows from the top.
pub type Point = (usize, usize);

/// A move is either a point or a pass.
pub type Move = Option<Point>;

/// A player colour.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Colour {
    #[display("b")]
    Black,
    #[display("w")]
    White,
}

/// An error raised when point data does not describe a location on the board.
#[derive(Debug, Display, Error)]
pub enum PointError {
    /// The value is not a well formed point for this board size.
    #[display("malformed point {:?} for board size {}", _0, _1)]
    MalformedPoint(String, usize),
    /// The corners of a compressed rectangle are out of order, or passes.
    #[display("malformed rectangle {:?}", _0)]
    MalformedRectangle(#[error(not(source))] String),
    /// Point lists never contain passes.
    #[display("pass in a point list")]
    PassInPointList,
}

fn letter_index(chr: char) -> Option<usize> {
    if chr.is_ascii_lowercase() {
        Some(chr as usize - 'a' as usize)
    } else {
        None
    }
}

/// The largest board on which `tt` still means a pass rather than a point.
const LEGACY_PASS_LIMIT: usize = 19;

/// Interpret an SGF Point or Move value.
///
/// Returns `None` for a pass: the empty value, or the legacy `tt` marker on
/// boards no larger than 19. Otherwise the value must be exactly two
/// letters, column first, with the row measured from the top of the board.
pub fn interpret_point(value: &str, size: usize) -> Result<Move, PointError> {
    let token = value.to_lowercase();
    if token.is_empty() || (token == "tt" && size <= LEGACY_PASS_LIMIT) {
        return Ok(None);
    }
    let mut chars = token.chars();
    if let (Some(col_chr), Some(row_chr), None) = (chars.next(), chars.next(), chars.next()) {
        if let (Some(col), Some(row)) = (letter_index(col_chr), letter_index(row_chr)) {
            if col < size && row < size {
                return Ok(Some((size - row - 1, col)));
            }
        }
    }
    Err(PointError::MalformedPoint(token, size))
}

/// Interpret an SGF list or elist of Points.
///
/// Each value is a single point or a `corner1:corner2` rectangle, corner1
/// being the upper left and corner2 the lower right; the rectangle expands
/// to every point it covers. Overlap between values is not an error, the
/// points are simply collected into one set.
pub fn interpret_compressed_point_list<I, S>(
    values: I,
    size: usize,
) -> Result<HashSet<Point>, PointError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut points = HashSet::new();
    for value in values {
        let value = value.as_ref();
        match value.split_once(':') {
            Some((first, second)) => {
                let malformed = || PointError::MalformedRectangle(value.to_owned());
                let (top, left) = interpret_point(first, size)?.ok_or_else(malformed)?;
                let (bottom, right) = interpret_point(second, size)?.ok_or_else(malformed)?;
                if bottom > top || left > right {
                    return Err(malformed());
                }
                for row in bottom..=top {
                    for col in left..=right {
                        points.insert((row, col));
                    }
                }
            }
            None => match interpret_point(value, size)? {
                Some(point) => {
                    points.insert(point);
                }
                None => return Err(PointError::PassInPointList),
            },
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The letter form of a point, for round trip checks. The crate has no
    /// serializer; this is only test scaffolding.
    fn format_point((row, col): Point, size: usize) -> String {
        let col_chr = (b'a' + col as u8) as char;
        let row_chr = (b'a' + (size - row - 1) as u8) as char;
        format!("{}{}", col_chr, row_chr)
    }

    #[test]
    fn test_round_trip_every_size() -> Result<(), PointError> {
        for size in 1..=26 {
            for row in 0..size {
                for col in 0..size {
                    let encoded = format_point((row, col), size);
                    let decoded = interpret_point(&encoded, size)?;
                    // tt is a pass below 20, a real point above
                    if encoded == "tt" && size <= 19 {
                        assert_eq!(decoded, None);
                    } else {
                        assert_eq!(decoded, Some((row, col)));
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_pass_values() -> Result<(), PointError> {
        for size in 1..=26 {
            assert_eq!(interpret_point("", size)?, None);
        }
        assert_eq!(interpret_point("tt", 9)?, None);
        assert_eq!(interpret_point("tt", 19)?, None);
        // on larger boards tt is the point it spells
        assert_eq!(interpret_point("tt", 21)?, Some((1, 19)));
        Ok(())
    }

    #[test]
    fn test_case_folding() -> Result<(), PointError> {
        assert_eq!(interpret_point("AA", 9)?, interpret_point("aa", 9)?);
        assert_eq!(interpret_point("Cg", 9)?, Some((2, 2)));
        Ok(())
    }

    #[test]
    fn test_malformed_points() {
        for bad in ["a", "aaa", "a1", "!a", "a "] {
            assert!(matches!(
                interpret_point(bad, 9),
                Err(PointError::MalformedPoint(_, 9))
            ));
        }
        // out of range for the size
        assert!(interpret_point("aj", 9).is_err());
        assert!(interpret_point("ja", 9).is_err());
        assert!(interpret_point("tt", 20).is_err());
    }

    #[test]
    fn test_single_points() -> Result<(), PointError> {
        let points = interpret_compressed_point_list(["ai", "bh", "ee"], 9)?;
        assert_eq!(
            points,
            HashSet::from([(0, 0), (1, 1), (4, 4)])
        );
        Ok(())
    }

    #[test]
    fn test_rectangle_expansion() -> Result<(), PointError> {
        // top left bc, bottom right cb on a 9x9: rows 6..=7, cols 1..=2
        let points = interpret_compressed_point_list(["bc:cb"], 9)?;
        assert_eq!(
            points,
            HashSet::from([(6, 1), (6, 2), (7, 1), (7, 2)])
        );
        Ok(())
    }

    #[test]
    fn test_whole_board_rectangle() -> Result<(), PointError> {
        for size in [5, 9, 13, 19] {
            let whole = format!("aa:{}", format_point((0, size - 1), size));
            let points = interpret_compressed_point_list([whole.as_str(), "aa"], size)?;
            assert_eq!(points.len(), size * size);
        }
        Ok(())
    }

    #[test]
    fn test_overlap_is_not_an_error() -> Result<(), PointError> {
        let points = interpret_compressed_point_list(["aa:bb", "aa", "ab:bb"], 9)?;
        assert_eq!(points.len(), 4);
        Ok(())
    }

    #[test]
    fn test_elist_is_empty() -> Result<(), PointError> {
        let values: [&str; 0] = [];
        assert!(interpret_compressed_point_list(values, 9)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_pass_in_list_rejected() {
        assert!(matches!(
            interpret_compressed_point_list([""], 9),
            Err(PointError::PassInPointList)
        ));
        assert!(matches!(
            interpret_compressed_point_list(["tt"], 9),
            Err(PointError::PassInPointList)
        ));
    }

    #[test]
    fn test_bad_rectangles() {
        // corners reversed
        assert!(matches!(
            interpret_compressed_point_list(["cb:bc"], 9),
            Err(PointError::MalformedRectangle(_))
        ));
        // a pass corner
        assert!(matches!(
            interpret_compressed_point_list(["aa:"], 9),
            Err(PointError::MalformedRectangle(_))
        ));
        // a malformed corner propagates as a point error
        assert!(matches!(
            interpret_compressed_point_list(["aa:b"], 9),
            Err(PointError::MalformedPoint(_, 9))
        ));
    }
}
