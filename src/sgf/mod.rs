/// Commonly used type aliases within the reader.
pub mod types;

/// A submodule that provides the Text value interpretation: the whitespace
/// mapping and backslash escape rules the format defines for Text values.
mod text;
pub use text::value_as_text;

/// A submodule that provides the scanner. It locates the start of game
/// content and turns the raw input into a flat sequence of [Token]s for the
/// tree builder to consume; structure is not its business.
mod scanner;
pub use scanner::{tokenise, Token};

/// A submodule that provides board coordinates: player colours, points, and
/// the interpretation of coordinate values and compressed point lists.
mod point;
pub use point::{
    interpret_compressed_point_list, interpret_point, Colour, Move, Point, PointError,
};

/// A submodule that provides the game tree. The tree builder assembles
/// [Node]s out of the token stream, and the typed accessors on [GameTree]
/// interpret the stored raw values on demand.
mod game_tree;
pub use game_tree::{ConversionError, GameTree, Node, ParseError, Property};

/// A submodule that provides the [Board] seam and the setup and move
/// extraction built on top of it.
mod board;
pub use board::{get_setup_and_moves, Board, SetupError};

mod error;
pub use error::SgfError;
