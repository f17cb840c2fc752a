/// Reader for SGF (Smart Game Format) Go game records. Wrapper over the
/// lower level [sgf::tokenise] scanner and the [sgf::GameTree] builder.
///
/// ## Getting Started
///
/// The facade for the entire module is the [sgf::GameTree] struct, parsed
/// out of a string with [sgf::GameTree::read]. The tree exposes the game
/// level metadata through typed accessors ([sgf::GameTree::get_size],
/// [sgf::GameTree::get_komi], [sgf::GameTree::get_winner] and friends) and
/// each [sgf::Node] hands out raw or Text interpreted property values.
///
/// ## Scope
///
/// Only the first sequence of the first game in the input is read:
/// variations fold into the main line and everything after the first
/// closing delimiter is ignored. The reader checks the *format*, never the
/// game rules; the only rules adjacent question, whether a setup position
/// is legal, is delegated to a caller supplied [sgf::Board] implementation
/// through [sgf::get_setup_and_moves].
///
/// ## Example
///
/// ```rust
/// use sgf_game_reader::sgf::{Colour, GameTree};
///
/// let tree = GameTree::read("(;FF[4]SZ[9]PB[me];B[cg];W[df])").unwrap();
/// assert_eq!(tree.get_size(), 9);
/// assert_eq!(tree.nodes().len(), 3);
/// assert_eq!(tree.get_player(Colour::Black).as_deref(), Some("me"));
/// ```
pub mod sgf;
