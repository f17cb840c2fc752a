use std::collections::HashSet;

use derive_more::{Display, Error};

use super::{
    game_tree::GameTree,
    point::{Colour, Move, Point},
    SgfError,
};

/// An error applying the stone setup described by a game record.
#[derive(Debug, Display, Error)]
pub enum SetupError {
    /// Stone setup is only allowed on the root node.
    #[display("setup commands after the root node")]
    SetupAfterRoot,
    /// The board rejected the configuration.
    #[display("setup position not legal")]
    IllegalPosition,
}

/// The contract the reader expects from a board implementation.
///
/// The board model itself, capture logic and all, lives outside this crate;
/// the reader only ever asks it to place the setup stones of the root node
/// and to say whether the result is legal.
pub trait Board: Sized {
    /// Create an empty board with the given side length.
    fn new(size: usize) -> Self;

    /// Place setup stones: points for black, points for white, points to
    /// clear. Returns whether the resulting configuration is legal, that is
    /// whether no point ends up claimed by more than one colour.
    fn apply_setup(
        &mut self,
        black: &HashSet<Point>,
        white: &HashSet<Point>,
        empty: &HashSet<Point>,
    ) -> bool;
}

/// Return the initial setup and the following moves.
///
/// The board represents the position described by the `AB` and `AW`
/// properties of the root node; the moves are the plays of the nodes after
/// the root, in document order, passes included. Stone setup anywhere past
/// the root is a violation, and so is a setup the board reports as illegal.
/// Whether the *moves* are legal under the game rules is never checked.
pub fn get_setup_and_moves<B: Board>(
    tree: &GameTree,
) -> Result<(B, Vec<(Colour, Move)>), SgfError> {
    let mut board = B::new(tree.get_size());
    let (black, white, empty) = tree.get_setup_commands(tree.root())?;
    if !(black.is_empty() && white.is_empty()) && !board.apply_setup(&black, &white, &empty) {
        return Err(SetupError::IllegalPosition.into());
    }
    let mut moves = Vec::new();
    for node in &tree.nodes()[1..] {
        if node.has_setup_commands() {
            return Err(SetupError::SetupAfterRoot.into());
        }
        if let Some(mv) = tree.get_move(node)? {
            moves.push(mv);
        }
    }
    Ok((board, moves))
}
