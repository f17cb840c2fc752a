use std::error;

use derive_more::{Display, From};

use super::{
    board::SetupError,
    game_tree::{ConversionError, ParseError},
    point::PointError,
};

/// An error that occurred somewhere within the broadly defined reading
/// process. Every failure is a flavour of malformed input; nothing is
/// retried, and no partial game tree is returned.
#[derive(Debug, From, Display)]
pub enum SgfError {
    ParseError(ParseError),
    PointError(PointError),
    ConversionError(ConversionError),
    SetupError(SetupError),
}

impl error::Error for SgfError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ParseError(err) => Some(err),
            Self::PointError(err) => Some(err),
            Self::ConversionError(err) => Some(err),
            Self::SetupError(err) => Some(err),
        }
    }
}
