use std::{
    collections::HashSet,
    error,
    fmt,
    num::{ParseFloatError, ParseIntError},
};

use derive_more::{Display, Error, From};

use super::{
    point::{interpret_compressed_point_list, interpret_point, Colour, Move, Point, PointError},
    scanner::{tokenise, Token},
    text::value_as_text,
    types::SgfString,
    SgfError,
};

/// An error in the structure of the token stream.
#[derive(Debug, Display, Error)]
pub enum ParseError {
    /// No `(;` start marker anywhere in the input.
    #[display("no SGF game data found")]
    NoGameData,
    /// The token stream ran out mid structure.
    #[display("unexpected end of SGF data")]
    UnexpectedEnd,
    /// A token was in some way unexpected.
    #[display("token {:?} at {} is unexpected: {}", _1, _0, _2)]
    UnexpectedToken(usize, Token, &'static str),
    /// Property identifiers must be followed by at least one value.
    #[display("property {} with no values", _0)]
    PropertyWithoutValues(#[error(not(source))] String),
}

/// An error converting a raw property value into a typed one.
#[derive(Debug, From, Display)]
pub enum ConversionError {
    ParseIntError(ParseIntError),
    ParseFloatError(ParseFloatError),
    /// A one stone handicap cannot be expressed in a game record.
    #[display("illegal handicap value {}", _0)]
    IllegalHandicap(i64),
    /// Board sizes start at one.
    #[display("illegal board size {}", _0)]
    IllegalSize(usize),
}

impl error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ParseIntError(err) => Some(err),
            Self::ParseFloatError(err) => Some(err),
            _ => None,
        }
    }
}

/// A single property: an identifier and one or more raw values.
///
/// A value is the literal bytes that sat between the square brackets; an
/// empty `[]` pair is one empty value, which is how the format writes a list
/// with zero elements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Property {
    ident: String,
    values: Vec<SgfString>,
}

impl Property {
    /// The property identifier: 1 to 8 uppercase letters.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// The raw values, in document order. Never empty.
    pub fn values(&self) -> &[SgfString] {
        &self.values
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ident)?;
        for value in &self.values {
            write!(f, "[{}]", value)?;
        }
        Ok(())
    }
}

/// The stone setup properties: add black, add white, clear.
const SETUP_IDENTS: [&str; 3] = ["AB", "AW", "AE"];

/// One step of the game record: an ordered bag of properties.
///
/// The node does not know the types of the different properties; it hands
/// out raw values as stored, and interpretation happens in whichever
/// accessor is asked for a typed form.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    props: Vec<Property>,
}

impl Node {
    fn new() -> Self {
        Node { props: Vec::new() }
    }

    /// Append a property. A later property with the same identifier shadows
    /// an earlier one for lookups, but both stay in [Node::properties].
    fn add(&mut self, ident: String, values: Vec<SgfString>) {
        self.props.push(Property { ident, values });
    }

    /// The property an identifier resolves to: the last one added under it.
    fn find(&self, identifier: &str) -> Option<&Property> {
        self.props.iter().rev().find(|prop| prop.ident == identifier)
    }

    /// All properties in document order, duplicate identifiers included.
    pub fn properties(&self) -> &[Property] {
        &self.props
    }

    /// Check whether the node has the specified property.
    pub fn has_property(&self, identifier: &str) -> bool {
        self.find(identifier).is_some()
    }

    /// Return the raw scalar value of the specified property.
    ///
    /// Returns the bytes that were between the square brackets, without
    /// interpreting escapes or performing any whitespace conversion. If the
    /// property has multiple values this returns the first; an empty elist
    /// yields an empty string.
    pub fn get_raw(&self, identifier: &str) -> Option<&str> {
        self.find(identifier)
            .and_then(|prop| prop.values.first())
            .map(|value| value.as_ref())
    }

    /// Return the list value of the specified property, as raw strings.
    ///
    /// A property with a single value yields a one element vector; a
    /// property written as the empty elist `[]` yields an empty one.
    pub fn get_list(&self, identifier: &str) -> Option<Vec<SgfString>> {
        self.find(identifier).map(|prop| {
            if prop.values.len() == 1 && prop.values[0].is_empty() {
                Vec::new()
            } else {
                prop.values.to_vec()
            }
        })
    }

    /// Return the value of the specified property, interpreted as Text (see
    /// [value_as_text]). If the property has multiple values this returns
    /// the first.
    pub fn get_text(&self, identifier: &str) -> Option<String> {
        self.get_raw(identifier).map(value_as_text)
    }

    /// Check whether the node carries any of the stone setup properties.
    pub fn has_setup_commands(&self) -> bool {
        SETUP_IDENTS
            .iter()
            .any(|identifier| self.has_property(identifier))
    }
}

impl fmt::Display for Node {
    /// The diagnostic form: one `ID[value]...` line per property, sorted by
    /// identifier. Not a serializer, the values stay raw.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut props: Vec<&Property> = self.props.iter().collect();
        props.sort_by(|a, b| a.ident.cmp(&b.ident));
        for prop in props {
            writeln!(f, "{}", prop)?;
        }
        Ok(())
    }
}

/// The board size assumed when the root carries no `SZ` property.
const DEFAULT_SIZE: usize = 19;

/// Assemble nodes from the token stream.
///
/// `;` opens a node, `(` is a no-op so that variation content folds into the
/// main line, and the first `)` ends the game. An identifier collects every
/// value that follows it.
fn build_nodes(tokens: Vec<Token>) -> Result<Vec<Node>, ParseError> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut iter = tokens.into_iter().enumerate().peekable();
    loop {
        let (pos, token) = iter.next().ok_or(ParseError::UnexpectedEnd)?;
        match token {
            Token::CloseParen => {
                if nodes.is_empty() {
                    return Err(ParseError::UnexpectedToken(
                        pos,
                        Token::CloseParen,
                        "game closed before any node",
                    ));
                }
                break;
            }
            Token::OpenParen => {}
            Token::NodeStart => nodes.push(Node::new()),
            Token::Ident(ident) => {
                let mut values = Vec::new();
                loop {
                    match iter.peek() {
                        None => return Err(ParseError::UnexpectedEnd),
                        Some((_, Token::Value(_))) => {
                            if let Some((_, Token::Value(value))) = iter.next() {
                                values.push(value);
                            }
                        }
                        Some(_) => break,
                    }
                }
                if values.is_empty() {
                    return Err(ParseError::PropertyWithoutValues(ident));
                }
                match nodes.last_mut() {
                    Some(node) => node.add(ident, values),
                    None => {
                        return Err(ParseError::UnexpectedToken(
                            pos,
                            Token::Ident(ident),
                            "property before the first node",
                        ))
                    }
                }
            }
            token @ Token::Value(_) => {
                return Err(ParseError::UnexpectedToken(
                    pos,
                    token,
                    "value outside a property",
                ));
            }
        }
    }
    Ok(nodes)
}

/// A parsed game record: the main sequence of nodes from the first game in
/// the input, the first node being the root.
///
/// The tree owns its nodes and is immutable once read; nodes hold no
/// back-pointer, the tree passes the board size into every accessor that
/// needs it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameTree {
    nodes: Vec<Node>,
    size: usize,
}

impl GameTree {
    /// Read a game record from a string.
    ///
    /// Reads only the first sequence from the first game: `(` does not open
    /// a separate branch and the first `)` ends the parse, so the nodes of
    /// the first variation fold into the main line and everything after,
    /// sibling variations included, is discarded.
    ///
    /// The start of SGF content is the first `(;` (with optional whitespace
    /// between); anything before it is ignored. The board size is fixed here
    /// from the root `SZ` property, before any accessor can run.
    pub fn read(text: &str) -> Result<GameTree, SgfError> {
        let tokens = tokenise(text);
        if tokens.is_empty() {
            return Err(ParseError::NoGameData.into());
        }
        let nodes = build_nodes(tokens)?;
        let size = match nodes.first().and_then(|root| root.get_raw("SZ")) {
            Some(raw) => {
                let size = raw.parse::<usize>().map_err(ConversionError::from)?;
                if size == 0 {
                    return Err(ConversionError::IllegalSize(size).into());
                }
                size
            }
            None => DEFAULT_SIZE,
        };
        Ok(GameTree { nodes, size })
    }

    /// The root node, carrier of the game level metadata.
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// All nodes in document order. Never empty; the first is the root.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The board size, from the root `SZ` property or the default of 19.
    pub fn get_size(&self) -> usize {
        self.size
    }

    /// The komi, from the root `KM` property.
    ///
    /// Returns 0.0 if the property is absent.
    pub fn get_komi(&self) -> Result<f64, ConversionError> {
        match self.root().get_raw("KM") {
            Some(raw) => Ok(raw.parse::<f64>()?),
            None => Ok(0.0),
        }
    }

    /// The number of handicap stones.
    ///
    /// Returns `None` if the `HA` property is absent or carries the
    /// (meaningless) value zero. A one stone handicap is rejected.
    pub fn get_handicap(&self) -> Result<Option<i64>, ConversionError> {
        match self.root().get_raw("HA") {
            Some(raw) => match raw.parse::<i64>()? {
                0 => Ok(None),
                1 => Err(ConversionError::IllegalHandicap(1)),
                handicap => Ok(Some(handicap)),
            },
            None => Ok(None),
        }
    }

    /// The name of the specified player, as Text, if recorded.
    pub fn get_player(&self, colour: Colour) -> Option<String> {
        let identifier = match colour {
            Colour::Black => "PB",
            Colour::White => "PW",
        };
        self.root().get_text(identifier)
    }

    /// The colour of the winning player.
    ///
    /// Returns `None` if there is no `RE` property, or if it does not name a
    /// winner; a result this reader cannot make sense of is not an error.
    pub fn get_winner(&self) -> Option<Colour> {
        let result = self.root().get_text("RE")?;
        match result.chars().next()?.to_ascii_lowercase() {
            'b' => Some(Colour::Black),
            'w' => Some(Colour::White),
            _ => None,
        }
    }

    /// Retrieve the move from a node.
    ///
    /// Returns the colour and the move, the move being `None` for a pass.
    /// Returns `Ok(None)` if the node contains no `B` or `W` property; a
    /// node carrying both is read as a black move.
    pub fn get_move(&self, node: &Node) -> Result<Option<(Colour, Move)>, PointError> {
        let (colour, raw) = if let Some(raw) = node.get_raw("B") {
            (Colour::Black, raw)
        } else if let Some(raw) = node.get_raw("W") {
            (Colour::White, raw)
        } else {
            return Ok(None);
        };
        Ok(Some((colour, interpret_point(raw, self.size)?)))
    }

    /// Retrieve the stone setup from a node: the points to add for black and
    /// white and the points to clear, each empty when the matching property
    /// is absent.
    pub fn get_setup_commands(
        &self,
        node: &Node,
    ) -> Result<(HashSet<Point>, HashSet<Point>, HashSet<Point>), PointError> {
        let black = self.setup_points(node, "AB")?;
        let white = self.setup_points(node, "AW")?;
        let empty = self.setup_points(node, "AE")?;
        Ok((black, white, empty))
    }

    fn setup_points(&self, node: &Node, identifier: &str) -> Result<HashSet<Point>, PointError> {
        match node.get_list(identifier) {
            Some(values) => interpret_compressed_point_list(values, self.size),
            None => Ok(HashSet::new()),
        }
    }
}
