use std::rc::Rc;

/// A type alias for a raw property value string.
/// Reference counted so that a value exists once in memory no matter how many
/// accessors hand it out.
/// Actually a [Rc] around a [str].
pub type SgfString = Rc<str>;
