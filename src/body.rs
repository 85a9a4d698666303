/// A celestial body which a `Position` can be tagged with. Bodies carry no
/// data and add no behavior, they only give the position a distinct type
/// and a distinct name.
pub trait Body: Copy + Send + Sync + 'static {
    /// The type name used when rendering a position on this body.
    const POSITION_NAME: &'static str;
}

/// A position whose originating body is not recorded.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Unspecified;

impl Body for Unspecified {
    const POSITION_NAME: &'static str = "Position";
}

/// Earth.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Earth;

impl Body for Earth {
    const POSITION_NAME: &'static str = "EarthPosition";
}

/// Mars.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Mars;

impl Body for Mars {
    const POSITION_NAME: &'static str = "MarsPosition";
}
