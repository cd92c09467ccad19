/// What the user currently has selected. At most one entity kind is selected at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    None,
    /// Player at this roster index.
    Player(usize),
    /// Route at this index.
    Route(usize),
    /// Note at this index.
    Note(usize),
}

impl Selection {
    /// Selected player index, if a player is selected.
    pub fn player(self) -> Option<usize> {
        match self {
            Self::Player(i) => Some(i),
            _ => None,
        }
    }

    /// Selected route index, if a route is selected.
    pub fn route(self) -> Option<usize> {
        match self {
            Self::Route(i) => Some(i),
            _ => None,
        }
    }

    /// Selected note index, if a note is selected.
    pub fn note(self) -> Option<usize> {
        match self {
            Self::Note(i) => Some(i),
            _ => None,
        }
    }

    /// `true` when nothing is selected.
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}
