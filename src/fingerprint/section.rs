/// A group of fingerprint entries that one trained component depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Core,
    Nlu,
    Nlg,
}

impl Section {
    pub const fn all() -> [Self; 3] {
        [Self::Core, Self::Nlu, Self::Nlg]
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Core => write!(f, "Core model"),
            Self::Nlu => write!(f, "NLU model"),
            Self::Nlg => write!(f, "NLG responses"),
        }
    }
}
