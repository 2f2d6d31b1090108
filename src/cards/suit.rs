use std::fmt::{Display, Formatter, Result};

/// One of the four suits. Suits carry no intrinsic ordering in poker; `Ord` here is only
/// useful for putting suits in a canonical array index, not for ranking hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

impl Suit {
    pub const fn all() -> [Self; 4] {
        [Self::Club, Self::Diamond, Self::Heart, Self::Spade]
    }
}

impl From<u8> for Suit {
    fn from(n: u8) -> Suit {
        match n {
            0 => Suit::Club,
            1 => Suit::Diamond,
            2 => Suit::Heart,
            3 => Suit::Spade,
            _ => panic!("invalid suit {n}"),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = ();
    fn try_from(c: char) -> std::result::Result<Self, ()> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Suit::Club),
            'd' => Ok(Suit::Diamond),
            'h' => Ok(Suit::Heart),
            's' => Ok(Suit::Spade),
            _ => Err(()),
        }
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Club => "c",
                Suit::Diamond => "d",
                Suit::Heart => "h",
                Suit::Spade => "s",
            }
        )
    }
}
