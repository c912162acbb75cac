use rand::Rng;
use serde::{Deserialize, Serialize};

/// The value of a single six-sided die.
///
/// Serialized as a bare integer. Deserializing anything outside of `1..=6` fails.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiceValue(u8);

impl DiceValue {
    pub const SIX: DiceValue = DiceValue(6);

    pub fn new(pips: u8) -> Option<Self> {
        (1..=6).contains(&pips).then_some(Self(pips))
    }

    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(1..=6))
    }

    pub fn pips(self) -> u8 {
        self.0
    }

    pub fn is_six(self) -> bool {
        self.0 == 6
    }
}

/// The error type for converting an out-of-range integer into a [`DiceValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidDiceValue(pub u8);

impl std::error::Error for InvalidDiceValue {}

impl std::fmt::Display for InvalidDiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not a valid dice value, expected 1 to 6", self.0)
    }
}

impl TryFrom<u8> for DiceValue {
    type Error = InvalidDiceValue;

    fn try_from(pips: u8) -> Result<Self, Self::Error> {
        DiceValue::new(pips).ok_or(InvalidDiceValue(pips))
    }
}

impl From<DiceValue> for u8 {
    fn from(dice: DiceValue) -> u8 {
        dice.0
    }
}

impl std::fmt::Display for DiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // https://en.wikipedia.org/wiki/Dice#Unicode_representation
        let face = char::from_u32(0x2680 + u32::from(self.0) - 1).unwrap_or('?');
        write!(f, "{}", face)
    }
}

/// Shorthand for a dice value known to be valid. Panics otherwise.
#[macro_export]
macro_rules! dice {
    ($pips:literal) => {
        $crate::DiceValue::new($pips).expect("Invalid dice value given to dice! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use dice;
