//! Random password generation.

use rand::rngs::OsRng;
use rand::Rng;
use zeroize::Zeroizing;

use crate::errors::CliError;

pub const DEFAULT_LENGTH: usize = 16;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SPECIAL: &str = "!@#$%^&*-_=+;:,.?/~`";
const SPACE: &str = " ";
const BRACKETS: &str = "[]{}()<>";

/// Which character classes a generated password draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSets {
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub special: bool,
    pub space: bool,
    pub brackets: bool,
}

impl Default for CharacterSets {
    fn default() -> Self {
        Self {
            lowercase: true,
            uppercase: true,
            digits: true,
            special: true,
            space: false,
            brackets: false,
        }
    }
}

impl CharacterSets {
    fn alphabet(&self) -> Vec<char> {
        [
            (self.lowercase, LOWERCASE),
            (self.uppercase, UPPERCASE),
            (self.digits, DIGITS),
            (self.special, SPECIAL),
            (self.space, SPACE),
            (self.brackets, BRACKETS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .flat_map(|(_, chars)| chars.chars())
        .collect()
    }
}

/// Generate `length` characters drawn uniformly from the enabled sets.
pub fn generate_password(
    length: usize,
    sets: &CharacterSets,
) -> Result<Zeroizing<String>, CliError> {
    if length == 0 {
        return Err(CliError::invalid_input("Password length must be at least 1."));
    }
    let alphabet = sets.alphabet();
    if alphabet.is_empty() {
        return Err(CliError::invalid_input(
            "No character sets selected; enable at least one.",
        ));
    }

    let mut rng = OsRng;
    let mut password = Zeroizing::new(String::with_capacity(length));
    for _ in 0..length {
        password.push(alphabet[rng.gen_range(0..alphabet.len())]);
    }
    Ok(password)
}
