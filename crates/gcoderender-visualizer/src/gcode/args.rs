//! Argument decoder: `"X10 Y20.5 E3"` into letter/value pairs

use gcoderender_core::GcodeError;

/// Decoded command arguments
///
/// Letters are stored upper-case. When a letter repeats, the last value wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    words: Vec<(char, f64)>,
}

impl Arguments {
    /// Decode an argument string
    ///
    /// Every whitespace-separated token must be a letter followed by a finite
    /// floating-point literal; anything else fails with
    /// [`GcodeError::MalformedArgument`].
    pub fn decode(args: Option<&str>, line_number: usize) -> Result<Self, GcodeError> {
        let Some(args) = args else {
            return Ok(Self::default());
        };

        let mut words = Vec::with_capacity(4);
        for token in args.split_whitespace() {
            match decode_word(token) {
                Some(word) => words.push(word),
                None => {
                    return Err(GcodeError::MalformedArgument {
                        line_number,
                        token: token.to_string(),
                    })
                }
            }
        }

        Ok(Self { words })
    }

    /// Decode an argument string, dropping tokens that are not letter/number words
    pub fn decode_lenient(args: Option<&str>) -> Self {
        let words = args
            .map(|args| args.split_whitespace().filter_map(decode_word).collect())
            .unwrap_or_default();
        Self { words }
    }

    /// Value for a letter (case-insensitive)
    pub fn get(&self, letter: char) -> Option<f64> {
        let letter = letter.to_ascii_uppercase();
        self.words
            .iter()
            .rev()
            .find(|(l, _)| *l == letter)
            .map(|(_, v)| *v)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.words.iter().copied()
    }
}

fn decode_word(token: &str) -> Option<(char, f64)> {
    let mut chars = token.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let value = chars.as_str().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((letter, value))
}
