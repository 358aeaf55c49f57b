// src/extract/decode.rs
//
// Digit-merge decoding. OCR reads "score/100" in a handful of broken ways:
//   "57/100" → "57100"   (slash lost)
//   "40/100" → "407100"  (slash read as 7)
//   "57/10"  → "5700"    (denominator clipped)
//   "/57"    → "157"     (slash read as 1)
// The thresholds below map each shape back to the score. They were tuned
// against one report layout and font, so they stay configurable.

/// A merged shape: tokens `>= floor` keep `token / divisor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Merge {
    pub floor: u64,
    pub divisor: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeRules {
    /// Checked in order; the first matching floor wins. Keep descending.
    pub merges: Vec<Merge>,
    /// Tokens above this (and below every merge floor) drop their leading digit.
    pub plain_max: u64,
    /// Accepted decoded range. 0 is OCR noise ("00"), not a score.
    pub min_score: u8,
    pub max_score: u8,
}

impl Default for DecodeRules {
    fn default() -> Self {
        Self {
            merges: vec![
                Merge { floor: 100_000, divisor: 10_000 },
                Merge { floor: 10_000, divisor: 1_000 },
                Merge { floor: 1_000, divisor: 100 },
            ],
            plain_max: 100,
            min_score: 1,
            max_score: 100,
        }
    }
}

impl DecodeRules {
    /// Map one raw digit run to a plausible score, or `None` if the result
    /// falls outside `min_score..=max_score`.
    pub fn decode(&self, token: u64) -> Option<u8> {
        let value = match self.merges.iter().find(|m| token >= m.floor) {
            Some(m) if m.divisor > 0 => token / m.divisor,
            Some(_) => return None,
            None if token > self.plain_max => token % 100,
            None => token,
        };

        let value = u8::try_from(value).ok()?;
        (self.min_score..=self.max_score).contains(&value).then_some(value)
    }

    /// Decode a digit string; unparsable runs are dropped.
    pub fn decode_str(&self, digits: &str) -> Option<u8> {
        digits.parse::<u64>().ok().and_then(|t| self.decode(t))
    }
}
