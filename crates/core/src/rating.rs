use serde::{Deserialize, Serialize};

/// Average rating on a 0..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Rating(f32);

impl Rating {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 5.0;
    pub const STEP: f32 = 0.5;

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn step_up(self) -> Self {
        Self::new(self.0 + Self::STEP)
    }

    pub fn step_down(self) -> Self {
        Self::new(self.0 - Self::STEP)
    }

    pub fn is_zero(self) -> bool {
        self.0 <= Self::MIN
    }
}

impl From<f32> for Rating {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
    Full,
    Half,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarStyle {
    Unicode,
    Ascii,
}

impl Star {
    pub fn glyph(self, style: StarStyle) -> char {
        match (style, self) {
            (StarStyle::Unicode, Star::Full) => '★',
            (StarStyle::Unicode, Star::Half) => '⯪',
            (StarStyle::Unicode, Star::Empty) => '☆',
            (StarStyle::Ascii, Star::Full) => '*',
            (StarStyle::Ascii, Star::Half) => '+',
            (StarStyle::Ascii, Star::Empty) => '.',
        }
    }
}

impl StarStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            StarStyle::Unicode => "unicode",
            StarStyle::Ascii => "ascii",
        }
    }
}

impl std::fmt::Display for StarStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StarStyle {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unicode" => Ok(StarStyle::Unicode),
            "ascii" => Ok(StarStyle::Ascii),
            _ => Err("unknown star style"),
        }
    }
}

/// Five glyph slots for `rating`: `floor(rating)` full, one half when the
/// fractional part is nonzero, the rest empty. Out-of-range input is clamped.
pub fn stars(rating: f32) -> [Star; 5] {
    let rating = Rating::new(rating).value();
    let full = rating.floor() as usize;
    let half = rating.fract() > 0.0;

    let mut out = [Star::Empty; 5];
    for (idx, slot) in out.iter_mut().enumerate() {
        if idx < full {
            *slot = Star::Full;
        } else if idx == full && half {
            *slot = Star::Half;
        }
    }
    out
}

pub fn star_string(rating: f32, style: StarStyle) -> String {
    stars(rating).iter().map(|star| star.glyph(style)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(slots: &[Star; 5], kind: Star) -> usize {
        slots.iter().filter(|s| **s == kind).count()
    }

    #[test]
    fn whole_ratings_have_no_half() {
        let slots = stars(4.0);
        assert_eq!(count(&slots, Star::Full), 4);
        assert_eq!(count(&slots, Star::Half), 0);
        assert_eq!(count(&slots, Star::Empty), 1);
    }

    #[test]
    fn fractional_rating_gets_one_half() {
        assert_eq!(
            stars(4.7),
            [Star::Full, Star::Full, Star::Full, Star::Full, Star::Half]
        );
        assert_eq!(
            stars(0.5),
            [Star::Half, Star::Empty, Star::Empty, Star::Empty, Star::Empty]
        );
    }

    #[test]
    fn bounds_are_clamped() {
        assert_eq!(stars(0.0), [Star::Empty; 5]);
        assert_eq!(stars(5.0), [Star::Full; 5]);
        assert_eq!(stars(9.0), [Star::Full; 5]);
        assert_eq!(stars(-1.0), [Star::Empty; 5]);
        assert_eq!(stars(f32::NAN), [Star::Empty; 5]);
    }

    #[test]
    fn every_half_step_yields_five_slots() {
        for tenth in 0..=50 {
            let rating = tenth as f32 / 10.0;
            let slots = stars(rating);
            let full = count(&slots, Star::Full);
            let half = count(&slots, Star::Half);
            assert_eq!(full, rating.floor() as usize, "rating {rating}");
            assert_eq!(half == 1, rating.fract() > 0.0, "rating {rating}");
            assert_eq!(full + half + count(&slots, Star::Empty), 5);
        }
    }

    #[test]
    fn glyph_styles() {
        assert_eq!(star_string(3.5, StarStyle::Unicode), "★★★⯪☆");
        assert_eq!(star_string(3.5, StarStyle::Ascii), "***+.");
    }

    #[test]
    fn rating_steps_stay_in_range() {
        let rating = Rating::new(4.8).step_up();
        assert_eq!(rating.value(), 5.0);
        let rating = Rating::new(0.2).step_down();
        assert_eq!(rating.value(), 0.0);
        assert!(rating.is_zero());
        assert_eq!(Rating::new(4.5).to_string(), "4.5");
    }

    #[test]
    fn star_style_parses_strings() {
        assert_eq!("unicode".parse::<StarStyle>().unwrap(), StarStyle::Unicode);
        assert_eq!(" ASCII ".parse::<StarStyle>().unwrap(), StarStyle::Ascii);
        assert!("emoji".parse::<StarStyle>().is_err());
    }
}
