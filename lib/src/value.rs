use std::str::FromStr;

use regex::Regex;

use crate::errors::*;

make_log_macro!(debug, "value");

/// Unit of a user-supplied magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Raw,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

/// Parsed intent of a `set` token.
///
/// The grammar is decimal digits followed by up to two trailing modifier
/// characters: `%` selects percent units, `+`/`-` make the value a relative
/// step. The two modifiers may appear in either order, so `5%+` and `5+%`
/// parse identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSpec {
    Absolute {
        unit: Unit,
        magnitude: u32,
    },
    Relative {
        unit: Unit,
        magnitude: u32,
        direction: Direction,
    },
}

impl FromStr for ValueSpec {
    type Err = BriteError;

    fn from_str(s: &str) -> Result<Self> {
        let token = Regex::new(r"^(\d+)([%+-]{0,2})$")?;
        let caps = token
            .captures(s)
            .ok_or_else(|| BriteError::InvalidValue(s.to_string()))?;
        let magnitude = caps[1]
            .parse()
            .map_err(|_| BriteError::InvalidValue(s.to_string()))?;

        // Classify the modifiers as a set, each may appear at most once.
        let mut percent = false;
        let mut direction = None;
        for modifier in caps[2].chars() {
            match modifier {
                '%' if !percent => percent = true,
                '+' if direction.is_none() => direction = Some(Direction::Increase),
                '-' if direction.is_none() => direction = Some(Direction::Decrease),
                _ => return Err(BriteError::InvalidValue(s.to_string())),
            }
        }

        let unit = if percent { Unit::Percent } else { Unit::Raw };
        Ok(match direction {
            Some(direction) => ValueSpec::Relative {
                unit,
                magnitude,
                direction,
            },
            None => ValueSpec::Absolute { unit, magnitude },
        })
    }
}

impl ValueSpec {
    /// Resolve this spec against a fresh reading into an absolute raw value,
    /// clamped to `[0, max]`.
    pub fn resolve(&self, reading: BrightnessReading) -> u32 {
        let step = |unit: Unit, magnitude: u32| match unit {
            Unit::Raw => i64::from(magnitude),
            Unit::Percent => to_raw(magnitude, reading.max),
        };

        let candidate = match *self {
            ValueSpec::Absolute { unit, magnitude } => step(unit, magnitude),
            ValueSpec::Relative {
                unit,
                magnitude,
                direction,
            } => {
                let delta = step(unit, magnitude);
                match direction {
                    Direction::Increase => i64::from(reading.current) + delta,
                    Direction::Decrease => i64::from(reading.current) - delta,
                }
            }
        };

        let resolved = candidate.clamp(0, i64::from(reading.max)) as u32;
        debug!("{self:?} resolved to {resolved} against {reading:?}");
        resolved
    }
}

/// Percent to raw units, rounded to the nearest integer (ties away from zero).
fn to_raw(percent: u32, max: u32) -> i64 {
    (f64::from(percent) / 100.0 * f64::from(max)).round() as i64
}

/// A point-in-time reading of a device's brightness attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessReading {
    pub current: u32,
    pub max: u32,
}

impl BrightnessReading {
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    /// Current brightness as a whole percent of the maximum, rounded the same
    /// way as the percent-to-raw conversion used when setting.
    pub fn percent(&self) -> u32 {
        (f64::from(self.current) / f64::from(self.max) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ValueSpec {
        s.parse().unwrap()
    }

    fn reading(current: u32, max: u32) -> BrightnessReading {
        BrightnessReading::new(current, max)
    }

    #[test]
    fn parses_raw_absolute() {
        assert_eq!(
            parse("200"),
            ValueSpec::Absolute {
                unit: Unit::Raw,
                magnitude: 200
            }
        );
        assert_eq!(
            parse("0"),
            ValueSpec::Absolute {
                unit: Unit::Raw,
                magnitude: 0
            }
        );
    }

    #[test]
    fn parses_percent_absolute() {
        assert_eq!(
            parse("60%"),
            ValueSpec::Absolute {
                unit: Unit::Percent,
                magnitude: 60
            }
        );
    }

    #[test]
    fn parses_raw_relative() {
        assert_eq!(
            parse("20+"),
            ValueSpec::Relative {
                unit: Unit::Raw,
                magnitude: 20,
                direction: Direction::Increase
            }
        );
        assert_eq!(
            parse("30-"),
            ValueSpec::Relative {
                unit: Unit::Raw,
                magnitude: 30,
                direction: Direction::Decrease
            }
        );
    }

    #[test]
    fn percent_relative_modifiers_are_order_independent() {
        let increase = ValueSpec::Relative {
            unit: Unit::Percent,
            magnitude: 5,
            direction: Direction::Increase,
        };
        assert_eq!(parse("5%+"), increase);
        assert_eq!(parse("5+%"), increase);

        let decrease = ValueSpec::Relative {
            unit: Unit::Percent,
            magnitude: 10,
            direction: Direction::Decrease,
        };
        assert_eq!(parse("10%-"), decrease);
        assert_eq!(parse("10-%"), decrease);
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["", "abc", "5$", "-5", "+5", "%5", "5 ", "5++", "5%%", "5+-", "5%+-"] {
            assert!(
                token.parse::<ValueSpec>().is_err(),
                "token {token:?} should not parse"
            );
        }
    }

    #[test]
    fn resolves_example_scenarios() {
        let r = reading(40, 100);
        assert_eq!(parse("10+").resolve(r), 50);
        assert_eq!(parse("10%-").resolve(r), 30);
        assert_eq!(parse("200").resolve(r), 100);
        assert_eq!(parse("0").resolve(r), 0);
    }

    #[test]
    fn clamps_to_device_range() {
        let r = reading(10, 100);
        assert_eq!(parse("600").resolve(r), 100);
        assert_eq!(parse("50-").resolve(r), 0);
        assert_eq!(parse("100%+").resolve(reading(90, 100)), 100);
    }

    #[test]
    fn percent_set_then_get_round_trips() {
        let r = reading(0, 255);
        let raw = parse("50%").resolve(r);
        assert_eq!(raw, 128);
        assert_eq!(reading(raw, 255).percent(), 50);
    }

    #[test]
    fn reading_percent_rounds_to_nearest() {
        assert_eq!(reading(0, 255).percent(), 0);
        assert_eq!(reading(128, 255).percent(), 50);
        assert_eq!(reading(255, 255).percent(), 100);
    }

    #[test]
    fn reading_clamps_current_to_max() {
        assert_eq!(reading(300, 255).current, 255);
    }
}
