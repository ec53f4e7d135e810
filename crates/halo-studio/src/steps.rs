use std::fmt;
use std::str::FromStr;

use halo_ui::prelude::RingIndex;

/// One scripted value change: `ring=value`, e.g. `inner=0.8` or `2=1`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Step {
    pub ring: RingIndex,
    pub value: f32,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ring, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected ring=value, got `{s}`"))?;
        let ring = ring.parse::<RingIndex>().map_err(|e| e.to_string())?;
        let value = value
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("bad value in `{s}`: {e}"))?;
        if !value.is_finite() {
            return Err(format!("value in `{s}` must be finite"));
        }
        Ok(Step { ring, value })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.ring.name(), self.value)
    }
}

/// Script played when no `--step` is given: one partial fill, then every
/// ring to full, ending in the all-rings event.
pub fn default_steps() -> Vec<Step> {
    vec![
        Step { ring: RingIndex::Inner, value: 0.8 },
        Step { ring: RingIndex::Middle, value: 1.0 },
        Step { ring: RingIndex::Inner, value: 1.0 },
        Step { ring: RingIndex::Outer, value: 1.0 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_indices() {
        assert_eq!("inner=0.8".parse::<Step>(), Ok(Step { ring: RingIndex::Inner, value: 0.8 }));
        assert_eq!("2 = 1".parse::<Step>(), Ok(Step { ring: RingIndex::Outer, value: 1.0 }));
        assert_eq!("middle=-0.5".parse::<Step>(), Ok(Step { ring: RingIndex::Middle, value: -0.5 }));
    }

    #[test]
    fn rejects_malformed_steps() {
        assert!("inner".parse::<Step>().is_err());
        assert!("left=0.5".parse::<Step>().unwrap_err().contains("unknown ring"));
        assert!("inner=half".parse::<Step>().is_err());
        assert!("inner=NaN".parse::<Step>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let s = Step { ring: RingIndex::Middle, value: 0.25 };
        assert_eq!(s.to_string().parse::<Step>(), Ok(s));
    }
}
