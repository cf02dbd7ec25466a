//! Speed range parsing for the command line
//!
//! Accepted forms:
//! - `START:END` / `START:END:POINTS`
//! - `START..END` / `START..END@POINTS`
//! - `S1,S2,S3` or a single `S` (explicit list)

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{LobeError, SpeedRange, SpeedSpec};
use crate::MAX_SPEED_POINTS;

lazy_static! {
    static ref RE_RANGE: Regex = Regex::new(
        r"^\s*(?P<start>\d+(?:\.\d*)?(?:[eE][+-]?\d+)?)\s*(?::|\.\.)\s*(?P<end>\d+(?:\.\d*)?(?:[eE][+-]?\d+)?)\s*(?:[:@]\s*(?P<points>\d+)\s*)?$"
    ).unwrap();

    static ref RE_LIST: Regex = Regex::new(
        r"^\s*\d+(?:\.\d*)?(?:\s*,\s*\d+(?:\.\d*)?)*\s*,?\s*$"
    ).unwrap();
}

/// Points used when a range omits its count
pub const DEFAULT_RANGE_POINTS: usize = 1500;

/// Parse a speed argument into a [`SpeedSpec`]
pub fn parse_speed_spec(text: &str) -> Result<SpeedSpec, LobeError> {
    if let Some(caps) = RE_RANGE.captures(text) {
        let start = parse_number(&caps["start"])?;
        let end = parse_number(&caps["end"])?;
        let points = match caps.name("points") {
            Some(m) => m
                .as_str()
                .parse::<usize>()
                .map_err(|e| LobeError::invalid("speeds", e.to_string()))?,
            None => DEFAULT_RANGE_POINTS,
        };

        if end < start {
            return Err(LobeError::invalid(
                "speeds",
                format!("range end ({}) is below start ({})", end, start),
            ));
        }
        if points == 0 {
            return Err(LobeError::invalid("speeds", "range needs at least one point"));
        }
        if points > MAX_SPEED_POINTS {
            return Err(LobeError::invalid(
                "speeds",
                format!("range asks for {} points, at most {} allowed", points, MAX_SPEED_POINTS),
            ));
        }

        return Ok(SpeedSpec::Range(SpeedRange::new(start, end, points)));
    }

    if RE_LIST.is_match(text) {
        let speeds = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_number)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(SpeedSpec::List(speeds));
    }

    Err(LobeError::invalid(
        "speeds",
        format!(
            "cannot parse '{}', expected START:END[:POINTS], START..END[@POINTS] or a comma list",
            text.trim()
        ),
    ))
}

fn parse_number(s: &str) -> Result<f64, LobeError> {
    s.parse::<f64>()
        .map_err(|e| LobeError::invalid("speeds", format!("'{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colon_range_with_points() {
        assert_eq!(
            parse_speed_spec("1000:20000:1500").unwrap(),
            SpeedSpec::Range(SpeedRange::new(1000.0, 20000.0, 1500))
        );
    }

    #[test]
    fn test_dotted_range_with_and_without_points() {
        assert_eq!(
            parse_speed_spec(" 2000..8000@200 ").unwrap(),
            SpeedSpec::Range(SpeedRange::new(2000.0, 8000.0, 200))
        );
        assert_eq!(
            parse_speed_spec("2000..8000").unwrap(),
            SpeedSpec::Range(SpeedRange::new(2000.0, 8000.0, DEFAULT_RANGE_POINTS))
        );
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(
            parse_speed_spec("1e3:2e4:10").unwrap(),
            SpeedSpec::Range(SpeedRange::new(1000.0, 20000.0, 10))
        );
    }

    #[test]
    fn test_explicit_list() {
        assert_eq!(
            parse_speed_spec("5000, 6000,7500.5").unwrap(),
            SpeedSpec::List(vec![5000.0, 6000.0, 7500.5])
        );
    }

    #[test]
    fn test_single_value_is_a_list_of_one() {
        assert_eq!(parse_speed_spec("5000").unwrap(), SpeedSpec::List(vec![5000.0]));
        assert_eq!(parse_speed_spec("5000,").unwrap(), SpeedSpec::List(vec![5000.0]));
    }

    #[test]
    fn test_rejects_reversed_and_garbage() {
        assert!(parse_speed_spec("9000:1000").is_err());
        assert!(parse_speed_spec("1000:2000:0").is_err());
        assert!(parse_speed_spec("fast").is_err());
        assert!(parse_speed_spec("1000:2000:100001").is_err());
    }
}
