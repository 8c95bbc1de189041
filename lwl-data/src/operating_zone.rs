//! Seasonal operating zones drawn behind the yearly lines.
//!
//! Each zone is a band bounded by two piecewise-linear curves given as
//! day-of-year breakpoints. The bundled table is in the same units as the
//! gauge series (metres above the gauge datum).

use serde::{Deserialize, Serialize};

/// Bundled zone table for the lake.
pub static OPERATING_ZONES_JSON: &str = include_str!("../fixtures/operating_zones.json");

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Breakpoint {
    pub day: u32,
    pub value: f64,
}

/// A band between an upper and a lower curve.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OperatingBand {
    pub upper: Vec<Breakpoint>,
    pub lower: Vec<Breakpoint>,
}

/// Upper, normal and lower operating bands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OperatingZones {
    pub upper: OperatingBand,
    pub normal: OperatingBand,
    pub lower: OperatingBand,
}

/// Which zone a reading falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    HighWater,
    UpperOperating,
    NormalOperating,
    LowerOperating,
    LowWater,
}

/// Sampled band: both curves evaluated at one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AreaPoint {
    pub day: u32,
    pub upper: f64,
    pub lower: f64,
}

/// Value of the curve through `breaks` at `day`.
///
/// Linear between the first pair of breakpoints that brackets `day`; clamped
/// to the first/last value outside the curve; 0 for an empty curve.
pub fn interpolate(breaks: &[Breakpoint], day: u32) -> f64 {
    let (Some(first), Some(last)) = (breaks.first(), breaks.last()) else {
        return 0.0;
    };
    for pair in breaks.windows(2) {
        let (d0, d1) = (pair[0], pair[1]);
        if d0.day <= day && day <= d1.day {
            if d0.day == d1.day {
                return d0.value;
            }
            let t = (day - d0.day) as f64 / (d1.day - d0.day) as f64;
            return d0.value + t * (d1.value - d0.value);
        }
    }
    if let Some(exact) = breaks.iter().find(|b| b.day == day) {
        return exact.value;
    }
    if day < first.day {
        first.value
    } else {
        last.value
    }
}

fn distinct_days<'a, I>(breaks: I) -> Vec<u32>
where
    I: IntoIterator<Item = &'a Breakpoint>,
{
    let mut days: Vec<u32> = breaks.into_iter().map(|b| b.day).collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Sample both curves of a band at every breakpoint day of either curve.
pub fn area_data(band: &OperatingBand) -> Vec<AreaPoint> {
    distinct_days(band.upper.iter().chain(band.lower.iter()))
        .into_iter()
        .map(|day| AreaPoint {
            day,
            upper: interpolate(&band.upper, day),
            lower: interpolate(&band.lower, day),
        })
        .collect()
}

/// Sample a single curve at each of its own breakpoint days.
pub fn single_area_data(breaks: &[Breakpoint]) -> Vec<Breakpoint> {
    distinct_days(breaks)
        .into_iter()
        .map(|day| Breakpoint {
            day,
            value: interpolate(breaks, day),
        })
        .collect()
}

impl OperatingZones {
    /// Zones shipped with the crate.
    pub fn builtin() -> serde_json::Result<Self> {
        serde_json::from_str(OPERATING_ZONES_JSON)
    }

    /// Zone for `value` on `day`. A reading on a boundary belongs to the lower zone.
    pub fn classify(&self, day: u32, value: f64) -> Zone {
        if value > interpolate(&self.upper.upper, day) {
            Zone::HighWater
        } else if value > interpolate(&self.normal.upper, day) {
            Zone::UpperOperating
        } else if value > interpolate(&self.normal.lower, day) {
            Zone::NormalOperating
        } else if value > interpolate(&self.lower.lower, day) {
            Zone::LowerOperating
        } else {
            Zone::LowWater
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(day: u32, value: f64) -> Breakpoint {
        Breakpoint { day, value }
    }

    #[test]
    fn test_interpolate_between_breakpoints() {
        let breaks = vec![bp(0, 1.0), bp(10, 2.0), bp(20, 0.0)];
        assert_eq!(interpolate(&breaks, 0), 1.0);
        assert_eq!(interpolate(&breaks, 5), 1.5);
        assert_eq!(interpolate(&breaks, 10), 2.0);
        assert_eq!(interpolate(&breaks, 15), 1.0);
    }

    #[test]
    fn test_interpolate_clamps_outside() {
        let breaks = vec![bp(10, 1.0), bp(20, 3.0)];
        assert_eq!(interpolate(&breaks, 2), 1.0);
        assert_eq!(interpolate(&breaks, 300), 3.0);
        assert_eq!(interpolate(&[bp(7, 4.0)], 7), 4.0);
        assert_eq!(interpolate(&[], 7), 0.0);
    }

    #[test]
    fn test_interpolate_repeated_day() {
        let breaks = vec![bp(0, 1.0), bp(5, 2.0), bp(5, 3.0), bp(10, 3.0)];
        assert_eq!(interpolate(&breaks, 5), 2.0);
        assert!(interpolate(&breaks, 7).is_finite());
    }

    #[test]
    fn test_area_data_uses_union_of_days() {
        let band = OperatingBand {
            upper: vec![bp(0, 10.0), bp(100, 10.0)],
            lower: vec![bp(0, 8.0), bp(50, 9.0), bp(100, 8.0)],
        };
        let area = area_data(&band);
        let days: Vec<u32> = area.iter().map(|p| p.day).collect();
        assert_eq!(days, vec![0, 50, 100]);
        assert_eq!(area[1], AreaPoint { day: 50, upper: 10.0, lower: 9.0 });
    }

    #[test]
    fn test_single_area_data() {
        let breaks = vec![bp(30, 2.0), bp(0, 1.0), bp(30, 2.0)];
        let sampled = single_area_data(&breaks);
        assert_eq!(sampled.len(), 2);
        assert_eq!(sampled[0].day, 0);
        assert_eq!(sampled[1].day, 30);
    }

    #[test]
    fn test_builtin_zones() {
        let zones = OperatingZones::builtin().unwrap();
        // bands share their boundaries
        assert_eq!(zones.upper.lower, zones.normal.upper);
        assert_eq!(zones.lower.upper, zones.normal.lower);
        for band in [&zones.upper, &zones.normal, &zones.lower] {
            assert_eq!(band.upper.first().unwrap().day, 0);
            assert_eq!(band.lower.last().unwrap().day, 365);
        }
    }

    #[test]
    fn test_classify() {
        let zones = OperatingZones::builtin().unwrap();
        assert_eq!(zones.classify(0, 10.5), Zone::HighWater);
        assert_eq!(zones.classify(0, 9.5), Zone::UpperOperating);
        assert_eq!(zones.classify(0, 9.0), Zone::NormalOperating);
        assert_eq!(zones.classify(0, 8.5), Zone::LowerOperating);
        assert_eq!(zones.classify(0, 7.0), Zone::LowWater);
    }
}
