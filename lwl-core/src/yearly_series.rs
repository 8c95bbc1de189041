
/// A (day-of-year, value) point.
pub type Point = (u32, f64);

/// Every reading for one calendar year, in input order.
///
/// Several readings on the same day are all kept; nothing is deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlySeries {
    pub year: i32,
    pub min: f64,
    pub max: f64,
    pub line: Vec<Point>,
}

impl YearlySeries {
    pub fn new(year: i32) -> Self {
        YearlySeries {
            year,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            line: Vec::new(),
        }
    }

    /// Append a reading and update the running min/max.
    pub fn push(&mut self, day: u32, value: f64) {
        self.line.push((day, value));
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Values recorded on `day`, in input order.
    pub fn values_on_day(&self, day: u32) -> impl Iterator<Item = f64> + '_ {
        self.line
            .iter()
            .filter(move |(d, _)| *d == day)
            .map(|(_, v)| *v)
    }

    /// The line ordered by day. The sort is stable, so same-day readings keep
    /// their input order.
    pub fn sorted_line(&self) -> Vec<Point> {
        let mut line = self.line.clone();
        line.sort_by_key(|(day, _)| *day);
        line
    }
}

/// Ordering helpers for collections of yearly series.
pub trait SortYearlySeries {
    fn sort_by_most_recent(&mut self);
    fn sort_by_oldest(&mut self);
    fn years(&self) -> Vec<i32>;
}

impl SortYearlySeries for Vec<YearlySeries> {
    fn sort_by_most_recent(&mut self) {
        self.sort_by(|a, b| b.year.cmp(&a.year));
    }

    fn sort_by_oldest(&mut self) {
        self.sort_by(|a, b| a.year.cmp(&b.year));
    }

    fn years(&self) -> Vec<i32> {
        self.iter().map(|series| series.year).collect()
    }
}
