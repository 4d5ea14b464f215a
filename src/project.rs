//! A blanket project: one year of temperatures, a palette, a clamp
//! range and a progress ledger, passed around explicitly.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::{ClampRange, ColorMapper, Error, Palette, ProgressLedger, Result,
            RGBColor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rows shown per page by [`page`] when the caller has no preference.
pub const DEFAULT_ROWS_PER_PAGE: usize = 30;

/// Which daily temperature a project follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize),
           serde(rename_all = "lowercase"))]
pub enum TemperatureKind {
    /// Daily minimum.
    Min,
    /// Daily maximum.
    #[default]
    Max,
    /// Daily mean.
    Mean,
}

impl fmt::Display for TemperatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemperatureKind::Min => "min",
            TemperatureKind::Max => "max",
            TemperatureKind::Mean => "mean",
        })
    }
}

/// A daily reading in °C.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemperatureSample {
    pub date: NaiveDate,
    pub celsius: f64,
}

impl TemperatureSample {
    pub fn new(date: NaiveDate, celsius: f64) -> Self {
        TemperatureSample { date, celsius }
    }
}

/// Everything display code needs to draw one row of the blanket.
#[derive(Clone, Debug, PartialEq)]
pub struct DayRecord<'a, Color> {
    pub date: NaiveDate,
    pub temperature: f64,
    /// Position of the swatch in the palette, 0 being the coldest.
    pub index: usize,
    pub color: Color,
    pub name: &'a str,
    pub completed: bool,
}

/// Completion figures for a set of days.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub total_days: usize,
    pub completed_days: usize,
    /// In \[0, 100\]; 0 when there are no days.
    pub percentage: f64,
}

impl Progress {
    /// `completed` is expected not to exceed `total`.
    pub fn new(completed: usize, total: usize) -> Self {
        let percentage = if total == 0 { 0. }
                         else { completed as f64 * 100. / total as f64 };
        Progress { total_days: total, completed_days: completed, percentage }
    }

    /// Progress over a (possibly filtered) list of rows.
    pub fn from_records<Color>(records: &[DayRecord<'_, Color>]) -> Self {
        let done = records.iter().filter(|r| r.completed).count();
        Progress::new(done, records.len())
    }

    pub fn remaining_days(&self) -> usize {
        self.total_days.saturating_sub(self.completed_days)
    }
}

/// Lowest, highest and mean temperature of a project.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperatureSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Return the `page`-th (starting at 1) slice of `per_page` rows.
/// Pages past the end, page 0 and `per_page == 0` give an empty slice.
///
/// ```
/// use temperature_blanket::page;
/// let rows: Vec<u32> = (1 ..= 65).collect();
/// assert_eq!(page(&rows, 3, 30), &[61, 62, 63, 64, 65]);
/// assert!(page(&rows, 4, 30).is_empty());
/// ```
pub fn page<T>(rows: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 { return &[] }
    let start = (page - 1).saturating_mul(per_page);
    if start >= rows.len() { return &[] }
    let end = start.saturating_add(per_page).min(rows.len());
    &rows[start .. end]
}

/// Number of pages needed for `total` rows.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 { 0 } else { total.div_ceil(per_page) }
}


#[derive(Clone, Copy, Debug)]
struct Day {
    sample: TemperatureSample,
    bucket: usize,
}

/// A temperature blanket for one place and one year.
#[derive(Clone, Debug)]
pub struct Project<Color> {
    name: String,
    year: i32,
    kind: TemperatureKind,
    mapper: ColorMapper<Color>,
    days: Vec<Day>, // sorted by date, one per date, non-empty
    ledger: ProgressLedger,
}

impl<Color: RGBColor> Project<Color> {
    /// Create a project named `name` (typically the city) for `year`.
    ///
    /// Samples may come in any order.  They must all be finite and
    /// dated in `year`, with at most one per day; the project starts
    /// with an empty ledger.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use rgb::RGB8;
    /// use temperature_blanket::{ClampRange, ColorMapper, Project,
    ///                           RGBColor, TemperatureSample};
    /// let mapper = ColorMapper::new(RGB8::autumn(), ClampRange::WIDE);
    /// let samples = (1 ..= 365).map(|d| {
    ///     let date = NaiveDate::from_yo_opt(2023, d).unwrap();
    ///     TemperatureSample::new(date, d as f64 / 10.)
    /// });
    /// let mut p = Project::new("Lyon", 2023, mapper, samples).unwrap();
    /// p.toggle(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    /// assert_eq!(p.progress().completed_days, 1);
    /// ```
    pub fn new<I>(name: impl Into<String>, year: i32,
                  mapper: ColorMapper<Color>, samples: I) -> Result<Self>
    where I: IntoIterator<Item = TemperatureSample> {
        let mut samples: Vec<_> = samples.into_iter().collect();
        if samples.is_empty() { return Err(Error::NoSamples) }
        samples.sort_by_key(|s| s.date);
        if let Some(w) = samples.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(Error::DuplicateSample(w[0].date))
        }
        let days = samples.into_iter()
            .map(|sample| {
                if sample.date.year() != year {
                    return Err(Error::SampleOutOfYear { date: sample.date,
                                                        year })
                }
                let bucket = mapper.index(sample.celsius)?;
                Ok(Day { sample, bucket })
            })
            .collect::<Result<Vec<_>>>()?;
        let name = name.into();
        debug!("project {name} {year}: {} days, palette {:?}, range [{}, {}]",
               days.len(), mapper.palette().name(),
               mapper.range().min(), mapper.range().max());
        Ok(Project { name, year, kind: TemperatureKind::default(), mapper,
                     days, ledger: ProgressLedger::new() })
    }

    /// Set which daily temperature the samples represent.
    pub fn with_kind(mut self, kind: TemperatureKind) -> Self {
        self.kind = kind;
        self
    }

    /// Resume from a saved ledger.
    pub fn with_ledger(mut self, ledger: ProgressLedger) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn year(&self) -> i32 { self.year }

    pub fn kind(&self) -> TemperatureKind { self.kind }

    pub fn mapper(&self) -> &ColorMapper<Color> { &self.mapper }

    pub fn palette(&self) -> &Palette<Color> { self.mapper.palette() }

    pub fn range(&self) -> ClampRange { self.mapper.range() }

    /// Number of days (samples) in the project.
    pub fn len(&self) -> usize { self.days.len() }

    /// The samples, in date order.
    pub fn samples(&self) -> impl Iterator<Item = &TemperatureSample> + '_ {
        self.days.iter().map(|d| &d.sample)
    }

    /// The dates of the project, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().map(|d| d.sample.date)
    }

    fn record(&self, day: &Day) -> DayRecord<'_, Color> {
        let swatch = &self.palette().swatches()[day.bucket];
        DayRecord { date: day.sample.date,
                    temperature: day.sample.celsius,
                    index: day.bucket,
                    color: swatch.color(),
                    name: swatch.name(),
                    completed: self.ledger.is_completed(day.sample.date) }
    }

    /// One row per day, in date order.
    pub fn records(&self) -> Vec<DayRecord<'_, Color>> {
        self.days.iter().map(|d| self.record(d)).collect()
    }

    /// Rows of `month` (1 to 12).
    pub fn records_in_month(&self, month: u32) -> Vec<DayRecord<'_, Color>> {
        self.days.iter()
            .filter(|d| d.sample.date.month() == month)
            .map(|d| self.record(d))
            .collect()
    }

    /// Rows already made.
    pub fn completed_records(&self) -> Vec<DayRecord<'_, Color>> {
        self.days.iter()
            .filter(|d| self.ledger.is_completed(d.sample.date))
            .map(|d| self.record(d))
            .collect()
    }

    /// Progress over the whole project.  Ledger entries for dates
    /// outside the project are ignored.
    pub fn progress(&self) -> Progress {
        Progress::new(self.ledger.count_completed(self.dates()), self.len())
    }

    pub fn summary(&self) -> TemperatureSummary {
        let (mut min, mut max, mut mean) = (f64::INFINITY, f64::NEG_INFINITY, 0.);
        // Running mean: a plain sum of huge readings overflows.
        for (k, d) in self.days.iter().enumerate() {
            let t = d.sample.celsius;
            let n = (k + 1) as f64;
            min = min.min(t);
            max = max.max(t);
            mean += t / n - mean / n;
        }
        TemperatureSummary { min, max, mean }
    }

    /// Number of days for each swatch of the palette, e.g. to estimate
    /// how much of each yarn to buy.
    pub fn swatch_usage(&self) -> Vec<usize> {
        let mut usage = vec![0; self.palette().len()];
        for d in &self.days { usage[d.bucket] += 1 }
        usage
    }

    pub fn ledger(&self) -> &ProgressLedger { &self.ledger }

    pub fn ledger_mut(&mut self) -> &mut ProgressLedger { &mut self.ledger }

    pub fn set_completed(&mut self, date: NaiveDate, value: bool) {
        self.ledger.set_completed(date, value)
    }

    /// Flip the status of `date`; returns the new status.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        self.ledger.toggle(date)
    }

    /// Mark every day as not done; the temperatures are kept.
    pub fn reset_progress(&mut self) {
        self.ledger.reset_all()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Swatch};
    use approx::assert_relative_eq;
    use rgb::RGB8;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, d).unwrap()
    }

    fn two_tone() -> ColorMapper<RGB8> {
        let p = Palette::new("two", vec![
            Swatch::new(RGB8::new(0, 0, 255), "Blue"),
            Swatch::new(RGB8::new(255, 0, 0), "Red")]).unwrap();
        ColorMapper::new(p, ClampRange::new(0., 10.).unwrap())
    }

    fn project(temps: &[(NaiveDate, f64)]) -> Result<Project<RGB8>> {
        let s = temps.iter().map(|&(d, t)| TemperatureSample::new(d, t));
        Project::new("Test", 2023, two_tone(), s)
    }

    #[test]
    fn records_are_sorted_and_colored() {
        let p = project(&[(date(1, 2), 10.), (date(1, 1), -3.),
                          (date(2, 1), 5.)]).unwrap();
        let r = p.records();
        assert_eq!(r.iter().map(|r| r.date).collect::<Vec<_>>(),
                   vec![date(1, 1), date(1, 2), date(2, 1)]);
        assert_eq!(r.iter().map(|r| r.name).collect::<Vec<_>>(),
                   vec!["Blue", "Red", "Blue"]);
        assert_eq!(r[1].color, RGB8::new(255, 0, 0));
        assert_eq!(p.records_in_month(2).len(), 1);
        assert!(p.records_in_month(3).is_empty());
    }

    #[test]
    fn invalid_samples() {
        assert!(matches!(project(&[]), Err(Error::NoSamples)));
        let e = project(&[(date(1, 1), 1.), (date(1, 1), 2.)]).unwrap_err();
        assert!(matches!(e, Error::DuplicateSample(d) if d == date(1, 1)));
        let other = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let e = project(&[(date(1, 1), 1.), (other, 2.)]).unwrap_err();
        assert!(matches!(e, Error::SampleOutOfYear { year: 2023, .. }));
        let e = project(&[(date(1, 1), f64::NAN)]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn progress_counts_project_days_only() {
        let days: Vec<_> = (1 ..= 10).map(|d| (date(3, d), 4.)).collect();
        let mut p = project(&days).unwrap();
        for d in [1, 4, 7] { p.toggle(date(3, d)); }
        p.set_completed(date(12, 25), true);
        let pr = p.progress();
        assert_eq!(pr.total_days, 10);
        assert_eq!(pr.completed_days, 3);
        assert_eq!(pr.remaining_days(), 7);
        assert_relative_eq!(pr.percentage, 30.);
        assert_eq!(p.completed_records().len(), 3);
        assert_eq!(Progress::from_records(&p.records()), pr);
        p.reset_progress();
        assert_eq!(p.progress().completed_days, 0);
    }

    #[test]
    fn empty_progress_is_zero() {
        let pr = Progress::new(0, 0);
        assert_eq!(pr.percentage, 0.);
        assert_eq!(Progress::from_records::<RGB8>(&[]), pr);
    }

    #[test]
    fn summary_and_usage() {
        let p = project(&[(date(1, 1), -2.), (date(1, 2), 4.),
                          (date(1, 3), 13.)]).unwrap();
        let s = p.summary();
        assert_eq!((s.min, s.max), (-2., 13.));
        assert_relative_eq!(s.mean, 5.);
        assert_eq!(p.swatch_usage(), vec![2, 1]);
    }

    #[test]
    fn summary_of_huge_readings_is_finite() {
        let days: Vec<_> = (1 ..= 28).map(|d| (date(2, d), 1e306)).collect();
        let s = project(&days).unwrap().summary();
        assert!(s.mean.is_finite());
        assert_relative_eq!(s.mean, 1e306);
        let days = [(date(1, 1), -1.5e308), (date(1, 2), 1.5e308)];
        assert_eq!(project(&days).unwrap().summary().mean, 0.);
    }

    #[test]
    fn saved_ledger_is_resumed() {
        let mut l = ProgressLedger::new();
        l.set_completed(date(1, 2), true);
        let p = project(&[(date(1, 1), 0.), (date(1, 2), 0.)]).unwrap()
            .with_ledger(l)
            .with_kind(TemperatureKind::Mean);
        assert_eq!(p.kind().to_string(), "mean");
        assert_eq!(p.records().iter().map(|r| r.completed).collect::<Vec<_>>(),
                   vec![false, true]);
    }

    #[test]
    fn pagination() {
        let rows: Vec<_> = (0 .. 365).collect();
        assert_eq!(page_count(rows.len(), DEFAULT_ROWS_PER_PAGE), 13);
        assert_eq!(page(&rows, 1, DEFAULT_ROWS_PER_PAGE).len(), 30);
        assert_eq!(page(&rows, 13, DEFAULT_ROWS_PER_PAGE), &rows[360 ..]);
        assert!(page(&rows, 0, 30).is_empty());
        assert!(page(&rows, 2, 0).is_empty());
        assert!(page(&rows, usize::MAX, 30).is_empty());
        assert_eq!(page_count(0, 30), 0);
        assert_eq!(page_count(5, 0), 0);
    }
}
