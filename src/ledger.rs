//! Per-day completion tracking.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One persisted ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedgerRecord {
    pub date: NaiveDate,
    pub completed: bool,
}

/// Records, for each day of a project, whether its row has been made.
///
/// Days never touched count as not completed; looking them up is not an
/// error.
///
/// ```
/// use chrono::NaiveDate;
/// use temperature_blanket::ProgressLedger;
/// let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let mut ledger = ProgressLedger::new();
/// assert!(!ledger.is_completed(d));
/// assert!(ledger.toggle(d));
/// assert!(ledger.is_completed(d));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde",
           derive(Serialize, Deserialize),
           serde(from = "Vec<LedgerRecord>", into = "Vec<LedgerRecord>"))]
pub struct ProgressLedger {
    entries: HashMap<NaiveDate, bool>,
}

impl ProgressLedger {
    pub fn new() -> Self { Self::default() }

    /// Mark `date` as completed or not.
    pub fn set_completed(&mut self, date: NaiveDate, value: bool) {
        self.entries.insert(date, value);
    }

    /// Return whether `date` is completed, `false` if it was never set.
    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.entries.get(&date).copied().unwrap_or(false)
    }

    /// Flip the status of `date` and return the new one.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        let value = !self.is_completed(date);
        self.set_completed(date, value);
        trace!("{date} marked {}", if value { "done" } else { "to do" });
        value
    }

    /// Forget every entry.
    pub fn reset_all(&mut self) {
        debug!("resetting ledger ({} entries)", self.entries.len());
        self.entries.clear();
    }

    /// Number of `dates` that are completed.  Duplicates are counted
    /// each time they appear.
    pub fn count_completed<I>(&self, dates: I) -> usize
    where I: IntoIterator, I::Item: Borrow<NaiveDate> {
        dates.into_iter()
            .filter(|d| {
                let d: &NaiveDate = d.borrow();
                self.is_completed(*d)
            })
            .count()
    }

    /// Number of completed entries, whatever their date.
    pub fn completed_count(&self) -> usize {
        self.entries.values().filter(|&&v| v).count()
    }

    /// Number of stored entries (completed or explicitly not).
    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Completed dates in increasing order.
    pub fn completed_dates(&self) -> Vec<NaiveDate> {
        let mut d: Vec<_> = self.entries.iter()
            .filter_map(|(&d, &v)| v.then_some(d))
            .collect();
        d.sort_unstable();
        d
    }

    /// Flat list of entries, sorted by date, for persistence.
    pub fn records(&self) -> Vec<LedgerRecord> {
        let mut r: Vec<_> = self.entries.iter()
            .map(|(&date, &completed)| LedgerRecord { date, completed })
            .collect();
        r.sort_unstable_by_key(|r| r.date);
        r
    }

    /// Rebuild a ledger from records.  When a date appears more than
    /// once, the last record wins.
    pub fn from_records<I>(records: I) -> Self
    where I: IntoIterator<Item = LedgerRecord> {
        let entries: HashMap<_, _> = records.into_iter()
            .map(|r| (r.date, r.completed))
            .collect();
        debug!("restored ledger with {} entries", entries.len());
        ProgressLedger { entries }
    }

    /// Serialize the ledger as a JSON array of `{"date", "completed"}`
    /// objects.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a ledger written by [`ProgressLedger::to_json`].
    #[cfg(feature = "serde")]
    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

impl From<Vec<LedgerRecord>> for ProgressLedger {
    fn from(records: Vec<LedgerRecord>) -> Self {
        ProgressLedger::from_records(records)
    }
}

impl From<ProgressLedger> for Vec<LedgerRecord> {
    fn from(ledger: ProgressLedger) -> Self { ledger.records() }
}

impl FromIterator<LedgerRecord> for ProgressLedger {
    fn from_iter<I: IntoIterator<Item = LedgerRecord>>(iter: I) -> Self {
        ProgressLedger::from_records(iter)
    }
}


/// A [`ProgressLedger`] that can be shared between threads.
///
/// Each method holds the lock for the whole operation, so a toggle is
/// never observed half done.
#[derive(Clone, Debug, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<ProgressLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: ProgressLedger) -> Self {
        SharedLedger { inner: Arc::new(Mutex::new(ledger)) }
    }

    // Ledger operations never leave the map half updated: poisoning
    // is ignored.
    fn lock(&self) -> MutexGuard<'_, ProgressLedger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_completed(&self, date: NaiveDate, value: bool) {
        self.lock().set_completed(date, value)
    }

    pub fn is_completed(&self, date: NaiveDate) -> bool {
        self.lock().is_completed(date)
    }

    pub fn toggle(&self, date: NaiveDate) -> bool {
        self.lock().toggle(date)
    }

    pub fn reset_all(&self) {
        self.lock().reset_all()
    }

    pub fn count_completed<I>(&self, dates: I) -> usize
    where I: IntoIterator, I::Item: Borrow<NaiveDate> {
        self.lock().count_completed(dates)
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with<R>(&self, f: impl FnOnce(&mut ProgressLedger) -> R) -> R {
        f(&mut self.lock())
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> ProgressLedger {
        self.lock().clone()
    }
}

impl From<ProgressLedger> for SharedLedger {
    fn from(ledger: ProgressLedger) -> Self { SharedLedger::new(ledger) }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn day(ordinal: u32) -> NaiveDate {
        NaiveDate::from_yo_opt(2023, ordinal).unwrap()
    }

    #[test]
    fn set_then_get() {
        let mut l = ProgressLedger::new();
        l.set_completed(day(5), true);
        assert!(l.is_completed(day(5)));
        l.set_completed(day(5), true);
        assert!(l.is_completed(day(5)));
        assert_eq!(l.len(), 1);
        assert!(!l.toggle(day(5)));
        assert!(!l.is_completed(day(5)));
    }

    #[test]
    fn missing_dates_are_not_completed() {
        let l = ProgressLedger::new();
        assert!(!l.is_completed(day(1)));
        assert!(l.is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut l = ProgressLedger::new();
        for d in 1 ..= 20 { l.set_completed(day(d), d % 2 == 0) }
        l.reset_all();
        assert!(l.is_empty());
        assert!((1 ..= 20).all(|d| !l.is_completed(day(d))));
    }

    #[test]
    fn three_out_of_ten() {
        let mut l = ProgressLedger::new();
        let keys: Vec<_> = (1 ..= 10).map(day).collect();
        for d in [2, 5, 9] { l.toggle(day(d)); }
        // Outside the queried keys.
        l.set_completed(day(100), true);
        assert_eq!(l.count_completed(&keys), 3);
        assert_eq!(l.count_completed(keys.iter().copied()), 3);
        assert_eq!(l.completed_count(), 4);
        assert_eq!(l.count_completed(Vec::<NaiveDate>::new()), 0);
    }

    #[test]
    fn records_are_sorted() {
        let mut l = ProgressLedger::new();
        l.set_completed(day(30), true);
        l.set_completed(day(3), false);
        l.set_completed(day(12), true);
        let r = l.records();
        assert_eq!(r.iter().map(|r| r.date).collect::<Vec<_>>(),
                   vec![day(3), day(12), day(30)]);
        assert_eq!(l.completed_dates(), vec![day(12), day(30)]);
        assert_eq!(ProgressLedger::from_records(r), l);
    }

    #[test]
    fn last_record_wins() {
        let l: ProgressLedger = [
            LedgerRecord { date: day(1), completed: true },
            LedgerRecord { date: day(1), completed: false },
        ].into_iter().collect();
        assert!(!l.is_completed(day(1)));
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn shared_toggles_are_atomic() {
        let shared = SharedLedger::default();
        let handles: Vec<_> = (0 .. 8).map(|_| {
            let s = shared.clone();
            thread::spawn(move || {
                for _ in 0 .. 1001 { s.toggle(day(1)); }
            })
        }).collect();
        for h in handles { h.join().unwrap() }
        // 8 * 1001 toggles: an even number.
        assert!(!shared.is_completed(day(1)));
        shared.set_completed(day(2), true);
        assert_eq!(shared.count_completed([day(1), day(2)]), 1);
        assert_eq!(shared.snapshot().len(), 2);
        shared.reset_all();
        assert!(shared.with(|l| l.is_empty()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_is_a_flat_list() {
        let mut l = ProgressLedger::new();
        l.set_completed(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(), true);
        l.set_completed(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), false);
        let s = l.to_json().unwrap();
        assert_eq!(s, r#"[{"date":"2023-01-01","completed":false},{"date":"2023-01-02","completed":true}]"#);
        assert_eq!(ProgressLedger::from_json(&s).unwrap(), l);
        let e = ProgressLedger::from_json("{").unwrap_err();
        assert_eq!(e.kind(), crate::ErrorKind::Serialization);
    }
}
