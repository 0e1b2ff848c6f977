use chrono::{Local, NaiveDate};

/// Source of "today" for calendars measured against the current date.
pub trait Today: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalToday;

impl Today for LocalToday {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Pinned date, for reproducible renders.
#[derive(Debug, Clone, Copy)]
pub struct FixedToday(pub NaiveDate);

impl Today for FixedToday {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
