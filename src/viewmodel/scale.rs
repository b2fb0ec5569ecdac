//! Continuous scales mapping data values onto plot coordinates.
//!
//! Linear and square-root scales follow the usual normalize/interpolate
//! shape; a degenerate domain maps every value to the middle of the range.
//! The time scale works on seconds since the epoch and can "nice" its
//! domain outward to calendar-aligned boundaries.

use time::{Date, Duration, Month, OffsetDateTime};
use time::macros::format_description;

fn normalize(value: f64, (d0, d1): (f64, f64)) -> f64 {
    let span = d1 - d0;
    if span == 0.0 || !span.is_finite() {
        0.5
    } else {
        (value - d0) / span
    }
}

fn interpolate(t: f64, (r0, r1): (f64, f64)) -> f64 {
    r0 + t * (r1 - r0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        interpolate(normalize(value, self.domain), self.range)
    }

    pub fn invert(&self, value: f64) -> f64 {
        interpolate(normalize(value, self.range), self.domain)
    }

    /// Evenly spaced values from the domain start, `step` apart, inclusive of the end
    pub fn ticks_every(&self, step: f64) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if step <= 0.0 || !step.is_finite() {
            return vec![lo];
        }
        let count = ((hi - lo) / step).floor() as usize;
        (0..=count).map(|i| lo + i as f64 * step).collect()
    }
}

/// Square-root scale: visual area, not radius, grows linearly with the value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    inner: LinearScale,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            inner: LinearScale::new((signed_sqrt(domain.0), signed_sqrt(domain.1)), range),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn apply(&self, value: f64) -> f64 {
        self.inner.apply(signed_sqrt(value))
    }

    pub fn with_domain(&self, domain: (f64, f64)) -> Self {
        Self::new(domain, self.range())
    }
}

fn signed_sqrt(v: f64) -> f64 {
    if v < 0.0 { -(-v).sqrt() } else { v.sqrt() }
}

/// Calendar step used for niceing and ticking a time domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    Seconds(i64),
    Minutes(i64),
    Hours(i64),
    Days(i64),
    Week,
    Months(i32),
    Years(i32),
}

const SECOND: f64 = 1.0;
const MINUTE: f64 = 60.0;
const HOUR: f64 = 3600.0;
const DAY: f64 = 86_400.0;
const WEEK: f64 = DAY * 7.0;
const MONTH: f64 = DAY * 30.0;
const YEAR: f64 = DAY * 365.0;

const INTERVALS: [(TimeInterval, f64); 17] = [
    (TimeInterval::Seconds(1), SECOND),
    (TimeInterval::Seconds(5), 5.0 * SECOND),
    (TimeInterval::Seconds(15), 15.0 * SECOND),
    (TimeInterval::Seconds(30), 30.0 * SECOND),
    (TimeInterval::Minutes(1), MINUTE),
    (TimeInterval::Minutes(5), 5.0 * MINUTE),
    (TimeInterval::Minutes(15), 15.0 * MINUTE),
    (TimeInterval::Minutes(30), 30.0 * MINUTE),
    (TimeInterval::Hours(1), HOUR),
    (TimeInterval::Hours(3), 3.0 * HOUR),
    (TimeInterval::Hours(6), 6.0 * HOUR),
    (TimeInterval::Hours(12), 12.0 * HOUR),
    (TimeInterval::Days(1), DAY),
    (TimeInterval::Days(2), 2.0 * DAY),
    (TimeInterval::Week, WEEK),
    (TimeInterval::Months(1), MONTH),
    (TimeInterval::Months(3), 3.0 * MONTH),
];

impl TimeInterval {
    /// Pick the interval giving roughly `count` steps across `span_seconds`
    pub fn for_span(span_seconds: f64, count: usize) -> Self {
        let target = span_seconds.abs() / count.max(1) as f64;
        let i = INTERVALS.partition_point(|&(_, d)| d <= target);
        if i == 0 {
            return TimeInterval::Seconds(1);
        }
        if i == INTERVALS.len() {
            return TimeInterval::Years(year_step(target / YEAR));
        }
        let (lower, lower_d) = INTERVALS[i - 1];
        let (upper, upper_d) = INTERVALS[i];
        if target / lower_d < upper_d / target { lower } else { upper }
    }

    /// Largest boundary at or before `t` (UTC calendar)
    pub fn floor(self, t: OffsetDateTime) -> OffsetDateTime {
        let t = t.to_offset(time::UtcOffset::UTC);
        let secs = t.unix_timestamp();
        let floored = match self {
            TimeInterval::Seconds(n) => from_secs(secs - secs.rem_euclid(n)),
            TimeInterval::Minutes(n) => from_secs(secs - secs.rem_euclid(n * 60)),
            TimeInterval::Hours(n) => from_secs(secs - secs.rem_euclid(n * 3600)),
            TimeInterval::Days(n) => {
                let day = t.date();
                let back = (day.day() as i64 - 1).rem_euclid(n);
                day.checked_sub(Duration::days(back)).map(midnight)
            }
            TimeInterval::Week => {
                let day = t.date();
                let back = day.weekday().number_days_from_sunday() as i64;
                day.checked_sub(Duration::days(back)).map(midnight)
            }
            TimeInterval::Months(n) => {
                let month0 = (t.month() as i32 - 1) / n * n;
                first_of_month(t.year(), month0)
            }
            TimeInterval::Years(n) => first_of_month(t.year() - t.year().rem_euclid(n), 0),
        };
        floored.unwrap_or(t)
    }

    /// Smallest boundary at or after `t`
    pub fn ceil(self, t: OffsetDateTime) -> OffsetDateTime {
        let floored = self.floor(t);
        if floored == t { floored } else { self.offset(floored) }
    }

    /// The next boundary after an aligned instant
    pub fn offset(self, t: OffsetDateTime) -> OffsetDateTime {
        let next = match self {
            TimeInterval::Seconds(n) => t.checked_add(Duration::seconds(n)),
            TimeInterval::Minutes(n) => t.checked_add(Duration::minutes(n)),
            TimeInterval::Hours(n) => t.checked_add(Duration::hours(n)),
            TimeInterval::Days(n) => t.checked_add(Duration::days(n)),
            TimeInterval::Week => t.checked_add(Duration::weeks(1)),
            TimeInterval::Months(n) => first_of_month(t.year(), t.month() as i32 - 1 + n),
            TimeInterval::Years(n) => first_of_month(t.year() + n, 0),
        };
        next.unwrap_or(t)
    }

    /// Tick label for an instant at this granularity
    pub fn label(self, t: OffsetDateTime) -> String {
        let t = t.to_offset(time::UtcOffset::UTC);
        let formatted = match self {
            TimeInterval::Seconds(_) => t.format(format_description!("[hour]:[minute]:[second]")),
            TimeInterval::Minutes(_) | TimeInterval::Hours(_) => t.format(format_description!("[hour]:[minute]")),
            TimeInterval::Days(_) | TimeInterval::Week => t.format(format_description!("[month repr:short] [day padding:none]")),
            TimeInterval::Months(_) => t.format(format_description!("[month repr:short] [year]")),
            TimeInterval::Years(_) => t.format(format_description!("[year]")),
        };
        formatted.unwrap_or_default()
    }
}

/// Step of 1, 2 or 5 times a power of ten, at least 1
fn year_step(raw: f64) -> i32 {
    if raw <= 1.0 || !raw.is_finite() {
        return 1;
    }
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 7.07 {
        10.0
    } else if error >= 3.16 {
        5.0
    } else if error >= 1.41 {
        2.0
    } else {
        1.0
    };
    (factor * power) as i32
}

fn from_secs(secs: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(secs).ok()
}

fn midnight(date: Date) -> OffsetDateTime {
    date.midnight().assume_utc()
}

/// First day of the month `month0` months (zero-based, may overflow) into `year`
fn first_of_month(year: i32, month0: i32) -> Option<OffsetDateTime> {
    let year = year + month0.div_euclid(12);
    let month = Month::try_from((month0.rem_euclid(12) + 1) as u8).ok()?;
    Date::from_calendar_date(year, month, 1).ok().map(midnight)
}

fn to_seconds(t: OffsetDateTime) -> f64 {
    t.unix_timestamp() as f64 + t.nanosecond() as f64 / 1e9
}

fn from_seconds(secs: f64) -> OffsetDateTime {
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round() as i64;
    from_secs(whole as i64)
        .and_then(|t| t.checked_add(Duration::nanoseconds(nanos)))
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// Linear scale over instants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (OffsetDateTime, OffsetDateTime),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(domain: (OffsetDateTime, OffsetDateTime), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale over the extent of `instants`; an empty input gives a zero-width epoch domain
    pub fn from_extent(instants: impl IntoIterator<Item = OffsetDateTime>, range: (f64, f64)) -> Self {
        let mut extent: Option<(OffsetDateTime, OffsetDateTime)> = None;
        for t in instants {
            extent = Some(match extent {
                None => (t, t),
                Some((lo, hi)) => (lo.min(t), hi.max(t)),
            });
        }
        let domain = extent.unwrap_or((OffsetDateTime::UNIX_EPOCH, OffsetDateTime::UNIX_EPOCH));
        Self::new(domain, range)
    }

    pub fn domain(&self) -> (OffsetDateTime, OffsetDateTime) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn seconds_domain(&self) -> (f64, f64) {
        (to_seconds(self.domain.0), to_seconds(self.domain.1))
    }

    pub fn apply(&self, t: OffsetDateTime) -> f64 {
        interpolate(normalize(to_seconds(t), self.seconds_domain()), self.range)
    }

    pub fn invert(&self, value: f64) -> OffsetDateTime {
        // Endpoints map back exactly so range bounds never lose the extreme instant
        if value == self.range.1 {
            return self.domain.1;
        }
        if value == self.range.0 {
            return self.domain.0;
        }
        from_seconds(interpolate(normalize(value, self.range), self.seconds_domain()))
    }

    /// Interval used for niceing and ticks at roughly `count` steps
    pub fn interval(&self, count: usize) -> TimeInterval {
        let (d0, d1) = self.seconds_domain();
        TimeInterval::for_span(d1 - d0, count)
    }

    /// Widen the domain outward to boundaries of the tick interval
    pub fn nice(mut self) -> Self {
        let (d0, d1) = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        let interval = self.interval(10);
        let nice_lo = interval.floor(lo);
        let nice_hi = interval.ceil(hi);
        self.domain = if d0 <= d1 { (nice_lo, nice_hi) } else { (nice_hi, nice_lo) };
        self
    }

    /// Boundary instants inside the domain, roughly `count` of them
    pub fn ticks(&self, count: usize) -> Vec<OffsetDateTime> {
        const MAX_TICKS: usize = 1000;

        let (d0, d1) = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        let interval = self.interval(count);
        let mut ticks = Vec::new();
        let mut t = interval.ceil(lo);
        while t <= hi && ticks.len() < MAX_TICKS {
            ticks.push(t);
            let next = interval.offset(t);
            if next <= t {
                break;
            }
            t = next;
        }
        ticks
    }
}
