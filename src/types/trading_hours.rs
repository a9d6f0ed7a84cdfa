use crate::types::day_of_week::DayOfWeek;
use crate::types::interval::Interval;

/// Trading hours for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySchedule {
    Closed,
    Single(Interval),
    /// Disjoint windows, e.g. an OTC pair paused during the exchange session.
    Multiple(Vec<Interval>),
}

impl DaySchedule {
    /// Several windows, stored in start order.
    pub fn multiple(mut intervals: Vec<Interval>) -> Self {
        intervals.sort();
        Self::Multiple(intervals)
    }

    /// Same hours with any `Multiple` list put in start order.
    pub fn sorted(self) -> Self {
        match self {
            Self::Multiple(intervals) => Self::multiple(intervals),
            other => other,
        }
    }

    pub fn is_open_at(&self, minute: u16) -> bool {
        match self {
            Self::Closed => false,
            Self::Single(interval) => interval.contains(minute),
            Self::Multiple(intervals) => intervals.iter().any(|interval| interval.contains(minute)),
        }
    }

    pub fn intervals(&self) -> &[Interval] {
        match self {
            Self::Closed => &[],
            Self::Single(interval) => std::slice::from_ref(interval),
            Self::Multiple(intervals) => intervals,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// First pair of intervals sharing at least one minute, in start order.
    pub fn first_overlap(&self) -> Option<(Interval, Interval)> {
        let mut sorted = self.intervals().to_vec();
        sorted.sort();

        sorted
            .windows(2)
            .find(|pair| pair[0].overlaps(&pair[1]))
            .map(|pair| (pair[0], pair[1]))
    }
}

/// One [`DaySchedule`] for every day of the week, Monday first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [DaySchedule; 7],
}

impl WeeklySchedule {
    pub fn new(days: [DaySchedule; 7]) -> Self {
        Self { days }
    }

    pub fn uniform(day: DaySchedule) -> Self {
        Self::new(std::array::from_fn(|_| day.clone()))
    }

    pub fn always_open() -> Self {
        Self::uniform(DaySchedule::Single(Interval::full_day()))
    }

    /// Same hours Monday to Friday, closed over the weekend.
    pub fn weekdays(day: DaySchedule) -> Self {
        Self::new(std::array::from_fn(|index| {
            if index < DayOfWeek::Sat.index() {
                day.clone()
            } else {
                DaySchedule::Closed
            }
        }))
    }

    pub fn sorted(self) -> Self {
        Self::new(self.days.map(DaySchedule::sorted))
    }

    pub fn with_day(mut self, day: DayOfWeek, schedule: DaySchedule) -> Self {
        self.days[day.index()] = schedule;
        self
    }

    pub fn day(&self, day: DayOfWeek) -> &DaySchedule {
        &self.days[day.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &DaySchedule)> {
        DayOfWeek::ALL.into_iter().zip(self.days.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(start: u16, end: u16) -> Interval {
        Interval::try_new(start, end).unwrap()
    }

    #[test]
    fn closed_day_is_never_open() {
        let closed = DaySchedule::Closed;
        assert!((0..1440).all(|minute| !closed.is_open_at(minute)));
    }

    #[test]
    fn multiple_matches_any_window_regardless_of_order() {
        let ordered = DaySchedule::Multiple(vec![interval(0, 415), interval(1265, 1440)]);
        let reversed = DaySchedule::Multiple(vec![interval(1265, 1440), interval(0, 415)]);

        for minute in [0, 414, 415, 800, 1264, 1265, 1439] {
            assert_eq!(ordered.is_open_at(minute), reversed.is_open_at(minute));
        }
        assert!(ordered.is_open_at(414));
        assert!(!ordered.is_open_at(415));
        assert!(ordered.is_open_at(1265));
    }

    #[test]
    fn first_overlap_reports_pair_in_start_order() {
        let day = DaySchedule::Multiple(vec![
            interval(600, 900),
            interval(0, 60),
            interval(500, 700),
        ]);

        assert_eq!(
            day.first_overlap(),
            Some((interval(500, 700), interval(600, 900)))
        );
        assert_eq!(
            DaySchedule::Multiple(vec![interval(0, 60), interval(60, 120)]).first_overlap(),
            None
        );
    }

    #[test]
    fn multiple_keeps_windows_in_start_order() {
        let day = DaySchedule::multiple(vec![interval(1265, 1440), interval(0, 415)]);

        assert_eq!(day.intervals(), &[interval(0, 415), interval(1265, 1440)]);
        assert_eq!(
            DaySchedule::Multiple(vec![interval(900, 960), interval(60, 120)]).sorted(),
            DaySchedule::Multiple(vec![interval(60, 120), interval(900, 960)])
        );
        assert_eq!(DaySchedule::Closed.sorted(), DaySchedule::Closed);
    }

    #[test]
    fn weekdays_closes_the_weekend() {
        let week = WeeklySchedule::weekdays(DaySchedule::Single(interval(420, 1260)));

        assert!(!week.day(DayOfWeek::Fri).is_closed());
        assert!(week.day(DayOfWeek::Sat).is_closed());
        assert!(week.day(DayOfWeek::Sun).is_closed());
    }

    #[test]
    fn with_day_replaces_only_that_day() {
        let week = WeeklySchedule::always_open().with_day(DayOfWeek::Sun, DaySchedule::Closed);

        assert!(week.day(DayOfWeek::Sun).is_closed());
        assert_eq!(week.iter().filter(|(_, day)| day.is_closed()).count(), 1);
    }
}
