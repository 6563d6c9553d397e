use chrono::{Duration, NaiveTime, Timelike, Weekday};

use crate::req::{weekday_label, CreateInterval, Interval, WEEK};

/// Intervals of one week, one bucket per day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedIntervals {
    days: [Vec<Interval>; 7],
}

impl GroupedIntervals {
    pub fn get(&self, day: Weekday) -> &[Interval] {
        &self.days[day.num_days_from_monday() as usize]
    }

    /// Monday to Sunday, empty days included.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Interval])> + '_ {
        WEEK.iter().map(move |day| (*day, self.get(*day)))
    }

    pub fn labelled(&self) -> impl Iterator<Item = (&'static str, &[Interval])> + '_ {
        self.iter().map(|(day, intervals)| (weekday_label(day), intervals))
    }

    pub fn len(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partitions intervals by weekday, input order is kept inside each day.
pub fn group_intervals(intervals: &[Interval]) -> GroupedIntervals {
    let mut grouped = GroupedIntervals::default();
    for interval in intervals {
        grouped.days[interval.day_of_week.num_days_from_monday() as usize].push(interval.clone());
    }
    grouped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalVerdict {
    PickADay,
    InvalidTime,
    Ok,
}

impl IntervalVerdict {
    pub fn message(&self) -> &'static str {
        match self {
            Self::PickADay => "Pick a day",
            Self::InvalidTime => "Invalid time",
            Self::Ok => "OK",
        }
    }

    pub fn is_ok(&self) -> bool {
        *self == Self::Ok
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayPicks([bool; 7]);

impl DayPicks {
    pub fn is_picked(&self, day: Weekday) -> bool {
        self.0[day.num_days_from_monday() as usize]
    }

    pub fn set(&mut self, day: Weekday, picked: bool) {
        self.0[day.num_days_from_monday() as usize] = picked;
    }

    pub fn toggle(&mut self, day: Weekday) {
        let picked = self.is_picked(day);
        self.set(day, !picked);
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|p| *p)
    }

    /// Picked days in week order.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.iter().copied().filter(move |day| self.is_picked(*day))
    }
}

/// The day check comes first: with nothing picked the times are not looked at.
pub fn validate_interval(start: NaiveTime, end: NaiveTime, picks: &DayPicks) -> IntervalVerdict {
    if !picks.any() {
        return IntervalVerdict::PickADay;
    }
    if end - start <= Duration::zero() {
        return IntervalVerdict::InvalidTime;
    }
    IntervalVerdict::Ok
}

/// State of the "new interval" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub picks: DayPicks,
}

impl NewInterval {
    pub const DEFAULT_LENGTH_MINUTES: i64 = 5;

    /// Starts at `now` truncated to the minute and lasts five minutes.
    pub fn starting_at(now: NaiveTime) -> Self {
        let start = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now);
        let (end, _) =
            start.overflowing_add_signed(Duration::minutes(Self::DEFAULT_LENGTH_MINUTES));
        Self {
            start,
            end,
            picks: DayPicks::default(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn verdict(&self) -> IntervalVerdict {
        validate_interval(self.start, self.end, &self.picks)
    }

    /// One request body per picked day, nothing unless the form is valid.
    pub fn expand(&self) -> Vec<CreateInterval> {
        if !self.verdict().is_ok() {
            return vec![];
        }
        self.picks
            .days()
            .map(|day_of_week| CreateInterval {
                start_time: self.start,
                end_time: self.end,
                day_of_week,
            })
            .collect()
    }
}

/// Swaps in the updated interval. Returns false when the id is unknown.
pub fn replace_interval(intervals: &mut [Interval], updated: Interval) -> bool {
    match intervals.iter_mut().find(|i| i.id == updated.id) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub fn remove_interval(intervals: &mut Vec<Interval>, id: i32) {
    intervals.retain(|i| i.id != id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn interval(id: i32, start: NaiveTime, end: NaiveTime, day: Weekday) -> Interval {
        Interval {
            id,
            start_time: start,
            end_time: end,
            day_of_week: day,
        }
    }

    #[test]
    fn monday_intervals_keep_their_order() {
        let first = interval(1, hms(8, 0, 0), hms(8, 5, 0), Weekday::Mon);
        let second = interval(2, hms(9, 0, 0), hms(9, 10, 0), Weekday::Mon);

        let grouped = group_intervals(&[first.clone(), second.clone()]);

        assert_eq!(grouped.get(Weekday::Mon), &[first, second]);
        for (day, intervals) in grouped.iter() {
            if day != Weekday::Mon {
                assert!(intervals.is_empty(), "{day} should be empty");
            }
        }
    }

    #[test]
    fn grouping_is_a_partition() {
        let intervals: Vec<_> = (0..20)
            .map(|id| {
                let day = WEEK[(id * 3 % 7) as usize];
                interval(id, hms(6, 0, 0), hms(6, 30, 0), day)
            })
            .collect();

        let grouped = group_intervals(&intervals);
        assert_eq!(grouped.len(), intervals.len());

        let mut seen: Vec<i32> = grouped
            .iter()
            .flat_map(|(day, bucket)| {
                assert!(bucket.iter().all(|i| i.day_of_week == day));
                bucket.iter().map(|i| i.id)
            })
            .collect();
        seen.sort();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn empty_schedule_has_seven_empty_days() {
        let grouped = group_intervals(&[]);
        assert!(grouped.is_empty());
        let labels: Vec<_> = grouped.labelled().map(|(label, _)| label).collect();
        assert_eq!(labels.len(), 7);
        assert_eq!(labels[0], "Monday");
        assert_eq!(labels[6], "Sunday");
    }

    #[test]
    fn day_check_precedes_time_check() {
        let verdict = validate_interval(hms(10, 0, 0), hms(9, 0, 0), &DayPicks::default());
        assert_eq!(verdict, IntervalVerdict::PickADay);
        assert_eq!(verdict.message(), "Pick a day");
    }

    #[test]
    fn zero_or_negative_duration_is_invalid() {
        let mut picks = DayPicks::default();
        picks.set(Weekday::Wed, true);

        assert_eq!(
            validate_interval(hms(9, 0, 0), hms(9, 0, 0), &picks),
            IntervalVerdict::InvalidTime
        );
        assert_eq!(
            validate_interval(hms(10, 0, 0), hms(9, 0, 0), &picks).message(),
            "Invalid time"
        );
        assert_eq!(
            validate_interval(hms(9, 0, 0), hms(9, 0, 1), &picks).message(),
            "OK"
        );
    }

    #[test]
    fn expand_emits_one_request_per_picked_day() {
        let mut form = NewInterval::starting_at(hms(7, 42, 13));
        assert_eq!(form.start, hms(7, 42, 0));
        assert_eq!(form.end, hms(7, 47, 0));
        assert!(form.expand().is_empty());

        form.picks.toggle(Weekday::Fri);
        form.picks.toggle(Weekday::Tue);
        let created = form.expand();

        let days: Vec<_> = created.iter().map(|c| c.day_of_week).collect();
        assert_eq!(days, vec![Weekday::Tue, Weekday::Fri]);
        assert!(created.iter().all(|c| c.start_time == form.start && c.end_time == form.end));
    }

    #[test]
    fn default_interval_near_midnight_is_invalid() {
        let mut form = NewInterval::starting_at(hms(23, 58, 0));
        form.picks.set(Weekday::Sun, true);
        assert_eq!(form.end, hms(0, 3, 0));
        assert_eq!(form.verdict(), IntervalVerdict::InvalidTime);
        assert!(form.expand().is_empty());
    }

    #[test]
    fn replace_and_remove_by_id() {
        let mut intervals = vec![
            interval(1, hms(8, 0, 0), hms(8, 5, 0), Weekday::Mon),
            interval(2, hms(9, 0, 0), hms(9, 10, 0), Weekday::Tue),
        ];

        let updated = interval(2, hms(10, 0, 0), hms(10, 30, 0), Weekday::Sat);
        assert!(replace_interval(&mut intervals, updated.clone()));
        assert_eq!(intervals[1], updated);

        let unknown = interval(9, hms(10, 0, 0), hms(10, 30, 0), Weekday::Sat);
        assert!(!replace_interval(&mut intervals, unknown));

        remove_interval(&mut intervals, 1);
        assert_eq!(intervals, vec![updated]);
    }
}
