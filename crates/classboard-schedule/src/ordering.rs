use std::cmp::Ordering;

use serde::Serialize;

use crate::classifier::{classify, ScheduleStatus};
use crate::time_of_day::TimeOfDay;
use crate::types::Schedule;

/// Display order at `at`: active slots first, then ascending start time.
pub fn compare_for_display(a: &Schedule, b: &Schedule, at: TimeOfDay) -> Ordering {
    let active = |s: &Schedule| classify(s, at) == ScheduleStatus::Active;
    active(b)
        .cmp(&active(a))
        .then_with(|| a.start_time().cmp(&b.start_time()))
}

/// Sort `items` for the main list. Stable, so slots sharing a start time keep
/// their input order across refreshes.
pub fn sort_for_display<T, F>(items: &mut [T], at: TimeOfDay, schedule_of: F)
where
    F: Fn(&T) -> &Schedule,
{
    items.sort_by(|a, b| compare_for_display(schedule_of(a), schedule_of(b), at));
}

/// Sort `items` for the past list: most recent start first. Also stable.
pub fn sort_past<T, F>(items: &mut [T], schedule_of: F)
where
    F: Fn(&T) -> &Schedule,
{
    items.sort_by(|a, b| schedule_of(b).start_time().cmp(&schedule_of(a).start_time()));
}

/// All of `schedules` in display order at `at`.
pub fn order(schedules: &[Schedule], at: TimeOfDay) -> Vec<&Schedule> {
    let mut out: Vec<&Schedule> = schedules.iter().collect();
    sort_for_display(&mut out, at, |s| *s);
    out
}

/// Schedules split into the two lists the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board<'a> {
    /// Active and upcoming, active first then by start time.
    pub current: Vec<&'a Schedule>,
    /// Finished, latest start first.
    pub past: Vec<&'a Schedule>,
}

pub fn board(schedules: &[Schedule], at: TimeOfDay) -> Board<'_> {
    let (mut past, mut current): (Vec<&Schedule>, Vec<&Schedule>) = schedules
        .iter()
        .partition(|s| classify(s, at) == ScheduleStatus::Past);
    sort_for_display(&mut current, at, |s| *s);
    sort_past(&mut past, |s| *s);
    Board { current, past }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Curriculum, Grade, Weekday};

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    fn slot(id: &str, start: &str, end: &str) -> Schedule {
        Schedule::new(
            id.into(),
            Weekday::Tuesday,
            t(start),
            t(end),
            Grade::Grade5,
            Curriculum::Standard,
        )
        .unwrap()
    }

    fn ids(list: &[&Schedule]) -> Vec<String> {
        list.iter().map(|s| s.id().to_string()).collect()
    }

    #[test]
    fn active_first_then_by_start() {
        let schedules = vec![
            slot("nine", "09:00", "09:50"),
            slot("eleven", "11:00", "11:50"),
            slot("ten", "10:00", "10:50"),
        ];
        let b = board(&schedules, t("10:30"));
        assert_eq!(ids(&b.current), vec!["ten", "eleven"]);
        assert_eq!(ids(&b.past), vec!["nine"]);
    }

    #[test]
    fn overlapping_active_slots_order_by_start() {
        let schedules = vec![
            slot("upcoming", "12:00", "12:30"),
            slot("late-active", "10:15", "13:00"),
            slot("early-active", "10:00", "11:00"),
        ];
        let ordered = order(&schedules, t("10:30"));
        assert_eq!(ids(&ordered), vec!["early-active", "late-active", "upcoming"]);
    }

    #[test]
    fn past_list_is_latest_first() {
        let schedules = vec![
            slot("a", "08:00", "08:45"),
            slot("b", "09:00", "09:45"),
            slot("c", "07:00", "07:45"),
        ];
        let b = board(&schedules, t("12:00"));
        assert!(b.current.is_empty());
        assert_eq!(ids(&b.past), vec!["b", "a", "c"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let schedules = vec![
            slot("first", "13:00", "13:45"),
            slot("second", "13:00", "14:00"),
            slot("third", "13:00", "13:30"),
        ];
        let ordered = order(&schedules, t("08:00"));
        assert_eq!(ids(&ordered), vec!["first", "second", "third"]);

        let b = board(&schedules, t("15:00"));
        assert_eq!(ids(&b.past), vec!["first", "second", "third"]);
    }

    #[test]
    fn past_slots_sort_after_active_in_full_order() {
        let schedules = vec![slot("done", "08:00", "08:30"), slot("now", "09:00", "10:00")];
        let ordered = order(&schedules, t("09:10"));
        assert_eq!(ids(&ordered), vec!["now", "done"]);
    }
}
