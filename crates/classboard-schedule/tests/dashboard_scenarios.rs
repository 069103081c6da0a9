// End-to-end checks of the dashboard rules through the public API only.

use chrono::NaiveDate;
use classboard_schedule::cancellation::{is_canceled, with_cancellation};
use classboard_schedule::classifier::{classify, progress_percent};
use classboard_schedule::dashboard::{build_view, cancel_occurrence};
use classboard_schedule::grouping::group_by_name;
use classboard_schedule::ordering::board;
use classboard_schedule::{
    Curriculum, DateTag, Grade, MemoryStore, ReferenceInstant, Schedule, ScheduleError,
    ScheduleStatus, ScheduleStore, Snapshot, Teacher, TimeOfDay, Weekday,
};

fn t(s: &str) -> TimeOfDay {
    TimeOfDay::parse(s).unwrap()
}

fn slot(id: &str, start: &str, end: &str) -> Schedule {
    Schedule::new(
        id.into(),
        Weekday::Wednesday,
        t(start),
        t(end),
        Grade::Grade6,
        Curriculum::Standard,
    )
    .unwrap()
}

#[test]
fn time_parsing_scenarios() {
    assert!(matches!(
        TimeOfDay::parse("9:5"),
        Err(ScheduleError::InvalidFormat { .. })
    ));
    assert!(matches!(
        TimeOfDay::parse("25:00"),
        Err(ScheduleError::OutOfRange { .. })
    ));
    assert_eq!(TimeOfDay::parse("09:05").unwrap().format_12h(), "9:05 AM");
}

#[test]
fn afternoon_slot_midway() {
    let s = slot("bio", "14:00", "15:30");
    assert_eq!(classify(&s, t("14:45")), ScheduleStatus::Active);
    assert_eq!(progress_percent(&s, t("14:45")).unwrap(), 50);
}

#[test]
fn double_cancel_same_day() {
    let tag = DateTag::parse("6/12").unwrap();
    let s = with_cancellation(&with_cancellation(&slot("x", "9:00", "10:00"), tag), tag);
    assert!(is_canceled(&s, tag));
    let count = s.canceled_dates().iter().filter(|d| **d == tag).count();
    assert_eq!(count, 1);
}

#[test]
fn morning_board_ordering() {
    let schedules = vec![
        slot("0900", "09:00", "09:50"),
        slot("1000", "10:00", "10:50"),
        slot("1100", "11:00", "11:50"),
    ];
    let b = board(&schedules, t("10:30"));
    let current: Vec<&str> = b.current.iter().map(|s| s.id().as_str()).collect();
    let past: Vec<&str> = b.past.iter().map(|s| s.id().as_str()).collect();
    assert_eq!(current, vec!["1000", "1100"]);
    assert_eq!(past, vec!["0900"]);
}

#[test]
fn teacher_picker_is_stable() {
    let rows = vec![
        Teacher { id: "b".into(), name: "Ms. Park".into(), subject: "Art".into() },
        Teacher { id: "a".into(), name: "Mr. Diaz".into(), subject: "History".into() },
        Teacher { id: "c".into(), name: "Ms. Park".into(), subject: "Design".into() },
        Teacher { id: "d".into(), name: "Ms. Park".into(), subject: "Art".into() },
    ];
    let mut shuffled = rows.clone();
    shuffled.swap(0, 3);
    shuffled.swap(1, 2);

    let a = group_by_name(&rows);
    assert_eq!(a, group_by_name(&shuffled));
    assert_eq!(a[1].name, "Ms. Park");
    assert_eq!(a[1].subjects, vec!["Art", "Design"]);
    assert_eq!(a[1].representative_id.as_str(), "b");
}

#[test]
fn snapshot_json_to_dashboard() {
    let json = r#"{
        "schedules": [
            {"id": "s-1", "teacher_id": "t-1", "day": "Wednesday",
             "start_time": "8:00", "end_time": "8:45", "grade": "Grade 6",
             "curriculum": "honors", "subject": "", "date_tag": "6/1",
             "repeats": true, "canceled_dates": []},
            {"id": "s-2", "teacher_id": "t-1", "day": "Wednesday",
             "start_time": "9:00", "end_time": "9:45", "grade": "6",
             "curriculum": "honors", "subject": "Geometry"},
            {"id": "s-3", "day": "Wednesday",
             "start_time": "9:00", "end_time": "8:00", "grade": "6",
             "curriculum": "honors"}
        ],
        "teachers": [{"id": "t-1", "name": "Mr. Diaz", "subject": "Algebra"}]
    }"#;
    let store = MemoryStore::new(Snapshot::from_json_str(json).unwrap());
    let at = ReferenceInstant::new(
        NaiveDate::from_ymd_opt(2024, 6, 12)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    );

    cancel_occurrence(&store, &"s-2".into(), at.date_tag()).unwrap();
    let view = build_view(&store.snapshot().unwrap(), at);

    assert_eq!(view.current.len(), 1);
    assert_eq!(view.current[0].subject, "Geometry");
    assert_eq!(view.current[0].progress, 0);
    assert!(view.current[0].canceled);

    assert_eq!(view.past.len(), 1);
    assert_eq!(view.past[0].subject, "Algebra");
    assert_eq!(view.past[0].end, "8:45 AM");

    assert_eq!(view.invalid.len(), 1);
    assert_eq!(view.invalid[0].id.as_str(), "s-3");
}
