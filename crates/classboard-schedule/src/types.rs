use std::fmt;
use std::str::FromStr;

use classboard_core::{ScheduleId, TeacherId};
use serde::{Deserialize, Serialize};

use crate::date_tag::DateTag;
use crate::error::{Result, ScheduleError};
use crate::time_of_day::TimeOfDay;

/// Day of the week a recurring slot meets on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    /// Case-insensitive full weekday name.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ScheduleError::UnknownDay(s.to_string()))
    }
}

/// School grade, kindergarten through twelfth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Grade {
    Kindergarten,
    Grade1,
    Grade2,
    Grade3,
    Grade4,
    Grade5,
    Grade6,
    Grade7,
    Grade8,
    Grade9,
    Grade10,
    Grade11,
    Grade12,
}

impl Grade {
    const NUMBERED: [Grade; 12] = [
        Grade::Grade1,
        Grade::Grade2,
        Grade::Grade3,
        Grade::Grade4,
        Grade::Grade5,
        Grade::Grade6,
        Grade::Grade7,
        Grade::Grade8,
        Grade::Grade9,
        Grade::Grade10,
        Grade::Grade11,
        Grade::Grade12,
    ];

    /// 0 for kindergarten, otherwise the grade number.
    pub fn level(&self) -> u8 {
        match self {
            Grade::Kindergarten => 0,
            other => Grade::NUMBERED
                .iter()
                .position(|g| g == other)
                .map(|i| i as u8 + 1)
                .unwrap_or(0),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Kindergarten => f.write_str("K"),
            other => write!(f, "{}", other.level()),
        }
    }
}

impl FromStr for Grade {
    type Err = ScheduleError;

    /// Accepts `K`, `KG`, `Kindergarten`, `7`, or `Grade 7`.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if ["k", "kg", "kindergarten"]
            .iter()
            .any(|k| text.eq_ignore_ascii_case(k))
        {
            return Ok(Grade::Kindergarten);
        }
        let number = text
            .get(..5)
            .filter(|p| p.eq_ignore_ascii_case("grade"))
            .map(|_| text[5..].trim())
            .unwrap_or(text);
        number
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Grade::NUMBERED.get(i).copied())
            .ok_or_else(|| ScheduleError::UnknownGrade(s.to_string()))
    }
}

impl TryFrom<String> for Grade {
    type Error = ScheduleError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Grade> for String {
    fn from(g: Grade) -> Self {
        g.to_string()
    }
}

/// Program track a class belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Curriculum {
    #[default]
    Standard,
    Honors,
    AdvancedPlacement,
    InternationalBaccalaureate,
}

impl fmt::Display for Curriculum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Curriculum::Standard => "standard",
            Curriculum::Honors => "honors",
            Curriculum::AdvancedPlacement => "ap",
            Curriculum::InternationalBaccalaureate => "ib",
        };
        f.write_str(s)
    }
}

impl FromStr for Curriculum {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Curriculum::Standard),
            "honors" => Ok(Curriculum::Honors),
            "ap" | "advanced placement" => Ok(Curriculum::AdvancedPlacement),
            "ib" | "international baccalaureate" => Ok(Curriculum::InternationalBaccalaureate),
            _ => Err(ScheduleError::UnknownCurriculum(s.to_string())),
        }
    }
}

impl TryFrom<String> for Curriculum {
    type Error = ScheduleError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Curriculum> for String {
    fn from(c: Curriculum) -> Self {
        c.to_string()
    }
}

/// One (name, subject) teacher row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub subject: String,
}

/// Teacher identity collapsed across all rows sharing a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedTeacher {
    pub name: String,
    /// Lowest row id among this name's rows, so the choice does not
    /// depend on the order the store returns them in.
    pub representative_id: TeacherId,
    /// Distinct subjects, sorted ascending.
    pub subjects: Vec<String>,
}

/// A schedule row exactly as the store hands it over.
///
/// Nothing here is validated; convert with `Schedule::try_from` and treat a
/// failure as one displayably invalid record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub id: ScheduleId,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub grade: String,
    pub curriculum: String,
    #[serde(default)]
    pub subject: String,
    /// Creation stamp (`M/d`), empty when unknown.
    #[serde(default)]
    pub date_tag: String,
    #[serde(default = "default_repeats")]
    pub repeats: bool,
    #[serde(default)]
    pub canceled_dates: Vec<String>,
    /// Joined teacher row; filled in by the store on read, never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<Teacher>,
}

fn default_repeats() -> bool {
    true
}

/// A validated recurring class slot.
///
/// Values are immutable once built: edits and cancellations go through the
/// `with_*` methods, which return a new schedule for the store to persist.
/// Serialized in record form so deserializing re-checks every invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleRecord", into = "ScheduleRecord")]
pub struct Schedule {
    id: ScheduleId,
    teacher_id: Option<TeacherId>,
    day: Weekday,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    grade: Grade,
    curriculum: Curriculum,
    subject: String,
    date_tag: Option<DateTag>,
    repeats: bool,
    canceled_dates: Vec<DateTag>,
}

impl Schedule {
    /// Build a repeating slot with no teacher, subject, or cancellations.
    ///
    /// Fails with `InvalidRange` unless `start_time < end_time`.
    pub fn new(
        id: ScheduleId,
        day: Weekday,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        grade: Grade,
        curriculum: Curriculum,
    ) -> Result<Self> {
        check_range(start_time, end_time)?;
        Ok(Self {
            id,
            teacher_id: None,
            day,
            start_time,
            end_time,
            grade,
            curriculum,
            subject: String::new(),
            date_tag: None,
            repeats: true,
            canceled_dates: Vec::new(),
        })
    }

    pub fn id(&self) -> &ScheduleId {
        &self.id
    }

    pub fn teacher_id(&self) -> Option<&TeacherId> {
        self.teacher_id.as_ref()
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn start_time(&self) -> TimeOfDay {
        self.start_time
    }

    pub fn end_time(&self) -> TimeOfDay {
        self.end_time
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn curriculum(&self) -> Curriculum {
        self.curriculum
    }

    /// Raw subject; may be empty. See `classifier::effective_subject`.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn date_tag(&self) -> Option<DateTag> {
        self.date_tag
    }

    pub fn repeats(&self) -> bool {
        self.repeats
    }

    /// Canceled days in the order they were added, without duplicates.
    pub fn canceled_dates(&self) -> &[DateTag] {
        &self.canceled_dates
    }

    pub fn with_teacher(mut self, teacher_id: Option<TeacherId>) -> Self {
        self.teacher_id = teacher_id;
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_date_tag(mut self, tag: Option<DateTag>) -> Self {
        self.date_tag = tag;
        self
    }

    pub fn with_repeats(mut self, repeats: bool) -> Self {
        self.repeats = repeats;
        self
    }

    pub fn with_day(mut self, day: Weekday) -> Self {
        self.day = day;
        self
    }

    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = grade;
        self
    }

    pub fn with_curriculum(mut self, curriculum: Curriculum) -> Self {
        self.curriculum = curriculum;
        self
    }

    pub fn with_times(mut self, start_time: TimeOfDay, end_time: TimeOfDay) -> Result<Self> {
        check_range(start_time, end_time)?;
        self.start_time = start_time;
        self.end_time = end_time;
        Ok(self)
    }

    pub(crate) fn with_canceled_dates(mut self, dates: Vec<DateTag>) -> Self {
        self.canceled_dates = dates;
        self
    }

    /// Store form of this schedule; the joined teacher is left empty.
    pub fn to_record(&self) -> ScheduleRecord {
        ScheduleRecord {
            id: self.id.clone(),
            teacher_id: self.teacher_id.clone(),
            day: self.day.to_string(),
            start_time: self.start_time.to_string(),
            end_time: self.end_time.to_string(),
            grade: self.grade.to_string(),
            curriculum: self.curriculum.to_string(),
            subject: self.subject.clone(),
            date_tag: self.date_tag.map(|t| t.to_string()).unwrap_or_default(),
            repeats: self.repeats,
            canceled_dates: self.canceled_dates.iter().map(|t| t.to_string()).collect(),
            teacher: None,
        }
    }
}

fn check_range(start: TimeOfDay, end: TimeOfDay) -> Result<()> {
    if start < end {
        Ok(())
    } else {
        Err(ScheduleError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        })
    }
}

impl TryFrom<&ScheduleRecord> for Schedule {
    type Error = ScheduleError;

    fn try_from(record: &ScheduleRecord) -> Result<Self> {
        let start = TimeOfDay::parse(record.start_time.trim())?;
        let end = TimeOfDay::parse(record.end_time.trim())?;
        let date_tag = match record.date_tag.trim() {
            "" => None,
            tag => Some(DateTag::parse(tag)?),
        };

        // Older rows may already hold repeated tags; keep the first of each.
        let mut canceled: Vec<DateTag> = Vec::with_capacity(record.canceled_dates.len());
        for raw in &record.canceled_dates {
            let tag = DateTag::parse(raw.trim())?;
            if !canceled.contains(&tag) {
                canceled.push(tag);
            }
        }

        Ok(Schedule::new(
            record.id.clone(),
            record.day.parse()?,
            start,
            end,
            record.grade.parse()?,
            record.curriculum.parse()?,
        )?
        .with_teacher(record.teacher_id.clone())
        .with_subject(record.subject.clone())
        .with_date_tag(date_tag)
        .with_repeats(record.repeats)
        .with_canceled_dates(canceled))
    }
}

impl TryFrom<ScheduleRecord> for Schedule {
    type Error = ScheduleError;

    fn try_from(record: ScheduleRecord) -> Result<Self> {
        Schedule::try_from(&record)
    }
}

impl From<Schedule> for ScheduleRecord {
    fn from(schedule: Schedule) -> Self {
        schedule.to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ScheduleRecord {
        ScheduleRecord {
            id: ScheduleId::from("s-1"),
            teacher_id: Some(TeacherId::from("t-1")),
            day: "wednesday".into(),
            start_time: "9:00".into(),
            end_time: "10:15".into(),
            grade: "Grade 7".into(),
            curriculum: "IB".into(),
            subject: "Algebra".into(),
            date_tag: "6/12".into(),
            repeats: true,
            canceled_dates: vec!["6/12".into(), "06/12".into(), "6/19".into()],
            teacher: None,
        }
    }

    #[test]
    fn weekday_parse_is_case_insensitive() {
        assert_eq!("friday".parse::<Weekday>().unwrap(), Weekday::Friday);
        assert_eq!("SUNDAY".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert!("Funday".parse::<Weekday>().is_err());
        assert_eq!(Weekday::from(chrono::Weekday::Thu), Weekday::Thursday);
    }

    #[test]
    fn grade_accepts_common_spellings() {
        for (input, expected) in [
            ("K", Grade::Kindergarten),
            ("kindergarten", Grade::Kindergarten),
            ("1", Grade::Grade1),
            ("Grade 12", Grade::Grade12),
            ("grade7", Grade::Grade7),
        ] {
            assert_eq!(input.parse::<Grade>().unwrap(), expected, "input: {input}");
        }
        for bad in ["0", "13", "Grade", "senior"] {
            assert!(bad.parse::<Grade>().is_err(), "input: {bad}");
        }
        assert_eq!(Grade::Grade10.to_string(), "10");
        assert_eq!(Grade::Kindergarten.to_string(), "K");
    }

    #[test]
    fn curriculum_round_trips_through_display() {
        for c in [
            Curriculum::Standard,
            Curriculum::Honors,
            Curriculum::AdvancedPlacement,
            Curriculum::InternationalBaccalaureate,
        ] {
            assert_eq!(c.to_string().parse::<Curriculum>().unwrap(), c);
        }
    }

    #[test]
    fn record_converts_and_dedupes_cancellations() {
        let s = Schedule::try_from(&record()).unwrap();
        assert_eq!(s.day(), Weekday::Wednesday);
        assert_eq!(s.grade(), Grade::Grade7);
        assert_eq!(s.curriculum(), Curriculum::InternationalBaccalaureate);
        let tags: Vec<String> = s.canceled_dates().iter().map(|t| t.to_string()).collect();
        assert_eq!(tags, vec!["6/12", "6/19"]);
    }

    #[test]
    fn record_with_inverted_times_is_rejected() {
        let mut r = record();
        r.start_time = "11:00".into();
        r.end_time = "10:00".into();
        assert!(matches!(
            Schedule::try_from(&r),
            Err(ScheduleError::InvalidRange { .. })
        ));

        r.end_time = "11:00".into();
        assert!(Schedule::try_from(&r).is_err());
    }

    #[test]
    fn record_with_bad_time_reports_format_error() {
        let mut r = record();
        r.start_time = "9:5".into();
        assert_eq!(
            Schedule::try_from(&r),
            Err(ScheduleError::InvalidFormat { input: "9:5".into() })
        );
    }

    #[test]
    fn to_record_is_accepted_back() {
        let s = Schedule::try_from(&record()).unwrap();
        let again = Schedule::try_from(&s.to_record()).unwrap();
        assert_eq!(s, again);
    }

    #[test]
    fn with_times_keeps_range_invariant() {
        let s = Schedule::try_from(&record()).unwrap();
        let nine = TimeOfDay::parse("9:00").unwrap();
        assert!(s.clone().with_times(nine, nine).is_err());
        let later = s
            .with_times(nine, TimeOfDay::parse("9:45").unwrap())
            .unwrap();
        assert_eq!(later.end_time().to_string(), "09:45");
    }
}
