//! A medical facility's list of current patients.
//!
//! Patients are identified by a [`UHealthId`]; the physician type is generic
//! so a facility can use plain license numbers or a richer record.

mod index;

pub use index::PatientIndex;

use std::{
    cmp::Ordering,
    fmt::{self, Display},
    fs,
    path::Path,
    str::FromStr,
};

use log::{debug, warn};
use thiserror::Error;

use crate::sorting::merge_sort_by;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FacilityError {
    #[error("Invalid UHealthID `{0}`: expected four uppercase letters, a dash and four digits")]
    InvalidId(String),

    #[error("Invalid date `{0}`: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("Could not read {path}: {message}")]
    Io { path: String, message: String },
}

/// A patient id of the form `AAAA-0000`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UHealthId(String);

impl FromStr for UHealthId {
    type Err = FacilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let valid = bytes.len() == 9
            && bytes[..4].iter().all(u8::is_ascii_uppercase)
            && bytes[4] == b'-'
            && bytes[5..].iter().all(u8::is_ascii_digit);

        if valid {
            Ok(UHealthId(s.to_string()))
        } else {
            Err(FacilityError::InvalidId(s.to_string()))
        }
    }
}

impl Display for UHealthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A calendar date, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisitDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl VisitDate {
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, FacilityError> {
        if (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month) {
            Ok(Self { year, month, day })
        } else {
            Err(FacilityError::InvalidDate(format!(
                "{:04}-{:02}-{:02}",
                year, month, day
            )))
        }
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl FromStr for VisitDate {
    type Err = FacilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FacilityError::InvalidDate(s.to_string());

        let mut parts = s.splitn(3, '-');
        let mut next = || parts.next().ok_or_else(invalid);
        let (year, month, day) = (next()?, next()?, next()?);
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(invalid());
        }

        VisitDate::new(
            year.parse().map_err(|_| invalid())?,
            month.parse().map_err(|_| invalid())?,
            day.parse().map_err(|_| invalid())?,
        )
        .map_err(|_| invalid())
    }
}

impl Display for VisitDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub first_name: String,
    pub last_name: String,
    pub id: UHealthId,
}

impl Patient {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, id: UHealthId) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            id,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.first_name, self.last_name, self.id)
    }
}

/// A patient together with their physician and the date of their last visit.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPatient<P> {
    pub patient: Patient,
    pub physician: P,
    pub last_visit: VisitDate,
}

impl<P> CurrentPatient<P> {
    pub fn new(patient: Patient, physician: P, last_visit: VisitDate) -> Self {
        Self {
            patient,
            physician,
            last_visit,
        }
    }

    pub fn id(&self) -> &UHealthId {
        &self.patient.id
    }
}

/// Parses a record of the form `first last id physician YYYY-MM-DD`.
impl<P: FromStr> FromStr for CurrentPatient<P> {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        let [first, last, id, physician, date] = fields[..] else {
            return Err(format!("expected 5 fields, found {}", fields.len()));
        };

        let id: UHealthId = id.parse().map_err(|e: FacilityError| e.to_string())?;
        let physician = physician
            .parse()
            .map_err(|_| format!("invalid physician `{}`", physician))?;
        let last_visit = date.parse().map_err(|e: FacilityError| e.to_string())?;

        Ok(CurrentPatient::new(
            Patient::new(first, last, id),
            physician,
            last_visit,
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Facility<P> {
    patients: Vec<CurrentPatient<P>>,
}

impl<P> Default for Facility<P> {
    fn default() -> Self {
        Self {
            patients: Vec::new(),
        }
    }
}

impl<P: PartialEq> Facility<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `patient` unless one with the same id is already present.
    pub fn add_patient(&mut self, patient: CurrentPatient<P>) -> bool {
        if self.lookup_by_id(patient.id()).is_some() {
            return false;
        }
        self.patients.push(patient);
        true
    }

    /// Adds one patient per non-blank line of `records`, returning how many
    /// were added. Malformed lines are logged and skipped.
    pub fn add_all_from_str(&mut self, records: &str) -> usize
    where
        P: FromStr,
    {
        let mut added = 0;
        for (number, line) in records.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<CurrentPatient<P>>() {
                Ok(patient) => {
                    if self.add_patient(patient) {
                        added += 1;
                    }
                }
                Err(reason) => {
                    let error = FacilityError::InvalidRecord {
                        line: number + 1,
                        reason,
                    };
                    warn!("skipping patient record: {}", error);
                }
            }
        }
        debug!("added {} patients, facility now has {}", added, self.len());
        added
    }

    pub fn add_all_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, FacilityError>
    where
        P: FromStr,
    {
        let path = path.as_ref();
        let records = fs::read_to_string(path).map_err(|e| FacilityError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(self.add_all_from_str(&records))
    }

    pub fn lookup_by_id(&self, id: &UHealthId) -> Option<&CurrentPatient<P>> {
        self.patients.iter().find(|p| p.id() == id)
    }

    pub fn lookup_by_physician(&self, physician: &P) -> Vec<&CurrentPatient<P>> {
        self.patients
            .iter()
            .filter(|p| p.physician == *physician)
            .collect()
    }

    /// Patients whose last visit was before `date`.
    pub fn inactive_patients(&self, date: &VisitDate) -> Vec<&CurrentPatient<P>> {
        self.patients
            .iter()
            .filter(|p| p.last_visit < *date)
            .collect()
    }

    /// Every distinct physician, in the order they first appear.
    pub fn physician_list(&self) -> Vec<&P> {
        let mut physicians: Vec<&P> = Vec::new();
        for patient in &self.patients {
            if !physicians.contains(&&patient.physician) {
                physicians.push(&patient.physician);
            }
        }
        physicians
    }

    /// Returns `false` if no patient has `id`.
    pub fn set_physician(&mut self, id: &UHealthId, physician: P) -> bool {
        self.lookup_mut(id)
            .map(|p| p.physician = physician)
            .is_some()
    }

    /// Returns `false` if no patient has `id`.
    pub fn set_last_visit(&mut self, id: &UHealthId, date: VisitDate) -> bool {
        self.lookup_mut(id).map(|p| p.last_visit = date).is_some()
    }

    fn lookup_mut(&mut self, id: &UHealthId) -> Option<&mut CurrentPatient<P>> {
        self.patients.iter_mut().find(|p| p.id() == id)
    }

    pub fn ordered_by_id(&self) -> Vec<&CurrentPatient<P>> {
        let mut ordered: Vec<_> = self.patients.iter().collect();
        merge_sort_by(&mut ordered, |a: &&CurrentPatient<P>, b: &&CurrentPatient<P>| {
            a.id().cmp(b.id())
        });
        ordered
    }

    /// Patients seen after `cutoff`, ordered by last name, then first name,
    /// then id.
    pub fn recent_patients(&self, cutoff: &VisitDate) -> Vec<&CurrentPatient<P>> {
        let mut recent: Vec<_> = self
            .patients
            .iter()
            .filter(|p| p.last_visit > *cutoff)
            .collect();
        merge_sort_by(&mut recent, by_name::<P>);
        recent
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurrentPatient<P>> + '_ {
        self.patients.iter()
    }
}

fn by_name<P>(a: &&CurrentPatient<P>, b: &&CurrentPatient<P>) -> Ordering {
    let (a, b) = (&a.patient, &b.patient);
    a.last_name
        .cmp(&b.last_name)
        .then_with(|| a.first_name.cmp(&b.first_name))
        .then_with(|| a.id.cmp(&b.id))
}
