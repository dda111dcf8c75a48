use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{ComplianceStatus, TimetableEvent};
use crate::workflows::arbitration::domain::ResponsibleParty;

/// Error enumeration for procedural-order spreadsheet imports.
#[derive(Debug, thiserror::Error)]
pub enum TimetableImportError {
    #[error("failed to read timetable export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid timetable CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Imports a procedural-order timetable from a spreadsheet export with
/// columns `Milestone`, `Deadline`, `Responsible Party`, and `Status`.
pub struct TimetableImporter;

impl TimetableImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<TimetableEvent>, TimetableImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TimetableEvent>, TimetableImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut timeline = Vec::new();
        for record in csv_reader.deserialize::<TimetableRow>() {
            let row = record?;
            let responsible = row.responsible();
            let status = row.status();
            timeline.push(TimetableEvent {
                id: format!("T-{}", timeline.len() + 1),
                milestone: row.milestone,
                history: vec![format!("Imported with deadline {}", row.deadline)],
                deadline: row.deadline,
                current_deadline: None,
                responsible,
                status,
            });
        }

        Ok(timeline)
    }
}

#[derive(Debug, Deserialize)]
struct TimetableRow {
    #[serde(rename = "Milestone")]
    milestone: String,
    #[serde(rename = "Deadline")]
    deadline: String,
    #[serde(
        rename = "Responsible Party",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    responsible: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
}

impl TimetableRow {
    fn responsible(&self) -> ResponsibleParty {
        match self
            .responsible
            .as_deref()
            .map(|value| value.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("claimant") => ResponsibleParty::Claimant,
            Some("respondent") => ResponsibleParty::Respondent,
            Some("both") | Some("all") | Some("all parties") => ResponsibleParty::All,
            _ => ResponsibleParty::Tribunal,
        }
    }

    fn status(&self) -> ComplianceStatus {
        match self
            .status
            .as_deref()
            .map(|value| value.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("commenced and pending") | Some("commenced") => ComplianceStatus::CommencedPending,
            Some("awaiting compliance") => ComplianceStatus::AwaitingCompliance,
            Some("completed") => ComplianceStatus::Completed,
            _ => ComplianceStatus::Upcoming,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn import_maps_columns_to_events() {
        let csv = "Milestone,Deadline,Responsible Party,Status\n\
Statement of Claim,2026-03-01,Claimant,Awaiting Compliance\n\
Document Production,2026-04-15,Both,Upcoming\n\
Procedural Conference,2026-05-01,Tribunal,\n";

        let timeline = TimetableImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[0].id, "T-1");
        assert_eq!(timeline[0].milestone, "Statement of Claim");
        assert_eq!(timeline[0].responsible, ResponsibleParty::Claimant);
        assert_eq!(timeline[0].status, ComplianceStatus::AwaitingCompliance);
        assert_eq!(timeline[1].responsible, ResponsibleParty::All);
        assert_eq!(timeline[1].status, ComplianceStatus::Upcoming);
        assert_eq!(timeline[2].responsible, ResponsibleParty::Tribunal);
    }

    #[test]
    fn import_rejects_malformed_csv() {
        let csv = "Milestone,Deadline\n\"unterminated,2026-03-01\n";
        let error =
            TimetableImporter::from_reader(Cursor::new(csv)).expect_err("expected csv error");
        assert!(matches!(error, TimetableImportError::Csv(_)));
    }

    #[test]
    fn import_from_path_propagates_io_errors() {
        let error = TimetableImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        assert!(matches!(error, TimetableImportError::Io(_)));
    }
}
