//! Read-only filtering over meeting records.
//!
//! Search is a case-insensitive substring scan across a record's title,
//! participant names, topics, decisions, and task fields. Pure containment:
//! no tokenization, no ranking.

use crate::meeting::Meeting;

/// Filter records by a search term.
///
/// A term that trims to empty returns the input unchanged. Otherwise the
/// returned subsequence preserves the input's relative order.
#[must_use]
pub fn search(term: &str, records: &[Meeting]) -> Vec<Meeting> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|m| matches(m, &needle))
        .cloned()
        .collect()
}

/// Whether any searched field of the record contains the lowercased needle.
fn matches(meeting: &Meeting, needle: &str) -> bool {
    contains(&meeting.title, needle)
        || meeting.participants.iter().any(|p| contains(&p.name, needle))
        || meeting.topics.iter().any(|t| contains(t, needle))
        || meeting.decisions.iter().any(|d| contains(d, needle))
        || meeting
            .tasks
            .iter()
            .any(|t| contains(&t.description, needle) || contains(&t.assignee, needle))
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::{MeetingDraft, Task};

    fn fixture() -> Vec<Meeting> {
        let demo = Meeting::demo();
        let planning = Meeting::from_draft(MeetingDraft {
            title: "Planning board".to_string(),
            topics: vec!["Budget review".to_string()],
            decisions: vec!["Hire two engineers".to_string()],
            tasks: vec![Task::new("Draft offer letters", "Sam")],
            ..MeetingDraft::default()
        });
        vec![demo, planning]
    }

    #[test]
    fn test_empty_term_returns_all_in_order() {
        let records = fixture();
        let found = search("   ", &records);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, records[0].id);
        assert_eq!(found[1].id, records[1].id);
    }

    #[test]
    fn test_match_in_title() {
        let records = fixture();
        let found = search("planning", &records);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Planning board");
    }

    #[test]
    fn test_match_in_participant_name() {
        let records = fixture();
        let found = search("nombre 2", &records);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Prueba 1 - Ejemplo");
    }

    #[test]
    fn test_match_in_topic() {
        let records = fixture();
        let found = search("budget", &records);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Planning board");
    }

    #[test]
    fn test_match_in_decision() {
        let records = fixture();
        let found = search("hire two", &records);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_match_in_task_description() {
        let records = fixture();
        let found = search("offer letters", &records);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_match_in_task_assignee() {
        let records = fixture();
        let found = search("sam", &records);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Planning board");
    }

    #[test]
    fn test_case_insensitive() {
        let records = fixture();
        assert_eq!(search("NOMBRE 2", &records).len(), 1);
        assert_eq!(search("NoMbRe 2", &records).len(), 1);
    }

    #[test]
    fn test_no_match() {
        let records = fixture();
        assert!(search("quarterly offsite", &records).is_empty());
    }

    #[test]
    fn test_term_matching_both_keeps_order() {
        let records = fixture();
        // "ejemplo" is in the demo title; "e" alone hits both records.
        let found = search("e", &records);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, records[0].id);
        assert_eq!(found[1].id, records[1].id);
    }
}
