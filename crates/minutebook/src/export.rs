//! Document rendering for meeting records.
//!
//! Renders one meeting to a Markdown document. Rendering only reads the
//! record; it never touches the store.

use std::fmt::Write as _;

use crate::meeting::Meeting;

/// Render a meeting as a Markdown document.
#[must_use]
pub fn render_markdown(meeting: &Meeting) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# {}", meeting.title);
    let _ = writeln!(doc);
    let _ = writeln!(doc, "**Date:** {}", meeting.date);
    let _ = writeln!(doc);

    if !meeting.participants.is_empty() {
        let _ = writeln!(doc, "## Participants");
        let _ = writeln!(doc);
        for participant in &meeting.participants {
            let _ = writeln!(doc, "- {}", participant.name);
        }
        let _ = writeln!(doc);
    }

    if !meeting.topics.is_empty() {
        let _ = writeln!(doc, "## Topics");
        let _ = writeln!(doc);
        for topic in &meeting.topics {
            let _ = writeln!(doc, "- {topic}");
        }
        let _ = writeln!(doc);
    }

    if !meeting.decisions.is_empty() {
        let _ = writeln!(doc, "## Decisions");
        let _ = writeln!(doc);
        for decision in &meeting.decisions {
            let _ = writeln!(doc, "- {decision}");
        }
        let _ = writeln!(doc);
    }

    if !meeting.tasks.is_empty() {
        let _ = writeln!(doc, "## Tasks");
        let _ = writeln!(doc);
        for task in &meeting.tasks {
            let mark = if task.completed { "x" } else { " " };
            if task.assignee.is_empty() {
                let _ = writeln!(doc, "- [{mark}] {}", task.description);
            } else {
                let _ = writeln!(doc, "- [{mark}] {} ({})", task.description, task.assignee);
            }
        }
        let _ = writeln!(doc);
    }

    if meeting.signature.is_some() {
        let _ = writeln!(doc, "*Signed.*");
        let _ = writeln!(doc);
    }

    doc
}

/// A file name for the exported document, derived from the title.
#[must_use]
pub fn suggested_file_name(meeting: &Meeting) -> String {
    let slug: String = meeting
        .title
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        format!("{}.md", meeting.id)
    } else {
        format!("{slug}.md")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::MeetingDraft;

    #[test]
    fn test_render_contains_all_sections() {
        let demo = Meeting::demo();
        let doc = render_markdown(&demo);

        assert!(doc.starts_with("# Prueba 1 - Ejemplo"));
        assert!(doc.contains("## Participants"));
        assert!(doc.contains("- Nombre 1"));
        assert!(doc.contains("## Topics"));
        assert!(doc.contains("- Ejemplo de tema 1"));
        assert!(doc.contains("## Decisions"));
        assert!(doc.contains("- Esto es una prueba de uso de decisiones"));
        assert!(doc.contains("## Tasks"));
    }

    #[test]
    fn test_render_task_checkboxes_reflect_completion() {
        let demo = Meeting::demo();
        let doc = render_markdown(&demo);

        assert!(doc.contains("- [ ] Ejemplo de tema 1 (Nombre 1)"));
        assert!(doc.contains("- [x] Ejemplo de tema 2 (Nombre 2)"));
    }

    #[test]
    fn test_render_skips_empty_sections() {
        let bare = Meeting::from_draft(MeetingDraft {
            title: "Bare".to_string(),
            ..MeetingDraft::default()
        });
        let doc = render_markdown(&bare);

        assert!(!doc.contains("## Participants"));
        assert!(!doc.contains("## Tasks"));
        assert!(doc.contains("**Date:**"));
    }

    #[test]
    fn test_render_mentions_signature_when_present() {
        let mut meeting = Meeting::demo();
        assert!(!render_markdown(&meeting).contains("Signed"));

        meeting.signature = Some("data:image/png;base64,AAAA".to_string());
        assert!(render_markdown(&meeting).contains("*Signed.*"));
    }

    #[test]
    fn test_suggested_file_name_slugifies_title() {
        let demo = Meeting::demo();
        assert_eq!(suggested_file_name(&demo), "prueba-1---ejemplo.md");
    }

    #[test]
    fn test_suggested_file_name_falls_back_to_id() {
        let mut meeting = Meeting::demo();
        meeting.title = "***".to_string();
        assert_eq!(suggested_file_name(&meeting), format!("{}.md", meeting.id));
    }
}
