//! CSV rendering of the participant list handed to the administrator.

use crate::dao::models::ParticipantEntity;

/// First line of every export.
pub const CSV_HEADER: &str = "id,email";
/// File name of the exported document.
pub const CSV_FILE_NAME: &str = "participants.csv";
/// Content type of the exported document.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Render participants as RFC 4180 CSV with a header row and CRLF line endings.
pub fn render_participants_csv(participants: &[ParticipantEntity]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 2 + participants.len() * 32);
    out.push_str(CSV_HEADER);
    out.push_str("\r\n");
    for participant in participants {
        out.push_str(&participant.id.to_string());
        out.push(',');
        push_field(&mut out, &participant.email);
        out.push_str("\r\n");
    }
    out
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
