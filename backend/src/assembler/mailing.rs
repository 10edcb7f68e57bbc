//! Titleholder mailing file.

use uuid::Uuid;

use crate::config::ExportContext;
use crate::logs::log_success;
use crate::models::MailingTitleholder;
use crate::records::{build_mailing_detail, build_mailing_header, build_mailing_trailer};

use super::{EcadFile, ExportSummary};

/// Header, one detail per titleholder in input order, trailer.
///
/// Each detail carries its own line number (the first is `2`). The trailer
/// counts every line including itself, and one group per titleholder.
pub fn assemble_mailing_file(titleholders: &[MailingTitleholder], ctx: &ExportContext) -> EcadFile {
    let mut records = Vec::with_capacity(titleholders.len() + 2);
    records.push(build_mailing_header(ctx));
    for holder in titleholders {
        let line = records.len() + 1;
        records.push(build_mailing_detail(holder, line));
    }

    let groups = titleholders.len();
    let total_lines = records.len() + 1;
    records.push(build_mailing_trailer(total_lines, groups));

    let summary = ExportSummary {
        export_id: Uuid::new_v4(),
        generated_at: ctx.generated_at,
        works: 0,
        phonograms: 0,
        titleholders: groups,
        lines: total_lines,
        groups,
    };
    log_success(format!("Mailing file {}: {} titleholders", summary.export_id, groups));

    EcadFile::new(records, summary)
}
