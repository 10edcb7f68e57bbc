//! Section state machine for the work/phonogram file.

use uuid::Uuid;

use crate::config::ExportContext;
use crate::error::{ExportError, ExportResult};
use crate::layout::EncodedRecord;
use crate::logs::{log_info, log_info_indent, log_success};
use crate::models::{Phonogram, Work};
use crate::records::{
    build_file_header, build_file_trailer, build_phonogram_auxiliary, build_phonogram_header,
    build_phonogram_separator, build_phonogram_titleholder, build_phonogram_trailer,
    build_society_header, build_work_header, build_work_participant, build_work_separator,
    build_work_titleholder, build_work_trailer, PhonogramCategory, TitleholderSide,
};

use super::{EcadFile, ExportSummary};

/// Where the assembler is in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Headers written, no group yet.
    Start,
    Works,
    Phonograms,
    /// Trailer written.
    Finished,
}

impl Section {
    fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Works => "works",
            Self::Phonograms => "phonograms",
            Self::Finished => "finished",
        }
    }
}

/// Builds an ECAD file group by group.
///
/// ```text
/// Start ──push_work──▶ Works ──push_phonogram──▶ Phonograms ──finish──▶ Finished
///   └──────────────push_phonogram──────────────────▲
/// ```
///
/// Works must all come before phonograms. Input order is output order and no
/// business rule is checked.
#[derive(Debug)]
pub struct FileAssembler<'c> {
    ctx: &'c ExportContext,
    records: Vec<EncodedRecord>,
    section: Section,
    works: usize,
    phonograms: usize,
    titleholders: usize,
}

impl<'c> FileAssembler<'c> {
    /// Start a file: writes the file header and the society header.
    pub fn new(ctx: &'c ExportContext) -> Self {
        Self {
            ctx,
            records: vec![build_file_header(ctx), build_society_header(ctx)],
            section: Section::Start,
            works: 0,
            phonograms: 0,
            titleholders: 0,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Lines emitted so far.
    pub fn line_count(&self) -> usize {
        self.records.len()
    }

    /// Append one work group: separator, OBM1, OBM2s, OBM4s, trailer.
    pub fn push_work(&mut self, work: &Work) -> ExportResult<()> {
        match self.section {
            Section::Start | Section::Works => self.section = Section::Works,
            other => return Err(order_error("work", other)),
        }

        self.records.push(build_work_separator());
        self.records.push(build_work_header(work, self.ctx));

        let holders = work
            .authors
            .iter()
            .map(|h| (h, TitleholderSide::Author))
            .chain(work.publishers.iter().map(|h| (h, TitleholderSide::Publisher)));
        for (sequence, (holder, side)) in (1..).zip(holders) {
            self.records.push(build_work_titleholder(work, holder, side, sequence));
        }
        for participant in &work.performers {
            self.records.push(build_work_participant(work, participant));
        }

        self.records.push(build_work_trailer());
        self.works += 1;
        self.titleholders += work.titleholder_count();
        log_info_indent(
            format!("OBM {} ({} titleholders)", work.title, work.titleholder_count()),
            1,
        );
        Ok(())
    }

    /// Append one phonogram group: separator, FON1, FON2s, FON3, trailer.
    pub fn push_phonogram(&mut self, phonogram: &Phonogram) -> ExportResult<()> {
        match self.section {
            Section::Start | Section::Works | Section::Phonograms => {
                self.section = Section::Phonograms
            }
            other => return Err(order_error("phonogram", other)),
        }

        self.records.push(build_phonogram_separator());
        self.records.push(build_phonogram_header(phonogram, self.ctx));
        if let Some(producer) = &phonogram.producer {
            self.records.push(build_phonogram_titleholder(
                phonogram,
                producer,
                PhonogramCategory::Producer,
                self.ctx,
            ));
        }
        for performer in &phonogram.performers {
            let category = PhonogramCategory::of_performer(&performer.category);
            self.records.push(build_phonogram_titleholder(phonogram, performer, category, self.ctx));
        }
        self.records.push(build_phonogram_auxiliary(phonogram));
        self.records.push(build_phonogram_trailer());

        self.phonograms += 1;
        self.titleholders += phonogram.titleholder_count();
        log_info_indent(
            format!("FON {} ({})", phonogram.isrc, phonogram.titleholder_count()),
            1,
        );
        Ok(())
    }

    /// Write the trailer and hand over the file.
    pub fn finish(&mut self) -> ExportResult<EcadFile> {
        if self.section == Section::Finished {
            return Err(order_error("trailer", self.section));
        }

        let groups = self.works + self.phonograms;
        // the trailer counts itself
        let total_lines = self.records.len() + 1;
        self.records.push(build_file_trailer(total_lines, groups));
        self.section = Section::Finished;

        let summary = ExportSummary {
            export_id: Uuid::new_v4(),
            generated_at: self.ctx.generated_at,
            works: self.works,
            phonograms: self.phonograms,
            titleholders: self.titleholders,
            lines: total_lines,
            groups,
        };
        log_success(format!(
            "ECAD file {}: {} works, {} phonograms, {} lines",
            summary.export_id, summary.works, summary.phonograms, summary.lines
        ));

        Ok(EcadFile::new(std::mem::take(&mut self.records), summary))
    }
}

fn order_error(record: &'static str, section: Section) -> ExportError {
    ExportError::SectionOrder {
        record,
        section: section.name(),
    }
}

/// Build a complete ECAD file: every work, then every phonogram.
pub fn assemble_ecad_file(
    works: &[Work],
    phonograms: &[Phonogram],
    ctx: &ExportContext,
) -> ExportResult<EcadFile> {
    log_info(format!(
        "Assembling ECAD file: {} works, {} phonograms",
        works.len(),
        phonograms.len()
    ));

    let mut assembler = FileAssembler::new(ctx);
    for work in works {
        assembler.push_work(work)?;
    }
    for phonogram in phonograms {
        assembler.push_phonogram(phonogram)?;
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportOptions;
    use crate::layout::RecordKind;
    use crate::models::{PhonogramTitleholder, WorkParticipant, WorkTitleholder};
    use chrono::NaiveDate;

    fn ctx() -> ExportContext {
        let at = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        ExportContext::new(ExportOptions::default(), at)
    }

    fn work() -> Work {
        let mut work = Work::new("1", "Eu Sem Você");
        work.add_author(WorkTitleholder::new("Autor A", "11111111111", "Compositor", 50.0));
        work.add_author(WorkTitleholder::new("Autor B", "22222222222", "Letrista", 50.0));
        work.add_publisher(WorkTitleholder::new("Editora", "12345678000190", "", 100.0));
        work.performers.push(WorkParticipant::new("Cantor", "Principal"));
        work
    }

    fn phonogram() -> Phonogram {
        let mut fono = Phonogram::new(10, "BRABC2400001", "Eu Sem Você");
        fono.producer = Some(PhonogramTitleholder::new("Produtor", "33333333333", "Produtor", 100.0));
        fono.performers.push(PhonogramTitleholder::new("Cantor", "44444444444", "Principal", 100.0));
        fono
    }

    #[test]
    fn test_group_structure() {
        let ctx = ctx();
        let file = assemble_ecad_file(&[work()], &[phonogram()], &ctx).unwrap();
        let kinds: Vec<RecordKind> = file.records().iter().map(|r| r.kind()).collect();

        use RecordKind as K;
        assert_eq!(
            kinds,
            vec![
                K::FileHeader,
                K::SocietyHeader,
                K::WorkSeparator,
                K::WorkHeader,
                K::WorkTitleholder,
                K::WorkTitleholder,
                K::WorkTitleholder,
                K::WorkParticipant,
                K::WorkTrailer,
                K::PhonogramSeparator,
                K::PhonogramHeader,
                K::PhonogramTitleholder,
                K::PhonogramTitleholder,
                K::PhonogramAuxiliary,
                K::PhonogramTrailer,
                K::FileTrailer,
            ]
        );
    }

    #[test]
    fn test_titleholder_sequence_runs_across_authors_and_publishers() {
        let ctx = ctx();
        let file = assemble_ecad_file(&[work()], &[], &ctx).unwrap();
        let sequences: Vec<&str> = file
            .records()
            .iter()
            .filter(|r| r.kind() == RecordKind::WorkTitleholder)
            .map(|r| &r.as_str()[322..325])
            .collect();
        assert_eq!(sequences, vec!["001", "002", "003"]);
    }

    #[test]
    fn test_trailer_reconciles() {
        let ctx = ctx();
        let file = assemble_ecad_file(&[work(), work()], &[phonogram()], &ctx).unwrap();
        let trailer = file.records().last().unwrap().as_str();

        assert_eq!(file.records().len(), 2 + 2 * 7 + 6 + 1);
        assert_eq!(&trailer[3..12], format!("{:09}", file.records().len()));
        assert_eq!(&trailer[12..21], "000000003");
        assert_eq!(file.summary().lines, file.records().len());
        assert_eq!(file.summary().titleholders, 2 * 3 + 2);
    }

    #[test]
    fn test_empty_file() {
        let ctx = ctx();
        let file = assemble_ecad_file(&[], &[], &ctx).unwrap();
        assert_eq!(file.records().len(), 3);
        assert_eq!(file.records()[2].as_str(), "999000000003000000000");
    }

    #[test]
    fn test_work_after_phonogram_is_rejected() {
        let ctx = ctx();
        let mut assembler = FileAssembler::new(&ctx);
        assembler.push_phonogram(&phonogram()).unwrap();

        let err = assembler.push_work(&work()).unwrap_err();
        assert!(matches!(
            err,
            ExportError::SectionOrder { record: "work", section: "phonograms" }
        ));
        // the rejected work left no partial group behind
        assert_eq!(assembler.line_count(), 2 + 6);
    }

    #[test]
    fn test_push_after_finish_is_rejected() {
        let ctx = ctx();
        let mut assembler = FileAssembler::new(&ctx);
        assembler.finish().unwrap();

        assert_eq!(assembler.section(), Section::Finished);
        assert!(assembler.push_phonogram(&phonogram()).is_err());
        assert!(assembler.finish().is_err());
    }

    #[test]
    fn test_input_order_is_output_order() {
        let ctx = ctx();
        let a = Phonogram::new(1, "BRABC2400001", "A");
        let b = Phonogram::new(2, "BRABC2400002", "B");
        let file = assemble_ecad_file(&[], &[b, a], &ctx).unwrap();
        let ids: Vec<&str> = file
            .records()
            .iter()
            .filter(|r| r.kind() == RecordKind::PhonogramHeader)
            .map(|r| &r.as_str()[8..20])
            .collect();
        assert_eq!(ids, vec!["000000000002", "000000000001"]);
    }
}
