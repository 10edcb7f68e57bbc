//! End-to-end checks over the fixture catalog and return file.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::NaiveDate;
use ecad::records::{FILE_HEADER, WORK_TITLEHOLDER};
use ecad::returns::normalize_identifier;
use ecad::{
    assemble_ecad_file, decode_line, export_ecad_file, parse_return_file, Catalog, ExportContext,
    ExportOptions, RecordKind, ReturnStatus,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn catalog() -> Catalog {
    let json = std::fs::read_to_string(fixture("catalog.json")).unwrap();
    serde_json::from_str(&json).unwrap()
}

fn ctx() -> ExportContext {
    let at = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(10, 30, 5)
        .unwrap();
    ExportContext::new(ExportOptions::default(), at)
}

#[test]
fn export_matches_golden_file() {
    let catalog = catalog();
    let ctx = ctx();
    let file = assemble_ecad_file(&catalog.works, &catalog.phonograms, &ctx).unwrap();

    let expected = std::fs::read(fixture("catalog.expected.txt")).unwrap();
    let actual = file.to_bytes();

    // line by line first, so a drifting segment names its line
    let expected_text = String::from_utf8_lossy(&expected);
    let actual_text = String::from_utf8_lossy(&actual);
    for (idx, (a, e)) in actual_text.lines().zip(expected_text.lines()).enumerate() {
        assert_eq!(a, e, "line {} differs", idx + 1);
    }
    assert_eq!(actual, expected);
}

#[test]
fn every_line_decodes_at_its_layout_width() {
    let catalog = catalog();
    let ctx = ctx();
    let file = assemble_ecad_file(&catalog.works, &catalog.phonograms, &ctx).unwrap();
    let text = file.to_text();

    for (idx, line) in text.lines().enumerate() {
        let decoded = decode_line(line).unwrap_or_else(|e| panic!("line {}: {}", idx + 1, e));
        assert_eq!(line.len(), decoded.kind.layout().width, "line {}", idx + 1);
        assert!(line.is_ascii(), "line {} is not plain ASCII", idx + 1);
    }
}

#[test]
fn file_structure_follows_catalog_order() {
    let catalog = catalog();
    let ctx = ctx();
    let file = assemble_ecad_file(&catalog.works, &catalog.phonograms, &ctx).unwrap();
    let kinds: Vec<RecordKind> = file.records().iter().map(|r| r.kind()).collect();

    use RecordKind as K;
    assert_eq!(
        kinds,
        vec![
            K::FileHeader,
            K::SocietyHeader,
            // Eu Sem Você
            K::WorkSeparator,
            K::WorkHeader,
            K::WorkTitleholder,
            K::WorkTitleholder,
            K::WorkTitleholder,
            K::WorkParticipant,
            K::WorkTrailer,
            // Night Song
            K::WorkSeparator,
            K::WorkHeader,
            K::WorkTitleholder,
            K::WorkTrailer,
            // BR-ABC-24-00001
            K::PhonogramSeparator,
            K::PhonogramHeader,
            K::PhonogramTitleholder,
            K::PhonogramTitleholder,
            K::PhonogramTitleholder,
            K::PhonogramAuxiliary,
            K::PhonogramTrailer,
            K::FileTrailer,
        ]
    );
}

#[test]
fn trailer_reconciles_with_body() {
    let catalog = catalog();
    let ctx = ctx();
    let file = assemble_ecad_file(&catalog.works, &catalog.phonograms, &ctx).unwrap();

    let last = file.records().last().unwrap();
    let trailer = decode_line(last.as_str()).unwrap();
    assert_eq!(trailer.get("total_lines"), Some("000000021"));
    assert_eq!(trailer.get("total_groups"), Some("000000003"));

    let summary = file.summary();
    assert_eq!(summary.lines, 21);
    assert_eq!(summary.groups, 3);
    assert_eq!(summary.works, 2);
    assert_eq!(summary.phonograms, 1);
    assert_eq!(summary.titleholders, 3 + 1 + 3);
}

#[test]
fn headers_carry_generation_clock() {
    let catalog = catalog();
    let ctx = ctx();
    let file = assemble_ecad_file(&catalog.works, &catalog.phonograms, &ctx).unwrap();

    let header = FILE_HEADER.decode(file.records()[0].as_str()).unwrap();
    assert_eq!(header.get("date"), Some("15032024"));
    assert_eq!(header.get("time"), Some("103005"));

    let society = decode_line(file.records()[1].as_str()).unwrap();
    assert_eq!(society.kind, RecordKind::SocietyHeader);
    assert_eq!(society.get("date"), Some("15032024"));
}

#[test]
fn eu_sem_voce_work_group() {
    let catalog = catalog();
    let ctx = ctx();
    let file = assemble_ecad_file(&catalog.works, &catalog.phonograms, &ctx).unwrap();
    let records = file.records();

    let header = decode_line(records[3].as_str()).unwrap();
    assert_eq!(header.get("work_code"), Some("0000014257280"));
    assert_eq!(header.get("internal_code"), Some("000000000001234"));
    assert_eq!(header.get_trimmed("title"), Some("EU SEM VOCE"));
    assert_eq!(header.get("duration"), Some("000205"));
    assert_eq!(header.get("language"), Some("PTN"));

    let author = WORK_TITLEHOLDER.decode(records[4].as_str()).unwrap();
    assert_eq!(author.get_trimmed("name"), Some("RUBEN JOSE MARQUES GOMES"));
    assert_eq!(author.get("person_type"), Some("F"));
    assert_eq!(author.get("cpf"), Some("65126207300"));
    assert_eq!(author.get_trimmed("cnpj"), Some(""));
    assert_eq!(author.get("subfunction"), Some("CA"));
    assert_eq!(author.get("share"), Some("05000"));
    assert_eq!(author.get("sequence"), Some("001"));

    let publisher = WORK_TITLEHOLDER.decode(records[6].as_str()).unwrap();
    assert_eq!(publisher.get("person_type"), Some("J"));
    assert_eq!(publisher.get("cnpj"), Some("12345678000190"));
    assert_eq!(publisher.get("titleholder_type"), Some("E"));
    assert_eq!(publisher.get("share"), Some("10000"));
    assert_eq!(publisher.get("sequence"), Some("003"));
}

#[test]
fn international_work_group() {
    let catalog = catalog();
    let ctx = ctx();
    let file = assemble_ecad_file(&catalog.works, &catalog.phonograms, &ctx).unwrap();
    let records = file.records();

    let header = decode_line(records[10].as_str()).unwrap();
    assert_eq!(header.get("work_code"), Some("0000000000000"));
    assert_eq!(header.get("language"), Some("ENN"));
    assert_eq!(header.get("duration"), Some("003723"));

    let arranger = decode_line(records[11].as_str()).unwrap();
    assert_eq!(arranger.get("subfunction"), Some("AR"));
    assert_eq!(arranger.get("sequence"), Some("001"));
}

#[test]
fn phonogram_group() {
    let catalog = catalog();
    let ctx = ctx();
    let file = assemble_ecad_file(&catalog.works, &catalog.phonograms, &ctx).unwrap();
    let records = file.records();

    let header = decode_line(records[14].as_str()).unwrap();
    assert_eq!(header.get("phonogram_id"), Some("000000004521"));
    assert_eq!(header.get("isrc"), Some("BRABC2400001"));
    assert_eq!(header.get("recording_date"), Some("01012019"));
    assert_eq!(header.get("release_date"), Some("15032020"));
    assert_eq!(header.get("generation_date"), Some("15032024"));
    assert_eq!(header.get("duration"), Some("000205"));

    let producer = decode_line(records[15].as_str()).unwrap();
    assert_eq!(producer.get("category"), Some("PFP"));
    assert_eq!(producer.get("person_type"), Some("J"));

    let interpreter = decode_line(records[16].as_str()).unwrap();
    assert_eq!(interpreter.get("category"), Some("I I"));
    assert_eq!(interpreter.get("share"), Some("05000"));

    let musician = decode_line(records[17].as_str()).unwrap();
    assert_eq!(musician.get("category"), Some("MAM"));
    assert_eq!(musician.get_trimmed("society"), Some("UBC"));

    let auxiliary = decode_line(records[18].as_str()).unwrap();
    assert_eq!(auxiliary.get("phonogram_id"), Some("0000000004521"));
}

#[test]
fn same_clock_same_bytes() {
    let catalog = catalog();
    let ctx = ctx();
    let a = assemble_ecad_file(&catalog.works, &catalog.phonograms, &ctx).unwrap();
    let b = assemble_ecad_file(&catalog.works, &catalog.phonograms, &ctx).unwrap();
    assert_eq!(a.to_bytes(), b.to_bytes());
}

#[test]
fn export_writes_what_was_assembled() {
    let catalog = catalog();
    let ctx = ctx();
    let dir = tempfile::tempdir().unwrap();

    let (written, summary) =
        export_ecad_file(&catalog.works, &catalog.phonograms, &ctx, &dir.path().join("lote.EXP"))
            .unwrap();
    assert_eq!(written, dir.path().join("lote.txt"));

    let bytes = std::fs::read(&written).unwrap();
    let expected = assemble_ecad_file(&catalog.works, &catalog.phonograms, &ctx)
        .unwrap()
        .to_bytes();
    assert_eq!(bytes, expected);
    assert_eq!(bytes.iter().filter(|b| **b == b'\n').count(), summary.lines);
}

#[test]
fn return_file_against_submitted_isrcs() {
    let known: HashSet<String> = ["BR-ABC-24-00001", "BRABC2400002", "BRABC2400003"]
        .into_iter()
        .map(normalize_identifier)
        .collect();

    let report = parse_return_file(fixture("retorno.csv"), &known).unwrap();

    assert_eq!(report.summary.total, 4);
    assert_eq!(report.summary.accepted, 1);
    assert_eq!(report.summary.rejected, 2);
    assert_eq!(report.summary.unmatched, 1);
    assert_eq!(report.unmatched[0].identifier, "BRXYZ9900009");

    let accepted = &report.outcomes[0];
    assert_eq!(accepted.key, "BRABC2400001");
    assert_eq!(accepted.status, ReturnStatus::Accepted);
    assert_eq!(accepted.row, 2);

    let percentages = &report.outcomes[1];
    assert_eq!(percentages.status, ReturnStatus::Rejected);
    assert_eq!(percentages.error_code.as_deref(), Some("E003"));
    assert_eq!(percentages.message.as_deref(), Some("Percentuais não somam 100%"));

    let explicit = &report.outcomes[2];
    assert_eq!(explicit.key, "BRABC2400003");
    assert_eq!(explicit.message.as_deref(), Some("Revisar cadastro"));
    // the blank line before it still counts
    assert_eq!(explicit.row, 6);
    assert_eq!(report.unmatched[0].row, 4);

    assert_eq!(report.rejected_identifiers(), vec!["BRABC2400002", "BRABC2400003"]);
}
