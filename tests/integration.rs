//! Integration tests for the certificate batch pipeline
//!
//! Fixtures are generated in a temp directory per test: spreadsheets with
//! rust_xlsxwriter, single- and multi-page templates with lopdf.

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, Stream};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use pdf_certificates::batch::{run_batch, BatchOptions, RunSummary};
use pdf_certificates::fonts::FontCatalog;
use pdf_certificates::layout::BoundingBox;
use pdf_certificates::style::StyleSpec;
use pdf_certificates::Error;

/// Write a minimal PDF template with one page per requested size.
fn write_template(path: &Path, page_sizes: &[(f32, f32)]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for &(width, height) in page_sizes {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q\nQ\n".to_vec()));
        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width),
                Object::Real(height),
            ]),
        );
        page.set("Contents", Object::Reference(content_id));
        kids.push(Object::Reference(doc.add_object(Object::Dictionary(page))));
    }

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(page_sizes.len() as i64));
    pages.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    doc.objects.insert(catalog_id, Object::Dictionary(catalog));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.save(path).expect("Failed to write template fixture");
}

/// Write a spreadsheet with a header row and (name, phone) data rows in
/// columns A and C, matching the default column layout.
fn write_spreadsheet(path: &Path, rows: &[(Option<&str>, Option<&str>)]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Name").unwrap();
    sheet.write_string(0, 2, "Phone").unwrap();

    for (i, (name, phone)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        if let Some(name) = name {
            sheet.write_string(row, 0, *name).unwrap();
        }
        if let Some(phone) = phone {
            sheet.write_string(row, 2, *phone).unwrap();
        }
    }

    workbook.save(path).expect("Failed to write xlsx fixture");
}

/// Count the content streams in a PDF that draw the given text.
fn count_text_streams(path: &Path, text: &str) -> usize {
    let mut doc = Document::load(path).expect("Failed to load output PDF");
    doc.decompress();
    let marker = format!("({text}) Tj");
    doc.objects
        .values()
        .filter(|obj| match obj {
            Object::Stream(stream) => {
                String::from_utf8_lossy(&stream.content).contains(&marker)
            }
            _ => false,
        })
        .count()
}

fn pdf_contains_text(path: &Path, text: &str) -> bool {
    count_text_streams(path, text) > 0
}

fn default_options(dir: &Path) -> BatchOptions {
    BatchOptions {
        spreadsheet: dir.join("input.xlsx"),
        template: dir.join("template.pdf"),
        output_dir: dir.join("output"),
        name_column: 1,
        phone_column: 3,
        bbox: BoundingBox::new(150.0, 300.0, 450.0, 360.0).unwrap(),
        style: StyleSpec::default(),
    }
}

fn output_file(options: &BatchOptions, stem: &str) -> PathBuf {
    options.output_dir.join(format!("{stem}.pdf"))
}

#[test]
fn test_single_row_produces_named_output() {
    let dir = TempDir::new().unwrap();
    let options = default_options(dir.path());

    write_spreadsheet(&options.spreadsheet, &[(Some("jane doe"), Some("+1 555-0100"))]);
    write_template(&options.template, &[(612.0, 792.0)]);

    let summary = run_batch(&options, &FontCatalog::builtin()).expect("batch failed");

    assert_eq!(
        summary,
        RunSummary {
            processed: 1,
            skipped: 0
        }
    );

    let output = output_file(&options, "15550100");
    assert!(output.exists(), "expected {} to exist", output.display());
    assert!(pdf_contains_text(&output, "Jane Doe"));
}

#[test]
fn test_missing_name_is_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let options = default_options(dir.path());

    write_spreadsheet(
        &options.spreadsheet,
        &[
            (None, Some("+358 40 111")),
            (Some("jane doe"), Some("555 0100")),
        ],
    );
    write_template(&options.template, &[(612.0, 792.0)]);

    let summary = run_batch(&options, &FontCatalog::builtin()).unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 1);
    assert!(!output_file(&options, "35840111").exists());
    assert!(output_file(&options, "5550100").exists());
}

#[test]
fn test_missing_phone_is_skipped() {
    let dir = TempDir::new().unwrap();
    let options = default_options(dir.path());

    write_spreadsheet(&options.spreadsheet, &[(Some("jane doe"), None)]);
    write_template(&options.template, &[(612.0, 792.0)]);

    let summary = run_batch(&options, &FontCatalog::builtin()).unwrap();

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.skipped, 1);
}

#[test]
fn test_display_name_truncated_to_two_tokens() {
    let dir = TempDir::new().unwrap();
    let options = default_options(dir.path());

    write_spreadsheet(
        &options.spreadsheet,
        &[(Some("maria de la cruz"), Some("0400123"))],
    );
    write_template(&options.template, &[(612.0, 792.0)]);

    run_batch(&options, &FontCatalog::builtin()).unwrap();

    let output = output_file(&options, "0400123");
    assert!(pdf_contains_text(&output, "Maria De"));
    assert!(!pdf_contains_text(&output, "Maria De La Cruz"));
}

#[test]
fn test_hyphenated_and_apostrophe_names_title_cased() {
    let dir = TempDir::new().unwrap();
    let options = default_options(dir.path());

    write_spreadsheet(
        &options.spreadsheet,
        &[(Some("mary-jane o'brien"), Some("0500200"))],
    );
    write_template(&options.template, &[(612.0, 792.0)]);

    run_batch(&options, &FontCatalog::builtin()).unwrap();

    // Letters after hyphens and apostrophes are capitalized too
    let output = output_file(&options, "0500200");
    assert!(pdf_contains_text(&output, "Mary-Jane O'Brien"));
    assert!(!pdf_contains_text(&output, "Mary-jane O'brien"));
}

#[test]
fn test_duplicate_phone_last_row_wins() {
    let dir = TempDir::new().unwrap();
    let options = default_options(dir.path());

    write_spreadsheet(
        &options.spreadsheet,
        &[
            (Some("first person"), Some("555 0100")),
            (Some("second person"), Some("+555-0100")),
        ],
    );
    write_template(&options.template, &[(612.0, 792.0)]);

    let summary = run_batch(&options, &FontCatalog::builtin()).unwrap();

    // Both rows process; the later one overwrites the shared output file
    assert_eq!(summary.processed, 2);
    let outputs: Vec<_> = std::fs::read_dir(&options.output_dir)
        .unwrap()
        .collect::<std::io::Result<Vec<_>>>()
        .unwrap();
    assert_eq!(outputs.len(), 1);

    let output = output_file(&options, "5550100");
    assert!(pdf_contains_text(&output, "Second Person"));
    assert!(!pdf_contains_text(&output, "First Person"));
}

#[test]
fn test_blank_row_in_middle_is_skipped() {
    let dir = TempDir::new().unwrap();
    let options = default_options(dir.path());

    write_spreadsheet(
        &options.spreadsheet,
        &[
            (Some("jane doe"), Some("100")),
            (None, None),
            (Some("john smith"), Some("200")),
        ],
    );
    write_template(&options.template, &[(612.0, 792.0)]);

    let summary = run_batch(&options, &FontCatalog::builtin()).unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 1);
}

#[test]
fn test_multipage_template_stamped_on_every_page() {
    let dir = TempDir::new().unwrap();
    let options = default_options(dir.path());

    write_spreadsheet(&options.spreadsheet, &[(Some("jane doe"), Some("100"))]);
    // Pages of different sizes; the overlay is recomputed per page
    write_template(&options.template, &[(612.0, 792.0), (595.0, 842.0)]);

    run_batch(&options, &FontCatalog::builtin()).unwrap();

    let output = output_file(&options, "100");
    assert_eq!(count_text_streams(&output, "Jane Doe"), 2);
}

#[test]
fn test_missing_template_aborts_before_output_dir_created() {
    let dir = TempDir::new().unwrap();
    let options = default_options(dir.path());

    write_spreadsheet(&options.spreadsheet, &[(Some("jane doe"), Some("100"))]);
    // No template written

    let result = run_batch(&options, &FontCatalog::builtin());

    assert!(matches!(result, Err(Error::FileNotFound(_))));
    assert!(
        !options.output_dir.exists(),
        "output dir must not be created when the template is missing"
    );
}

#[test]
fn test_missing_spreadsheet_is_fatal() {
    let dir = TempDir::new().unwrap();
    let options = default_options(dir.path());
    write_template(&options.template, &[(612.0, 792.0)]);

    let result = run_batch(&options, &FontCatalog::builtin());
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}

#[test]
fn test_wrong_spreadsheet_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let mut options = default_options(dir.path());
    options.spreadsheet = dir.path().join("input.xls");

    write_spreadsheet(&options.spreadsheet, &[(Some("jane doe"), Some("100"))]);
    write_template(&options.template, &[(612.0, 792.0)]);

    let result = run_batch(&options, &FontCatalog::builtin());
    assert!(matches!(result, Err(Error::UnsupportedSpreadsheet(_))));
}

#[test]
fn test_unknown_font_aborts_run() {
    let dir = TempDir::new().unwrap();
    let mut options = default_options(dir.path());
    options.style.font = "NoSuchFont".to_string();

    write_spreadsheet(&options.spreadsheet, &[(Some("jane doe"), Some("100"))]);
    write_template(&options.template, &[(612.0, 792.0)]);

    let result = run_batch(&options, &FontCatalog::builtin());
    assert!(matches!(result, Err(Error::UnknownFont(_))));
}

#[test]
fn test_header_only_spreadsheet_processes_nothing() {
    let dir = TempDir::new().unwrap();
    let options = default_options(dir.path());

    write_spreadsheet(&options.spreadsheet, &[]);
    write_template(&options.template, &[(612.0, 792.0)]);

    let summary = run_batch(&options, &FontCatalog::builtin()).unwrap();
    assert_eq!(summary, RunSummary::default());
}

#[test]
fn test_info_reports_page_sizes() {
    let dir = TempDir::new().unwrap();
    let template = dir.path().join("template.pdf");
    write_template(&template, &[(612.0, 792.0), (595.0, 842.0)]);

    let pages = pdf_certificates::pdf::document_info(&template).unwrap();
    assert_eq!(pages.len(), 2);
    assert!((pages[0].0 - 612.0).abs() < 0.01);
    assert!((pages[1].1 - 842.0).abs() < 0.01);
}
