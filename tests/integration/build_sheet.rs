//! Integration tests for the full validate, pack and write pipeline.

use cardsheet::CardSheetError;
use cardsheet::config::{Config, LayoutSettings};
use cardsheet::layout::{PageLayout, pack};
use cardsheet::output::OutputFormatter;
use cardsheet::render::SheetRenderer;
use cardsheet::sheet::{SheetOutcome, build_sheet};
use lopdf::content::Content;
use lopdf::{Document, Object};
use std::path::PathBuf;

use crate::common::{CARD_SIZE, Workspace, file_names};

fn config_for(ws: &Workspace) -> Config {
    Config {
        input_dirs: vec![PathBuf::from("cards")],
        base_dir: ws.root().to_path_buf(),
        sort_by_name: true,
        ..Default::default()
    }
}

fn draw_operations(doc: &Document, page_number: u32) -> Vec<Vec<f32>> {
    let page_id = *doc.get_pages().get(&page_number).unwrap();
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
    content
        .operations
        .iter()
        .filter(|op| op.operator == "cm")
        .map(|op| {
            op.operands
                .iter()
                .map(|o| o.as_float().unwrap())
                .collect()
        })
        .collect()
}

#[test]
fn test_ten_cards_make_two_pages() {
    let ws = Workspace::new();
    ws.cards_n(10, CARD_SIZE);

    let outcome = build_sheet(&config_for(&ws), &OutputFormatter::quiet()).unwrap();

    assert_eq!(outcome.page_count(), 2);
    let doc = Document::load(ws.output_pdf()).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
    assert_eq!(draw_operations(&doc, 1).len(), 9);
    assert_eq!(draw_operations(&doc, 2).len(), 1);
}

#[test]
fn test_first_card_is_top_left() {
    let ws = Workspace::new();
    ws.cards_n(1, CARD_SIZE);

    build_sheet(&config_for(&ws), &OutputFormatter::quiet()).unwrap();

    let doc = Document::load(ws.output_pdf()).unwrap();
    let ops = draw_operations(&doc, 1);
    let [w, _, _, h, x, y] = ops[0][..] else {
        panic!("unexpected cm operands {:?}", ops[0]);
    };

    // 745x1040 is slightly wider than the card box, so the height shrinks
    // and the image is centered vertically in the box.
    let layout = PageLayout::from_settings(&LayoutSettings::default());
    let cell = layout.cell_rect(0, 0);
    assert!((w - cell.width).abs() < 0.01);
    assert!(h <= cell.height + 0.01);
    assert!((x - cell.x).abs() < 0.01);
    assert!((y + h / 2.0 - (cell.y + cell.height / 2.0)).abs() < 0.01);
}

#[test]
fn test_rejected_images_are_left_out() {
    let ws = Workspace::new();
    ws.png("a_good.png", CARD_SIZE, Some(300));
    ws.png("b_small.png", (100, 100), Some(300));
    ws.png("c_lowres.png", CARD_SIZE, Some(72));
    ws.write("d_broken.png", b"definitely not a png");
    ws.write("notes.txt", b"ignored");

    let outcome = build_sheet(&config_for(&ws), &OutputFormatter::quiet()).unwrap();
    let summary = outcome.summary();

    assert_eq!(summary.total_candidates, 4);
    assert_eq!(file_names(&summary.accepted), vec!["a_good.png"]);
    let reasons: Vec<String> = summary
        .rejected
        .iter()
        .map(|r| r.reason.to_string())
        .collect();
    assert_eq!(reasons[0], "Invalid dimensions 100x100");
    assert_eq!(reasons[1], "Invalid DPI 72");
    assert!(reasons[2].starts_with("Error processing image: "));
}

#[test]
fn test_all_rejected_creates_no_document() {
    let ws = Workspace::new();
    ws.png("wrong.png", (10, 10), None);

    let err = build_sheet(&config_for(&ws), &OutputFormatter::quiet()).unwrap_err();

    assert!(matches!(err, CardSheetError::NoAcceptedImages));
    assert_eq!(err.exit_code(), 1);
    assert!(!ws.output_pdf().exists());
}

#[test]
fn test_missing_folder_is_skipped() {
    let ws = Workspace::new();
    ws.cards_n(2, CARD_SIZE);
    let config = Config {
        input_dirs: vec![PathBuf::from("nowhere"), PathBuf::from("cards")],
        ..config_for(&ws)
    };

    let outcome = build_sheet(&config, &OutputFormatter::quiet()).unwrap();

    assert_eq!(outcome.summary().missing_dirs, vec![ws.root().join("nowhere")]);
    assert_eq!(outcome.summary().accepted.len(), 2);
}

#[test]
fn test_jpeg_embedded_without_reencoding() {
    let ws = Workspace::new();
    let path = ws.jpeg("card.jpg", CARD_SIZE, Some(300));
    let original = std::fs::read(&path).unwrap();

    build_sheet(&config_for(&ws), &OutputFormatter::quiet()).unwrap();

    let doc = Document::load(ws.output_pdf()).unwrap();
    let embedded = doc
        .objects
        .values()
        .find_map(|obj| match obj {
            Object::Stream(stream)
                if matches!(
                    stream.dict.get(b"Filter"),
                    Ok(Object::Name(name)) if name == b"DCTDecode"
                ) =>
            {
                Some(stream.content.clone())
            }
            _ => None,
        })
        .expect("no DCTDecode stream");
    assert_eq!(embedded, original);
}

#[test]
fn test_custom_output_dir_and_title() {
    let ws = Workspace::new();
    ws.cards_n(1, CARD_SIZE);
    let config = Config {
        output_dir: PathBuf::from("print/run1"),
        title: Some("Proxies".to_string()),
        ..config_for(&ws)
    };

    let outcome = build_sheet(&config, &OutputFormatter::quiet()).unwrap();

    let path = ws.root().join("print/run1/output.pdf");
    assert!(matches!(outcome, SheetOutcome::Written { .. }));
    assert_eq!(outcome.written_path(), Some(&path));

    let doc = Document::load(&path).unwrap();
    let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = doc.get_dictionary(info_id).unwrap();
    assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Proxies");
}

#[test]
fn test_overwrites_by_default() {
    let ws = Workspace::new();
    ws.cards_n(1, CARD_SIZE);
    std::fs::create_dir_all(ws.output_pdf().parent().unwrap()).unwrap();
    std::fs::write(ws.output_pdf(), b"stale").unwrap();

    build_sheet(&config_for(&ws), &OutputFormatter::quiet()).unwrap();

    assert!(Document::load(ws.output_pdf()).is_ok());
}

#[test]
fn test_vanished_image_fails_rendering() {
    let ws = Workspace::new();
    let images = ws.cards_n(2, CARD_SIZE);
    let gone = images[1].clone();
    std::fs::remove_file(&gone).unwrap();

    let layout = PageLayout::from_settings(&LayoutSettings::default());
    let err = SheetRenderer::new(&layout)
        .render(pack(&images, &layout))
        .unwrap_err();

    assert!(matches!(err, CardSheetError::RenderFailed { ref path, .. } if *path == gone));
    assert_eq!(err.exit_code(), 6);
}
