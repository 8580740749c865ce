//! Integration tests for image classification and folder collection.

use cardsheet::collect::Collector;
use cardsheet::config::ImageSpecs;
use cardsheet::validation::{ImageCandidate, RejectReason, ValidationResult, Validator};
use rstest::rstest;

use crate::common::{CARD_SIZE, SMALL_CARD, Workspace, file_names};

fn small_specs() -> ImageSpecs {
    ImageSpecs {
        accepted_dimensions: vec![SMALL_CARD],
        accepted_resolutions: vec![300, 600],
    }
}

#[rstest]
#[case::png_no_dpi(None, true)]
#[case::png_300(Some(300), true)]
#[case::png_600(Some(600), true)]
#[case::png_72(Some(72), false)]
fn test_png_resolution(#[case] dpi: Option<u32>, #[case] accepted: bool) {
    let ws = Workspace::new();
    let path = ws.png("card.png", SMALL_CARD, dpi);
    let specs = small_specs();

    let result = Validator::new(&specs).validate(&path);
    assert_eq!(result.is_accepted(), accepted, "{result:?}");
}

#[rstest]
#[case::jpeg_no_dpi(None, true)]
#[case::jpeg_300(Some(300), true)]
#[case::jpeg_150(Some(150), false)]
fn test_jpeg_resolution(#[case] dpi: Option<u16>, #[case] accepted: bool) {
    let ws = Workspace::new();
    let path = ws.jpeg("card.jpg", SMALL_CARD, dpi);
    let specs = small_specs();

    let result = Validator::new(&specs).validate(&path);
    assert_eq!(result.is_accepted(), accepted, "{result:?}");
}

#[test]
fn test_rotated_image_is_rejected() {
    let ws = Workspace::new();
    let path = ws.png("sideways.png", (SMALL_CARD.1, SMALL_CARD.0), Some(300));
    let specs = small_specs();

    let result = Validator::new(&specs).validate(&path);
    assert_eq!(
        result,
        ValidationResult::Rejected(RejectReason::InvalidDimensions {
            width: SMALL_CARD.1,
            height: SMALL_CARD.0,
        })
    );
}

#[test]
fn test_misnamed_file_is_sniffed() {
    let ws = Workspace::new();
    let path = ws.cards().join("actually_png.jpg");
    crate::common::write_png(&path, SMALL_CARD, Some(300));

    let candidate = ImageCandidate::open(&path).unwrap();
    assert_eq!(candidate.format(), Some(image::ImageFormat::Png));
    assert_eq!(candidate.resolution(), Some(300));
}

#[test]
fn test_default_specs_accept_both_card_sizes() {
    let ws = Workspace::new();
    let a = ws.png("a.png", CARD_SIZE, Some(300));
    let b = ws.png("b.png", (744, 1039), Some(300));
    let specs = ImageSpecs::default();
    let validator = Validator::new(&specs);

    assert!(validator.validate(&a).is_accepted());
    assert!(validator.validate(&b).is_accepted());
}

#[test]
fn test_collector_orders_folders_then_names() {
    let first = Workspace::new();
    let second = Workspace::new();
    second.png("a.png", SMALL_CARD, None);
    first.png("b.png", SMALL_CARD, None);
    first.png("a.png", SMALL_CARD, None);
    let specs = small_specs();
    let exts = vec!["png".to_string()];

    let summary = Collector::new(&specs, &exts, true).collect(&[first.cards(), second.cards()]);

    assert_eq!(
        summary.accepted,
        vec![
            first.cards().join("a.png"),
            first.cards().join("b.png"),
            second.cards().join("a.png"),
        ]
    );
}

#[test]
fn test_collector_filters_extensions() {
    let ws = Workspace::new();
    ws.png("keep.png", SMALL_CARD, None);
    ws.jpeg("skip.jpg", SMALL_CARD, None);
    let specs = small_specs();
    let exts = vec!["png".to_string()];

    let summary = Collector::new(&specs, &exts, true).collect(&[ws.cards()]);

    assert_eq!(summary.total_candidates, 1);
    assert_eq!(file_names(&summary.accepted), vec!["keep.png"]);
}
