use ilac_chessboard::{
    non_black_cell_corners, Board, BoardError, BoardParams, Cell, ClassifierKind, ClassifyError,
    ColorClass, Identifier, Quad,
};
use ilac_core::{BoardSize, BoundsError, DetectionError, HueImage, PixelRect};
use nalgebra::Point2;

const SPACING: f32 = 20.0;
const OFFSET: f32 = 10.0;

/// Hues of the non-black cells in row-major order: six samples (the first is
/// the reserved marker cell) followed by four data cells.
const CELL_HUES: [f32; 10] = [
    200.0, 10.0, 60.0, 320.0, 15.0, 65.0, // samples
    62.0, 12.0, 330.0, 58.0, // data
];

fn corners(width: u32, height: u32) -> Vec<Point2<f32>> {
    (0..height)
        .flat_map(|r| {
            (0..width).map(move |c| {
                Point2::new(OFFSET + c as f32 * SPACING, OFFSET + r as f32 * SPACING)
            })
        })
        .collect()
}

/// 6x5 corner board painted on a red background.
fn synthetic_board() -> (HueImage, Vec<Point2<f32>>) {
    painted_board(&CELL_HUES)
}

fn painted_board(cell_hues: &[f32; 10]) -> (HueImage, Vec<Point2<f32>>) {
    let mut img = HueImage::filled(120, 100, 0.0);
    let mut hues = cell_hues.iter();
    for r in 0..4usize {
        for c in 0..5usize {
            if (r + c) % 2 == 0 {
                continue;
            }
            let hue = *hues.next().expect("ten non-black cells");
            let x = (OFFSET + c as f32 * SPACING) as usize;
            let y = (OFFSET + r as f32 * SPACING) as usize;
            img.fill_rect(PixelRect::new(x, y, 21, 21), hue);
        }
    }
    (img, corners(6, 5))
}

#[test]
fn classifies_and_encodes_synthetic_board() {
    let (img, corners) = synthetic_board();
    let board = Board::new(
        BoardSize::new(6, 5),
        corners,
        &img.as_view(),
        &BoardParams::default(),
    )
    .expect("board");

    assert_eq!(board.cell_count(), 10);
    assert_eq!(board.sample_count(), 6);
    assert_eq!(board.data_count(), 4);

    for (cell, hue) in board.cells().iter().zip(CELL_HUES) {
        assert!(
            (cell.hue() - hue).abs() < 2.0,
            "cell hue {} expected {hue}",
            cell.hue()
        );
    }

    let marker = board.marker_cell().expect("reserved marker cell");
    assert_eq!(marker.class(), ColorClass::CYAN);

    // The marker cell does not form an exemplar group.
    let groups = &board.classification().groups;
    assert_eq!(groups.len(), 3);
    assert!(groups.iter().all(|g| g.class != ColorClass::CYAN));

    assert_eq!(
        board.data_classes(),
        vec![
            ColorClass::YELLOW,
            ColorClass::RED,
            ColorClass::MAGENTA,
            ColorClass::YELLOW
        ]
    );
    let id = board.identifier().expect("identifier");
    assert_eq!(id.words(), &[0b10_00_01_10]);
    assert_eq!(id.to_string(), "0086");
    assert_eq!(id, Identifier::from_words(vec![0x86]));
}

#[test]
fn accessors_are_bounds_checked() {
    let (img, corners) = synthetic_board();
    let board = Board::new(
        BoardSize::new(6, 5),
        corners,
        &img.as_view(),
        &BoardParams::default(),
    )
    .expect("board");

    assert!(board.cell(0).is_ok());
    assert!(board.cell(9).is_ok());
    assert!(board.cell(10).is_err());
    assert_eq!(board.sample_cell(0).expect("first sample"), board.cell(0).expect("cell 0"));
    assert!(board.sample_cell(5).is_ok());
    assert!(board.sample_cell(6).is_err());
    assert!(board.data_cell(3).is_ok());
    assert_eq!(
        board.data_cell(4).unwrap_err(),
        BoundsError {
            what: "data cell",
            index: 4,
            len: 4
        }
    );
    assert_eq!(board.data_cell(0).expect("first data cell"), board.cell(6).expect("cell 6"));
}

#[test]
fn red_samples_either_side_of_zero_form_one_group() {
    let hues = [
        200.0, 358.0, 60.0, 2.0, 310.0, 65.0, // samples
        1.0, 62.0, 350.0, 300.0, // data
    ];
    let (img, corners) = painted_board(&hues);
    let board = Board::new(
        BoardSize::new(6, 5),
        corners,
        &img.as_view(),
        &BoardParams::default(),
    )
    .expect("board");

    let red = board
        .classification()
        .groups
        .iter()
        .find(|g| g.class == ColorClass::RED)
        .expect("red group");
    assert_eq!(red.members.len(), 2);
    let m = red.median_hue;
    assert!(m < 5.0 || m > 355.0, "red median {m}");

    assert_eq!(
        board.data_classes(),
        vec![
            ColorClass::RED,
            ColorClass::YELLOW,
            ColorClass::RED,
            ColorClass::MAGENTA
        ]
    );
    assert_eq!(board.identifier().expect("identifier").to_string(), "0021");
}

/// Cells keep row-major order whether or not the `rayon` feature is on.
#[test]
fn measured_cells_follow_row_major_order() {
    let (img, corners) = synthetic_board();
    let view = img.as_view();
    let size = BoardSize::new(6, 5);
    let expected: Vec<Cell> = non_black_cell_corners(size, &corners)
        .expect("cell corners")
        .into_iter()
        .enumerate()
        .map(|(i, pts)| {
            let quad = Quad::from_corners(pts).expect("quad");
            Cell::measure(quad, &view, i).expect("cell")
        })
        .collect();

    let board = Board::new(size, corners, &view, &BoardParams::default()).expect("board");
    assert_eq!(board.cells(), expected.as_slice());
}

#[test]
fn marker_search_region_is_clamped() {
    let (img, corners) = synthetic_board();
    let board = Board::new(
        BoardSize::new(6, 5),
        corners,
        &img.as_view(),
        &BoardParams::default(),
    )
    .expect("board");

    assert_eq!(board.center(), Point2::new(60.0, 50.0));
    assert_eq!(
        board.marker_search_rect(1.0, 120, 100),
        PixelRect::new(10, 10, 100, 80)
    );
    assert_eq!(
        board.marker_search_rect(3.0, 120, 100),
        PixelRect::new(0, 0, 120, 100)
    );
}

#[test]
fn no_reserved_marker_uses_all_samples() {
    let (img, corners) = synthetic_board();
    let params = BoardParams {
        marker_sample: None,
        ..BoardParams::default()
    };
    let board = Board::new(BoardSize::new(6, 5), corners, &img.as_view(), &params).expect("board");
    assert!(board.marker_cell().is_none());
    assert!(board
        .classification()
        .groups
        .iter()
        .any(|g| g.class == ColorClass::CYAN));
}

#[test]
fn rejects_invalid_configurations() {
    let (img, corners) = synthetic_board();
    let view = img.as_view();
    let params = BoardParams::default();

    let err = Board::new(BoardSize::new(6, 6), corners.clone(), &view, &params).unwrap_err();
    assert_eq!(
        err,
        BoardError::Detection(DetectionError::SymmetricBoard {
            width: 6,
            height: 6
        })
    );

    let err = Board::new(BoardSize::new(6, 5), corners[1..].to_vec(), &view, &params).unwrap_err();
    assert_eq!(
        err,
        BoardError::Detection(DetectionError::CornerCountMismatch {
            expected: 30,
            got: 29
        })
    );

    let bad_marker = BoardParams {
        marker_sample: Some(6),
        ..BoardParams::default()
    };
    let err = Board::new(BoardSize::new(6, 5), corners.clone(), &view, &bad_marker).unwrap_err();
    assert_eq!(
        err,
        BoardError::InvalidMarkerSample {
            index: 6,
            samples: 6
        }
    );

    let err = Board::new(BoardSize::new(3, 2), corners[..6].to_vec(), &view, &params).unwrap_err();
    assert_eq!(
        err,
        BoardError::NotEnoughCells {
            cells: 1,
            samples: 6
        }
    );

    let ml = BoardParams {
        classifier: ClassifierKind::MaxLikelihood,
        ..BoardParams::default()
    };
    let err = Board::new(BoardSize::new(6, 5), corners, &view, &ml).unwrap_err();
    assert_eq!(
        err,
        BoardError::Classify(ClassifyError::NotImplemented(
            ClassifierKind::MaxLikelihood
        ))
    );
}

#[test]
fn cell_outside_the_image_is_reported() {
    let (img, _) = synthetic_board();
    let far: Vec<Point2<f32>> = corners(6, 5)
        .into_iter()
        .map(|p| Point2::new(p.x + 100.0, p.y))
        .collect();
    let err = Board::new(
        BoardSize::new(6, 5),
        far,
        &img.as_view(),
        &BoardParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, BoardError::Geometry { .. }), "{err:?}");
}

#[test]
fn params_deserialize_with_defaults() {
    let params: BoardParams =
        serde_json::from_str(r#"{ "classifier": "median", "marker_sample": null }"#)
            .expect("json");
    assert_eq!(params.sample_cells, 6);
    assert_eq!(params.marker_sample, None);
    assert_eq!(params.classifier, ClassifierKind::Median);
}
