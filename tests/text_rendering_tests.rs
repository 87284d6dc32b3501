//! Text drawn with real system fonts through the production rasterizer.
//!
//! Each test returns early with a note on stderr when the machine has none of
//! the candidate families installed.
#![cfg(feature = "system-fonts")]

use cardwright::{Canvas, Color, FontRasterizer, LayoutConfig, SharedFontLibrary, TextBackend, TextStyle};
use cardwright_layout::text::{LineSegment, REFERENCE_TEXT, TextSegment};
use cardwright_style::YAlignment;
use cardwright_types::Point;

const CANDIDATE_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "FreeSans",
    "Arial",
    "Helvetica",
    "sans-serif",
];

const WHITE: [u8; 4] = [255, 255, 255, 255];

fn system_rasterizer(font_size: f32) -> Option<(FontRasterizer, TextStyle)> {
    let library = SharedFontLibrary::new().with_system_fonts(true);
    let style = CANDIDATE_FAMILIES.iter().find_map(|family| {
        let style = TextStyle::new(*family, font_size, Color::rgb(0, 0, 0));
        library.resolve_style(&style).ok().map(|_| style)
    });
    match style {
        Some(style) => Some((FontRasterizer::new(library, &LayoutConfig::default()), style)),
        None => {
            eprintln!("Warning: no system sans-serif font found, skipping");
            None
        }
    }
}

/// Rows and columns that hold at least one non-background pixel.
fn ink_extent(canvas: &Canvas) -> Option<(u32, u32, u32, u32)> {
    let mut extent: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in canvas.image().enumerate_pixels() {
        if pixel.0 == WHITE {
            continue;
        }
        extent = Some(match extent {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    extent
}

#[test]
fn test_top_aligned_segment_ink_starts_at_its_box() {
    let Some((rasterizer, style)) = system_rasterizer(20.0) else {
        return;
    };
    let segment = TextSegment::new(REFERENCE_TEXT, &style, vec![], &rasterizer).unwrap();
    let size = segment.size();
    assert!(segment.height() > 0.0);
    assert_eq!(size.y, segment.height());

    let mut canvas = Canvas::new(900, 100, &Color::rgb(255, 255, 255));
    segment
        .draw(Point::new(10.0, 30.0), size, &mut canvas, YAlignment::Top, &rasterizer)
        .unwrap();

    let (x0, y0, _, y1) = ink_extent(&canvas).expect("reference text leaves ink");
    assert!((29..=31).contains(&y0), "ink starts at row {}", y0);
    assert!((9..=12).contains(&x0), "ink starts at column {}", x0);
    let bottom = 30.0 + segment.height();
    assert!(
        (y1 as f32 - bottom).abs() <= 2.0,
        "ink ends at row {}, box ends at {}",
        y1,
        bottom
    );
}

#[test]
fn test_bottom_aligned_segment_sits_on_the_line_bottom() {
    let Some((rasterizer, style)) = system_rasterizer(16.0) else {
        return;
    };
    let segment = TextSegment::new(REFERENCE_TEXT, &style, vec![], &rasterizer).unwrap();
    let line = Point::new(segment.size().x, segment.height() + 20.0);

    let mut canvas = Canvas::new(800, 100, &Color::rgb(255, 255, 255));
    segment
        .draw(Point::new(0.0, 10.0), line, &mut canvas, YAlignment::Bottom, &rasterizer)
        .unwrap();

    let (_, y0, _, _) = ink_extent(&canvas).expect("reference text leaves ink");
    assert!((29..=31).contains(&y0), "ink starts at row {}", y0);
}

#[test]
fn test_measured_bounds_match_drawn_ink() {
    let Some((rasterizer, style)) = system_rasterizer(24.0) else {
        return;
    };
    let bounds = rasterizer.bounds("Hello", &style).unwrap();
    assert!(bounds.width() > 0.0 && bounds.height() > 0.0);
    assert!(bounds.top < 0.0, "ink rises above the baseline");

    let blank = rasterizer.bounds("   ", &style).unwrap();
    assert_eq!(blank.height(), 0.0);
    assert!(blank.advance > 0.0);

    let mut canvas = Canvas::new(200, 60, &Color::rgb(255, 255, 255));
    let origin = Point::new(20.0, 40.0);
    rasterizer.draw_text(&mut canvas, "Hello", &style, origin).unwrap();

    let (x0, y0, x1, y1) = ink_extent(&canvas).expect("text leaves ink");
    let expected = bounds.at(origin);
    // Vertically the bounds are the ink box; horizontally they also span the
    // side bearings and the advance.
    assert!((y0 as f32 - expected.y).abs() <= 1.5, "top {} vs {}", y0, expected.y);
    assert!((y1 as f32 + 1.0 - expected.bottom()).abs() <= 1.5);
    assert!(x0 as f32 >= expected.x - 1.0, "left {} vs {}", x0, expected.x);
    assert!(x1 as f32 + 1.0 <= expected.right() + 1.0, "right {} vs {}", x1, expected.right());
}
