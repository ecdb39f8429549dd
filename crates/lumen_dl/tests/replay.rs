//! End-to-end replay tests through a recording canvas

use std::sync::Arc;

use lumen_core::{Color, FillType, Point, Rect, RoundedRect, Size};
use lumen_dl::testing::{CanvasCall, RecordingCanvas};
use lumen_dl::{
    DisplayListBuilder, Dispatcher, DlBlendMode, DlColor, DlDrawStyle, DlImage, DlImageSampling,
    DlRSTransform, DlVertices,
};
use lumen_paint::{BlendMode, Canvas, PaintStyle, Texture};

fn red_rect_then_nested_blue() -> (DisplayListBuilder, Arc<lumen_dl::DisplayList>) {
    let mut outer = DisplayListBuilder::new();
    outer.set_color(DlColor::RED);
    outer.set_draw_style(DlDrawStyle::Fill);
    outer.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0));

    let mut nested = DisplayListBuilder::new();
    nested.set_color(DlColor::BLUE);
    nested.draw_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
    (outer, Arc::new(nested.build()))
}

#[test]
fn test_nested_replay_isolates_paint() {
    let (mut outer, nested) = red_rect_then_nested_blue();
    outer.draw_display_list(nested, 1.0);
    let list = outer.build();

    let mut dispatcher = Dispatcher::new(RecordingCanvas::new());
    dispatcher.dispatch_display_list(&list);

    // Outer paint is red again after the nested call returns.
    assert_eq!(dispatcher.paint().color, Color::RED);

    let rects: Vec<(Rect, Color)> = dispatcher
        .canvas()
        .calls()
        .iter()
        .filter_map(|call| match call {
            CanvasCall::DrawRect { rect, paint } => Some((*rect, paint.color)),
            _ => None,
        })
        .collect();
    assert_eq!(
        rects,
        vec![
            (Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED),
            (Rect::new(0.0, 0.0, 5.0, 5.0), Color::BLUE),
        ]
    );
}

#[test]
fn test_nested_replay_with_opacity_still_isolates() {
    let (mut outer, nested) = red_rect_then_nested_blue();
    outer.draw_display_list(nested, 0.25);
    let list = outer.build();

    let mut dispatcher = Dispatcher::new(RecordingCanvas::new());
    dispatcher.dispatch_display_list(&list);
    assert_eq!(dispatcher.paint().color, Color::RED);
    assert_eq!(dispatcher.replay_depth(), 0);

    let picture = dispatcher.end_recording();
    let layers: Vec<_> = picture
        .calls
        .iter()
        .filter(|call| matches!(call, CanvasCall::SaveLayer { .. }))
        .collect();
    assert_eq!(layers.len(), 1);
    match layers[0] {
        CanvasCall::SaveLayer { paint, .. } => {
            assert_eq!(paint.color, Color::rgba(0.0, 0.0, 0.0, 0.25));
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_save_restore_and_clip_flow() {
    let mut builder = DisplayListBuilder::new();
    builder.save();
    builder.translate(5.0, 5.0);
    builder.clip_rect(
        Rect::new(0.0, 0.0, 20.0, 20.0),
        lumen_dl::DlClipOp::Intersect,
        true,
    );
    builder.draw_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    builder.restore();
    let list = builder.build();

    let mut dispatcher = Dispatcher::new(RecordingCanvas::new());
    dispatcher.dispatch_display_list(&list);
    assert_eq!(dispatcher.canvas().save_count(), 1);

    let calls = dispatcher.canvas().calls();
    assert!(matches!(calls[0], CanvasCall::Save));
    assert!(matches!(calls[1], CanvasCall::Translate { .. }));
    assert!(matches!(calls[2], CanvasCall::ClipRect { .. }));
    assert!(matches!(calls[3], CanvasCall::DrawRect { .. }));
    assert!(matches!(calls[4], CanvasCall::Restore));
}

#[test]
fn test_draw_color_uses_transient_paint() {
    let mut builder = DisplayListBuilder::new();
    builder.set_color(DlColor::RED);
    builder.draw_color(DlColor::GREEN, DlBlendMode::Plus);
    let list = builder.build();

    let mut dispatcher = Dispatcher::new(RecordingCanvas::new());
    dispatcher.dispatch_display_list(&list);

    match &dispatcher.canvas().calls()[0] {
        CanvasCall::DrawPaint { paint } => {
            assert_eq!(paint.color, Color::GREEN);
            assert_eq!(paint.blend_mode, BlendMode::Plus);
        }
        other => panic!("unexpected call {other:?}"),
    }
    // The transient paint never touches the current attributes.
    assert_eq!(dispatcher.paint().color, Color::RED);
}

#[test]
fn test_double_rounded_rect_renders_even_odd() {
    let mut builder = DisplayListBuilder::new();
    builder.draw_double_rounded_rect(
        RoundedRect::simple(Rect::new(0.0, 0.0, 20.0, 20.0), 4.0),
        RoundedRect::simple(Rect::new(5.0, 5.0, 10.0, 10.0), 2.0),
    );
    let list = builder.build();

    let mut dispatcher = Dispatcher::new(RecordingCanvas::new());
    dispatcher.dispatch_display_list(&list);
    match &dispatcher.canvas().calls()[0] {
        CanvasCall::DrawPath { path, .. } => {
            assert_eq!(path.fill_type(), FillType::EvenOdd);
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[test]
fn test_vertices_and_atlas_roundtrip() {
    let texture = Arc::new(Texture::new(Size::new(64.0, 64.0)));
    let mut builder = DisplayListBuilder::new();
    builder.draw_vertices(
        DlVertices {
            positions: vec![Point::ZERO, Point::new(10.0, 0.0), Point::new(0.0, 10.0)],
            colors: Some(vec![DlColor::RED, DlColor::GREEN, DlColor::BLUE]),
            ..DlVertices::default()
        },
        DlBlendMode::Modulate,
    );
    builder.draw_atlas(
        DlImage::new(texture),
        vec![DlRSTransform::default(), DlRSTransform::default()],
        vec![
            Rect::new(0.0, 0.0, 8.0, 8.0),
            Rect::new(8.0, 0.0, 8.0, 8.0),
        ],
        vec![],
        DlBlendMode::SrcOver,
        DlImageSampling::NearestNeighbor,
        None,
        true,
    );
    let list = builder.build();

    let mut dispatcher = Dispatcher::new(RecordingCanvas::new());
    dispatcher.dispatch_display_list(&list);

    let calls = dispatcher.canvas().calls();
    assert!(matches!(
        &calls[0],
        CanvasCall::DrawVertices {
            vertex_count: 3,
            blend_mode: BlendMode::Modulate,
            ..
        }
    ));
    assert!(matches!(
        &calls[1],
        CanvasCall::DrawAtlas {
            sprite_count: 2,
            ..
        }
    ));
}

#[test]
fn test_stroked_line_replay() {
    let mut builder = DisplayListBuilder::new();
    builder.set_draw_style(DlDrawStyle::Fill);
    builder.draw_line(Point::ZERO, Point::new(10.0, 10.0));
    let list = builder.build();

    let mut dispatcher = Dispatcher::new(RecordingCanvas::new());
    dispatcher.dispatch_display_list(&list);
    match &dispatcher.canvas().calls()[0] {
        CanvasCall::DrawPath { paint, .. } => assert_eq!(paint.style, PaintStyle::Stroke),
        other => panic!("unexpected call {other:?}"),
    }
}

#[test]
fn test_end_recording_resets_canvas() {
    let mut dispatcher = Dispatcher::new(RecordingCanvas::new());
    let mut builder = DisplayListBuilder::new();
    builder.draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
    dispatcher.dispatch_display_list(&builder.build());

    let picture = dispatcher.end_recording();
    assert_eq!(picture.calls.len(), 1);
    assert!(dispatcher.canvas().calls().is_empty());
}
