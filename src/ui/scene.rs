//! Bubble-level draw list.
//!
//! Layers, back to front:
//!
//! 1. white background
//! 2. black playfield inset by [`BORDER`]
//! 3. target circle, fixed at the centre (black fill, white outline)
//! 4. bubble at the cursor (white fill)
//! 5. `Level!` label, bottom-centre anchored, only while level
//!
//! Composition only touches the target's buffer; flushing is the caller's
//! job.

use crate::config::{
    BORDER, CIRCLE_RADIUS, CIRCLE_STROKE, HEIGHT, LABEL_BOTTOM_MARGIN, LEVEL_LABEL, WIDTH,
};
use crate::level::tilt::DisplayCursor;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

/// Circle bounding-box diameter for [`CIRCLE_RADIUS`].
const CIRCLE_DIAMETER: u32 = CIRCLE_RADIUS * 2 + 1;

/// Centre of the panel.
pub fn panel_center() -> Point {
    Point::new((WIDTH / 2) as i32, (HEIGHT / 2) as i32)
}

/// Anchor of the label (bottom-centre of its bounding box).
pub fn label_anchor() -> Point {
    Point::new((WIDTH / 2) as i32, (HEIGHT - LABEL_BOTTOM_MARGIN) as i32)
}

fn target_style() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyleBuilder::new()
        .fill_color(BinaryColor::Off)
        .stroke_color(BinaryColor::On)
        .stroke_width(CIRCLE_STROKE)
        .build()
}

fn bubble_style() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyleBuilder::new()
        .fill_color(BinaryColor::On)
        .stroke_color(BinaryColor::On)
        .stroke_width(CIRCLE_STROKE)
        .build()
}

/// Compose one frame of the level onto `target`.
pub fn draw_level_scene<D>(
    target: &mut D,
    cursor: DisplayCursor,
    label_visible: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::zero(), Size::new(WIDTH, HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target)?;

    Rectangle::new(
        Point::new(BORDER as i32, BORDER as i32),
        Size::new(WIDTH - BORDER * 2, HEIGHT - BORDER * 2),
    )
    .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
    .draw(target)?;

    Circle::with_center(panel_center(), CIRCLE_DIAMETER)
        .into_styled(target_style())
        .draw(target)?;

    let (x, y) = cursor.center();
    Circle::with_center(Point::new(x, y), CIRCLE_DIAMETER)
        .into_styled(bubble_style())
        .draw(target)?;

    if label_visible {
        let character_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Bottom)
            .build();
        Text::with_text_style(LEVEL_LABEL, label_anchor(), character_style, text_style)
            .draw(target)?;
    }

    Ok(())
}
