//! Cairo painter for gauge plans

use anyhow::Result;
use speedo_core::GaugeState;
use speedo_types::{Color, GaugeConfig};

use crate::layout::{GaugeLayout, Padding};
use crate::plan::{Circle, GaugePlan, Needle, RimArc, TextItem, Tick};

const FONT_FAMILY: &str = "Sans";

/// Render a gauge into a `width` x `height` area
pub fn render_gauge(
    cr: &cairo::Context,
    config: &GaugeConfig,
    state: &GaugeState,
    width: f64,
    height: f64,
) -> Result<()> {
    render_gauge_with_padding(cr, config, state, width, height, Padding::default())
}

/// Render a gauge with padding around the dial
pub fn render_gauge_with_padding(
    cr: &cairo::Context,
    config: &GaugeConfig,
    state: &GaugeState,
    width: f64,
    height: f64,
    padding: Padding,
) -> Result<()> {
    let layout = GaugeLayout::new(width, height, padding, config.metrics());
    if layout.is_empty() {
        return Ok(());
    }

    let plan = GaugePlan::build(config, state, &layout);
    paint_plan(cr, &plan, config)
}

/// Paint a prepared plan
pub fn paint_plan(cr: &cairo::Context, plan: &GaugePlan, config: &GaugeConfig) -> Result<()> {
    cr.save()?;
    cr.translate(plan.offset.x, plan.offset.y);

    // Static parts
    fill_circle(cr, &plan.background, &config.main_circle_color)?;
    draw_rim(cr, &plan.rim, &config.rim_color)?;
    fill_circle(cr, &plan.hub, &config.center_circle_color)?;
    draw_text(cr, &plan.caption, &config.value_color)?;

    draw_ticks(cr, &plan.ticks, plan.mark_width, config)?;
    draw_needle(cr, &plan.needle, &config.needle_color)?;

    cr.restore()?;
    Ok(())
}

fn fill_circle(cr: &cairo::Context, circle: &Circle, color: &Color) -> Result<()> {
    cr.new_path();
    color.apply_to_cairo(cr);
    cr.arc(
        circle.center.x,
        circle.center.y,
        circle.radius,
        0.0,
        2.0 * std::f64::consts::PI,
    );
    cr.fill()?;
    Ok(())
}

fn draw_rim(cr: &cairo::Context, rim: &RimArc, color: &Color) -> Result<()> {
    let center = rim.rect.center();
    let rx = rim.rect.width() / 2.0;
    let ry = rim.rect.height() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return Ok(());
    }

    let start_rad = rim.start_angle.to_radians();
    let end_rad = (rim.start_angle + rim.sweep_angle).to_radians();

    cr.save()?;
    cr.new_path();
    // Build the path in a scaled space so non-square rects give an elliptic arc,
    // then stroke in the original space to keep the line width uniform.
    cr.translate(center.x, center.y);
    cr.scale(rx, ry);
    cr.arc(0.0, 0.0, 1.0, start_rad, end_rad);
    cr.restore()?;

    color.apply_to_cairo(cr);
    cr.set_line_width(rim.width);
    cr.stroke()?;
    Ok(())
}

fn draw_ticks(cr: &cairo::Context, ticks: &[Tick], mark_width: f64, config: &GaugeConfig) -> Result<()> {
    cr.save()?;
    cr.set_line_width(mark_width);

    for tick in ticks {
        cr.new_path();
        config.mark_color.apply_to_cairo(cr);
        cr.move_to(tick.start.x, tick.start.y);
        cr.line_to(tick.end.x, tick.end.y);
        cr.stroke()?;

        if let Some(label) = &tick.label {
            draw_text(cr, label, &config.value_color)?;
        }
    }

    cr.restore()?;
    Ok(())
}

fn draw_text(cr: &cairo::Context, item: &TextItem, color: &Color) -> Result<()> {
    if item.text.is_empty() || item.size <= 0.0 {
        return Ok(());
    }

    cr.save()?;
    cr.select_font_face(FONT_FAMILY, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(item.size);
    color.apply_to_cairo(cr);

    let extents = cr.text_extents(&item.text)?;
    cr.move_to(item.anchor.x - extents.x_advance() / 2.0, item.anchor.y);
    cr.show_text(&item.text)?;

    cr.restore()?;
    Ok(())
}

fn draw_needle(cr: &cairo::Context, needle: &Needle, color: &Color) -> Result<()> {
    let Some((first, rest)) = needle.polygon.split_first() else {
        return Ok(());
    };

    cr.save()?;
    cr.new_path();
    color.apply_to_cairo(cr);
    cr.move_to(first.x, first.y);
    for point in rest {
        cr.line_to(point.x, point.y);
    }
    cr.close_path();
    cr.fill()?;
    cr.restore()?;
    Ok(())
}
