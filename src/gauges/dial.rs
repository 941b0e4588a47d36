use crate::scene::{draw_circle, draw_label, draw_line, GeometryBuffer};
use glam::{Vec2, Vec3, Vec4};
use std::f32::consts::{FRAC_PI_2, TAU};

pub use crate::telemetry::MAX_RPM as TACHOMETER_MAX_RPM;

pub const SPEED_DIAL_MAX_KMH: f64 = 50.0;
pub const TACHOMETER_WARNING_RPM: f64 = 6000.0;

const MINOR_TICKS: usize = 12;
const SPEED_MAJOR_TICKS: usize = 4;
const NEEDLE_LENGTH: f32 = 0.6;
const NEEDLE_TAIL_FRACTION: f32 = 0.3;
const SCALE_LABEL_RADIUS: f32 = 0.7;

const TICK_COLOR: Vec4 = Vec4::new(0.1, 0.1, 0.2, 0.8);
const MAJOR_TICK_COLOR: Vec4 = Vec4::new(0.0, 0.5, 1.0, 0.9);
const SCALE_TEXT: Vec3 = Vec3::new(0.1, 0.1, 0.9);
const VALUE_TEXT: Vec3 = Vec3::new(0.15, 0.1, 0.9);
const UNIT_TEXT: Vec3 = Vec3::new(0.0, 0.3, 0.8);
const WARNING_TEXT: Vec3 = Vec3::new(1.0, 0.1, 0.1);
const WARNING_BAND: Vec3 = Vec3::new(1.0, 0.3, 0.3);

struct DialStyle {
    face: Vec4,
    outer_ring: Vec4,
    inner_ring: Vec4,
    needle: Vec4,
    title: &'static str,
    title_rgb: Vec3,
    unit: &'static str,
    max_value: f64,
    // Scale labels read `i * scale_step` for `i in 0..scale_labels`.
    scale_labels: usize,
    scale_step: u32,
}

const SPEEDOMETER: DialStyle = DialStyle {
    face: Vec4::new(0.7, 0.7, 0.75, 0.7),
    outer_ring: Vec4::new(0.4, 0.7, 1.0, 0.6),
    inner_ring: Vec4::new(0.3, 0.3, 0.4, 0.8),
    needle: Vec4::new(1.0, 0.0, 0.0, 1.0),
    title: "SPEED",
    title_rgb: Vec3::new(0.0, 0.5, 1.0),
    unit: "km/h",
    max_value: SPEED_DIAL_MAX_KMH,
    scale_labels: 6,
    scale_step: 10,
};

const TACHOMETER: DialStyle = DialStyle {
    face: Vec4::new(0.75, 0.75, 0.7, 0.7),
    outer_ring: Vec4::new(1.0, 0.6, 0.3, 0.6),
    inner_ring: Vec4::new(0.4, 0.3, 0.2, 0.8),
    needle: Vec4::new(0.0, 1.0, 0.0, 1.0),
    title: "TACHOMETER",
    title_rgb: Vec3::new(1.0, 0.5, 0.0),
    unit: "RPM",
    max_value: TACHOMETER_MAX_RPM,
    scale_labels: 5,
    scale_step: 2,
};

/// Needle direction in radians: `-pi/2` at ratio 0, one full turn at ratio 1.
pub fn needle_angle(value: f64, max_value: f64) -> f32 {
    let ratio = value / max_value;
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    ratio as f32 * TAU - FRAC_PI_2
}

/// How deep into the red zone the engine is, or `None` below the threshold.
pub fn rpm_warning_ratio(rpm: f64) -> Option<f32> {
    if rpm > TACHOMETER_WARNING_RPM {
        let span = TACHOMETER_MAX_RPM - TACHOMETER_WARNING_RPM;
        Some(((rpm - TACHOMETER_WARNING_RPM) / span).min(1.0) as f32)
    } else {
        None
    }
}

pub fn draw_speedometer(buffer: &mut GeometryBuffer, speed_kmh: f64, center: Vec2, radius: f32) {
    let style = &SPEEDOMETER;
    draw_face(buffer, style, center, radius);
    draw_ticks(buffer, center, radius, MINOR_TICKS, 0.8, 0.02, TICK_COLOR);
    draw_ticks(
        buffer,
        center,
        radius,
        SPEED_MAJOR_TICKS,
        0.75,
        0.03,
        MAJOR_TICK_COLOR,
    );
    draw_scale_labels(buffer, style, center, radius);
    draw_needle(buffer, style, speed_kmh, center, radius);
    draw_readout(buffer, style, &format!("{speed_kmh:.1}"), center, radius);
}

pub fn draw_tachometer(buffer: &mut GeometryBuffer, rpm: f64, center: Vec2, radius: f32) {
    let style = &TACHOMETER;
    let warning = rpm_warning_ratio(rpm);

    draw_face(buffer, style, center, radius);
    if let Some(ratio) = warning {
        for band in 0..3 {
            let alpha = 0.3 + 0.7 * (band as f32 / 3.0);
            draw_circle(
                buffer,
                center.x,
                center.y,
                radius * (0.9 - band as f32 * 0.05),
                WARNING_BAND.extend(alpha * ratio),
            );
        }
    }
    draw_ticks(buffer, center, radius, MINOR_TICKS, 0.8, 0.02, TICK_COLOR);
    draw_scale_labels(buffer, style, center, radius);
    draw_needle(buffer, style, rpm, center, radius);
    draw_readout(buffer, style, &format!("{rpm:.0}"), center, radius);

    if warning.is_some() {
        draw_label(
            buffer,
            center.x,
            center.y - radius * 1.4,
            0.02,
            "HIGH RPM!",
            0.12,
            WARNING_TEXT,
        );
    }
}

fn draw_face(buffer: &mut GeometryBuffer, style: &DialStyle, center: Vec2, radius: f32) {
    draw_circle(buffer, center.x, center.y, radius, style.face);
    draw_circle(buffer, center.x, center.y, radius * 1.05, style.outer_ring);
    draw_circle(buffer, center.x, center.y, radius * 0.95, style.inner_ring);
}

fn draw_ticks(
    buffer: &mut GeometryBuffer,
    center: Vec2,
    radius: f32,
    count: usize,
    inner: f32,
    width: f32,
    color: Vec4,
) {
    let outer = 0.9;
    for i in 0..count {
        let angle = i as f32 * (TAU / count as f32);
        let dir = Vec2::from_angle(angle);
        let a = center + dir * radius * inner;
        let b = center + dir * radius * outer;
        draw_line(buffer, a.x, a.y, b.x, b.y, width, color);
    }
}

fn draw_scale_labels(buffer: &mut GeometryBuffer, style: &DialStyle, center: Vec2, radius: f32) {
    for i in 0..style.scale_labels {
        let angle = i as f32 * (TAU / style.scale_labels as f32) - FRAC_PI_2;
        let p = center + Vec2::from_angle(angle) * radius * SCALE_LABEL_RADIUS;
        let text = (i as u32 * style.scale_step).to_string();
        draw_label(buffer, p.x, p.y, 0.01, &text, 0.1, SCALE_TEXT);
    }
}

fn draw_needle(
    buffer: &mut GeometryBuffer,
    style: &DialStyle,
    value: f64,
    center: Vec2,
    radius: f32,
) {
    let dir = Vec2::from_angle(needle_angle(value, style.max_value));
    let lead = radius * NEEDLE_LENGTH;
    let tip = center + dir * lead;
    let tail = center - dir * lead * NEEDLE_TAIL_FRACTION;

    let color = style.needle;
    for (end, width) in [(tip, 0.025), (tail, 0.02)] {
        draw_line(buffer, center.x, center.y, end.x, end.y, width, color);
    }

    // Hub: dark disc under a light one.
    draw_circle(buffer, center.x, center.y, radius * 0.06, Vec4::W);
    draw_circle(buffer, center.x, center.y, radius * 0.04, Vec4::ONE);
}

fn draw_readout(
    buffer: &mut GeometryBuffer,
    style: &DialStyle,
    value: &str,
    center: Vec2,
    radius: f32,
) {
    draw_label(buffer, center.x, center.y, 0.02, value, 0.15, VALUE_TEXT);
    let unit_y = center.y - radius * 0.25;
    draw_label(buffer, center.x, unit_y, 0.02, style.unit, 0.08, UNIT_TEXT);
    draw_label(
        buffer,
        center.x,
        center.y + radius * 1.2,
        0.02,
        style.title,
        0.15,
        style.title_rgb,
    );
}
