use super::color::{temperature_rgb, FuelBand};
use crate::scene::{draw_label, draw_line, draw_rectangle, GeometryBuffer};
use glam::{Vec2, Vec3, Vec4};
use std::f32::consts::TAU;

pub use crate::telemetry::{
    BASE_TEMPERATURE_C as TEMPERATURE_MIN_C, MAX_TEMPERATURE_C as TEMPERATURE_MAX_C,
};

const LOW_FUEL_PERCENT: f64 = 20.0;
const OVERHEAT_C: f64 = 100.0;
// Blink phase advances 0.1 per render; ten renders make one blink cycle.
const BLINK_STEP: f32 = 0.1;
const BLINK_CYCLE: u8 = 10;
const PULSE_STEP: f32 = 0.05;
// The pulse reads sin(5 * phase), which repeats every 2pi / 5.
const PULSE_PERIOD: f32 = TAU / 5.0;
// Fills narrower than this are drawn as an empty gauge.
const MIN_FILL_WIDTH: f32 = 0.01;

const OUTLINE: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.3);
const EMPTY_BAR: Vec4 = Vec4::new(0.3, 0.3, 0.3, 0.5);
const TICK_COLOR: Vec4 = Vec4::new(0.2, 0.2, 0.3, 0.8);
const MARKER_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.8);
const VALUE_TEXT: Vec3 = Vec3::new(0.1, 0.1, 1.0);
const WARNING_TEXT: Vec3 = Vec3::new(1.0, 0.1, 0.1);

/// What a bar gauge drew this frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BarOutcome {
    /// Colour of the filled bar, `None` when the empty placeholder was drawn.
    pub fill_rgb: Option<Vec3>,
    pub fill_width: f32,
    /// Whether the alert animation branch ran this frame.
    pub alert_active: bool,
    /// Alpha of the alert overlay when it was visible.
    pub overlay_alpha: Option<f32>,
}

#[derive(Clone, Debug, Default)]
pub struct FuelGauge {
    blink_ticks: u8,
}

impl FuelGauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position in the current blink cycle, in `[0, 1)`.
    pub fn blink_phase(&self) -> f32 {
        self.blink_ticks as f32 * BLINK_STEP
    }

    /// The overlay shows in the second half of each cycle.
    fn blink_visible(&self) -> bool {
        self.blink_ticks > BLINK_CYCLE / 2
    }

    pub fn draw(
        &mut self,
        buffer: &mut GeometryBuffer,
        fuel_percent: f64,
        center: Vec2,
        width: f32,
        height: f32,
    ) -> BarOutcome {
        let ratio = fill_ratio(fuel_percent / 100.0);
        let low = fuel_percent < LOW_FUEL_PERCENT;
        let mut outcome = BarOutcome::default();

        let rgb = FuelBand::from_percent(fuel_percent).rgb();
        match draw_fill(buffer, ratio, rgb, center, width, height) {
            Some((rgb, fill)) => {
                outcome.fill_rgb = Some(rgb);
                outcome.fill_width = fill;
                if low {
                    outcome.alert_active = true;
                    self.blink_ticks = (self.blink_ticks + 1) % BLINK_CYCLE;
                    if self.blink_visible() {
                        let alpha = 0.3;
                        draw_rectangle(
                            buffer,
                            center.x,
                            center.y,
                            width,
                            height,
                            Vec4::new(1.0, 0.2, 0.2, alpha),
                        );
                        outcome.overlay_alpha = Some(alpha);
                    }
                }
            }
            None => draw_empty(buffer, center, width, height),
        }

        draw_label(
            buffer,
            center.x,
            center.y + height * 0.8,
            0.02,
            &format!("FUEL: {fuel_percent:.1}%"),
            0.1,
            VALUE_TEXT,
        );
        if low {
            draw_warning(buffer, center, height, "LOW FUEL!");
        }
        draw_scale_ticks(buffer, center, width, height);
        outcome
    }
}

#[derive(Clone, Debug, Default)]
pub struct TemperatureGauge {
    pulse_phase: f32,
}

impl TemperatureGauge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulse_phase(&self) -> f32 {
        self.pulse_phase
    }

    pub fn draw(
        &mut self,
        buffer: &mut GeometryBuffer,
        temperature_c: f64,
        center: Vec2,
        width: f32,
        height: f32,
    ) -> BarOutcome {
        let span = TEMPERATURE_MAX_C - TEMPERATURE_MIN_C;
        let raw_ratio = (temperature_c - TEMPERATURE_MIN_C) / span;
        let ratio = fill_ratio(raw_ratio);
        let hot = temperature_c > OVERHEAT_C;
        let mut outcome = BarOutcome::default();

        match draw_fill(buffer, ratio, temperature_rgb(ratio), center, width, height) {
            Some((rgb, fill)) => {
                outcome.fill_rgb = Some(rgb);
                outcome.fill_width = fill;
                if hot {
                    outcome.alert_active = true;
                    self.pulse_phase = (self.pulse_phase + PULSE_STEP).rem_euclid(PULSE_PERIOD);
                    let alpha = 0.3 + 0.3 * (self.pulse_phase * 5.0).sin();
                    draw_rectangle(
                        buffer,
                        center.x,
                        center.y,
                        width,
                        height,
                        Vec4::new(1.0, 0.3, 0.3, alpha),
                    );
                    outcome.overlay_alpha = Some(alpha);
                }
            }
            None => draw_empty(buffer, center, width, height),
        }

        draw_label(
            buffer,
            center.x,
            center.y + height * 0.8,
            0.02,
            &format!("TEMP: {temperature_c:.1}°C"),
            0.1,
            VALUE_TEXT,
        );
        if hot {
            draw_warning(buffer, center, height, "OVERHEAT!");
        }
        draw_scale_ticks(buffer, center, width, height);

        if (0.0..=1.0).contains(&raw_ratio) {
            let marker_x = center.x - width * 0.5 + width * raw_ratio as f32;
            let tip_y = center.y - height * 0.4;
            let base_y = center.y - height * 0.2;
            for side in [-0.05, 0.05] {
                let base_x = marker_x + side;
                draw_line(buffer, marker_x, tip_y, base_x, base_y, 0.03, MARKER_COLOR);
            }
        }
        outcome
    }
}

fn fill_ratio(ratio: f64) -> f32 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0) as f32
    }
}

/// Draws the coloured fill and its outline, returning the colour and width used.
fn draw_fill(
    buffer: &mut GeometryBuffer,
    ratio: f32,
    rgb: Vec3,
    center: Vec2,
    width: f32,
    height: f32,
) -> Option<(Vec3, f32)> {
    let fill = ratio * width;
    if fill <= MIN_FILL_WIDTH {
        return None;
    }
    let bar_x = center.x - (width - fill) * 0.5;
    let bar_height = height * 0.8;
    draw_rectangle(buffer, bar_x, center.y, fill, bar_height, rgb.extend(1.0));
    draw_rectangle(buffer, bar_x, center.y, fill, bar_height, OUTLINE);
    Some((rgb, fill))
}

fn draw_warning(buffer: &mut GeometryBuffer, center: Vec2, height: f32, text: &str) {
    let y = center.y - height * 0.8;
    draw_label(buffer, center.x, y, 0.02, text, 0.12, WARNING_TEXT);
}

fn draw_empty(buffer: &mut GeometryBuffer, center: Vec2, width: f32, height: f32) {
    draw_rectangle(buffer, center.x, center.y, width, height * 0.6, EMPTY_BAR);
}

fn draw_scale_ticks(buffer: &mut GeometryBuffer, center: Vec2, width: f32, height: f32) {
    for i in 0..=5 {
        let x = center.x - width * 0.5 + (width / 5.0) * i as f32;
        draw_line(
            buffer,
            x,
            center.y - height * 0.4,
            x,
            center.y - height * 0.2,
            0.02,
            TICK_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PrimitiveKind;

    const CENTER: Vec2 = Vec2::new(-2.5, -0.5);

    fn labels(buffer: &GeometryBuffer) -> Vec<&str> {
        buffer.iter().filter_map(|p| p.kind.text()).collect()
    }

    #[test]
    fn healthy_fuel_is_green_without_blink() {
        let mut gauge = FuelGauge::new();
        let mut buffer = GeometryBuffer::new(64);
        let outcome = gauge.draw(&mut buffer, 60.0, CENTER, 1.5, 0.4);

        assert_eq!(outcome.fill_rgb, Some(FuelBand::Green.rgb()));
        assert!(!outcome.alert_active);
        assert_eq!(outcome.overlay_alpha, None);
        assert_eq!(gauge.blink_phase(), 0.0);
        assert!((outcome.fill_width - 0.9).abs() < 1e-6);
        assert_eq!(labels(&buffer), vec!["FUEL: 60.0%"]);

        // Fill bar is shifted left so it grows from the gauge's left edge.
        let bar = &buffer.primitives()[0];
        assert!((bar.position.x - (CENTER.x - 0.3)).abs() < 1e-6);
        assert!((bar.size.y - 0.32).abs() < 1e-6);
    }

    #[test]
    fn low_fuel_is_red_and_blinks() {
        let mut gauge = FuelGauge::new();
        let mut buffer = GeometryBuffer::new(64);
        let first = gauge.draw(&mut buffer, 15.0, CENTER, 1.5, 0.4);

        assert_eq!(first.fill_rgb, Some(FuelBand::Red.rgb()));
        assert!(first.alert_active);
        assert_eq!(first.overlay_alpha, None);
        assert!(labels(&buffer).contains(&"LOW FUEL!"));
    }

    #[test]
    fn blink_shows_on_the_back_half_of_every_cycle() {
        let mut gauge = FuelGauge::new();
        let mut buffer = GeometryBuffer::new(64);
        let shown: Vec<bool> = (0..20)
            .map(|_| {
                buffer.clear();
                gauge
                    .draw(&mut buffer, 15.0, CENTER, 1.5, 0.4)
                    .overlay_alpha
                    .is_some()
            })
            .collect();

        let cycle = [
            false, false, false, false, false, true, true, true, true, false,
        ];
        assert_eq!(shown[..10], cycle);
        assert_eq!(shown[10..], cycle);
        assert_eq!(gauge.blink_phase(), 0.0);
    }

    #[test]
    fn blink_phase_stays_bounded_over_a_long_run() {
        let mut gauge = FuelGauge::new();
        let mut buffer = GeometryBuffer::new(64);
        let mut shown = 0;
        for _ in 0..1000 {
            buffer.clear();
            if gauge.draw(&mut buffer, 10.0, CENTER, 1.5, 0.4).overlay_alpha.is_some() {
                shown += 1;
            }
            assert!((0.0..1.0).contains(&gauge.blink_phase()));
        }
        assert_eq!(shown, 400);
    }

    #[test]
    fn pulse_keeps_moving_from_a_large_phase() {
        let mut gauge = TemperatureGauge {
            pulse_phase: 1_048_576.0,
        };
        let mut buffer = GeometryBuffer::new(64);
        let mut alphas = Vec::new();
        for _ in 0..20 {
            buffer.clear();
            let outcome = gauge.draw(&mut buffer, 110.0, CENTER, 1.5, 0.4);
            alphas.push(outcome.overlay_alpha.unwrap_or(f32::NAN));
            assert!((0.0..PULSE_PERIOD).contains(&gauge.pulse_phase()));
        }
        let changes = alphas.windows(2).filter(|pair| pair[0] != pair[1]).count();
        assert!(changes >= 18, "{alphas:?}");
        assert!(alphas.iter().all(|alpha| (0.0..=0.61).contains(alpha)));
    }

    #[test]
    fn pulse_phase_wraps_at_its_period() {
        let mut gauge = TemperatureGauge {
            pulse_phase: PULSE_PERIOD - 0.01,
        };
        let mut buffer = GeometryBuffer::new(64);
        gauge.draw(&mut buffer, 110.0, CENTER, 1.5, 0.4);
        assert!((gauge.pulse_phase() - 0.04).abs() < 1e-5);
    }

    #[test]
    fn separate_gauges_keep_separate_phases() {
        let mut a = FuelGauge::new();
        let b = FuelGauge::new();
        let mut buffer = GeometryBuffer::new(64);
        a.draw(&mut buffer, 5.0, CENTER, 1.5, 0.4);
        assert!(a.blink_phase() > 0.0);
        assert_eq!(b.blink_phase(), 0.0);
    }

    #[test]
    fn empty_tank_draws_placeholder() {
        let mut gauge = FuelGauge::new();
        let mut buffer = GeometryBuffer::new(64);
        let outcome = gauge.draw(&mut buffer, 0.0, CENTER, 1.5, 0.4);
        assert_eq!(outcome.fill_rgb, None);
        assert!(!outcome.alert_active);
        let placeholder = &buffer.primitives()[0];
        assert_eq!(placeholder.rgba, EMPTY_BAR);
        assert!((placeholder.size.y - 0.24).abs() < 1e-6);
    }

    #[test]
    fn bar_draws_six_ticks() {
        let mut gauge = FuelGauge::new();
        let mut buffer = GeometryBuffer::new(64);
        gauge.draw(&mut buffer, 80.0, CENTER, 1.5, 0.4);
        let ticks = buffer
            .iter()
            .filter(|p| p.kind == PrimitiveKind::Line && p.rgba == TICK_COLOR)
            .count();
        assert_eq!(ticks, 6);
    }

    #[test]
    fn temperature_pulses_when_overheating() {
        let mut gauge = TemperatureGauge::new();
        let mut buffer = GeometryBuffer::new(64);
        let outcome = gauge.draw(&mut buffer, 110.0, CENTER, 1.5, 0.4);

        assert!(outcome.alert_active);
        let alpha = outcome.overlay_alpha.expect("pulse overlay");
        assert!((alpha - (0.3 + 0.3 * (0.05f32 * 5.0).sin())).abs() < 1e-6);
        assert!((gauge.pulse_phase() - 0.05).abs() < 1e-7);
        assert!(labels(&buffer).contains(&"OVERHEAT!"));
        assert!(labels(&buffer).contains(&"TEMP: 110.0°C"));
    }

    #[test]
    fn temperature_marker_tracks_value() {
        let mut gauge = TemperatureGauge::new();
        let mut buffer = GeometryBuffer::new(64);
        let outcome = gauge.draw(&mut buffer, 73.5, CENTER, 1.5, 0.4);

        assert!(!outcome.alert_active);
        assert_eq!(gauge.pulse_phase(), 0.0);
        let marker: Vec<_> = buffer
            .iter()
            .filter(|p| p.kind == PrimitiveKind::Line && p.rgba == MARKER_COLOR)
            .collect();
        assert_eq!(marker.len(), 2);
        // Both strokes share the tip at the value position.
        let expected_x = CENTER.x - 0.75 + 1.5 * 0.225;
        assert!((marker[0].position.x - (expected_x - 0.025)).abs() < 1e-5);
        assert!((marker[1].position.x - (expected_x + 0.025)).abs() < 1e-5);
    }

    #[test]
    fn temperature_scale_spans_the_telemetry_clamp() {
        let mut gauge = TemperatureGauge::new();
        let mut buffer = GeometryBuffer::new(64);
        let hottest = crate::telemetry::temperature_for_rpm(f64::MAX);
        let outcome = gauge.draw(&mut buffer, hottest, CENTER, 1.5, 0.4);
        assert!((outcome.fill_width - 1.5).abs() < 1e-6);

        buffer.clear();
        let coldest = crate::telemetry::temperature_for_rpm(0.0);
        let outcome = gauge.draw(&mut buffer, coldest, CENTER, 1.5, 0.4);
        assert_eq!(outcome.fill_rgb, None);
    }

    #[test]
    fn temperature_fill_uses_interpolated_band() {
        let mut gauge = TemperatureGauge::new();
        let mut buffer = GeometryBuffer::new(64);
        let outcome = gauge.draw(&mut buffer, 90.0, CENTER, 1.5, 0.4);
        assert_eq!(outcome.fill_rgb, Some(temperature_rgb(0.5)));
    }
}
