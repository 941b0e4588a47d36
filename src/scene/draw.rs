use super::buffer::{AppendStatus, GeometryBuffer, GeometryPrimitive, PrimitiveKind, FLAT_DEPTH};
use glam::{Mat3, Vec3, Vec4};

pub fn draw_rectangle(
    buffer: &mut GeometryBuffer,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    rgba: Vec4,
) -> AppendStatus {
    if buffer.is_full() {
        return buffer.reject();
    }
    buffer.push(GeometryPrimitive::decor(
        PrimitiveKind::Rectangle,
        Vec3::new(x, y, 0.0),
        Vec3::new(width, height, FLAT_DEPTH),
        rgba,
    ))
}

/// A line is a thin rectangle centred on the segment midpoint, rotated about z.
pub fn draw_line(
    buffer: &mut GeometryBuffer,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    width: f32,
    rgba: Vec4,
) -> AppendStatus {
    if buffer.is_full() {
        return buffer.reject();
    }
    let dx = x2 - x1;
    let dy = y2 - y1;
    let length = (dx * dx + dy * dy).sqrt();
    let angle = dy.atan2(dx);
    let (sin_a, cos_a) = angle.sin_cos();

    // Column-major: first column is the rotated x axis.
    let rotation = Mat3::from_cols(
        Vec3::new(cos_a, sin_a, 0.0),
        Vec3::new(-sin_a, cos_a, 0.0),
        Vec3::Z,
    );

    buffer.push(
        GeometryPrimitive::decor(
            PrimitiveKind::Line,
            Vec3::new((x1 + x2) * 0.5, (y1 + y2) * 0.5, 0.0),
            Vec3::new(length * 0.5, width * 0.5, FLAT_DEPTH),
            rgba,
        )
        .with_rotation(rotation),
    )
}

pub fn draw_ellipse(
    buffer: &mut GeometryBuffer,
    x: f32,
    y: f32,
    radius_x: f32,
    radius_y: f32,
    rgba: Vec4,
) -> AppendStatus {
    if buffer.is_full() {
        return buffer.reject();
    }
    buffer.push(GeometryPrimitive::decor(
        PrimitiveKind::Ellipse,
        Vec3::new(x, y, 0.0),
        Vec3::new(radius_x, radius_y, FLAT_DEPTH),
        rgba,
    ))
}

pub fn draw_circle(
    buffer: &mut GeometryBuffer,
    x: f32,
    y: f32,
    radius: f32,
    rgba: Vec4,
) -> AppendStatus {
    draw_ellipse(buffer, x, y, radius, radius, rgba)
}

pub fn draw_sphere(
    buffer: &mut GeometryBuffer,
    center: Vec3,
    radius: f32,
    rgba: Vec4,
) -> AppendStatus {
    if buffer.is_full() {
        return buffer.reject();
    }
    buffer.push(GeometryPrimitive::decor(
        PrimitiveKind::Sphere,
        center,
        Vec3::splat(radius),
        rgba,
    ))
}

/// Labels are always opaque; `rgb` carries only the colour channels.
pub fn draw_label(
    buffer: &mut GeometryBuffer,
    x: f32,
    y: f32,
    z: f32,
    text: &str,
    size: f32,
    rgb: Vec3,
) -> AppendStatus {
    if buffer.is_full() {
        return buffer.reject();
    }
    let text = buffer.fit_label(text);
    buffer.push(GeometryPrimitive::decor(
        PrimitiveKind::Label(text),
        Vec3::new(x, y, z),
        Vec3::splat(size),
        rgb.extend(1.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::GeomCategory;
    use std::f32::consts::FRAC_PI_2;

    const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

    #[test]
    fn line_is_a_rotated_half_extent_box_at_the_midpoint() {
        let mut buffer = GeometryBuffer::new(4);
        let status = draw_line(&mut buffer, 0.0, 0.0, 0.0, 2.0, 0.1, RED);
        assert_eq!(status, AppendStatus::Appended);

        let line = &buffer.primitives()[0];
        assert_eq!(line.kind, PrimitiveKind::Line);
        assert!((line.position - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
        assert!((line.size.x - 1.0).abs() < 1e-6);
        assert!((line.size.y - 0.05).abs() < 1e-6);
        assert_eq!(line.size.z, FLAT_DEPTH);

        // Vertical segment: local x axis maps to world +y.
        let expected = Mat3::from_rotation_z(FRAC_PI_2);
        assert!(line.rotation.abs_diff_eq(expected, 1e-6));
        let rotated = line.rotation * Vec3::X;
        assert!((rotated - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn flat_shapes_sit_on_the_z_zero_plane_with_identity_rotation() {
        let mut buffer = GeometryBuffer::new(4);
        let _ = draw_rectangle(&mut buffer, 1.0, 2.0, 0.5, 0.25, RED);
        let _ = draw_ellipse(&mut buffer, -1.0, 0.5, 0.3, 0.2, RED);
        for primitive in &buffer {
            assert_eq!(primitive.position.z, 0.0);
            assert_eq!(primitive.rotation, Mat3::IDENTITY);
            assert_eq!(primitive.category, GeomCategory::Decor);
        }
        let sizes: Vec<Vec3> = buffer.iter().map(|p| p.size).collect();
        assert_eq!(sizes[0], Vec3::new(0.5, 0.25, FLAT_DEPTH));
        assert_eq!(sizes[1], Vec3::new(0.3, 0.2, FLAT_DEPTH));
    }

    #[test]
    fn label_is_opaque_and_truncated_to_host_slot() {
        let mut buffer = GeometryBuffer::with_label_capacity(2, 6);
        let rgb = Vec3::new(0.0, 0.5, 1.0);
        let _ = draw_label(&mut buffer, 0.0, 0.0, 0.02, "SPEEDOMETER", 0.15, rgb);
        let label = &buffer.primitives()[0];
        assert_eq!(label.kind.text(), Some("SPEED"));
        assert_eq!(label.rgba.w, 1.0);
        assert_eq!(label.size, Vec3::splat(0.15));
        assert_eq!(label.position.z, 0.02);
    }

    #[test]
    fn every_drawer_drops_silently_when_full() {
        let mut buffer = GeometryBuffer::new(1);
        let dropped = AppendStatus::Dropped;
        assert!(draw_circle(&mut buffer, 0.0, 0.0, 1.0, RED).is_appended());
        let status = draw_rectangle(&mut buffer, 0.0, 0.0, 1.0, 1.0, RED);
        assert_eq!(status, dropped);
        let status = draw_line(&mut buffer, 0.0, 0.0, 1.0, 1.0, 0.1, RED);
        assert_eq!(status, dropped);
        assert_eq!(draw_ellipse(&mut buffer, 0.0, 0.0, 1.0, 2.0, RED), dropped);
        assert_eq!(draw_sphere(&mut buffer, Vec3::ZERO, 0.2, RED), dropped);
        assert_eq!(
            draw_label(&mut buffer, 0.0, 0.0, 0.0, "x", 0.1, Vec3::ONE),
            dropped
        );
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.dropped(), 5);
    }
}
