use super::buffer::{GeometryBuffer, GeometryPrimitive, PrimitiveKind};
use bytemuck::{Pod, Zeroable};

/// Flat per-primitive record for uploading decorations to the host rasterizer.
/// Label text is not packed; `label_index` points into the side list returned
/// by [`pack_instances`].
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DecorInstance {
    pub position: [f32; 4],
    pub size: [f32; 4],
    pub rgba: [f32; 4],
    // Rows of the 3x3 rotation, padded to vec4 stride.
    pub rotation: [[f32; 4]; 3],
    pub kind: u32,
    pub label_index: u32,
    _padding: [u32; 2],
}

pub const NO_LABEL: u32 = u32::MAX;

fn kind_id(kind: &PrimitiveKind) -> u32 {
    match kind {
        PrimitiveKind::Rectangle => 0,
        PrimitiveKind::Line => 1,
        PrimitiveKind::Ellipse => 2,
        PrimitiveKind::Sphere => 3,
        PrimitiveKind::Label(_) => 4,
    }
}

impl DecorInstance {
    fn from_primitive(primitive: &GeometryPrimitive, label_index: u32) -> Self {
        let rows = primitive.rotation.transpose();
        Self {
            position: primitive.position.extend(0.0).to_array(),
            size: primitive.size.extend(0.0).to_array(),
            rgba: primitive.rgba.to_array(),
            rotation: [
                rows.x_axis.extend(0.0).to_array(),
                rows.y_axis.extend(0.0).to_array(),
                rows.z_axis.extend(0.0).to_array(),
            ],
            kind: kind_id(&primitive.kind),
            label_index,
            _padding: [0; 2],
        }
    }
}

/// Packs the current frame into instance records plus the label strings they
/// reference.
pub fn pack_instances(buffer: &GeometryBuffer) -> (Vec<DecorInstance>, Vec<&str>) {
    let mut instances = Vec::with_capacity(buffer.len());
    let mut labels = Vec::new();
    for primitive in buffer {
        let label_index = match primitive.kind.text() {
            Some(text) => {
                labels.push(text);
                (labels.len() - 1) as u32
            }
            None => NO_LABEL,
        };
        instances.push(DecorInstance::from_primitive(primitive, label_index));
    }
    (instances, labels)
}
