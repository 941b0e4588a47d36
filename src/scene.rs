mod buffer;
mod draw;
mod instance;

pub use self::buffer::{
    AppendStatus, GeomCategory, GeometryBuffer, GeometryPrimitive, PrimitiveKind,
    DEFAULT_LABEL_CAPACITY, FLAT_DEPTH,
};
pub use self::draw::{
    draw_circle, draw_ellipse, draw_label, draw_line, draw_rectangle, draw_sphere,
};
pub use self::instance::{pack_instances, DecorInstance, NO_LABEL};
