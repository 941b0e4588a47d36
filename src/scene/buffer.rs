use glam::{Mat3, Vec3, Vec4};

/// Label storage on the host side is a fixed byte array with a terminator slot.
pub const DEFAULT_LABEL_CAPACITY: usize = 100;

/// Half-extent along z for flat 2D items.
pub const FLAT_DEPTH: f32 = 0.001;

/// Host geometry category. Overlay geometry is visual only and never collides.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GeomCategory {
    Decor,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveKind {
    Rectangle,
    Line,
    Ellipse,
    Sphere,
    Label(String),
}

impl PrimitiveKind {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Label(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeometryPrimitive {
    pub kind: PrimitiveKind,
    pub position: Vec3,
    pub size: Vec3,
    pub rgba: Vec4,
    pub rotation: Mat3,
    pub category: GeomCategory,
}

impl GeometryPrimitive {
    pub fn decor(kind: PrimitiveKind, position: Vec3, size: Vec3, rgba: Vec4) -> Self {
        Self {
            kind,
            position,
            size,
            rgba,
            rotation: Mat3::IDENTITY,
            category: GeomCategory::Decor,
        }
    }

    pub fn with_rotation(mut self, rotation: Mat3) -> Self {
        self.rotation = rotation;
        self
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AppendStatus {
    Appended,
    Dropped,
}

impl AppendStatus {
    pub fn is_appended(self) -> bool {
        matches!(self, Self::Appended)
    }
}

/// Host-owned, capacity-bounded primitive arena that is rebuilt every frame.
///
/// Appends past `capacity` are dropped and counted; the length never grows
/// beyond the capacity the host chose when creating the scene.
#[derive(Clone, Debug)]
pub struct GeometryBuffer {
    primitives: Vec<GeometryPrimitive>,
    capacity: usize,
    label_capacity: usize,
    dropped: usize,
}

impl GeometryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self::with_label_capacity(capacity, DEFAULT_LABEL_CAPACITY)
    }

    pub fn with_label_capacity(capacity: usize, label_capacity: usize) -> Self {
        Self {
            primitives: Vec::with_capacity(capacity),
            capacity,
            label_capacity,
            dropped: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn label_capacity(&self) -> usize {
        self.label_capacity
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.primitives.len() >= self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.primitives.len())
    }

    /// Number of appends rejected since the last `clear`.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn primitives(&self) -> &[GeometryPrimitive] {
        &self.primitives
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeometryPrimitive> {
        self.primitives.iter()
    }

    pub fn push(&mut self, primitive: GeometryPrimitive) -> AppendStatus {
        if self.is_full() {
            return self.reject();
        }
        self.primitives.push(primitive);
        AppendStatus::Appended
    }

    /// Counts a rejected append without building the primitive.
    pub(super) fn reject(&mut self) -> AppendStatus {
        self.dropped += 1;
        AppendStatus::Dropped
    }

    /// Host-side frame reset.
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.dropped = 0;
    }

    /// Truncates `text` to what fits in one host label slot, keeping the
    /// cut on a UTF-8 boundary.
    pub fn fit_label(&self, text: &str) -> String {
        let max_bytes = self.label_capacity.saturating_sub(1);
        if text.len() <= max_bytes {
            return text.to_string();
        }
        let mut end = max_bytes;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text[..end].to_string()
    }
}

impl<'a> IntoIterator for &'a GeometryBuffer {
    type Item = &'a GeometryPrimitive;
    type IntoIter = std::slice::Iter<'a, GeometryPrimitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}
