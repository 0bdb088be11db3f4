use super::primitive::{AttachedImage, PaintPrimitive};

/// Destination for the primitives produced while painting a viewport.
pub trait PaintSink {
    /// Adds a primitive sorted on its own; later attachments go onto it.
    fn add_parent(&mut self, primitive: PaintPrimitive) -> usize;

    /// Adds a primitive sorted together with the most recent parent.
    /// Acts as a parent when there is none yet.
    fn add_child(&mut self, primitive: PaintPrimitive) -> usize;

    /// Adds a parent that never receives attachments, such as a floating marker.
    fn add_marker(&mut self, primitive: PaintPrimitive) -> usize;

    /// Draws an image in the slot of the current attach target.
    /// Returns false when nothing has been added yet.
    fn attach(&mut self, image: AttachedImage) -> bool;
}

/// In-memory sink that keeps primitives in submission order.
#[derive(Debug, Default, Clone)]
pub struct PaintList {
    primitives: Vec<PaintPrimitive>,
    last_parent: Option<usize>,
    attach_target: Option<usize>,
}

impl PaintList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[PaintPrimitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn into_primitives(self) -> Vec<PaintPrimitive> {
        self.primitives
    }

    /// Forgets the parent and attach target so a new tile cannot attach onto
    /// the previous tile's primitives.
    pub fn begin_tile(&mut self) {
        self.last_parent = None;
        self.attach_target = None;
    }

    /// Total number of attached images across all primitives.
    pub fn attachment_count(&self) -> usize {
        self.primitives
            .iter()
            .map(|primitive| primitive.attached.len())
            .sum()
    }

    fn push(&mut self, primitive: PaintPrimitive) -> usize {
        self.primitives.push(primitive);
        self.primitives.len() - 1
    }
}

impl PaintSink for PaintList {
    fn add_parent(&mut self, mut primitive: PaintPrimitive) -> usize {
        primitive.parent = None;
        let index = self.push(primitive);
        self.last_parent = Some(index);
        self.attach_target = Some(index);
        index
    }

    fn add_child(&mut self, mut primitive: PaintPrimitive) -> usize {
        let Some(parent) = self.last_parent else {
            return self.add_parent(primitive);
        };
        primitive.parent = Some(parent);
        let index = self.push(primitive);
        self.attach_target = Some(index);
        index
    }

    fn add_marker(&mut self, mut primitive: PaintPrimitive) -> usize {
        primitive.parent = None;
        self.push(primitive)
    }

    fn attach(&mut self, image: AttachedImage) -> bool {
        let Some(target) = self.attach_target else {
            return false;
        };
        match self.primitives.get_mut(target) {
            Some(primitive) => {
                primitive.attached.push(image);
                true
            }
            None => false,
        }
    }
}
