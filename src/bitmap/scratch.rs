/// Reusable staging buffer owned by a bitmap.
///
/// Array and run merges build their results here before they are copied
/// into a fresh container store, so a bulk operation touching many
/// containers does not allocate one intermediate buffer per container. The
/// contents are opaque between operations: `staging` clears the buffer on
/// entry and the length only grows within a single operation.
pub(crate) struct Scratch {
    staged: Vec<u16>,
}

impl Scratch {
    pub fn new() -> Scratch {
        Scratch { staged: Vec::new() }
    }

    /// Clears and hands out the staging buffer.
    pub fn staging(&mut self) -> &mut Vec<u16> {
        self.staged.clear();
        &mut self.staged
    }
}
