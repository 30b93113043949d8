// Pointer state fed into the force model every tick. The same struct holds
// the vortex center, which only matters while vortex mode is on.

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pointer {
    pub pos: [f64; 2],
    pub active: bool,
}

impl Pointer {
    pub fn new(pos: [f64; 2]) -> Self {
        Pointer { pos, active: true }
    }

    pub fn inactive() -> Self {
        Pointer::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.pos = [x, y];
        self.active = true;
    }

    // Keeps the last position around; only the flag changes
    pub fn release(&mut self) {
        self.active = false;
    }
}
