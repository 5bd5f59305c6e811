use serde::Serialize;


#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Key {
    pub widths: Vec<f64>,
    pub layer: (u16, u16),
}

impl Key {
    pub fn new(width: f64) -> Self {
        Self {
            widths: vec![width, width],
            layer: (1, 0),
        }
    }
}
