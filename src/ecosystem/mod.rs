mod load;
mod model;

pub use load::load_ecosystem;
pub use model::{EcosystemData, LinkRecord, NodeRecord, palette_color};
