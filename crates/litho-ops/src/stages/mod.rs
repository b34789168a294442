//! The seven pipeline stages (§2, §4), run in this module's declaration
//! order by [`crate::render::render`].

mod filmstock;
mod grain;
mod halftone;
mod inkbleed;
mod papertooth;
mod resample;
mod velox;

pub use filmstock::film_stock;
pub use grain::grain;
pub use halftone::{halftone, HalftoneContext};
pub use inkbleed::ink_bleed;
pub use papertooth::{apply_paper_tooth, build_paper_map};
pub use resample::resample;
pub use velox::velox;
