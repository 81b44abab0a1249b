mod address_variations;
mod consensus;
mod regional_fallback;

pub use self::{address_variations::*, consensus::*, regional_fallback::*};

mod prelude {
    pub use crate::entities::*;
}
