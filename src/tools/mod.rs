pub mod autocomplete;
pub mod sticker;

pub use autocomplete::*;
pub use sticker::*;
