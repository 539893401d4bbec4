pub mod c0;
pub mod charset;
pub mod handler;
pub mod palette;
pub mod processor;

pub use palette::PaletteName;
pub use processor::Vte;
