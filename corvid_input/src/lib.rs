pub mod encoder;
pub mod key;

pub use encoder::KeyEncoder;
pub use key::{Action, Key, KeyEvent, Mods};
