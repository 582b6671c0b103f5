//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and board-specific implementations. Display and persistent-store
//! traits live in `dotpage-display` and `dotpage-hal`.

pub mod annunciator;
pub mod clock;
pub mod input;
pub mod storage;

pub use annunciator::{play, Annunciator, Tone, ALARM, CHIRP, CLICK, NOTE_C2, NOTE_C3, REST};
pub use clock::{busy_wait, Clock};
pub use input::{EncoderPosition, InputEvent, InputSource};
pub use storage::{DirEntry, StorageCatalog, StorageError};
