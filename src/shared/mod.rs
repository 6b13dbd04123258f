//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Konfiguration, die zwischen `app` und `render` geteilt wird.

pub mod options;

pub use options::{CalloutOffsetPolicy, SyncOptions};
pub use options::{CALLOUT_BOX_SHADOW, LABEL_CLASS_PREFIX, LABEL_FONT_SIZE};
