mod bundle;
mod locator;
mod transcript;

pub use bundle::{StreamingBundle, PLAYLIST_FILE_NAME};
pub use locator::{ResolvedSource, SourceLocator};
pub use transcript::{Transcript, TranscriptSegment, WordSpan};
