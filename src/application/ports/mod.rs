mod media_transcoder;
mod speech_recognizer;
mod storage_gateway;

pub use media_transcoder::{MediaTranscoder, TranscodeError};
pub use speech_recognizer::{RecognitionError, SpeechRecognizer};
pub use storage_gateway::{StorageGateway, StorageGatewayError};
