mod engine_factory;
#[cfg(feature = "local-whisper")]
mod local_whisper_engine;
mod mock_recognizer;
mod remote_whisper_engine;

pub use engine_factory::RecognitionEngineFactory;
#[cfg(feature = "local-whisper")]
pub use local_whisper_engine::LocalWhisperEngine;
pub use mock_recognizer::MockRecognizer;
pub use remote_whisper_engine::RemoteWhisperEngine;
