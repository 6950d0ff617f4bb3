pub mod capture;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod session;
pub mod studio;

pub use capture::{CaptureSource, CapturedImage, FileSource};
pub use config::{StudioConfig, TimeoutConfig};
pub use error::{Result, StudioError};
pub use models::{Gallery, GenerationRequest, ResultItem, StreamEvent};
pub use session::{SelectedImage, SessionStatus, StudioSession};
pub use studio::{SingleClient, StreamClient, StreamDecoder, StudioClient};
