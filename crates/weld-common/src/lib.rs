pub mod errors;
pub mod options;
pub mod protocol;
pub mod types;

pub use errors::{BridgeError, ConfigError, WeldError};
pub use options::PageOptions;
pub use protocol::{Envelope, HostMessage};
pub use types::{Dimensions, MaskRect};

pub type Result<T> = std::result::Result<T, WeldError>;
