//! Protocol types shared by the codec and the connection loop.
//!
//! - [`RequestHeader`]: a parsed request line plus headers, before a body is attached
//! - [`PayloadSize`]: how the request body is framed on the wire
//! - [`HttpError`], [`ParseError`], [`SendError`]: the error hierarchy

mod payload;
pub use payload::PayloadSize;

mod request;
pub use request::RequestHeader;
pub(crate) use request::is_keep_alive;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
