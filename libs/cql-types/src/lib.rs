pub mod blob;
pub mod collection;
pub mod cursor;
pub mod custom;
pub mod decimal;
pub mod duration;
pub mod error;
pub mod float;
pub mod hash;
pub mod inet;
pub mod map;
pub mod numeric;
pub mod set;
pub mod time;
pub mod timestamp;
pub mod tuple;
pub mod types;
pub mod user_type;
pub mod uuids;
pub mod value;
pub mod varint;

pub use blob::Blob;
pub use collection::Collection;
pub use cursor::{CursorKey, HostCursor};
pub use custom::Custom;
pub use decimal::Decimal;
pub use duration::Duration;
pub use error::{ErrorKind, Result, ValueError};
pub use float::Float;
pub use inet::Inet;
pub use map::Map;
pub use numeric::{Bigint, NumberArg, Smallint, Tinyint};
pub use set::Set;
pub use time::{Date, Time};
pub use timestamp::{MonotonicGenerator, Timestamp, TimestampGenerator};
pub use tuple::Tuple;
pub use types::{CqlType, ScalarKind, TypeArg};
pub use user_type::UserTypeValue;
pub use uuids::{Timeuuid, Uuid};
pub use value::Value;
pub use varint::Varint;
