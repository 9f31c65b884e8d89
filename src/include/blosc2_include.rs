// Corresponds to c-blosc2/include/blosc2.h, the umbrella header that most
// translation units in c-blosc2 pull in for constants and shared typedefs.
// Internally we keep the actual definitions in `internal::constants`; this
// module just re-exports them under the path the rest of the crate expects,
// plus the handful of symbols that only ever show up at this umbrella level.

pub use crate::internal::constants::*;
pub use crate::include::codecs_registry::*;
pub use crate::include::filters_registry::*;

/// Maximum typesize for which splitting a block across independent
/// per-byte-offset streams still pays off. Above this, the per-stream
/// bookkeeping overhead eats the gains from slicing on typesize boundaries.
pub const MAX_STREAMS: u8 = 16;
