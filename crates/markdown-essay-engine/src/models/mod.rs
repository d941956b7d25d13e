pub mod live_buffer;

pub use live_buffer::LiveBuffer;
