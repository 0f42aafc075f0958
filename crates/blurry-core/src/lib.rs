pub mod consts;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod pixels;
pub mod quality;
pub mod rename;
