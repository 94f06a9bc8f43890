pub mod decode;
pub mod io;
