pub mod chunk;
pub mod gelf_udp;

pub use gelf_udp::GelfUdpSink;
