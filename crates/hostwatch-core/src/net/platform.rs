#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::SocketImpl;

#[cfg(not(unix))]
compile_error!("hostwatch only supports unix platforms");
