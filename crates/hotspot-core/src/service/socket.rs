//! UDP socket setup.

use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};

/// Create a non-blocking UDP socket bound exclusively to `addr`.
///
/// Peers report by unicast, so a second listener on the same port would
/// split their datagrams between processes. No reuse options are set and a
/// port already in use fails the bind.
pub fn create_listener_socket(addr: SocketAddr) -> Result<std::net::UdpSocket, std::io::Error> {
    let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))?;

    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;

    Ok(socket.into())
}

/// Create a non-blocking UDP socket for sending, with broadcast enabled.
pub fn create_sender_socket(target: SocketAddr) -> Result<std::net::UdpSocket, std::io::Error> {
    let socket = Socket::new(Domain::for_address(target), Type::DGRAM, Some(Protocol::UDP))?;

    if target.is_ipv4() {
        socket.set_broadcast(true)?;
    }

    let local: SocketAddr = if target.is_ipv4() {
        SocketAddr::from(([0, 0, 0, 0], 0))
    } else {
        SocketAddr::from(([0u16; 8], 0))
    };
    socket.bind(&local.into())?;
    socket.set_nonblocking(true)?;

    Ok(socket.into())
}
