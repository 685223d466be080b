use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

/// Address other machines on the LAN can reach us at.
///
/// Connecting a UDP socket only asks the OS for a route, no packet is sent,
/// so this works offline as long as a default route exists.
pub fn local_ip() -> IpAddr {
    let probe = || -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect("192.0.2.1:80")?;
        Ok(socket.local_addr()?.ip())
    };

    match probe() {
        Ok(ip) if !ip.is_unspecified() => ip,
        _ => IpAddr::V4(Ipv4Addr::LOCALHOST),
    }
}

/// The URL the operator shares with uploaders.
pub fn share_url(bind: SocketAddr) -> String {
    let host = if bind.ip().is_unspecified() {
        local_ip()
    } else {
        bind.ip()
    };
    format!("http://{}", SocketAddr::new(host, bind.port()))
}
