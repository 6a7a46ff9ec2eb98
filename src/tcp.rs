//! The TCP module serves RPC programs over TCP.
//!
//! This module implements a TCP listener that:
//! - Accepts connections from RPC clients
//! - Reassembles record-marked calls and hands them to a [`Dispatcher`]
//! - Writes reply records back in the order their handlers complete
//!
//! One listener serves every program of its dispatcher, so NFS, MOUNT and
//! PORTMAP can share a single port.

use std::io;
use std::net::{IpAddr, SocketAddr};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info};

use crate::protocol::rpc::{
    ConnectionContext, Dispatcher, HandlerPanic, SocketMessageHandler, MAX_RPC_RECORD_LENGTH,
};

/// RPC TCP connection handler that listens for incoming client connections
/// and processes RPC messages over TCP transport.
pub struct RpcTcpListener {
    /// TCP Listener for accepting incoming connections
    listener: TcpListener,
    /// Address the listener is bound to
    local_addr: SocketAddr,
    /// Programs served on every connection
    dispatcher: Dispatcher,
    /// Largest record accepted from a client
    max_record_length: usize,
}

/// Generates a local loopback IP address from a 16-bit host number
/// Used for creating multiple local test addresses in the 127.88.x.y range
pub fn generate_host_ip(hostnum: u16) -> String {
    format!("127.88.{}.{}", ((hostnum >> 8) & 0xFF) as u8, (hostnum & 0xFF) as u8)
}

/// Processes an established TCP socket connection from an RPC client
///
/// Socket bytes are fed to a [`SocketMessageHandler`] running on its own
/// task, and the reply records it produces are written back as they arrive.
/// Returns when the client closes the connection or the connection can no
/// longer be framed.
///
/// # Arguments
///
/// * `socket` - The established TCP connection to the client
/// * `dispatcher` - Programs served on this connection
/// * `conn` - Identity of the connection
/// * `max_record_length` - Largest record accepted from the client
async fn process_socket(
    mut socket: TcpStream,
    dispatcher: Dispatcher,
    conn: ConnectionContext,
    max_record_length: usize,
) -> Result<(), anyhow::Error> {
    let (message_handler, mut socksend, mut msgrecvchan) =
        SocketMessageHandler::new(&dispatcher, conn);
    let mut message_handler = message_handler.with_max_record_length(max_record_length);
    let _ = socket.set_nodelay(true);

    tokio::spawn(async move {
        loop {
            if let Err(e) = message_handler.read().await {
                debug!("Message loop broken due to {:?}", e);
                break;
            }
        }
    });
    loop {
        tokio::select! {
            _ = socket.readable() => {
                let mut buf = [0; 128_000];

                match socket.try_read(&mut buf) {
                    Ok(0) => {
                        return Ok(());
                    }
                    Ok(n) => {
                        if let Err(e) = socksend.write_all(&buf[..n]).await {
                            debug!("Message handler gone: {:?}", e);
                            return Err(e.into());
                        }
                    }
                    Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => {}
                    Err(e) => {
                        debug!("Message handling closed : {:?}", e);
                        return Err(e.into());
                    }
                }
            },
            reply = msgrecvchan.recv() => {
                match reply {
                    Some(Err(e)) => {
                        if let Some(panic) = e.downcast_ref::<HandlerPanic>() {
                            error!("Aborting: {}", panic);
                            std::process::abort();
                        }
                        debug!("Message handling closed : {:?}", e);
                        return Err(e);
                    }
                    Some(Ok(record)) => {
                        if let Err(e) = socket.write_all(&record).await {
                            error!("Write error {:?}", e);
                            return Err(e.into());
                        }
                    }
                    None => {
                        return Err(anyhow::anyhow!("Unexpected socket context termination"));
                    }
                }
            }
        }
    }
}

/// Interface for RPC TCP servers.
#[async_trait]
pub trait RpcTcp: Send + Sync {
    /// Returns the actual port number on which the server is listening
    ///
    /// This is especially useful when binding to port 0, which allows the OS
    /// to assign any available port.
    fn get_listen_port(&self) -> u16;

    /// Returns the IP address on which the server is listening
    ///
    /// This is useful with the "auto" IP address feature, to determine the
    /// loopback address actually picked.
    fn get_listen_ip(&self) -> IpAddr;

    /// Accepts connections and serves them, each on its own task.
    ///
    /// Only returns if there's an error with the underlying TCP listener.
    async fn handle_forever(&self) -> io::Result<()>;
}

impl RpcTcpListener {
    /// Creates a new RPC TCP listener bound to the specified IP address and port
    ///
    /// # Arguments
    ///
    /// * `ipstr` - IP address and port in the format "IP:PORT" (e.g. "127.0.0.1:2049")
    ///   Special value "auto:PORT" attempts to find an available local address
    /// * `dispatcher` - Programs to serve
    ///
    /// # Returns
    ///
    /// A Result containing either the new [`RpcTcpListener`] or an IO error
    pub async fn bind(ipstr: &str, dispatcher: Dispatcher) -> io::Result<RpcTcpListener> {
        let (ip, port) = ipstr.split_once(':').ok_or_else(|| {
            io::Error::new(io::ErrorKind::AddrNotAvailable, "IP Address must be of form ip:port")
        })?;
        let port = port.parse::<u16>().map_err(|_| {
            io::Error::new(io::ErrorKind::AddrNotAvailable, "Port not in range 0..=65535")
        })?;

        if ip != "auto" {
            return RpcTcpListener::bind_internal(ip, port, dispatcher).await;
        }

        const NUM_TRIES: u16 = 32;
        for try_ip in 1..=NUM_TRIES {
            let ip = generate_host_ip(try_ip);
            let result = RpcTcpListener::bind_internal(&ip, port, dispatcher.clone()).await;

            if result.is_ok() {
                return result;
            }
        }

        Err(io::Error::other("Can't bind automatically"))
    }

    async fn bind_internal(
        ip: &str,
        port: u16,
        dispatcher: Dispatcher,
    ) -> io::Result<RpcTcpListener> {
        let ipstr = format!("{ip}:{port}");
        let listener = TcpListener::bind(&ipstr).await?;
        let local_addr = listener.local_addr()?;
        info!("Listening on {:?}", local_addr);

        Ok(RpcTcpListener {
            listener,
            local_addr,
            dispatcher,
            max_record_length: MAX_RPC_RECORD_LENGTH,
        })
    }

    /// Caps the size of a record accepted from a client. A client sending a
    /// larger record is disconnected.
    pub fn with_max_record_length(mut self, max_record_length: usize) -> Self {
        self.max_record_length = max_record_length;
        self
    }
}

#[async_trait]
impl RpcTcp for RpcTcpListener {
    fn get_listen_port(&self) -> u16 {
        self.local_addr.port()
    }

    fn get_listen_ip(&self) -> IpAddr {
        self.local_addr.ip()
    }

    async fn handle_forever(&self) -> io::Result<()> {
        loop {
            let (socket, peer) = self.listener.accept().await?;
            let conn = ConnectionContext {
                local_port: self.local_addr.port(),
                client_addr: peer.to_string(),
            };
            info!("Accepting connection from {}", conn.client_addr);
            debug!("Accepting socket {:?} {:?}", socket, conn);
            let dispatcher = self.dispatcher.clone();
            let max_record_length = self.max_record_length;
            tokio::spawn(async move {
                if let Err(e) = process_socket(socket, dispatcher, conn, max_record_length).await {
                    debug!("Connection closed: {:?}", e);
                }
            });
        }
    }
}
