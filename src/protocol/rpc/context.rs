//! Per-connection and per-call context handed to procedure handlers.
//!
//! [`ConnectionContext`] is created once for every accepted connection and
//! identifies the peer. [`CallContext`] is built from it for each call and adds
//! what the call header carried: the transaction id, the program address and
//! the caller's AUTH_UNIX credentials when it sent any.

use std::fmt;

use crate::protocol::xdr::rpc::{auth_unix, call_body};

/// Identity of one transport connection
#[derive(Clone, Debug, Default)]
pub struct ConnectionContext {
    /// Port number on which the server is listening
    pub local_port: u16,
    /// Client's network address (IP:port) used for logging
    pub client_addr: String,
}

/// Represents the execution context of one RPC call
///
/// Credentials are decoded but never verified: AUTH_UNIX is acknowledged so a
/// handler can apply its own policy, and every other flavor is treated as
/// anonymous.
#[derive(Clone)]
pub struct CallContext {
    /// Transaction id of the call
    pub xid: u32,
    /// Port number on which the server is listening
    pub local_port: u16,
    /// Client's network address (IP:port)
    pub client_addr: String,
    pub prog: u32,
    pub vers: u32,
    pub proc: u32,
    /// UNIX-style credentials, when the caller used AUTH_UNIX
    pub auth: Option<auth_unix>,
}

impl CallContext {
    /// Builds the context of the call `xid` received over `conn`.
    pub fn new(conn: &ConnectionContext, xid: u32, call: &call_body) -> CallContext {
        CallContext {
            xid,
            local_port: conn.local_port,
            client_addr: conn.client_addr.clone(),
            prog: call.prog,
            vers: call.vers,
            proc: call.proc,
            auth: call.cred.as_unix(),
        }
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("rpc::CallContext")
            .field("xid", &self.xid)
            .field("client_addr", &self.client_addr)
            .field("prog", &self.prog)
            .field("vers", &self.vers)
            .field("proc", &self.proc)
            .field("uid", &self.auth.as_ref().map(|a| a.uid))
            .finish()
    }
}
