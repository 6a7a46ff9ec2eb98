//! Protocol module implements the wire protocols of an NFS version 3 server.
//!
//! This module contains three main components:
//!
//! - `xdr`: External Data Representation (XDR) for serialization and deserialization
//!   of data structures according to RFC 4506, and the message structures of the RPC,
//!   NFS, MOUNT and PORTMAP protocols.
//!
//! - `rpc`: Remote Procedure Call (RPC) protocol implementation as defined in RFC 5531:
//!   record marking, the Call/Reply contract of a procedure and dispatching of calls.
//!
//! - `nfs`: The procedures of NFS version 3 (RFC 1813), MOUNT and PORTMAP.
//!
//! The NFS protocol is a network file system protocol originally designed by Sun Microsystems.
//! It is stateless, using file handles to identify files rather than path names.

pub mod nfs;
pub mod rpc;
pub mod xdr;
