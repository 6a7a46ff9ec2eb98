//! NFS Wire - the wire protocol layer of an NFS version 3 server in Rust
//!
//! This library implements everything between a TCP socket and a file system:
//! ONC RPC record framing, the XDR codec, the NFSv3, MOUNT and PORTMAP argument
//! and result structures, and dispatch of decoded calls to handlers supplied
//! by the embedding server. It does not implement the file system itself.
//!
//! ## Supported Features
//!
//! - Every NFSv3 procedure defined in RFC 1813, with per-procedure failure
//!   statuses enforced when a reply is built
//! - MOUNT version 3 procedures
//! - PORTMAP version 2 with an in-memory mapping table
//! - Multi-fragment record reassembly and a per-record size cap
//! - Asynchronous operation with Tokio runtime, one task per call
//! - A small RPC client for tests and tools
//!
//! ## Main Components
//!
//! - `protocol`: XDR (External Data Representation) codec, RPC messages and
//!   dispatch, and the NFS, MOUNT and PORTMAP procedure declarations.
//!
//! - `tcp`: TCP-based server that accepts client connections and hands their
//!   calls to a [`protocol::rpc::Dispatcher`].
//!
//! - `fs_util`: conversions between host file metadata and NFS attributes.
//!
//! ## Standards Compliance
//!
//! This implementation follows these RFCs:
//! - RFC 1813: NFS Version 3 Protocol Specification
//! - RFC 5531: RPC: Remote Procedure Call Protocol Specification Version 2 (obsoletes RFC 1831)
//! - RFC 4506: XDR: External Data Representation Standard (obsoletes RFC 1832)
//! - RFC 1057: Appendix A, Port Mapper Program Protocol
//!
//! ## Usage
//!
//! Register handlers on a [`protocol::rpc::Program`] per served program, gather
//! the programs into a [`protocol::rpc::Dispatcher`] and serve it with
//! [`tcp::RpcTcpListener`].

pub mod protocol;

#[cfg(unix)]
pub mod fs_util;

pub mod tcp;

pub use protocol::xdr;
