//! RPC (Remote Procedure Call) protocol implementation as specified in RFC 5531 (previously RFC 1057).
//!
//! The RPC protocol enables programs to call procedures on remote systems as if
//! they were local calls. It is the transport layer of the NFS, MOUNT and
//! PORTMAP protocols.
//!
//! This module implements RPC version 2 with the following features:
//!
//! 1. Message framing for TCP using the Record Marking Standard ([`SocketMessageHandler`])
//! 2. The per-procedure Call/Reply contract ([`Procedure`], [`StatusProcedure`], [`Reply`])
//! 3. Program/version/procedure number dispatching ([`Dispatcher`])
//! 4. AUTH_UNIX credentials, decoded and handed to handlers ([`CallContext`])
//! 5. A small client for issuing calls ([`RpcClient`])

mod client;
mod context;
mod dispatch;
mod procedure;
pub mod wire;

pub use client::{RpcClient, RpcError};
pub use context::{CallContext, ConnectionContext};
pub use dispatch::{Dispatcher, Program};
pub use procedure::{Message, Procedure, Reply, Status, StatusProcedure};
pub(crate) use procedure::{plain_procedure, status_procedure};
pub use wire::{HandlerPanic, SocketMessageHandler};

/// Largest record accepted from a peer, all fragments included
pub const MAX_RPC_RECORD_LENGTH: usize = 8 * 1024 * 1024;
