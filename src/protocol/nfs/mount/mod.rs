//! MOUNT protocol for NFS version 3 as specified in RFC 1813 Appendix I.
//! <https://datatracker.ietf.org/doc/html/rfc1813#appendix-I>
//!
//! MNT is the only procedure with a status-discriminated result; the other
//! procedures cannot fail at the protocol level.

use crate::protocol::rpc::Program;
use crate::protocol::xdr::mount::{PROGRAM, VERSION};

mod dump;
mod export;
mod mnt;
mod null;
mod umnt;
mod umnt_all;

pub use dump::Dump;
pub use export::Export;
pub use mnt::Mnt;
pub use null::Null;
pub use umnt::Umnt;
pub use umnt_all::UmntAll;

/// An empty procedure table for MOUNT version 3.
pub fn program() -> Program {
    Program::new(PROGRAM, VERSION)
}
